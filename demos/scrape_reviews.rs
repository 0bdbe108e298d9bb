use clap::{value_parser, Arg, Command};
use review_scraper::{ReviewScraper, ScrapeOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("scrape_reviews")
        .about("Scrape marketplace reviews for one or more product URLs into a CSV")
        .arg(
            Arg::new("url")
                .required(true)
                .num_args(1..)
                .help("Product URL(s) on amazon, flipkart, or snapdeal"),
        )
        .arg(
            Arg::new("pages")
                .long("pages")
                .value_parser(value_parser!(u32))
                .default_value("2")
                .help("Review pages to fetch per URL"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .default_value("product_reviews.csv")
                .help("Output CSV path"),
        )
        .get_matches();

    let urls: Vec<&str> = matches
        .get_many::<String>("url")
        .expect("url is required")
        .map(String::as_str)
        .collect();
    let max_pages = *matches.get_one::<u32>("pages").expect("has default");
    let out = matches.get_one::<String>("out").expect("has default");

    let scraper = ReviewScraper::new();
    let options = ScrapeOptions {
        max_pages,
        ..ScrapeOptions::default()
    };

    let (store, jobs) = scraper.scrape_many(&urls, &options).await?;

    for job in &jobs {
        println!(
            "{}: {} records, {} warnings",
            job.input_url,
            job.records.len(),
            job.warnings.len()
        );
        for warning in &job.warnings {
            println!("  warning: {warning}");
        }
    }

    store.save_csv(out)?;
    println!("wrote {} records to {out}", store.len());
    Ok(())
}
