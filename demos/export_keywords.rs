use async_trait::async_trait;
use review_scraper::{
    draft_improvements, ReviewScraper, ScrapeError, ScrapeOptions, SuggestionGenerator,
};

/// Placeholder for the real suggestion collaborator (usually an LLM chain);
/// echoes the keywords back so the handoff can be seen end to end.
struct EchoGenerator;

#[async_trait]
impl SuggestionGenerator for EchoGenerator {
    async fn generate(&self, keywords: &str) -> Result<String, ScrapeError> {
        Ok(format!("Draft improvements around: {keywords}"))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .expect("usage: export_keywords <product-url>");

    let scraper = ReviewScraper::new();
    let job = scraper.scrape(&url, &ScrapeOptions::default()).await?;
    println!(
        "{} records from {} ({} warnings)",
        job.records.len(),
        job.input_url,
        job.warnings.len()
    );

    let store = job.into_store();
    let keywords = store.unique_negative_keywords();
    println!("negative keywords: {}", keywords.join(" "));

    match draft_improvements(&EchoGenerator, &store).await? {
        Some(draft) => println!("{draft}"),
        None => println!("no negative feedback to draft from"),
    }
    Ok(())
}
