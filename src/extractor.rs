use crate::{ScrapeError, Site};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

/// Snapdeal renders two pinned entries at the top of every review list; the
/// scraper has always skipped them. Whether they are promotional slots is
/// unverified, so the behavior is kept as-is.
pub const SNAPDEAL_PINNED_SKIP: usize = 2;

/// Flipkart appends a "READ MORE" toggle to truncated comments; the text
/// node keeps the label in arbitrary case and spacing.
static READ_MORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*READ\s+MORE\s*").expect("valid regex"));

/// Fields as they appear in the page, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReview {
    pub name: Option<String>,
    pub rating_raw: Option<String>,
    pub comments_raw: Option<String>,
}

/// Review extractor, responsible for turning a marketplace's review-page
/// markup into raw review entries.
#[derive(Debug, Clone, Default)]
pub struct ReviewExtractor;

impl ReviewExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parses one review page of `site` into raw entries, in document order.
    ///
    /// A page the extractor cannot interpret at all (an empty document) is a
    /// [`ScrapeError::Parse`]; a well-formed page that simply contains no
    /// review containers yields an empty vector.
    pub fn parse(&self, site: Site, html: &str) -> Result<Vec<RawReview>, ScrapeError> {
        if html.trim().is_empty() {
            return Err(ScrapeError::Parse("empty page content".into()));
        }

        let document = Html::parse_document(html);
        match site {
            Site::Amazon => self.parse_amazon(&document),
            Site::Flipkart => self.parse_flipkart(&document),
            Site::Snapdeal => self.parse_snapdeal(&document),
        }
    }

    fn parse_amazon(&self, document: &Html) -> Result<Vec<RawReview>, ScrapeError> {
        let container_sel = sel("div.a-section.review.aok-relative")?;
        let name_sel = sel("span.a-profile-name")?;
        let rating_sel = sel("i[data-hook='review-star-rating']")?;
        let comment_sel = sel("div.a-row.a-spacing-small.review-data")?;

        let mut reviews = Vec::new();
        for container in document.select(&container_sel) {
            let name = container.select(&name_sel).next();
            let rating = container.select(&rating_sel).next();
            let comment = container.select(&comment_sel).next();

            // A container missing any of the three elements is dropped
            // whole; partial data must never leak into a neighboring entry.
            let (Some(name), Some(rating), Some(comment)) = (name, rating, comment) else {
                debug!("skipping amazon review container with missing elements");
                continue;
            };

            reviews.push(RawReview {
                name: Some(element_text(&name)),
                rating_raw: Some(element_text(&rating)),
                comments_raw: Some(element_text(&comment)),
            });
        }
        Ok(reviews)
    }

    fn parse_flipkart(&self, document: &Html) -> Result<Vec<RawReview>, ScrapeError> {
        let container_sel = sel("div._27M-vq")?;
        let name_sel = sel("p._2sc7ZR._2V5EHH")?;
        let rating_sel = sel("div._3LWZlK")?;
        let comment_sel = sel("div.t-ZTKy")?;

        let mut reviews = Vec::new();
        for container in document.select(&container_sel) {
            let name = container.select(&name_sel).next().map(|el| element_text(&el));
            // Flipkart sometimes renders a word ("Terrific") instead of a
            // number here; the normalizer tolerates it.
            let rating_raw = container
                .select(&rating_sel)
                .next()
                .map(|el| element_text(&el));
            let comments_raw = container
                .select(&comment_sel)
                .next()
                .map(|el| element_text(&el))
                .map(|text| READ_MORE.replace_all(&text, "").trim().to_string());

            reviews.push(RawReview {
                name,
                rating_raw,
                comments_raw,
            });
        }
        Ok(reviews)
    }

    fn parse_snapdeal(&self, document: &Html) -> Result<Vec<RawReview>, ScrapeError> {
        let container_sel = sel("div.user-review")?;
        let star_sel = sel("i.sd-icon.sd-icon-star.active")?;
        let name_sel = sel("div._reviewUserName")?;
        let para_sel = sel("p")?;

        let mut reviews = Vec::new();
        for container in document.select(&container_sel).skip(SNAPDEAL_PINNED_SKIP) {
            // Snapdeal has no numeric rating text; the star count is the
            // rating.
            let stars = container.select(&star_sel).count();
            let name = container
                .select(&name_sel)
                .next()
                .and_then(|el| el.value().attr("title"))
                .map(|title| title.trim().to_string());
            let comments_raw = container.select(&para_sel).next().map(|el| element_text(&el));

            reviews.push(RawReview {
                name,
                rating_raw: Some(stars.to_string()),
                comments_raw,
            });
        }
        Ok(reviews)
    }
}

fn sel(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("invalid selector {css}: {e}")))
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
