use crate::{RawReview, ReviewRecord, Site};

/// Job-level fields stamped onto every record normalized from one page.
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    pub site: Site,
    pub product: &'a str,
    pub source_url: &'a str,
    pub page: u32,
}

/// Converts a parsed review into its canonical record.
///
/// Returns `None` only when every field is absent. A partially missing
/// review is still emitted, with the gaps made explicit: an empty comment
/// string rather than a hole in the column, and a zero rating with
/// `rating_unparsed` set.
pub fn normalize(raw: &RawReview, ctx: &RecordContext<'_>) -> Option<ReviewRecord> {
    if raw.name.is_none() && raw.rating_raw.is_none() && raw.comments_raw.is_none() {
        return None;
    }

    let (rating, rating_unparsed) = match raw.rating_raw.as_deref() {
        Some(text) => parse_rating(text),
        None => (0, true),
    };

    Some(ReviewRecord {
        product: ctx.product.to_string(),
        site: ctx.site,
        name: raw.name.as_deref().unwrap_or("").trim().to_string(),
        rating,
        comments: raw.comments_raw.as_deref().unwrap_or("").trim().to_string(),
        source_url: ctx.source_url.to_string(),
        page: ctx.page,
        rating_unparsed,
    })
}

/// Parses the leading numeric component of a rating label.
///
/// "4.0 out of 5 stars" is 4, truncated toward zero and clamped to the
/// 0 to 5 scale. A label with no leading number ("Terrific") maps to 0
/// with the unparsed flag set.
fn parse_rating(text: &str) -> (u8, bool) {
    let leading = text.split_whitespace().next().unwrap_or("");
    match leading.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => ((value.trunc() as u8).min(5), false),
        _ => (0, true),
    }
}
