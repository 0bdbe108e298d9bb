use crate::{ReviewRecord, ScrapeError};
use std::collections::HashSet;
use std::io;
use std::path::Path;
use tracing::debug;

/// Column order of the serialized table. The header row is always emitted,
/// even for an empty store.
pub const CSV_HEADER: [&str; 5] = ["Product Name", "Site", "Name", "Rating", "Comments"];

/// Highest rating still counted as negative feedback when extracting
/// keywords for the suggestion collaborator.
pub const NEGATIVE_RATING_MAX: u8 = 2;

/// Accumulates normalized records across one or more scrape jobs and
/// serializes them.
///
/// Records keep insertion order (site-major, then page-major, then
/// within-page parser order), so serialized output is reproducible.
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    records: Vec<ReviewRecord>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: ReviewRecord) {
        self.records.push(record);
    }

    /// Appends all of `other`'s records after this store's own.
    pub fn merge(&mut self, other: ReviewStore) {
        self.records.extend(other.records);
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the store as CSV with the fixed header row.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), ScrapeError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;
        for record in &self.records {
            let rating = record.rating.to_string();
            csv_writer.write_record([
                record.product.as_str(),
                record.site.label(),
                record.name.as_str(),
                rating.as_str(),
                record.comments.as_str(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// In-memory CSV bytes, for download or display by a UI collaborator.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, ScrapeError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(buffer)
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), ScrapeError> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_csv(file)?;
        debug!(path = %path.as_ref().display(), records = self.records.len(), "wrote review CSV");
        Ok(())
    }

    /// JSON rendition of the records, for dashboard collaborators that do
    /// not want to re-parse CSV.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ScrapeError> {
        Ok(serde_json::to_vec_pretty(&self.records)?)
    }

    /// Words that appear in negative reviews (rating at most
    /// [`NEGATIVE_RATING_MAX`]) and in no other review.
    ///
    /// Comments are lowercased and split on whitespace; order of first
    /// occurrence is preserved and duplicates are removed. This is plain
    /// set arithmetic feeding the suggestion collaborator, not text
    /// analysis.
    pub fn unique_negative_keywords(&self) -> Vec<String> {
        let mut positive_words: HashSet<String> = HashSet::new();
        for record in self.records.iter().filter(|r| r.rating > NEGATIVE_RATING_MAX) {
            positive_words.extend(record.comments.to_lowercase().split_whitespace().map(String::from));
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut keywords = Vec::new();
        for record in self.records.iter().filter(|r| r.rating <= NEGATIVE_RATING_MAX) {
            for word in record.comments.to_lowercase().split_whitespace() {
                if !positive_words.contains(word) && seen.insert(word.to_string()) {
                    keywords.push(word.to_string());
                }
            }
        }
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;

    fn record(name: &str, rating: u8, comments: &str) -> ReviewRecord {
        ReviewRecord {
            product: "HEM 7120".into(),
            site: Site::Amazon,
            name: name.into(),
            rating,
            comments: comments.into(),
            source_url: "https://www.amazon.in/x/product-reviews/B0ABC".into(),
            page: 1,
            rating_unparsed: false,
        }
    }

    #[test]
    fn empty_store_still_emits_the_header_row() {
        let bytes = ReviewStore::new().to_csv_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), "Product Name,Site,Name,Rating,Comments");
    }

    #[test]
    fn csv_round_trip_preserves_row_count_and_column_order() {
        let mut store = ReviewStore::new();
        store.append(record("Asha", 5, "Great monitor"));
        store.append(record("Ben", 2, "Display, dim"));
        store.append(record("Chitra", 0, ""));

        let bytes = store.to_csv_bytes().unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(CSV_HEADER.to_vec())
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), store.len());
        assert_eq!(&rows[0][2], "Asha");
        assert_eq!(&rows[1][4], "Display, dim");
        assert_eq!(&rows[2][3], "0");
    }

    #[test]
    fn merge_appends_after_existing_records() {
        let mut first = ReviewStore::new();
        first.append(record("Asha", 5, "a"));
        let mut second = ReviewStore::new();
        second.append(record("Ben", 4, "b"));

        first.merge(second);
        assert_eq!(first.len(), 2);
        assert_eq!(first.records()[0].name, "Asha");
        assert_eq!(first.records()[1].name, "Ben");
    }

    #[test]
    fn negative_keywords_exclude_words_shared_with_positive_reviews() {
        let mut store = ReviewStore::new();
        store.append(record("Asha", 5, "great display quality"));
        store.append(record("Ben", 1, "display broke quickly"));
        store.append(record("Chitra", 2, "broke again"));

        let keywords = store.unique_negative_keywords();
        // "display" also appears in a positive review, so only the words
        // exclusive to negative feedback survive, first occurrence first.
        assert_eq!(keywords, vec!["broke", "quickly", "again"]);
    }

    #[test]
    fn negative_keywords_empty_when_no_negative_reviews() {
        let mut store = ReviewStore::new();
        store.append(record("Asha", 5, "great"));
        assert!(store.unique_negative_keywords().is_empty());
    }

    #[test]
    fn json_export_contains_every_record() {
        let mut store = ReviewStore::new();
        store.append(record("Asha", 5, "fine"));
        let json: Vec<ReviewRecord> =
            serde_json::from_slice(&store.to_json_bytes().unwrap()).unwrap();
        assert_eq!(json.len(), 1);
        assert_eq!(json[0].name, "Asha");
    }
}
