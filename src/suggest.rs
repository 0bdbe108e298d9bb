use crate::{ReviewStore, ScrapeError};
use async_trait::async_trait;

/// External collaborator that turns negative-review keywords into drafted
/// product improvements. Implementations typically wrap an LLM chain; this
/// crate only defines the seam and never talks to one itself.
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn generate(&self, keywords: &str) -> Result<String, ScrapeError>;
}

/// Hands the store's negative-review keywords to `generator` and returns
/// its draft.
///
/// Returns `Ok(None)` without calling the generator when there are no
/// negative keywords to work from.
pub async fn draft_improvements<G>(
    generator: &G,
    store: &ReviewStore,
) -> Result<Option<String>, ScrapeError>
where
    G: SuggestionGenerator + ?Sized,
{
    let keywords = store.unique_negative_keywords();
    if keywords.is_empty() {
        return Ok(None);
    }
    let draft = generator.generate(&keywords.join(" ")).await?;
    Ok(Some(draft))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReviewRecord, Site};
    use std::sync::Mutex;

    struct RecordingGenerator {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SuggestionGenerator for RecordingGenerator {
        async fn generate(&self, keywords: &str) -> Result<String, ScrapeError> {
            self.calls.lock().unwrap().push(keywords.to_string());
            Ok(format!("improve: {keywords}"))
        }
    }

    fn record(rating: u8, comments: &str) -> ReviewRecord {
        ReviewRecord {
            product: "HEM 7120".into(),
            site: Site::Amazon,
            name: "A".into(),
            rating,
            comments: comments.into(),
            source_url: "https://www.amazon.in/x".into(),
            page: 1,
            rating_unparsed: false,
        }
    }

    #[tokio::test]
    async fn hands_joined_keywords_to_the_generator() {
        let generator = RecordingGenerator {
            calls: Mutex::new(Vec::new()),
        };
        let mut store = ReviewStore::new();
        store.append(record(5, "good display"));
        store.append(record(1, "cuff leaks air"));

        let draft = draft_improvements(&generator, &store).await.unwrap();
        assert_eq!(draft.as_deref(), Some("improve: cuff leaks air"));
        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], "cuff leaks air");
    }

    #[tokio::test]
    async fn skips_the_generator_when_there_is_nothing_negative() {
        let generator = RecordingGenerator {
            calls: Mutex::new(Vec::new()),
        };
        let mut store = ReviewStore::new();
        store.append(record(5, "good"));

        let draft = draft_improvements(&generator, &store).await.unwrap();
        assert_eq!(draft, None);
        assert!(generator.calls.lock().unwrap().is_empty());
    }
}
