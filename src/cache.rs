#![cfg(feature = "cache")]

use crate::ReviewRecord;
use dashmap::DashMap;
use std::sync::Arc;

/// Memoizes normalized records per page URL, so re-running a job in the
/// same process (a dashboard re-render, say) does not hit the marketplace
/// again.
#[derive(Clone, Default)]
pub struct PageCache {
    pages: Arc<DashMap<String, Vec<ReviewRecord>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page_url: &str) -> Option<Vec<ReviewRecord>> {
        self.pages.get(page_url).map(|entry| entry.clone())
    }

    pub fn set(&self, page_url: String, records: Vec<ReviewRecord>) {
        self.pages.insert(page_url, records);
    }
}
