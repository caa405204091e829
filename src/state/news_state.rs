//! News domain state.

use crate::api::{NewsArticle, NewsCategory};
use crate::refresh::RefreshStatus;
use chrono::{DateTime, Utc};

/// State for the news feed.
#[derive(Debug, Default)]
pub struct NewsState {
    /// Headlines for the active category, replaced wholesale on refetch.
    pub articles: Vec<NewsArticle>,
    /// The single active category.
    pub category: NewsCategory,
    /// Currently selected headline.
    pub selected_index: Option<usize>,
    /// Refresh status for the domain.
    pub status: RefreshStatus,
    /// Last successful update timestamp.
    pub last_updated: Option<DateTime<Utc>>,
}

impl NewsState {
    /// Whether any headlines are cached.
    pub fn has_cache(&self) -> bool {
        !self.articles.is_empty()
    }

    /// Switch to the next category; the old list is dropped so the next
    /// fetch starts from a clean loading state.
    pub fn cycle_category(&mut self) {
        self.category = self.category.next();
        self.articles.clear();
        self.selected_index = None;
    }
}
