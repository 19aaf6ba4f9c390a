//! Client-side list filtering and sorting
//!
//! Derives a display order from accumulated items without touching them.

use crate::types::SortKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields a list view filters and sorts on
pub trait Listable {
    /// Name matched against the keyword
    fn display_name(&self) -> &str;

    fn rating(&self) -> f64;

    /// Creation or last-update time used by [`SortKey::Recent`]
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Keyword, rating threshold, and sort order for a list view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub min_rating: f64,
    #[serde(default)]
    pub sort: SortKey,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    #[must_use]
    pub fn min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether one item passes the keyword and rating filters
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        let keyword = self.keyword.trim().to_lowercase();
        matches_keyword(item, &keyword) && item.rating() >= self.min_rating
    }

    /// Filtered and sorted view of `items`
    ///
    /// The sort is stable: items that compare equal keep their
    /// accumulation order.
    pub fn apply<'a, T: Listable>(&self, items: &'a [T]) -> Vec<&'a T> {
        let keyword = self.keyword.trim().to_lowercase();
        let mut view: Vec<&T> = items
            .iter()
            .filter(|item| matches_keyword(*item, &keyword) && item.rating() >= self.min_rating)
            .collect();

        match self.sort {
            SortKey::Recent => view.sort_by(|a, b| b.timestamp().cmp(&a.timestamp())),
            SortKey::Rating => view.sort_by(|a, b| b.rating().total_cmp(&a.rating())),
        }
        view
    }
}

fn matches_keyword<T: Listable>(item: &T, lowered_keyword: &str) -> bool {
    lowered_keyword.is_empty() || item.display_name().to_lowercase().contains(lowered_keyword)
}
