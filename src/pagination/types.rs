//! Pagination types and traits
//!
//! Defines the page shape, the fetch-source abstraction, and the status
//! values the cursor moves through.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// One page of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T, C> {
    /// Items in server order
    pub items: Vec<T>,
    /// Cursor for the following page; `None` means this was the last one
    pub next_cursor: Option<C>,
}

impl<T, C> Page<T, C> {
    /// Create a page
    pub fn new(items: Vec<T>, next_cursor: Option<C>) -> Self {
        Self { items, next_cursor }
    }

    /// Create a final page
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// Whether another page follows
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Anything that can produce pages given a cursor
///
/// The cursor is opaque to the pagination machinery: it is only cloned,
/// handed back to the source, compared with the one that follows it, and
/// replaced. A next cursor equal to the one just sent ends the collection.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Record type of the collection
    type Item: Send;
    /// Opaque position token
    type Cursor: Clone + Debug + PartialEq + Send + Sync;

    /// Cursor for the first request
    fn initial_cursor(&self) -> Self::Cursor;

    /// Fetch one page starting at `cursor`
    async fn fetch_page(
        &self,
        cursor: Self::Cursor,
        limit: u32,
    ) -> Result<Page<Self::Item, Self::Cursor>>;
}

/// Where the cursor is in its fetch cycle
///
/// `Idle → Fetching → {Success | Error}`. `Success` and `Error` accept the
/// next trigger exactly like `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    #[default]
    Idle,
    Fetching,
    Success,
    Error,
}

impl FetchStatus {
    /// Check if a request is in flight
    pub fn is_fetching(self) -> bool {
        matches!(self, Self::Fetching)
    }
}

/// What a call to `fetch_next` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page arrived and `count` items were appended
    Fetched { count: usize },
    /// Another fetch was already in flight; nothing was sent
    Suppressed,
    /// The last page was already retrieved; nothing was sent
    Exhausted,
    /// `reset()` ran while this page was in flight; it was dropped
    Discarded,
}

impl FetchOutcome {
    /// Check if a network call produced appended items
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }
}
