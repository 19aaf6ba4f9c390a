//! Pagination module
//!
//! Cursor-based accumulation of paginated collections plus the
//! infinite-scroll trigger that drives it.
//!
//! # Overview
//!
//! A [`PageSource`] knows how to fetch one page for a cursor. A
//! [`PaginatedCursor`] owns a source, requests pages one at a time, and
//! concatenates their items in arrival order. [`InfiniteScroll`] feeds
//! sentinel visibility into the cursor.

mod cursor;
mod scroll;
mod types;

pub use cursor::PaginatedCursor;
pub use scroll::{InfiniteScroll, ScrollTrigger, DEFAULT_VISIBILITY_THRESHOLD};
pub use types::{FetchOutcome, FetchStatus, Page, PageSource};
