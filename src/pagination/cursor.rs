//! Paginated fetch cursor
//!
//! Accumulates pages from a [`PageSource`] and guarantees at most one page
//! request in flight. All methods take `&self`: the check-and-transition to
//! `Fetching` happens under a short lock, so two `fetch_next()` futures
//! racing on one cursor produce exactly one request. The lock is never held
//! across an `.await`.

use super::types::{FetchOutcome, FetchStatus, PageSource};
use crate::error::{ApiError, Result};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

struct CursorState<T, C> {
    items: Vec<T>,
    cursor: C,
    exhausted: bool,
    status: FetchStatus,
    /// Bumped by `reset()`; results from an older generation are dropped
    generation: u64,
    pages_fetched: usize,
    last_error: Option<ApiError>,
}

impl<T, C> CursorState<T, C> {
    fn initial(cursor: C, generation: u64) -> Self {
        Self {
            items: Vec::new(),
            cursor,
            exhausted: false,
            status: FetchStatus::Idle,
            generation,
            pages_fetched: 0,
            last_error: None,
        }
    }
}

fn lock_state<T, C>(state: &Mutex<CursorState<T, C>>) -> MutexGuard<'_, CursorState<T, C>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the cursor to idle if the fetch future is dropped mid-flight
struct InFlight<'a, T, C> {
    state: &'a Mutex<CursorState<T, C>>,
    generation: u64,
    settled: bool,
}

impl<T, C> Drop for InFlight<'_, T, C> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = lock_state(self.state);
        if state.generation == self.generation && state.status.is_fetching() {
            debug!("Page fetch cancelled before completion");
            state.status = FetchStatus::Idle;
        }
    }
}

/// Cursor-driven accumulation of a paginated collection
pub struct PaginatedCursor<S: PageSource> {
    source: S,
    page_size: u32,
    state: Mutex<CursorState<S::Item, S::Cursor>>,
}

impl<S: PageSource> PaginatedCursor<S> {
    /// Create a cursor in the initial state; page size is clamped to at least 1
    pub fn new(source: S, page_size: u32) -> Self {
        let state = CursorState::initial(source.initial_cursor(), 0);
        Self {
            source,
            page_size: page_size.max(1),
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CursorState<S::Item, S::Cursor>> {
        lock_state(&self.state)
    }

    /// The underlying page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fixed number of items requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Current state machine position
    pub fn status(&self) -> FetchStatus {
        self.lock().status
    }

    /// Check if a request is in flight
    pub fn is_fetching(&self) -> bool {
        self.status().is_fetching()
    }

    /// True until a page arrives without a next cursor, or with one that
    /// did not advance
    pub fn has_more(&self) -> bool {
        !self.lock().exhausted
    }

    /// Cursor the next request will use
    pub fn cursor(&self) -> S::Cursor {
        self.lock().cursor.clone()
    }

    /// Number of accumulated items
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Check if nothing has been accumulated
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Pages appended since creation or the last reset
    pub fn pages_fetched(&self) -> usize {
        self.lock().pages_fetched
    }

    /// Classified error of the most recent failed fetch, cleared on success
    pub fn last_error(&self) -> Option<ApiError> {
        self.lock().last_error.clone()
    }

    /// Borrow the accumulated items
    pub fn with_items<R>(&self, f: impl FnOnce(&[S::Item]) -> R) -> R {
        f(&self.lock().items)
    }

    /// Copy of the accumulated items in arrival order
    pub fn items(&self) -> Vec<S::Item>
    where
        S::Item: Clone,
    {
        self.lock().items.clone()
    }

    /// Consume the cursor, keeping the accumulated items
    pub fn into_items(self) -> Vec<S::Item> {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .items
    }

    /// Drop everything and return to the initial cursor
    ///
    /// A page still in flight is discarded when it lands.
    pub fn reset(&self) {
        let initial = self.source.initial_cursor();
        let mut state = self.lock();
        let generation = state.generation.wrapping_add(1);
        debug!(
            "Resetting cursor after {} items in {} pages",
            state.items.len(),
            state.pages_fetched
        );
        *state = CursorState::initial(initial, generation);
    }

    /// Fetch the next page and append it
    ///
    /// Sends nothing if a fetch is already in flight ([`FetchOutcome::Suppressed`])
    /// or the last page was already seen ([`FetchOutcome::Exhausted`]). A
    /// failure leaves accumulated items untouched and is not retried.
    pub async fn fetch_next(&self) -> Result<FetchOutcome> {
        let (cursor, mut in_flight) = {
            let mut state = self.lock();
            if state.status.is_fetching() {
                debug!("Fetch already in flight, suppressing duplicate");
                return Ok(FetchOutcome::Suppressed);
            }
            if state.exhausted {
                return Ok(FetchOutcome::Exhausted);
            }
            state.status = FetchStatus::Fetching;
            let in_flight = InFlight {
                state: &self.state,
                generation: state.generation,
                settled: false,
            };
            (state.cursor.clone(), in_flight)
        };

        debug!(
            "Fetching page at cursor {:?} (limit {})",
            cursor, self.page_size
        );
        let result = self.source.fetch_page(cursor.clone(), self.page_size).await;
        in_flight.settled = true;

        let mut state = self.lock();
        if state.generation != in_flight.generation {
            debug!("Cursor was reset during fetch, discarding page");
            return Ok(FetchOutcome::Discarded);
        }

        match result {
            Ok(page) => {
                let count = page.items.len();
                state.items.extend(page.items);
                match page.next_cursor {
                    Some(next) if next == cursor => {
                        warn!("Next cursor {:?} did not advance, treating as last page", next);
                        state.exhausted = true;
                    }
                    Some(next) => state.cursor = next,
                    None => state.exhausted = true,
                }
                state.pages_fetched += 1;
                state.status = FetchStatus::Success;
                state.last_error = None;
                debug!(
                    "Appended {} items ({} total, more: {})",
                    count,
                    state.items.len(),
                    !state.exhausted
                );
                Ok(FetchOutcome::Fetched { count })
            }
            Err(e) => {
                warn!("Page fetch failed: {}", e);
                state.status = FetchStatus::Error;
                state.last_error = Some(e.to_api_error());
                Err(e)
            }
        }
    }

    /// Fetch pages sequentially until exhausted or `max_pages` were appended
    ///
    /// Also stops after an empty page, so a source that keeps handing out
    /// fresh cursors with no items cannot loop forever. Returns the number of
    /// pages appended by this call.
    pub async fn fetch_all(&self, max_pages: Option<usize>) -> Result<usize> {
        let mut fetched = 0;
        while self.has_more() && max_pages.map_or(true, |max| fetched < max) {
            match self.fetch_next().await? {
                FetchOutcome::Fetched { count } => {
                    fetched += 1;
                    if count == 0 {
                        if self.has_more() {
                            warn!("Empty page with a next cursor, stopping after {fetched} pages");
                        }
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(fetched)
    }
}

impl<S: PageSource> std::fmt::Debug for PaginatedCursor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("PaginatedCursor")
            .field("page_size", &self.page_size)
            .field("cursor", &state.cursor)
            .field("items", &state.items.len())
            .field("status", &state.status)
            .field("exhausted", &state.exhausted)
            .finish_non_exhaustive()
    }
}
