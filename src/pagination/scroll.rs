//! Infinite-scroll trigger
//!
//! Decides when a sentinel element's visibility should load the next page.
//! The trigger is edge-triggered: it fires once when the sentinel becomes
//! visible and re-arms only after the sentinel leaves the viewport.

use super::cursor::PaginatedCursor;
use super::types::{FetchOutcome, PageSource};
use crate::error::Result;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Visible fraction at which the sentinel counts as "in view"
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Edge detector for sentinel visibility
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    threshold: f64,
    visible: bool,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

impl ScrollTrigger {
    /// Create a trigger; the threshold is clamped to `(0, 1]`
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            DEFAULT_VISIBILITY_THRESHOLD
        } else {
            threshold.clamp(f64::EPSILON, 1.0)
        };
        Self {
            threshold,
            visible: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the sentinel was in view at the last observation
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Record a visibility observation and decide whether to fetch
    ///
    /// Returns true only on the transition into view, and only if more
    /// data may exist and nothing is in flight.
    pub fn observe(&mut self, visible_ratio: f64, has_more: bool, fetching: bool) -> bool {
        let now_visible = visible_ratio >= self.threshold;
        let entered = now_visible && !self.visible;
        self.visible = now_visible;
        entered && has_more && !fetching
    }
}

/// A paginated cursor driven by sentinel visibility
pub struct InfiniteScroll<S: PageSource> {
    cursor: PaginatedCursor<S>,
    trigger: Mutex<ScrollTrigger>,
}

impl<S: PageSource> InfiniteScroll<S> {
    pub fn new(cursor: PaginatedCursor<S>) -> Self {
        Self::with_trigger(cursor, ScrollTrigger::default())
    }

    pub fn with_trigger(cursor: PaginatedCursor<S>, trigger: ScrollTrigger) -> Self {
        Self {
            cursor,
            trigger: Mutex::new(trigger),
        }
    }

    /// The cursor being driven
    pub fn cursor(&self) -> &PaginatedCursor<S> {
        &self.cursor
    }

    /// Feed a visibility observation of the sentinel
    ///
    /// Returns `None` when the observation did not trigger a fetch.
    pub async fn on_visibility(&self, visible_ratio: f64) -> Result<Option<FetchOutcome>> {
        let fire = {
            let mut trigger = self.trigger.lock().unwrap_or_else(PoisonError::into_inner);
            trigger.observe(
                visible_ratio,
                self.cursor.has_more(),
                self.cursor.is_fetching(),
            )
        };

        if !fire {
            return Ok(None);
        }

        debug!("Sentinel entered view at ratio {:.2}", visible_ratio);
        self.cursor.fetch_next().await.map(Some)
    }

    /// Start over: clear the cursor and re-arm the trigger
    pub fn reset(&self) {
        self.cursor.reset();
        let mut trigger = self.trigger.lock().unwrap_or_else(PoisonError::into_inner);
        let threshold = trigger.threshold();
        *trigger = ScrollTrigger::new(threshold);
    }

    pub fn into_cursor(self) -> PaginatedCursor<S> {
        self.cursor
    }
}
