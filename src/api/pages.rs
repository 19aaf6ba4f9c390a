//! Page source backed by a list endpoint

use crate::error::Result;
use crate::http::{ApiClient, RequestConfig};
use crate::pagination::{Page, PageSource};
use crate::types::OffsetCursor;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::debug;

/// `GET <path>?cursor=<n>&limit=<n>` returning `{ items, nextCursor? }`
pub struct ResourcePages<'c, T> {
    client: &'c ApiClient,
    path: String,
    _item: PhantomData<fn() -> T>,
}

impl<'c, T> ResourcePages<'c, T> {
    pub fn new(client: &'c ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _item: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<T> std::fmt::Debug for ResourcePages<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourcePages")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T> PageSource for ResourcePages<'_, T>
where
    T: DeserializeOwned + Send,
{
    type Item = T;
    type Cursor = OffsetCursor;

    fn initial_cursor(&self) -> OffsetCursor {
        0
    }

    async fn fetch_page(&self, cursor: OffsetCursor, limit: u32) -> Result<Page<T, OffsetCursor>> {
        let config = RequestConfig::new()
            .query("cursor", cursor)
            .query("limit", limit);
        let page: Page<T, OffsetCursor> = self.client.get(&self.path, config).await?;
        debug!(
            "{}: {} items at cursor {}, next {:?}",
            self.path,
            page.items.len(),
            cursor,
            page.next_cursor
        );
        Ok(page)
    }
}
