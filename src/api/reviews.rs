//! Reviews tab

use super::models::Review;
use super::pages::ResourcePages;
use crate::auth::Session;
use crate::error::Result;
use crate::http::ApiClient;
use crate::pagination::PaginatedCursor;
use crate::types::RecordId;
use tracing::info;

pub const REVIEWS_PATH: &str = "/users/me/reviews";

#[derive(Debug, Clone, Copy)]
pub struct ReviewsApi<'c> {
    client: &'c ApiClient,
}

impl<'c> ReviewsApi<'c> {
    pub fn new(client: &'c ApiClient) -> Self {
        Self { client }
    }

    pub fn pages(&self, _session: &Session) -> ResourcePages<'c, Review> {
        ResourcePages::new(self.client, REVIEWS_PATH)
    }

    pub fn cursor(
        &self,
        session: &Session,
        page_size: u32,
    ) -> PaginatedCursor<ResourcePages<'c, Review>> {
        PaginatedCursor::new(self.pages(session), page_size)
    }

    pub async fn delete(&self, session: &Session, review_id: RecordId) -> Result<()> {
        self.client.delete(&format!("/reviews/{review_id}")).await?;
        info!("User {} deleted review {}", session.user_id(), review_id);
        Ok(())
    }
}
