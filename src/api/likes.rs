//! Likes tab

use super::models::LikedRestaurant;
use super::pages::ResourcePages;
use crate::auth::Session;
use crate::error::Result;
use crate::http::ApiClient;
use crate::pagination::PaginatedCursor;
use crate::types::RecordId;
use tracing::info;

pub const LIKES_PATH: &str = "/users/me/likes";

#[derive(Debug, Clone, Copy)]
pub struct LikesApi<'c> {
    client: &'c ApiClient,
}

impl<'c> LikesApi<'c> {
    pub fn new(client: &'c ApiClient) -> Self {
        Self { client }
    }

    pub fn pages(&self, _session: &Session) -> ResourcePages<'c, LikedRestaurant> {
        ResourcePages::new(self.client, LIKES_PATH)
    }

    /// Fresh cursor over the user's liked restaurants
    pub fn cursor(
        &self,
        session: &Session,
        page_size: u32,
    ) -> PaginatedCursor<ResourcePages<'c, LikedRestaurant>> {
        PaginatedCursor::new(self.pages(session), page_size)
    }

    pub async fn unlike(&self, session: &Session, restaurant_id: RecordId) -> Result<()> {
        self.client
            .delete(&format!("/restaurants/{restaurant_id}/like"))
            .await?;
        info!("User {} unliked restaurant {}", session.user_id(), restaurant_id);
        Ok(())
    }
}
