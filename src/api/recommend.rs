//! AI restaurant recommendation search

use super::models::Recommendation;
use crate::error::Result;
use crate::forms::{ensure_valid, RecommendForm};
use crate::http::ApiClient;
use serde::Deserialize;
use tracing::debug;

pub const RECOMMEND_PATH: &str = "/recommendations";

#[derive(Debug, Deserialize)]
struct RecommendResponse {
    #[serde(default)]
    items: Vec<Recommendation>,
}

#[derive(Debug, Clone, Copy)]
pub struct RecommendApi<'c> {
    client: &'c ApiClient,
}

impl<'c> RecommendApi<'c> {
    pub fn new(client: &'c ApiClient) -> Self {
        Self { client }
    }

    pub async fn search(&self, form: &RecommendForm) -> Result<Vec<Recommendation>> {
        ensure_valid(form)?;
        let body = form.normalized();
        let response: RecommendResponse = self.client.post(RECOMMEND_PATH, &body).await?;
        debug!("{} recommendations for '{}'", response.items.len(), body.query);
        Ok(response.items)
    }
}
