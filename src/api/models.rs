//! Wire models for backend records
//!
//! JSON field names are camelCase on the wire.

use crate::listing::Listable;
use crate::types::{RecordId, RequestStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub nickname: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Compact restaurant card used inside other records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Average rating, 0.0 when unrated
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Entry of the likes tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedRestaurant {
    pub id: RecordId,
    pub restaurant: RestaurantSummary,
    pub liked_at: DateTime<Utc>,
}

impl Listable for LikedRestaurant {
    fn display_name(&self) -> &str {
        &self.restaurant.name
    }

    fn rating(&self) -> f64 {
        self.restaurant.rating
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.liked_at
    }
}

/// Entry of the reviews tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: RecordId,
    pub restaurant_id: RecordId,
    pub restaurant_name: String,
    pub rating: f64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listable for Review {
    fn display_name(&self) -> &str {
        &self.restaurant_name
    }

    fn rating(&self) -> f64 {
        self.rating
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// A user-submitted restaurant-registration request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub id: RecordId,
    pub name: String,
    pub address: String,
    pub category: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub reject_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One AI recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub restaurant: RestaurantSummary,
    /// Why the model picked this restaurant
    #[serde(default)]
    pub reason: Option<String>,
}
