//! Backend endpoints behind each "my page" tab
//!
//! Every endpoint group borrows one [`ApiClient`](crate::http::ApiClient).
//! List endpoints are exposed as [`ResourcePages`] so they plug straight
//! into [`PaginatedCursor`](crate::pagination::PaginatedCursor).

mod likes;
pub mod models;
mod pages;
mod profile;
mod recommend;
mod requests;
mod reviews;
mod upload;

pub use likes::{LikesApi, LIKES_PATH};
pub use models::{
    LikedRestaurant, Recommendation, RegistrationRequest, RestaurantSummary, Review, User,
};
pub use pages::ResourcePages;
pub use profile::{ProfileApi, PROFILE_IMAGE_PRESIGN_PATH, PROFILE_PATH};
pub use recommend::{RecommendApi, RECOMMEND_PATH};
pub use requests::{RequestsApi, MY_REQUESTS_PATH, REQUESTS_PATH, REQUEST_PRESIGN_PATH};
pub use reviews::{ReviewsApi, REVIEWS_PATH};
pub use upload::{content_type_for, PresignRequest, PresignedUpload, UploadedFile, Uploader};
