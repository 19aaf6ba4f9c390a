// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Matjip client
//!
//! Rust client for the Matjip restaurant discovery and review backend.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Accumulate "my page" lists page by page with
//!   duplicate-fetch suppression and infinite-scroll triggering
//! - **List Views**: Keyword, rating, and sort applied client-side
//! - **Forms**: Local validation plus backend field errors on the same keys
//! - **Sessions**: Cookie-based login carried as an explicit `Session`
//! - **Uploads**: Presigned two-step image uploads
//! - **Seeding**: Bulk registration requests from a YAML manifest
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use matjip::api::LikesApi;
//! use matjip::auth::AuthApi;
//! use matjip::forms::LoginForm;
//! use matjip::http::{ApiClient, ApiClientConfig};
//! use matjip::listing::ListQuery;
//!
//! #[tokio::main]
//! async fn main() -> matjip::Result<()> {
//!     let client = ApiClient::new(ApiClientConfig::default())?;
//!     let session = AuthApi::new(&client)
//!         .login(&LoginForm::new("me@example.com", "secret123"))
//!         .await?;
//!
//!     let likes = LikesApi::new(&client).cursor(&session, 21);
//!     likes.fetch_next().await?;
//!
//!     let query = ListQuery::new().keyword("bbq");
//!     likes.with_items(|items| {
//!         for liked in query.apply(items) {
//!             println!("{}", liked.restaurant.name);
//!         }
//!     });
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         CLI / Seeder                           │
//! └────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬───────────┬──────┴──────┬────────────┬────────────┐
//! │   Auth    │    API    │ Pagination  │  Listing   │   Forms    │
//! ├───────────┼───────────┼─────────────┼────────────┼────────────┤
//! │ Session   │ Likes     │ Cursor      │ Keyword    │ Validation │
//! │ Login     │ Reviews   │ Scroll      │ Rating     │ FormErrors │
//! │ Logout    │ Requests  │ PageSource  │ Sort       │            │
//! │           │ Uploads   │             │            │            │
//! └───────────┴───────────┴─────────────┴────────────┴────────────┘
//!                                │
//! ┌────────────────────────────────────────────────────────────────┐
//! │   HTTP: cookies, rate limit, envelope decoding, ApiError       │
//! └────────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and the backend error taxonomy
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with session cookies and rate limiting
pub mod http;

/// Login, signup, and the session value
pub mod auth;

/// Cursor pagination and infinite scroll
pub mod pagination;

/// Client-side filtering and sorting
pub mod listing;

/// Forms and their validation
pub mod forms;

/// Backend endpoints and wire models
pub mod api;

/// Bulk seeding from a manifest
pub mod seed;

/// Configuration file and environment
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{ApiError, Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{AuthApi, Session};
pub use config::AppConfig;
pub use http::{ApiClient, ApiClientConfig};
pub use listing::{ListQuery, Listable};
pub use pagination::{FetchOutcome, InfiniteScroll, PageSource, PaginatedCursor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
