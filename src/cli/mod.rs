//! CLI module
//!
//! Command-line interface over the client library.
//!
//! # Commands
//!
//! - `signup`, `me`, `profile-edit` - Account and profile
//! - `likes`, `reviews` - Paginated "my page" lists with `--keyword`,
//!   `--min-rating`, and `--sort`
//! - `requests` - Registration requests in server order
//! - `unlike`, `review-delete`, `request-submit`, `request-cancel` - Edits
//! - `recommend` - AI recommendation search
//! - `seed` - Bulk-create registration requests from a manifest

mod commands;
mod runner;

pub use commands::{Cli, Commands, ListArgs, OutputFormat, PageArgs, SortArg};
pub use runner::{describe_error, Runner};
