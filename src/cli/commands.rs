//! CLI commands and argument parsing

use crate::types::{RecordId, SortKey};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Matjip restaurant client
#[derive(Parser, Debug)]
#[command(name = "matjip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Account email for commands that need a login
    #[arg(long, global = true, env = "MATJIP_EMAIL")]
    pub email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "MATJIP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account with --email and --password
    Signup {
        #[arg(long)]
        nickname: String,

        /// Must repeat --password
        #[arg(long)]
        password_confirm: String,
    },

    /// Show the logged-in profile
    Me,

    /// Change nickname, bio, or profile picture
    ProfileEdit {
        #[arg(long)]
        nickname: Option<String>,

        /// New bio; an empty string clears it
        #[arg(long)]
        bio: Option<String>,

        /// New profile picture
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// List liked restaurants
    Likes(ListArgs),

    /// Remove a restaurant from the likes list
    Unlike { restaurant_id: RecordId },

    /// List written reviews
    Reviews(ListArgs),

    /// Delete a review
    ReviewDelete { review_id: RecordId },

    /// List restaurant registration requests in server order
    Requests(PageArgs),

    /// Submit a restaurant registration request
    RequestSubmit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,

        /// Photo to attach (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },

    /// Withdraw a pending registration request
    RequestCancel { request_id: RecordId },

    /// Ask the AI for restaurant recommendations
    Recommend {
        /// Free-text description of what you want to eat
        query: String,
    },

    /// Bulk-create registration requests from a YAML manifest
    Seed {
        /// Manifest file
        manifest: PathBuf,

        /// Validate and report without sending anything
        #[arg(long)]
        dry_run: bool,

        /// Parallel image uploads per request
        #[arg(long, default_value = "3")]
        concurrency: usize,

        /// Records submitted per second
        #[arg(long, default_value = "1")]
        rate: u32,
    },
}

/// How many pages a list command loads
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Pages to load
    #[arg(long, default_value = "1")]
    pub pages: usize,

    /// Load every page
    #[arg(long, conflicts_with = "pages")]
    pub all: bool,
}

impl PageArgs {
    /// Page budget for `fetch_all`
    pub fn max_pages(&self) -> Option<usize> {
        if self.all {
            None
        } else {
            Some(self.pages)
        }
    }
}

/// Paging, filtering, and sorting for rated list commands
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Case-insensitive name filter
    #[arg(short, long, default_value = "")]
    pub keyword: String,

    /// Minimum rating (inclusive)
    #[arg(long, default_value = "0")]
    pub min_rating: f64,

    #[arg(long, default_value = "recent")]
    pub sort: SortArg,

    #[command(flatten)]
    pub paging: PageArgs,
}

impl ListArgs {
    pub fn max_pages(&self) -> Option<usize> {
        self.paging.max_pages()
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortArg {
    /// Newest first
    Recent,
    /// Highest rated first
    Rating,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Recent => SortKey::Recent,
            SortArg::Rating => SortKey::Rating,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
