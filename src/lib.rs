//! # GitHub Productivity Dashboard
//!
//! `devtrack` queries the GitHub REST API for an account, lets the user pick
//! one of its repositories, and charts the repository's recent activity:
//!
//! - commits per day (line chart)
//! - commits per hour of day (bar chart)
//! - bytes of source per language (pie chart)
//!
//! The pipeline is deliberately thin: fetch, reshape, render. Every user
//! interaction re-runs it from scratch.
//!
//! ## Example
//!
//! ```no_run
//! use devtrack::app::run_cycle;
//! use devtrack::client::GitHubClient;
//! use devtrack::config::Config;
//!
//! let client = GitHubClient::new(&Config::default()).unwrap();
//! let dashboard = run_cycle(&client, "torvalds", None);
//! if let Some(activity) = &dashboard.activity {
//!     println!("{} commits on the first page", activity.summary.total_commits);
//! }
//! ```

pub mod analysis;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod plotting;
pub mod types;

// Re-export main types for convenience
pub use app::App as DevTrackApp;
pub use config::Config;
pub use error::{ClientError, Endpoint, FetchError};
pub use types::{CommitRecord, Dashboard, LanguageBytes, RepositorySummary};
