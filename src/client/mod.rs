mod github;

pub use github::GitHubClient;

use crate::error::FetchError;
use crate::types::{CommitRecord, LanguageBytes, RepositorySummary};

/// Where the dashboard reads its raw data from.
///
/// Implementations are blocking; the interaction cycle runs them on a
/// worker thread one request at a time.
pub trait DataSource {
    /// List the repositories owned by `account`.
    fn repositories(&self, account: &str) -> Result<Vec<RepositorySummary>, FetchError>;

    /// First page of commits of `account/repo`, newest first.
    fn commits(&self, account: &str, repo: &str) -> Result<Vec<CommitRecord>, FetchError>;

    /// Bytes of source per language in `account/repo`.
    fn languages(&self, account: &str, repo: &str) -> Result<LanguageBytes, FetchError>;
}
