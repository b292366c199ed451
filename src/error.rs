//! Error types for talking to the GitHub API.

use std::fmt;
use thiserror::Error;

/// The three API endpoints the dashboard reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Repositories,
    Commits,
    Languages,
}

impl Endpoint {
    /// The message shown to the user when this endpoint fails.
    ///
    /// Deliberately generic: the status code and body never reach the UI.
    pub fn failure_message(self) -> &'static str {
        match self {
            Endpoint::Repositories => "Couldn't fetch repositories. Please check the username.",
            Endpoint::Commits => "Couldn't fetch commits. Try again later or check repo visibility.",
            Endpoint::Languages => "Couldn't fetch language data.",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Repositories => "repositories",
            Endpoint::Commits => "commits",
            Endpoint::Languages => "languages",
        };
        f.write_str(name)
    }
}

/// A failed fetch. Every variant collapses to the same user-facing message
/// per endpoint; the detail is kept for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{endpoint} request returned HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} response could not be decoded: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchError::Status { endpoint, .. }
            | FetchError::Transport { endpoint, .. }
            | FetchError::Decode { endpoint, .. } => *endpoint,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.endpoint().failure_message()
    }
}

/// Errors raised while constructing a [`crate::client::GitHubClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
