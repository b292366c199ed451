use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use super::DataSource;
use crate::config::Config;
use crate::error::{ClientError, Endpoint, FetchError};
use crate::types::{CommitRecord, LanguageBytes, RepositorySummary};

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Unauthenticated client for the GitHub REST API.
///
/// Only the first page of every listing is read; the API's default page
/// size and ordering are used as-is.
pub struct GitHubClient {
    base_url: Url,
    http: Client,
}

impl GitHubClient {
    /// Build a client from the start-up configuration.
    ///
    /// This creates a blocking `reqwest` client, so it must not be called
    /// from inside an async task.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.api_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.api_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: config.api_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { base_url, http })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint, url: Url) -> Result<T, FetchError> {
        debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("{endpoint} request returned {status}");
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .map_err(|source| FetchError::Decode { endpoint, source })
    }
}

impl DataSource for GitHubClient {
    fn repositories(&self, account: &str) -> Result<Vec<RepositorySummary>, FetchError> {
        let url = self.endpoint_url(&["users", account, "repos"]);
        self.get_json(Endpoint::Repositories, url)
    }

    fn commits(&self, account: &str, repo: &str) -> Result<Vec<CommitRecord>, FetchError> {
        let url = self.endpoint_url(&["repos", account, repo, "commits"]);
        self.get_json(Endpoint::Commits, url)
    }

    fn languages(&self, account: &str, repo: &str) -> Result<LanguageBytes, FetchError> {
        let url = self.endpoint_url(&["repos", account, repo, "languages"]);
        self.get_json(Endpoint::Languages, url)
    }
}
