//! One interaction cycle: fetch, aggregate, and collect what to display.
//!
//! Each step is gated on the previous one. Repository and commit failures
//! end the cycle; a language failure only adds a warning.

use log::{error, info, warn};

use super::state::{CycleRequest, RepoSelection};
use crate::analysis;
use crate::client::{DataSource, GitHubClient};
use crate::config::Config;
use crate::error::Endpoint;
use crate::types::{Dashboard, StatusMessage};

pub const ENTER_ACCOUNT_PROMPT: &str = "Enter a GitHub username in the sidebar to begin.";

/// Run a full cycle for `account`.
///
/// The `previous` choice is kept only while the fetched repository list is
/// exactly the one it was made from; any change to the list resets the
/// selection to its first entry.
///
/// Requests are issued one at a time: repositories, then commits, then
/// languages.
pub fn run_cycle<S>(source: &S, account: &str, previous: Option<&RepoSelection>) -> Dashboard
where
    S: DataSource + ?Sized,
{
    let account = account.trim();
    let mut dashboard = Dashboard {
        account: account.to_string(),
        ..Dashboard::default()
    };

    if account.is_empty() {
        dashboard.messages.push(StatusMessage::info(ENTER_ACCOUNT_PROMPT));
        return dashboard;
    }

    dashboard.repositories = match source.repositories(account) {
        Ok(repositories) => repositories,
        Err(e) => {
            warn!("{e}");
            dashboard.messages.push(StatusMessage::error(e.user_message()));
            return dashboard;
        }
    };

    let selected = previous
        .filter(|prev| {
            dashboard
                .repository_names()
                .eq(prev.listed.iter().map(String::as_str))
        })
        .and_then(|prev| {
            dashboard
                .repository_names()
                .find(|name| *name == prev.selected)
        })
        .or_else(|| dashboard.repository_names().next())
        .map(str::to_string);
    let Some(repo) = selected else {
        info!("{account} has no public repositories");
        return dashboard;
    };
    dashboard.selected = Some(repo.clone());

    let commits = match source.commits(account, &repo) {
        Ok(commits) => commits,
        Err(e) => {
            warn!("{e}");
            dashboard.messages.push(StatusMessage::error(e.user_message()));
            return dashboard;
        }
    };
    info!("fetched {} commits for {account}/{repo}", commits.len());
    dashboard.activity = Some(analysis::commit_activity(&commits));

    match source.languages(account, &repo) {
        Ok(languages) => dashboard.languages = Some(analysis::language_shares(&languages)),
        Err(e) => {
            warn!("{e}");
            dashboard
                .messages
                .push(StatusMessage::warning(Endpoint::Languages.failure_message()));
        }
    }

    dashboard
}

/// Run `request` against the GitHub API described by `config`.
///
/// Blocks on network I/O; call it from a blocking worker.
pub fn fetch_dashboard(config: &Config, request: &CycleRequest) -> Dashboard {
    match GitHubClient::new(config) {
        Ok(client) => run_cycle(&client, &request.account, request.selection.as_ref()),
        Err(e) => {
            error!("{e}");
            client_unavailable(&request.account)
        }
    }
}

/// The dashboard shown when no HTTP client could be built at all.
pub fn client_unavailable(account: &str) -> Dashboard {
    let account = account.trim();
    let mut dashboard = Dashboard {
        account: account.to_string(),
        ..Dashboard::default()
    };
    if account.is_empty() {
        dashboard.messages.push(StatusMessage::info(ENTER_ACCOUNT_PROMPT));
    } else {
        dashboard
            .messages
            .push(StatusMessage::error(Endpoint::Repositories.failure_message()));
    }
    dashboard
}
