use chrono::{DateTime, NaiveDate, Utc};
use devtrack::app::cycle::ENTER_ACCOUNT_PROMPT;
use devtrack::app::{run_cycle, App, RepoSelection};
use devtrack::client::DataSource;
use devtrack::types::{StatusLevel, StatusMessage};
use devtrack::{CommitRecord, Endpoint, FetchError, LanguageBytes, RepositorySummary};
use pretty_assertions::assert_eq;
use std::cell::RefCell;

/// In-memory stand-in for the GitHub API that records every request.
#[derive(Default)]
struct FakeGitHub {
    repositories: Option<Vec<&'static str>>,
    commits: Option<Vec<&'static str>>,
    languages: Option<Vec<(&'static str, u64)>>,
    calls: RefCell<Vec<String>>,
}

impl FakeGitHub {
    fn healthy() -> Self {
        Self {
            repositories: Some(vec!["linux", "subsurface-for-dirk"]),
            commits: Some(vec![
                "2024-01-02T10:00:00Z",
                "2024-01-01T23:00:00Z",
                "2024-01-01T10:00:00Z",
            ]),
            languages: Some(vec![("Python", 1000), ("HTML", 250)]),
            calls: RefCell::default(),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn failure(endpoint: Endpoint) -> FetchError {
        FetchError::Status { endpoint, status: 404 }
    }
}

impl DataSource for FakeGitHub {
    fn repositories(&self, account: &str) -> Result<Vec<RepositorySummary>, FetchError> {
        self.calls.borrow_mut().push(format!("repos {account}"));
        self.repositories
            .as_ref()
            .map(|names| names.iter().copied().map(RepositorySummary::new).collect())
            .ok_or_else(|| Self::failure(Endpoint::Repositories))
    }

    fn commits(&self, account: &str, repo: &str) -> Result<Vec<CommitRecord>, FetchError> {
        self.calls.borrow_mut().push(format!("commits {account}/{repo}"));
        self.commits
            .as_ref()
            .map(|stamps| {
                stamps
                    .iter()
                    .map(|ts| CommitRecord::new(ts.parse::<DateTime<Utc>>().unwrap()))
                    .collect()
            })
            .ok_or_else(|| Self::failure(Endpoint::Commits))
    }

    fn languages(&self, account: &str, repo: &str) -> Result<LanguageBytes, FetchError> {
        self.calls.borrow_mut().push(format!("languages {account}/{repo}"));
        self.languages
            .as_ref()
            .map(|pairs| pairs.iter().copied().collect())
            .ok_or_else(|| Self::failure(Endpoint::Languages))
    }
}

#[test]
fn test_full_cycle() {
    let github = FakeGitHub::healthy();
    let dashboard = run_cycle(&github, "torvalds", None);

    assert_eq!(
        github.calls(),
        vec![
            "repos torvalds",
            "commits torvalds/linux",
            "languages torvalds/linux",
        ]
    );
    assert_eq!(dashboard.account, "torvalds");
    assert_eq!(dashboard.selected.as_deref(), Some("linux"));
    assert!(dashboard.messages.is_empty());

    let activity = dashboard.activity.expect("commit charts should render");
    let daily: Vec<(NaiveDate, usize)> = activity.daily.iter().map(|d| (d.date, d.count)).collect();
    assert_eq!(
        daily,
        vec![
            (NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 2),
            (NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 1),
        ]
    );
    let hourly: Vec<(u32, usize)> = activity.hourly.iter().map(|h| (h.hour, h.count)).collect();
    assert_eq!(hourly, vec![(10, 2), (23, 1)]);
    assert_eq!(activity.summary.total_commits, 3);

    let languages = dashboard.languages.expect("language chart should render");
    assert_eq!(languages.len(), 2);
    assert_eq!(languages.iter().map(|l| l.bytes).sum::<u64>(), 1250);
}

#[test]
fn test_empty_account_makes_no_requests() {
    let github = FakeGitHub::healthy();

    let previous = RepoSelection::new(["linux"], "linux");
    for account in ["", "   "] {
        let dashboard = run_cycle(&github, account, Some(&previous));
        assert_eq!(dashboard.messages, vec![StatusMessage::info(ENTER_ACCOUNT_PROMPT)]);
        assert!(dashboard.repositories.is_empty());
        assert!(dashboard.activity.is_none());
    }
    assert!(github.calls().is_empty());
}

#[test]
fn test_repository_failure_stops_the_cycle() {
    let github = FakeGitHub {
        repositories: None,
        ..FakeGitHub::healthy()
    };
    let dashboard = run_cycle(&github, "no-such-user", None);

    assert_eq!(github.calls(), vec!["repos no-such-user"]);
    assert_eq!(
        dashboard.messages,
        vec![StatusMessage::error(
            "Couldn't fetch repositories. Please check the username."
        )]
    );
    assert!(dashboard.selected.is_none());
    assert!(dashboard.activity.is_none());
    assert!(dashboard.languages.is_none());
}

#[test]
fn test_account_without_repositories() {
    let github = FakeGitHub {
        repositories: Some(vec![]),
        ..FakeGitHub::healthy()
    };
    let dashboard = run_cycle(&github, "empty-user", None);

    assert_eq!(github.calls(), vec!["repos empty-user"]);
    assert!(dashboard.repositories.is_empty());
    assert!(dashboard.selected.is_none());
    assert!(dashboard.messages.is_empty());
    assert!(dashboard.activity.is_none());
}

#[test]
fn test_commit_failure_skips_languages() {
    let github = FakeGitHub {
        commits: None,
        ..FakeGitHub::healthy()
    };
    let dashboard = run_cycle(&github, "torvalds", None);

    assert_eq!(github.calls(), vec!["repos torvalds", "commits torvalds/linux"]);
    assert_eq!(dashboard.messages.len(), 1);
    assert_eq!(dashboard.messages[0].level, StatusLevel::Error);
    assert!(dashboard.messages[0].text.starts_with("Couldn't fetch commits."));
    assert!(dashboard.activity.is_none());
    assert!(dashboard.languages.is_none());
    // The repository list still populates the dropdown
    assert_eq!(dashboard.repositories.len(), 2);
}

#[test]
fn test_language_failure_is_only_a_warning() {
    let github = FakeGitHub {
        languages: None,
        ..FakeGitHub::healthy()
    };
    let dashboard = run_cycle(&github, "torvalds", None);

    assert_eq!(
        dashboard.messages,
        vec![StatusMessage::warning("Couldn't fetch language data.")]
    );
    assert!(!dashboard.has_errors());
    assert!(dashboard.activity.is_some());
    assert!(dashboard.languages.is_none());
}

#[test]
fn test_zero_commits_render_empty_charts() {
    let github = FakeGitHub {
        commits: Some(vec![]),
        ..FakeGitHub::healthy()
    };
    let dashboard = run_cycle(&github, "torvalds", None);

    let activity = dashboard.activity.expect("empty charts, not an error");
    assert!(activity.daily.is_empty());
    assert!(activity.hourly.is_empty());
    assert!(dashboard.messages.is_empty());
    assert!(dashboard.languages.is_some());
}

#[test]
fn test_selection_kept_or_reset() {
    let github = FakeGitHub::healthy();
    let listed = ["linux", "subsurface-for-dirk"];

    let kept = run_cycle(
        &github,
        "torvalds",
        Some(&RepoSelection::new(listed, "subsurface-for-dirk")),
    );
    assert_eq!(kept.selected.as_deref(), Some("subsurface-for-dirk"));

    let reset = run_cycle(
        &github,
        "torvalds",
        Some(&RepoSelection::new(listed, "deleted-repo")),
    );
    assert_eq!(reset.selected.as_deref(), Some("linux"));

    assert_eq!(
        github.calls(),
        vec![
            "repos torvalds",
            "commits torvalds/subsurface-for-dirk",
            "languages torvalds/subsurface-for-dirk",
            "repos torvalds",
            "commits torvalds/linux",
            "languages torvalds/linux",
        ]
    );
}

#[test]
fn test_changed_repository_list_resets_selection() {
    let github = FakeGitHub {
        repositories: Some(vec!["newrepo", "uemacs"]),
        ..FakeGitHub::healthy()
    };

    // The chosen repository is still listed, but the list itself changed
    let previous = RepoSelection::new(["linux", "uemacs"], "uemacs");
    let dashboard = run_cycle(&github, "torvalds", Some(&previous));
    assert_eq!(dashboard.selected.as_deref(), Some("newrepo"));

    // Same names in a different order is a different list too
    let previous = RepoSelection::new(["uemacs", "newrepo"], "uemacs");
    let dashboard = run_cycle(&github, "torvalds", Some(&previous));
    assert_eq!(dashboard.selected.as_deref(), Some("newrepo"));

    let previous = RepoSelection::new(["newrepo", "uemacs"], "uemacs");
    let dashboard = run_cycle(&github, "torvalds", Some(&previous));
    assert_eq!(dashboard.selected.as_deref(), Some("uemacs"));
}

#[test]
fn test_app_round_trip_through_cycles() {
    let github = FakeGitHub::healthy();
    let mut app = App::default();

    let request = app.begin_cycle();
    let dashboard = run_cycle(&github, &request.account, request.selection.as_ref());
    assert!(app.finish_cycle(request.generation, dashboard));
    assert_eq!(app.selected_repo.as_deref(), Some("linux"));

    assert!(app.select_repository("subsurface-for-dirk"));
    let request = app.begin_cycle();
    assert_eq!(request.repository(), Some("subsurface-for-dirk"));
    let dashboard = run_cycle(&github, &request.account, request.selection.as_ref());
    assert!(app.finish_cycle(request.generation, dashboard));
    assert_eq!(app.dashboard.selected.as_deref(), Some("subsurface-for-dirk"));

    app.account_input.clear();
    assert!(app.commit_account());
    let request = app.begin_cycle();
    let dashboard = run_cycle(&github, &request.account, request.selection.as_ref());
    app.finish_cycle(request.generation, dashboard);
    assert_eq!(app.dashboard.messages, vec![StatusMessage::info(ENTER_ACCOUNT_PROMPT)]);
    assert_eq!(app.selected_repo, None);
}
