use eframe::App as EApp;
use egui::TextureHandle;
use log::{debug, error};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::plotting::ChartPaths;
use crate::types::Dashboard;

/// Textures for the three charts, reloaded after every render.
#[derive(Default)]
pub struct ChartTextures {
    pub daily: Option<TextureHandle>,
    pub hourly: Option<TextureHandle>,
    pub languages: Option<TextureHandle>,
}

/// The repository dropdown as it was shown when a cycle started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoSelection {
    /// Repository names listed in the dropdown, in display order
    pub listed: Vec<String>,
    /// The entry chosen among them
    pub selected: String,
}

impl RepoSelection {
    pub fn new<I, S>(listed: I, selected: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            listed: listed.into_iter().map(Into::into).collect(),
            selected: selected.into(),
        }
    }
}

/// Everything a worker needs to run one cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleRequest {
    pub generation: u64,
    pub account: String,
    pub selection: Option<RepoSelection>,
}

impl CycleRequest {
    pub fn repository(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.selected.as_str())
    }
}

/// Main application state
pub struct App {
    pub config: Config,
    /// Text currently typed into the account field
    pub account_input: String,
    /// Last committed account
    pub account: String,
    /// Repository chosen in the dropdown
    pub selected_repo: Option<String>,
    /// Result of the newest finished cycle
    pub dashboard: Dashboard,
    /// Identifies the newest started cycle
    pub generation: u64,
    pub is_loading: bool,
    /// A cycle should be started on the next frame
    pub cycle_needed: bool,
    /// Charts should be redrawn on the next frame
    pub update_needed: bool,
    pub chart_paths: ChartPaths,
    pub textures: ChartTextures,
}

impl App {
    pub fn new(config: Config) -> Self {
        let chart_paths = ChartPaths::in_dir(config.chart_dir());
        Self {
            account_input: config.account.clone(),
            account: config.account.clone(),
            config,
            selected_repo: None,
            dashboard: Dashboard::default(),
            generation: 0,
            is_loading: false,
            cycle_needed: true,
            update_needed: false,
            chart_paths,
            textures: ChartTextures::default(),
        }
    }

    /// Commit the text in the account field.
    ///
    /// A changed account drops the repository list and selection right away
    /// and schedules a cycle. Returns whether anything changed.
    pub fn commit_account(&mut self) -> bool {
        let account = self.account_input.trim().to_string();
        if account == self.account {
            return false;
        }
        debug!("account changed to {account:?}");
        self.account = account.clone();
        self.selected_repo = None;
        self.dashboard = Dashboard {
            account,
            ..Dashboard::default()
        };
        self.textures = ChartTextures::default();
        self.cycle_needed = true;
        true
    }

    /// Record a dropdown choice. Returns whether a new cycle was scheduled.
    pub fn select_repository(&mut self, name: &str) -> bool {
        if self.selected_repo.as_deref() == Some(name) {
            return false;
        }
        debug!("repository changed to {name:?}");
        self.selected_repo = Some(name.to_string());
        self.cycle_needed = true;
        true
    }

    /// Re-run the cycle with the current selections.
    pub fn request_refresh(&mut self) {
        self.cycle_needed = true;
    }

    /// Start a new cycle, superseding any cycle still running.
    pub fn begin_cycle(&mut self) -> CycleRequest {
        self.generation += 1;
        self.is_loading = true;
        self.cycle_needed = false;
        let selection = self.selected_repo.clone().map(|selected| RepoSelection {
            listed: self
                .dashboard
                .repository_names()
                .map(str::to_string)
                .collect(),
            selected,
        });
        CycleRequest {
            generation: self.generation,
            account: self.account.clone(),
            selection,
        }
    }

    /// Apply the result of a finished cycle.
    ///
    /// Results from superseded cycles are dropped so the view never mixes
    /// two fetches. Returns whether the dashboard was replaced.
    pub fn finish_cycle(&mut self, generation: u64, dashboard: Dashboard) -> bool {
        if generation != self.generation {
            debug!(
                "dropping result of cycle {generation}, current is {}",
                self.generation
            );
            return false;
        }
        self.selected_repo = dashboard.selected.clone();
        self.dashboard = dashboard;
        self.is_loading = false;
        self.update_needed = true;
        true
    }

    /// Stop waiting on a cycle whose worker died without a result.
    ///
    /// The current dashboard stays on screen. Returns whether `generation`
    /// was the cycle being waited on.
    pub fn abandon_cycle(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.is_loading = false;
        true
    }

    pub fn chart_dir(&self) -> PathBuf {
        self.chart_paths.dir.clone()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx, Arc::clone(&self.app));
        } else {
            error!("Failed to acquire app lock in update");
        }
    }
}
