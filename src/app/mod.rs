pub mod cycle;
mod state;
mod ui;

pub use cycle::{fetch_dashboard, run_cycle};
pub use state::{App, AppWrapper, ChartTextures, CycleRequest, RepoSelection};
