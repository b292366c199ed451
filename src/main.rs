//! GitHub Productivity Dashboard
//!
//! A GUI application charting commit activity and language usage of a
//! GitHub account's repositories.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use log::info;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use devtrack::app::{App, AppWrapper};
use devtrack::Config;

#[cfg(feature = "dev")]
const DEFAULT_LOG_FILTER: &str = "devtrack=debug,info";
#[cfg(not(feature = "dev"))]
const DEFAULT_LOG_FILTER: &str = "info";

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let chart_dir = config.chart_dir();
    std::fs::create_dir_all(&chart_dir)
        .with_context(|| format!("failed to create chart directory {}", chart_dir.display()))?;
    info!("writing charts to {}", chart_dir.display());

    // Initialize the Tokio runtime
    let rt = Runtime::new().context("failed to start the Tokio runtime")?;
    rt.block_on(async {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 900.0])
                .with_min_inner_size([800.0, 600.0])
                .with_title("DevTrack – GitHub Dashboard"),
            ..Default::default()
        };

        eframe::run_native(
            "DevTrack",
            options,
            Box::new(|_cc| {
                let app: Arc<Mutex<App>> = Arc::new(Mutex::new(App::new(config)));
                Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
            }),
        )
        .map_err(|e| anyhow!("error running application: {e}"))
    })
}
