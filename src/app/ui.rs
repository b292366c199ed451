use egui::{Button, Color32, ComboBox, Context, RichText, TextureHandle, Ui};
use image::ImageReader;
use log::{error, warn};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::cycle::fetch_dashboard;
use super::state::ChartTextures;
use super::App;
use crate::plotting::{render_dashboard, RenderedCharts};
use crate::types::{ActivitySummary, StatusLevel, StatusMessage};

const TITLE: &str = "DevTrack – GitHub Productivity Dashboard";

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    egui::SidePanel::left("side_panel").show(ctx, |ui| {
        ui.heading("GitHub User");
        ui.separator();

        ui.label("Enter GitHub username");
        let response = ui.text_edit_singleline(&mut app.account_input);
        if response.lost_focus() {
            app.commit_account();
        }

        if !app.account.is_empty() {
            ui.label(RichText::new(format!("Viewing data for {}", app.account)).strong());
            ui.separator();
            draw_repository_selector(app, ui);
        }

        ui.separator();
        if ui
            .add_enabled(!app.is_loading, Button::new("Refresh"))
            .clicked()
        {
            app.request_refresh();
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(TITLE);
        ui.separator();

        if app.is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Fetching data from GitHub...");
            });
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            let blocking = app
                .dashboard
                .messages
                .iter()
                .filter(|m| m.level != StatusLevel::Warning);
            for message in blocking {
                draw_message(ui, message);
            }
            draw_charts(app, ui);
        });
    });

    if app.cycle_needed {
        start_cycle(app, ctx, app_arc);
    }

    // Update plots if needed
    if app.update_needed {
        match render_dashboard(&app.dashboard, &app.chart_paths) {
            Ok(rendered) => load_chart_textures(app, ctx, rendered),
            Err(e) => {
                error!("Plotting error: {}", e);
                app.textures = ChartTextures::default();
            }
        }
        app.update_needed = false;
    }
}

fn draw_repository_selector(app: &mut App, ui: &mut Ui) {
    ui.label("Select Repository");
    let names: Vec<String> = app
        .dashboard
        .repository_names()
        .map(str::to_string)
        .collect();

    let mut choice = app.selected_repo.clone().unwrap_or_default();
    ComboBox::new("repo_selector", "")
        .selected_text(&choice)
        .show_ui(ui, |ui| {
            for name in &names {
                ui.selectable_value(&mut choice, name.clone(), name);
            }
        });

    // Handle repository change
    if !choice.is_empty() {
        app.select_repository(&choice);
    }
}

fn draw_charts(app: &App, ui: &mut Ui) {
    let (Some(repo), Some(activity)) = (&app.dashboard.selected, &app.dashboard.activity) else {
        return;
    };

    ui.heading(format!("Daily Commit Activity in {}", repo));
    draw_summary(ui, &activity.summary);
    draw_texture(ui, app.textures.daily.as_ref());

    ui.separator();
    ui.heading("Commits by Hour");
    draw_texture(ui, app.textures.hourly.as_ref());

    ui.separator();
    ui.heading("Language Distribution (Repo-wide)");
    if app.dashboard.languages.is_some() {
        draw_texture(ui, app.textures.languages.as_ref());
    }
    let warnings = app
        .dashboard
        .messages
        .iter()
        .filter(|m| m.level == StatusLevel::Warning);
    for message in warnings {
        draw_message(ui, message);
    }
}

fn draw_summary(ui: &mut Ui, summary: &ActivitySummary) {
    ui.horizontal(|ui| {
        ui.label(format!("Total commits: {}", summary.total_commits));
        ui.separator();
        ui.label(format!("Active days: {}", summary.active_days));
        if let Some(day) = summary.busiest_day {
            ui.separator();
            ui.label(format!("Busiest day: {} ({})", day.date, day.count));
        }
        if let Some(hour) = summary.busiest_hour {
            ui.separator();
            ui.label(format!("Busiest hour: {:02}:00 UTC ({})", hour.hour, hour.count));
        }
    });
}

fn draw_texture(ui: &mut Ui, texture: Option<&TextureHandle>) {
    if let Some(texture) = texture {
        ui.add(egui::Image::new(texture).max_width(ui.available_width()));
    }
}

fn draw_message(ui: &mut Ui, message: &StatusMessage) {
    let color = match message.level {
        StatusLevel::Info => Color32::LIGHT_BLUE,
        StatusLevel::Warning => Color32::YELLOW,
        StatusLevel::Error => Color32::LIGHT_RED,
    };
    ui.colored_label(color, &message.text);
}

/// Run a cycle on the blocking pool and hand the result back to the app.
fn start_cycle(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    let request = app.begin_cycle();
    let generation = request.generation;
    let config = app.config.clone();
    let ctx = ctx.clone();

    let worker = tokio::task::spawn_blocking(move || fetch_dashboard(&config, &request));
    tokio::spawn(async move {
        let outcome = worker.await;
        match app_arc.lock() {
            Ok(mut app) => match outcome {
                Ok(dashboard) => {
                    app.finish_cycle(generation, dashboard);
                }
                Err(e) => {
                    error!("Cycle {generation} worker failed: {e}");
                    app.abandon_cycle(generation);
                }
            },
            Err(e) => error!("Failed to acquire app lock after cycle: {}", e),
        }
        ctx.request_repaint();
    });
}

fn load_chart_textures(app: &mut App, ctx: &Context, rendered: RenderedCharts) {
    let paths = &app.chart_paths;
    app.textures = ChartTextures {
        daily: rendered
            .activity
            .then(|| load_plot_texture(ctx, "daily_commits", &paths.daily))
            .flatten(),
        hourly: rendered
            .activity
            .then(|| load_plot_texture(ctx, "hourly_commits", &paths.hourly))
            .flatten(),
        languages: rendered
            .languages
            .then(|| load_plot_texture(ctx, "language_usage", &paths.languages))
            .flatten(),
    };
}

fn load_plot_texture(ctx: &Context, name: &str, path: &Path) -> Option<TextureHandle> {
    match ImageReader::open(path).and_then(|reader| {
        reader
            .decode()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }) {
        Ok(image) => {
            let size = [image.width() as usize, image.height() as usize];
            let pixels = image.to_rgba8();
            let pixels = pixels.as_flat_samples();
            Some(ctx.load_texture(
                name,
                egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
                egui::TextureOptions::LINEAR,
            ))
        }
        Err(e) => {
            warn!("Failed to load plot image {}: {}", path.display(), e);
            None
        }
    }
}
