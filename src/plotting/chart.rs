use log::debug;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use chrono::{Days, NaiveDate, Utc};
use std::error::Error;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use super::styles::{ChartStyle, ChartTheme};
use crate::types::{Dashboard, DailyCount, HourlyCount, LanguageShare};

pub type PlotError = Box<dyn Error + Send + Sync>;

/// Date labels printed along the daily x axis at most.
const MAX_DATE_LABELS: usize = 8;

/// Where the three chart images are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartPaths {
    pub dir: PathBuf,
    pub daily: PathBuf,
    pub hourly: PathBuf,
    pub languages: PathBuf,
}

impl ChartPaths {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            daily: dir.join("daily_commits.png"),
            hourly: dir.join("hourly_commits.png"),
            languages: dir.join("language_usage.png"),
            dir,
        }
    }
}

/// Which charts a render produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderedCharts {
    pub activity: bool,
    pub languages: bool,
}

/// Draw every chart the dashboard has data for.
///
/// Commit charts are drawn whenever commits were fetched, even when there
/// are none; the pie only when languages were fetched.
pub fn render_dashboard(dashboard: &Dashboard, paths: &ChartPaths) -> Result<RenderedCharts, PlotError> {
    fs::create_dir_all(&paths.dir)?;
    let theme = ChartTheme::default();
    let style = ChartStyle::default();
    let mut rendered = RenderedCharts::default();

    if let Some(activity) = &dashboard.activity {
        draw_daily_commits(&paths.daily, &activity.daily, &theme, &style)?;
        draw_hourly_commits(&paths.hourly, &activity.hourly, &theme, &style)?;
        rendered.activity = true;
    }
    if let Some(languages) = &dashboard.languages {
        draw_language_usage(&paths.languages, languages, &theme, &style)?;
        rendered.languages = true;
    }

    debug!("rendered charts into {}", paths.dir.display());
    Ok(rendered)
}

/// Line chart of commits per day.
pub fn draw_daily_commits(
    path: &Path,
    daily: &[DailyCount],
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&theme.background_color)?;

    let x_range = date_axis_range(daily, Utc::now().date_naive());
    let y_max = count_axis_max(daily.iter().map(|d| d.count));

    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Commits Over Time", caption_font(theme, style))
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(x_range, 0f64..y_max)?;

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .x_desc("date")
        .y_desc("count")
        .x_labels(MAX_DATE_LABELS)
        .label_style(label_font(theme, style))
        .x_label_formatter(&|date: &NaiveDate| date.format("%Y-%m-%d").to_string())
        .y_label_formatter(&|y: &f64| format_count(*y))
        .draw()?;

    // Days without commits keep their place on the axis
    let points: Vec<(NaiveDate, f64)> = daily.iter().map(|d| (d.date, d.count as f64)).collect();

    chart.draw_series(LineSeries::new(
        points.clone(),
        theme.series_color.stroke_width(style.line_width),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 3, theme.series_color.filled())),
    )?;

    if daily.is_empty() {
        draw_placeholder(&root, "No commits", theme, style)?;
    }

    root.present()?;
    Ok(())
}

/// Bar chart of commits per hour of day. The axis always spans 0-23.
pub fn draw_hourly_commits(
    path: &Path,
    hourly: &[HourlyCount],
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&theme.background_color)?;

    let y_max = count_axis_max(hourly.iter().map(|h| h.count));

    let mut chart = ChartBuilder::on(&root)
        .caption("Hourly Commit Distribution", caption_font(theme, style))
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(-0.5f64..23.5f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .x_desc("hour")
        .y_desc("count")
        .x_labels(24)
        .label_style(label_font(theme, style))
        .x_label_formatter(&|x: &f64| hour_label(*x))
        .y_label_formatter(&|y: &f64| format_count(*y))
        .draw()?;

    let bar_half_width = 0.4;
    chart.draw_series(hourly.iter().map(|h| {
        let x = f64::from(h.hour);
        Rectangle::new(
            [(x - bar_half_width, 0.0), (x + bar_half_width, h.count as f64)],
            theme.series_color.filled(),
        )
    }))?;

    if hourly.is_empty() {
        draw_placeholder(&root, "No commits", theme, style)?;
    }

    root.present()?;
    Ok(())
}

/// Pie chart of bytes per language, labelled with percentages.
pub fn draw_language_usage(
    path: &Path,
    shares: &[LanguageShare],
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&theme.background_color)?;
    let area = root.titled("Language Usage", caption_font(theme, style))?;

    let total: u64 = shares.iter().map(|s| s.bytes).sum();
    if total == 0 {
        draw_placeholder(&area, "No language data", theme, style)?;
        root.present()?;
        return Ok(());
    }

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.38;
    let sizes: Vec<f64> = shares.iter().map(|s| s.bytes as f64).collect();
    let colors: Vec<RGBColor> = (0..shares.len()).map(|i| theme.slice_color(i)).collect();
    let labels: Vec<&str> = shares.iter().map(|s| s.language.as_str()).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(label_font(theme, style));
    pie.percentages(("sans-serif", style.font_size).into_font().color(&BLACK));
    area.draw(&pie)?;

    root.present()?;
    Ok(())
}

fn caption_font<'a>(theme: &ChartTheme, style: &ChartStyle) -> TextStyle<'a> {
    ("sans-serif", style.caption_size)
        .into_font()
        .color(&theme.text_color)
}

fn label_font<'a>(theme: &ChartTheme, style: &ChartStyle) -> TextStyle<'a> {
    ("sans-serif", style.font_size)
        .into_font()
        .color(&theme.text_color)
}

fn draw_placeholder(
    area: &DrawingArea<BitMapBackend, Shift>,
    text: &str,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let (width, height) = area.dim_in_pixel();
    let font = ("sans-serif", style.caption_size)
        .into_font()
        .color(&theme.text_color)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw_text(text, &font, (width as i32 / 2, height as i32 / 2))?;
    Ok(())
}

/// Upper bound of a count axis: 10% headroom, never below 1.
pub(crate) fn count_axis_max(counts: impl Iterator<Item = usize>) -> f64 {
    let max = counts.max().unwrap_or(0) as f64;
    (max * 1.1).max(1.0)
}

/// Use K/M formatting for large numbers
pub(crate) fn format_count(y: f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1_000.0 {
        format!("{:.1}K", y / 1_000.0)
    } else {
        format!("{:.0}", y)
    }
}

/// Calendar span of the daily chart: first commit day up to the day after
/// the last one, or `today` alone when there are no commits.
pub(crate) fn date_axis_range(daily: &[DailyCount], today: NaiveDate) -> Range<NaiveDate> {
    let first = daily.iter().map(|d| d.date).min().unwrap_or(today);
    let last = daily.iter().map(|d| d.date).max().unwrap_or(today);
    let end = last.checked_add_days(Days::new(1)).unwrap_or(last);
    first..end
}

pub(crate) fn hour_label(x: f64) -> String {
    let hour = x.round();
    if (x - hour).abs() > 1e-6 || !(0.0..=23.0).contains(&hour) {
        String::new()
    } else {
        format!("{:.0}", hour)
    }
}
