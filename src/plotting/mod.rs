mod chart;
pub mod styles;


pub use chart::{
    draw_daily_commits, draw_hourly_commits, draw_language_usage, render_dashboard, ChartPaths,
    PlotError, RenderedCharts,
};
