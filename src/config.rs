//! Start-up configuration.
//!
//! Every setting has a command-line flag, an environment fallback and a
//! default, so `devtrack` with no arguments behaves like the plain dashboard.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ACCOUNT: &str = "torvalds";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("devtrack/", env!("CARGO_PKG_VERSION"));

/// GitHub productivity dashboard
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(name = "devtrack", version, about)]
pub struct Config {
    /// Account shown when the dashboard opens
    #[arg(long, env = "DEVTRACK_ACCOUNT", default_value = DEFAULT_ACCOUNT)]
    pub account: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "DEVTRACK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// User-Agent header sent with every request
    #[arg(long, env = "DEVTRACK_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "DEVTRACK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Directory the chart images are written to
    #[arg(long, env = "DEVTRACK_CHART_DIR")]
    pub chart_dir: Option<PathBuf>,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The chart directory, falling back to `<cache dir>/devtrack`.
    pub fn chart_dir(&self) -> PathBuf {
        self.chart_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("devtrack")
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: DEFAULT_ACCOUNT.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            chart_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "devtrack",
            "--account",
            "rust-lang",
            "--api-url",
            "http://localhost:8080",
            "--timeout-secs",
            "5",
            "--chart-dir",
            "/tmp/charts",
        ])
        .unwrap();

        assert_eq!(config.account, "rust-lang");
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.chart_dir(), PathBuf::from("/tmp/charts"));
    }

    #[test]
    fn test_default_chart_dir_is_namespaced() {
        let config = Config::default();
        assert!(config.chart_dir().ends_with("devtrack"));
        assert_eq!(config.account, "torvalds");
        assert!(config.user_agent.starts_with("devtrack/"));
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        let result = Config::try_parse_from(["devtrack", "--timeout-secs", "soon"]);
        assert!(result.is_err());
    }
}
