//! Process-wide settings read from the environment.
//!
//! `.env` is loaded by `main` before argument parsing, so every `env`
//! fallback below also sees values defined there.

use clap::Args;
use std::path::PathBuf;

/// Logging settings.
#[derive(Args, Clone, Debug)]
pub struct LogArgs {
    /// Log level or filter directive (e.g., info, debug, staffdb=trace)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Deployment environment; "production" disables colored console output
    #[arg(long, env = "NODE_ENV", default_value = "development", global = true)]
    pub node_env: String,

    /// Directory for error.log, combined.log and performance.log
    #[arg(long, env = "LOG_DIR", default_value = "logs", global = true)]
    pub log_dir: PathBuf,
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub production: bool,
    pub log_dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            production: false,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl From<&LogArgs> for LogConfig {
    fn from(args: &LogArgs) -> Self {
        let level = args.log_level.trim();
        Self {
            level: if level.is_empty() {
                "info".to_string()
            } else {
                level.to_ascii_lowercase()
            },
            production: args.node_env.trim().eq_ignore_ascii_case("production"),
            log_dir: args.log_dir.clone(),
        }
    }
}

impl LogConfig {
    /// Console output uses ANSI colors outside production.
    pub fn ansi(&self) -> bool {
        !self.production
    }
}
