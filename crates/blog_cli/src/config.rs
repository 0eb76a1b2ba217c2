//! Server configuration from flags and environment.
//!
//! # Invariants
//! - `bind` always parses as a socket address.
//! - `log_dir` is absolute by the time logging starts.

use blog_core::{default_log_level, LogLevel};
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "blogd")]
#[command(about = "Users, posts and comments over HTTP.")]
pub struct CommandLine {
    /// SQLite database file; created and migrated on first use
    #[arg(long, env = "BLOG_DB_PATH", default_value = "blog.sqlite3")]
    pub db_path: PathBuf,
    /// Address the HTTP server listens on
    #[arg(long, env = "BLOG_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,
    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, env = "BLOG_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,
    /// Directory for rolling log files (defaults to ./logs)
    #[arg(long, env = "BLOG_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub bind: SocketAddr,
    pub log_level: LogLevel,
    pub log_dir: PathBuf,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Fills defaults and anchors relative log directories at `cwd`.
    pub fn resolve(self, cwd: &Path) -> ServerConfig {
        let log_dir = self.log_dir.unwrap_or_else(|| PathBuf::from("logs"));
        let log_dir = if log_dir.is_absolute() {
            log_dir
        } else {
            cwd.join(log_dir)
        };

        ServerConfig {
            db_path: self.db_path,
            bind: self.bind,
            log_level: self.log_level.unwrap_or_else(default_log_level),
            log_dir,
        }
    }
}
