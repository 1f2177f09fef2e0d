//! Spotify Listening Statistics Library
//!
//! This library fetches a user's listening data from the Spotify Web API and
//! derives listening statistics from it: favorite artists and tracks per time
//! window, popularity and mood profiles, time-of-day preferences and listening
//! streaks. The analytics are pure functions over a fetched snapshot; the CLI
//! and the HTTP API are thin layers on top.
//!
//! # Modules
//!
//! - `analytics` - Pure listening analytics over normalized data
//! - `api` - HTTP endpoints for the statistics API and the OAuth callback
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types
//! - `management` - Token storage and refresh
//! - `metrics` - Named metrics built from analytics results
//! - `server` - Local HTTP servers
//! - `service` - Fetch-and-compute orchestration per metric
//! - `source` - The listening-data fetch boundary
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Upstream records and credentials
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotistats::{service::StatsService, spotify::SpotifyClient, types::Credential};
//!
//! #[tokio::main]
//! async fn main() -> spotistats::error::Result<()> {
//!     let service = StatsService::new(SpotifyClient::from_env());
//!     let metric = service.longest_streak(&Credential::new("BQC..."), 50).await?;
//!     println!("{}", serde_json::to_string(&metric)?);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod metrics;
pub mod server;
pub mod service;
pub mod source;
pub mod spotify;
pub mod types;
pub mod utils;

#[doc(hidden)]
#[macro_export]
macro_rules! __status_line {
  (out, $marker:literal, $color:ident, $($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", $marker.$color().bold(), std::format_args!($($arg)*));
  });
  (err, $marker:literal, $color:ident, $($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", $marker.$color().bold(), std::format_args!($($arg)*));
  });
}

/// Prints a status line with a blue `o` marker to stdout.
///
/// ```
/// info!("Serving statistics on http://{}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ($crate::__status_line!(out, "o", blue, $($arg)*))
}

/// Prints a status line with a green checkmark to stdout.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ($crate::__status_line!(out, "✓", green, $($arg)*))
}

/// Prints a red `!` line to stderr and exits with status 1.
///
/// Only for failures the CLI cannot continue from; stdout stays clean so
/// `--json` output can be piped.
///
/// ```
/// error!("Failed to load token. Please run spotistats auth");
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    $crate::__status_line!(err, "!", red, $($arg)*);
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line to stderr.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ($crate::__status_line!(err, "!", yellow, $($arg)*))
}
