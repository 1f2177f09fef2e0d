//! # CLI Module
//!
//! Command implementations for spotistats. Each command talks to the user
//! through the crate's colored output macros and exits with an error message
//! on failure.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth 2.0 PKCE authorization; stores the token locally
//! - [`stats`] - Computes one listening metric and prints it as a table or JSON
//! - [`dashboard`] - Computes the dashboard overview in one go
//! - [`serve`] - Runs the statistics HTTP API for a frontend
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotistats auth
//! spotistats stats top-artists --window medium_term --limit 5
//! spotistats stats time-of-day --period evening
//! spotistats stats streak --json
//! spotistats dashboard
//! spotistats serve --address 127.0.0.1:8000
//! ```
//!
//! `stats` and `dashboard` use the stored token and refresh it when it is
//! about to expire. `serve` does not; each HTTP request brings its own token.

mod auth;
mod serve;
mod stats;

pub use auth::auth;
pub use serve::serve;
pub use stats::MetricKind;
pub use stats::dashboard;
pub use stats::stats;
