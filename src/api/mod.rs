//! # API Module
//!
//! HTTP endpoints of spotistats, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`callback`] - OAuth callback used by `spotistats auth`. Completes the
//!   PKCE flow by exchanging the authorization code for a token.
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version for monitoring.
//!
//! ### Statistics
//!
//! [`router`] serves one `GET` route per listening metric. Every statistics
//! route requires an `Authorization: Bearer <token>` header; the token is
//! passed through to Spotify for that request only.
//!
//! | Route | Query |
//! |---|---|
//! | `/top-artists`, `/top-tracks` | `window`, `limit` |
//! | `/top-artists-medium`, `/top-artists-long` | |
//! | `/recently-played`, `/most-skipped`, `/longest-listening-streak` | `limit` |
//! | `/hidden-gems` | `window` |
//! | `/top-artist-by-time-of-day` | `period` |
//! | `/top-artist-morning`, `/top-artist-evening` | |
//! | `/most-popular-track`, `/least-popular-track` | |
//! | `/popularity-distribution`, `/avg-popularity` | |
//! | `/happiest-track`, `/top-tracks-averages`, `/mood-distribution` | |
//! | `/dashboard` | |
//!
//! ## Errors
//!
//! Failures are returned as `{"error": "..."}` with status 401 (missing or
//! rejected credential), 422 (malformed upstream data), 502 (Spotify
//! unavailable) or 500.

mod callback;
mod error;
mod health;
mod stats;

use std::sync::Arc;

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{service::StatsService, source::ListeningSource};

pub use callback::callback;
pub use error::{ApiError, ApiResult};
pub use health::health;

/// Router for the statistics API.
///
/// CORS admits only `allowed_origins`, with credentials, for `GET` requests
/// carrying `Authorization` and `Content-Type` headers.
pub fn router<S>(service: Arc<StatsService<S>>, allowed_origins: &[String]) -> Router
where
    S: ListeningSource + 'static,
{
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route("/", get(stats::index))
        .route("/health", get(health))
        .route("/top-artists", get(stats::top_artists::<S>))
        .route("/top-artists-medium", get(stats::top_artists_medium::<S>))
        .route("/top-artists-long", get(stats::top_artists_long::<S>))
        .route("/top-tracks", get(stats::top_tracks::<S>))
        .route("/recently-played", get(stats::recently_played::<S>))
        .route("/hidden-gems", get(stats::hidden_gems::<S>))
        .route("/most-skipped", get(stats::most_skipped::<S>))
        .route(
            "/top-artist-by-time-of-day",
            get(stats::top_artist_by_time_of_day::<S>),
        )
        .route("/top-artist-morning", get(stats::top_artist_morning::<S>))
        .route("/top-artist-evening", get(stats::top_artist_evening::<S>))
        .route(
            "/longest-listening-streak",
            get(stats::longest_streak::<S>),
        )
        .route("/most-popular-track", get(stats::most_popular_track::<S>))
        .route("/least-popular-track", get(stats::least_popular_track::<S>))
        .route(
            "/popularity-distribution",
            get(stats::popularity_distribution::<S>),
        )
        .route("/avg-popularity", get(stats::avg_popularity::<S>))
        .route("/happiest-track", get(stats::happiest_track::<S>))
        .route("/top-tracks-averages", get(stats::feature_averages::<S>))
        .route("/mood-distribution", get(stats::mood_distribution::<S>))
        .route("/dashboard", get(stats::dashboard::<S>))
        .with_state(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
