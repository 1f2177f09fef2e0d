//! # Spotify Integration Module
//!
//! Everything that talks to Spotify: the OAuth 2.0 PKCE authorization used by
//! the CLI, and [`SpotifyClient`], the [`ListeningSource`](crate::source::ListeningSource)
//! implementation backing every metric.
//!
//! ## API Coverage
//!
//! - `GET /me/top/tracks` - Top tracks for a time range
//! - `GET /me/top/artists` - Top artists for a time range
//! - `GET /me/player/recently-played` - Play history, newest first
//! - `GET /audio-features` - Audio features, batched by up to 100 IDs
//! - `POST /api/token` - Code exchange and token refresh
//!
//! ## Error Handling
//!
//! - **502 Bad Gateway**: retried after a fixed delay
//! - **429 Too Many Requests**: retried after `Retry-After` when it is at most
//!   two minutes, otherwise reported as unavailable
//! - **401 Unauthorized**: reported as `StatsError::Unauthorized`
//! - Anything else non-successful: `StatsError::UpstreamUnavailable`
//! - A successful body that does not decode: `StatsError::MalformedUpstreamData`
//!   naming the endpoint
//!
//! Retries stop after three attempts. The credential is an argument of every
//! call; the client never stores one.

pub mod auth;
mod client;

pub use client::{MAX_AUDIO_FEATURE_IDS, MAX_PAGE_LIMIT, SpotifyClient};
