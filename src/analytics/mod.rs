//! Listening analytics engine
//!
//! Pure transformations from fetched upstream records into listening
//! statistics. Nothing in here performs I/O or keeps state between calls.
//!
//! - `model` - Data model shared by all analytics
//! - `normalize` - Validation of raw upstream records
//! - `ranking` - Top-N projection of upstream-ranked lists
//! - `temporal` - Day and hour-of-day buckets
//! - `streak` - Consecutive-day listening streaks
//! - `popularity` - Popularity tiers and statistics
//! - `mood` - Valence tiers and audio-feature averages
//! - `frequency` - Replay counts per track

pub mod frequency;
pub mod model;
pub mod mood;
pub mod normalize;
pub mod popularity;
pub mod ranking;
pub mod streak;
pub mod temporal;

pub use model::{Artist, AudioFeature, DayPeriod, PlayEvent, TimeWindow, Track, TrackRef};
