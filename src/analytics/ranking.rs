//! Top-N projection of upstream-ranked lists.
//!
//! Upstream already ranks top artists and tracks for a time window. Nothing
//! here re-sorts; the first `limit` items are taken in upstream order.

use serde::Serialize;

use crate::analytics::model::{Artist, PlayEvent, Track};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackSummary {
    pub name: String,
    pub artist: String,
}

impl From<&Track> for TrackSummary {
    fn from(track: &Track) -> Self {
        Self {
            name: track.name.clone(),
            artist: track.artist.clone(),
        }
    }
}

pub fn top_artist_names(artists: &[Artist], limit: usize) -> Vec<String> {
    artists.iter().take(limit).map(|a| a.name.clone()).collect()
}

pub fn top_track_summaries(tracks: &[Track], limit: usize) -> Vec<TrackSummary> {
    tracks.iter().take(limit).map(TrackSummary::from).collect()
}

/// Most recent plays first, as returned upstream.
pub fn recent_plays(events: &[PlayEvent], limit: usize) -> Vec<&PlayEvent> {
    events.iter().take(limit).collect()
}
