//! Replay counts over play history.
//!
//! The "most skipped" metric is built on [`least_replayed`]: tracks that show
//! up least often in recent history are treated as the most skipped. The
//! upstream API exposes no skip signal, so this is an approximation and not a
//! measurement of skip behavior.

use std::{collections::HashMap, fmt};

use crate::analytics::model::PlayEvent;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayKey {
    pub track: String,
    pub artist: String,
}

impl fmt::Display for PlayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.track, self.artist)
    }
}

/// Plays per (track name, primary artist), in first-seen order.
pub fn replay_counts(events: &[PlayEvent]) -> Vec<(PlayKey, usize)> {
    let mut counts: Vec<(PlayKey, usize)> = Vec::new();
    let mut index: HashMap<PlayKey, usize> = HashMap::new();

    for event in events {
        let key = PlayKey {
            track: event.track.name.clone(),
            artist: event.track.artist.clone(),
        };
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts
}

/// The `limit` keys with the fewest plays, ascending by count. Equal counts
/// keep first-seen order.
pub fn least_replayed(events: &[PlayEvent], limit: usize) -> Vec<(PlayKey, usize)> {
    let mut counts = replay_counts(events);
    counts.sort_by_key(|(_, count)| *count);
    counts.truncate(limit);
    counts
}
