//! Calendar-day and hour-of-day bucketing of play events.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::analytics::model::{DayPeriod, PlayEvent};

/// Per-artist play counts in the order each artist was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistCounts {
    entries: Vec<(String, usize)>,
}

impl ArtistCounts {
    fn record(&mut self, index: &mut HashMap<String, usize>, artist: &str) {
        match index.get(artist) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                index.insert(artist.to_string(), self.entries.len());
                self.entries.push((artist.to_string(), 1));
            }
        }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Artist with the highest count. Ties go to the artist seen first.
    pub fn top(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(artist, _)| artist.as_str())
    }
}

/// Counts plays per primary artist for events inside `period`.
pub fn artist_counts(events: &[PlayEvent], period: DayPeriod) -> ArtistCounts {
    let mut counts = ArtistCounts::default();
    let mut index = HashMap::new();
    for event in events.iter().filter(|e| period.contains(e.hour())) {
        counts.record(&mut index, &event.track.artist);
    }
    counts
}

/// Number of plays per calendar date, ascending by date.
pub fn plays_per_day(events: &[PlayEvent]) -> BTreeMap<NaiveDate, usize> {
    let mut days = BTreeMap::new();
    for event in events {
        *days.entry(event.date()).or_insert(0) += 1;
    }
    days
}

/// Number of plays per hour of day, indexed `0..24`.
pub fn plays_per_hour(events: &[PlayEvent]) -> [usize; 24] {
    let mut hours = [0usize; 24];
    for event in events {
        hours[event.hour() as usize] += 1;
    }
    hours
}
