//! Popularity tiers and aggregate popularity statistics.
//!
//! Tracks whose popularity upstream omitted are left out of every aggregate
//! in this module.

use serde::Serialize;

use crate::analytics::model::Track;

/// Tracks below this score count as hidden gems.
pub const HIDDEN_GEM_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopularityTier {
    Underground,
    Moderate,
    Mainstream,
}

impl PopularityTier {
    pub fn classify(popularity: u8) -> Self {
        match popularity {
            0..30 => PopularityTier::Underground,
            30..60 => PopularityTier::Moderate,
            _ => PopularityTier::Mainstream,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopularityDistribution {
    pub underground: usize,
    pub moderate: usize,
    pub mainstream: usize,
}

impl PopularityDistribution {
    pub fn total(&self) -> usize {
        self.underground + self.moderate + self.mainstream
    }
}

fn scored(tracks: &[Track]) -> impl Iterator<Item = (&Track, u8)> {
    tracks
        .iter()
        .filter_map(|t| t.popularity.map(|p| (t, p)))
}

pub fn distribution(tracks: &[Track]) -> PopularityDistribution {
    let mut dist = PopularityDistribution::default();
    for (_, p) in scored(tracks) {
        match PopularityTier::classify(p) {
            PopularityTier::Underground => dist.underground += 1,
            PopularityTier::Moderate => dist.moderate += 1,
            PopularityTier::Mainstream => dist.mainstream += 1,
        }
    }
    dist
}

/// First track with the highest popularity.
pub fn most_popular(tracks: &[Track]) -> Option<&Track> {
    let mut best: Option<(&Track, u8)> = None;
    for (track, p) in scored(tracks) {
        if best.is_none_or(|(_, b)| p > b) {
            best = Some((track, p));
        }
    }
    best.map(|(t, _)| t)
}

/// First track with the lowest popularity.
pub fn least_popular(tracks: &[Track]) -> Option<&Track> {
    let mut best: Option<(&Track, u8)> = None;
    for (track, p) in scored(tracks) {
        if best.is_none_or(|(_, b)| p < b) {
            best = Some((track, p));
        }
    }
    best.map(|(t, _)| t)
}

/// Mean popularity rounded to one decimal with ties to even, 0.0 when
/// nothing is scored.
pub fn average(tracks: &[Track]) -> f64 {
    let (sum, count) = scored(tracks).fold((0u64, 0u64), |(s, c), (_, p)| (s + p as u64, c + 1));
    if count == 0 {
        return 0.0;
    }
    let mean = sum as f64 / count as f64;
    (mean * 10.0).round_ties_even() / 10.0
}

/// Tracks below [`HIDDEN_GEM_THRESHOLD`], in upstream order.
pub fn hidden_gems(tracks: &[Track]) -> Vec<&Track> {
    scored(tracks)
        .filter(|(_, p)| *p < HIDDEN_GEM_THRESHOLD)
        .map(|(t, _)| t)
        .collect()
}
