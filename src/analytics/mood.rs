//! Mood tiers from valence and audio-feature averages.
//!
//! Inputs are `(Track, AudioFeature)` pairs; tracks without features are
//! filtered out before reaching here (see `normalize::attach_features`).

use serde::Serialize;

use crate::analytics::model::{AudioFeature, Track};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodTier {
    Low,
    Medium,
    High,
}

impl MoodTier {
    pub fn classify(valence: f64) -> Self {
        if valence < 0.33 {
            MoodTier::Low
        } else if valence < 0.66 {
            MoodTier::Medium
        } else {
            MoodTier::High
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MoodDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl MoodDistribution {
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureAverages {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub samples: usize,
}

pub fn distribution(pairs: &[(Track, AudioFeature)]) -> MoodDistribution {
    let mut dist = MoodDistribution::default();
    for (_, feature) in pairs {
        match MoodTier::classify(feature.valence) {
            MoodTier::Low => dist.low += 1,
            MoodTier::Medium => dist.medium += 1,
            MoodTier::High => dist.high += 1,
        }
    }
    dist
}

/// Unweighted means over the pairs, or `None` when there are none.
pub fn averages(pairs: &[(Track, AudioFeature)]) -> Option<FeatureAverages> {
    if pairs.is_empty() {
        return None;
    }

    let n = pairs.len() as f64;
    let (valence, energy, danceability) = pairs.iter().fold((0.0, 0.0, 0.0), |acc, (_, f)| {
        (acc.0 + f.valence, acc.1 + f.energy, acc.2 + f.danceability)
    });

    Some(FeatureAverages {
        valence: valence / n,
        energy: energy / n,
        danceability: danceability / n,
        samples: pairs.len(),
    })
}

/// Pair with the highest valence; the first one wins on ties.
pub fn happiest(pairs: &[(Track, AudioFeature)]) -> Option<&(Track, AudioFeature)> {
    let mut best: Option<&(Track, AudioFeature)> = None;
    for pair in pairs {
        if best.is_none_or(|b| pair.1.valence > b.1.valence) {
            best = Some(pair);
        }
    }
    best
}
