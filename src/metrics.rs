//! Named listening metrics.
//!
//! Each function turns an already-normalized snapshot into a [`Metric`], the
//! JSON object handed to the CLI and the HTTP API. Key names and nesting are
//! part of the frontend contract and must not change between calls.

use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::analytics::{
    Artist, AudioFeature, DayPeriod, PlayEvent, TimeWindow, Track, frequency, mood, popularity,
    ranking, streak, temporal,
};

/// Placeholder track name when a "single track" metric has no data.
pub const NOT_AVAILABLE: &str = "Not available";

/// A computed metric: metric name(s) mapped to values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metric(Map<String, Value>);

impl Metric {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Metric(map),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                Metric(map)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Wraps the whole metric under `key`.
    pub fn nested(self, key: &str) -> Self {
        let mut map = Map::new();
        map.insert(key.to_string(), Value::Object(self.0));
        Metric(map)
    }

    /// Combines several metrics into one object. Later keys win on collision.
    pub fn merge<I: IntoIterator<Item = Metric>>(metrics: I) -> Self {
        let mut map = Map::new();
        for metric in metrics {
            map.extend(metric.0);
        }
        Metric(map)
    }
}

#[derive(Debug, Serialize)]
struct RecentPlay<'a> {
    name: &'a str,
    artist: &'a str,
    played_at: String,
}

#[derive(Debug, Serialize)]
struct RatedTrack<'a> {
    name: &'a str,
    artist: &'a str,
    popularity: u8,
}

#[derive(Debug, Serialize)]
struct SkippedTrack {
    track: String,
    approx_plays: usize,
}

/// Rounds to `decimals` places, ties to even.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

pub fn top_artists(window: TimeWindow, artists: &[Artist], limit: usize) -> Metric {
    let key = format!("top_artists_{}", window.span_label());
    let mut map = Map::new();
    map.insert(key, json!(ranking::top_artist_names(artists, limit)));
    Metric(map)
}

pub fn top_tracks(window: TimeWindow, tracks: &[Track], limit: usize) -> Metric {
    let key = format!("top_tracks_{}", window.span_label());
    let mut map = Map::new();
    map.insert(key, json!(ranking::top_track_summaries(tracks, limit)));
    Metric(map)
}

pub fn recently_played(events: &[PlayEvent], limit: usize) -> Metric {
    let plays: Vec<RecentPlay> = ranking::recent_plays(events, limit)
        .into_iter()
        .map(|e| RecentPlay {
            name: &e.track.name,
            artist: &e.track.artist,
            played_at: e.played_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
        .collect();
    Metric::from_value(json!({ "recently_played": plays }))
}

pub fn hidden_gems(tracks: &[Track]) -> Metric {
    let gems: Vec<RatedTrack> = popularity::hidden_gems(tracks)
        .into_iter()
        .filter_map(|t| {
            t.popularity.map(|p| RatedTrack {
                name: &t.name,
                artist: &t.artist,
                popularity: p,
            })
        })
        .collect();
    Metric::from_value(json!({ "hidden_gems": gems }))
}

/// Least-replayed tracks, reported as "most skipped". See
/// [`frequency`](crate::analytics::frequency) for why this is approximate.
pub fn most_skipped(events: &[PlayEvent], limit: usize) -> Metric {
    let skipped: Vec<SkippedTrack> = frequency::least_replayed(events, limit)
        .into_iter()
        .map(|(key, count)| SkippedTrack {
            track: key.to_string(),
            approx_plays: count,
        })
        .collect();
    Metric::from_value(json!({ "most_skipped": skipped }))
}

pub fn top_artist_by_time_of_day(events: &[PlayEvent], period: DayPeriod) -> Metric {
    let counts = temporal::artist_counts(events, period);
    let key = format!("top_artist_{}", period.name());
    let mut map = Map::new();
    map.insert(key, json!(counts.top()));
    Metric(map)
}

pub fn longest_streak(events: &[PlayEvent]) -> Metric {
    Metric::from_value(json!({ "longest_streak_days": streak::longest_streak(events) }))
}

fn popularity_extreme(track: Option<&Track>) -> Metric {
    match track.and_then(|t| t.popularity.map(|p| (t, p))) {
        Some((t, p)) => Metric::from_value(json!({
            "track": t.name,
            "artist": t.artist,
            "popularity": p,
        })),
        None => Metric::from_value(json!({
            "track": NOT_AVAILABLE,
            "artist": "",
            "popularity": 0,
        })),
    }
}

pub fn most_popular_track(tracks: &[Track]) -> Metric {
    popularity_extreme(popularity::most_popular(tracks))
}

pub fn least_popular_track(tracks: &[Track]) -> Metric {
    popularity_extreme(popularity::least_popular(tracks))
}

pub fn popularity_distribution(tracks: &[Track]) -> Metric {
    Metric::from_value(json!({ "popularity_distribution": popularity::distribution(tracks) }))
}

pub fn avg_popularity(tracks: &[Track]) -> Metric {
    Metric::from_value(json!({ "avg_popularity": popularity::average(tracks) }))
}

pub fn happiest_track(pairs: &[(Track, AudioFeature)]) -> Metric {
    match mood::happiest(pairs) {
        Some((track, feature)) => Metric::from_value(json!({
            "track": track.name,
            "artist": track.artist,
            "valence": feature.valence,
        })),
        None => Metric::from_value(json!({
            "track": NOT_AVAILABLE,
            "artist": "",
            "valence": null,
        })),
    }
}

/// Mean valence, energy and danceability. With no analysed tracks every
/// average is `null` and `tracks_analyzed` is 0.
pub fn feature_averages(pairs: &[(Track, AudioFeature)]) -> Metric {
    match mood::averages(pairs) {
        Some(avg) => Metric::from_value(json!({
            "avg_valence": round_to(avg.valence, 3),
            "avg_energy": round_to(avg.energy, 3),
            "avg_danceability": round_to(avg.danceability, 3),
            "tracks_analyzed": avg.samples,
        })),
        None => Metric::from_value(json!({
            "avg_valence": null,
            "avg_energy": null,
            "avg_danceability": null,
            "tracks_analyzed": 0,
        })),
    }
}

pub fn mood_distribution(pairs: &[(Track, AudioFeature)]) -> Metric {
    Metric::from_value(json!({ "mood_distribution": mood::distribution(pairs) }))
}
