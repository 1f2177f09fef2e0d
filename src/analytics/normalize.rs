//! Validation of upstream records into the analytics data model.
//!
//! Required fields that are missing, empty artist lists and out-of-range
//! values are reported as [`StatsError::MalformedUpstreamData`] naming the
//! offending record. Unknown upstream fields never reach this module; serde
//! drops them while decoding.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{
    analytics::model::{Artist, AudioFeature, PlayEvent, Track, TrackRef},
    error::{Result, StatsError},
    types::{RawArtist, RawArtistRef, RawAudioFeatures, RawPlayHistoryItem, RawTrack},
};

fn record_label(kind: &str, index: usize, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("{kind}[{index}] (id {id})"),
        None => format!("{kind}[{index}]"),
    }
}

fn required_text(value: Option<&String>, record: &str, field: &str) -> Result<String> {
    match value.map(|v| v.trim()) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(StatsError::malformed(record, format!("missing {field}"))),
    }
}

fn primary_artist(artists: Option<&Vec<RawArtistRef>>, record: &str) -> Result<String> {
    let first = artists
        .and_then(|a| a.first())
        .ok_or_else(|| StatsError::malformed(record, "empty artist list"))?;
    required_text(first.name.as_ref(), record, "artist name")
}

/// Parses an upstream `played_at` timestamp into a UTC instant.
///
/// RFC 3339 with any offset is converted to UTC. A timestamp without an offset
/// is taken to already be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn normalize_track(raw: &RawTrack, index: usize) -> Result<Track> {
    let record = record_label("track", index, raw.id.as_deref());

    let id = raw
        .id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    let name = required_text(raw.name.as_ref(), &record, "track name")?;
    let artist = primary_artist(raw.artists.as_ref(), &record)?;

    let popularity = match raw.popularity {
        None => None,
        Some(p) => match u8::try_from(p) {
            Ok(p) if p <= 100 => Some(p),
            _ => {
                return Err(StatsError::malformed(
                    &record,
                    format!("popularity {p} outside 0..=100"),
                ));
            }
        },
    };

    Ok(Track {
        id,
        name,
        artist,
        popularity,
    })
}

pub fn normalize_tracks(raw: &[RawTrack]) -> Result<Vec<Track>> {
    raw.iter()
        .enumerate()
        .map(|(i, t)| normalize_track(t, i))
        .collect()
}

pub fn normalize_artists(raw: &[RawArtist]) -> Result<Vec<Artist>> {
    raw.iter()
        .enumerate()
        .map(|(i, a)| {
            let record = record_label("artist", i, a.id.as_deref());
            Ok(Artist {
                id: a.id.clone().unwrap_or_default(),
                name: required_text(a.name.as_ref(), &record, "artist name")?,
            })
        })
        .collect()
}

pub fn normalize_play(raw: &RawPlayHistoryItem, index: usize) -> Result<PlayEvent> {
    let track = raw.track.as_ref();
    let record = record_label("play", index, track.and_then(|t| t.id.as_deref()));

    let track = track.ok_or_else(|| StatsError::malformed(&record, "missing track"))?;
    let track_ref = TrackRef {
        id: track.id.clone(),
        name: required_text(track.name.as_ref(), &record, "track name")?,
        artist: primary_artist(track.artists.as_ref(), &record)?,
    };

    let raw_ts = raw
        .played_at
        .as_deref()
        .ok_or_else(|| StatsError::malformed(&record, "missing played_at"))?;
    let played_at = parse_timestamp(raw_ts).ok_or_else(|| {
        StatsError::malformed(&record, format!("unparseable played_at {raw_ts:?}"))
    })?;

    Ok(PlayEvent::new(track_ref, played_at))
}

/// Normalizes play history, keeping upstream order (newest first).
pub fn normalize_plays(raw: &[RawPlayHistoryItem]) -> Result<Vec<PlayEvent>> {
    raw.iter()
        .enumerate()
        .map(|(i, p)| normalize_play(p, i))
        .collect()
}

fn unit_scalar(value: Option<f64>, record: &str, field: &str) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() && (0.0..=1.0).contains(&v) => Ok(v),
        Some(v) => Err(StatsError::malformed(
            record,
            format!("{field} {v} outside 0.0..=1.0"),
        )),
        None => Err(StatsError::malformed(record, format!("missing {field}"))),
    }
}

/// Normalizes an audio-feature batch. `None` entries are upstream omissions
/// and are skipped.
pub fn normalize_features(raw: &[Option<RawAudioFeatures>]) -> Result<Vec<AudioFeature>> {
    let mut features = Vec::with_capacity(raw.len());
    for (i, entry) in raw.iter().enumerate() {
        let Some(f) = entry else { continue };
        let record = record_label("audio_features", i, f.id.as_deref());
        features.push(AudioFeature {
            track_id: required_text(f.id.as_ref(), &record, "track id")?,
            valence: unit_scalar(f.valence, &record, "valence")?,
            energy: unit_scalar(f.energy, &record, "energy")?,
            danceability: unit_scalar(f.danceability, &record, "danceability")?,
        });
    }
    Ok(features)
}

/// Pairs tracks with their audio features by ID, in track order. Tracks
/// without an ID or without a feature are left out.
pub fn attach_features(tracks: &[Track], features: &[AudioFeature]) -> Vec<(Track, AudioFeature)> {
    let by_id: HashMap<&str, &AudioFeature> = features
        .iter()
        .map(|f| (f.track_id.as_str(), f))
        .collect();

    tracks
        .iter()
        .filter_map(|t| {
            let feature = by_id.get(t.id.as_deref()?)?;
            Some((t.clone(), (*feature).clone()))
        })
        .collect()
}
