#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use spotistats::{
    analytics::{AudioFeature, PlayEvent, TimeWindow, Track, TrackRef},
    error::{Result, StatsError},
    source::ListeningSource,
    types::{
        Credential, RawArtist, RawArtistRef, RawAudioFeatures, RawPlayHistoryItem, RawTrack,
    },
};

pub fn track(id: &str, name: &str, artist: &str, popularity: u8) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        artist: artist.to_string(),
        popularity: Some(popularity),
    }
}

pub fn tracks_with_popularity(scores: &[u8]) -> Vec<Track> {
    scores
        .iter()
        .enumerate()
        .map(|(i, p)| track(&format!("t{i}"), &format!("Track {i}"), "Artist", *p))
        .collect()
}

pub fn feature(track_id: &str, valence: f64, energy: f64, danceability: f64) -> AudioFeature {
    AudioFeature {
        track_id: track_id.to_string(),
        valence,
        energy,
        danceability,
    }
}

pub fn pair(id: &str, name: &str, valence: f64) -> (Track, AudioFeature) {
    (track(id, name, "Artist", 50), feature(id, valence, 0.5, 0.5))
}

pub fn at(ts: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(ts)
        .expect("valid test timestamp")
        .with_timezone(&Utc)
}

pub fn play(name: &str, artist: &str, ts: &str) -> PlayEvent {
    PlayEvent::new(
        TrackRef {
            id: None,
            name: name.to_string(),
            artist: artist.to_string(),
        },
        at(ts),
    )
}

pub fn raw_track(id: &str, name: &str, artist: &str, popularity: i64) -> RawTrack {
    RawTrack {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        artists: Some(vec![RawArtistRef {
            id: Some(format!("{id}_artist")),
            name: Some(artist.to_string()),
        }]),
        popularity: Some(popularity),
    }
}

pub fn raw_artist(name: &str) -> RawArtist {
    RawArtist {
        id: Some(format!("{name}_id")),
        name: Some(name.to_string()),
    }
}

pub fn raw_play(name: &str, artist: &str, played_at: &str) -> RawPlayHistoryItem {
    RawPlayHistoryItem {
        track: Some(RawTrack {
            id: Some(format!("{name}_id")),
            name: Some(name.to_string()),
            artists: Some(vec![RawArtistRef {
                id: None,
                name: Some(artist.to_string()),
            }]),
            popularity: None,
        }),
        played_at: Some(played_at.to_string()),
    }
}

pub fn raw_feature(id: &str, valence: f64) -> RawAudioFeatures {
    RawAudioFeatures {
        id: Some(id.to_string()),
        valence: Some(valence),
        energy: Some(0.5),
        danceability: Some(0.5),
    }
}

/// In-memory listening source that records the calls it receives.
#[derive(Default)]
pub struct FakeSource {
    pub top_tracks: Vec<RawTrack>,
    pub top_artists: Vec<RawArtist>,
    pub plays: Vec<RawPlayHistoryItem>,
    pub features: Vec<(String, RawAudioFeatures)>,
    pub unavailable: bool,
    pub feature_calls: AtomicUsize,
    pub requested_ids: Mutex<Vec<String>>,
    pub seen_credentials: Mutex<Vec<String>>,
}

impl FakeSource {
    fn check(&self, credential: &Credential) -> Result<()> {
        self.seen_credentials
            .lock()
            .expect("credential log")
            .push(credential.bearer().to_string());
        if self.unavailable {
            return Err(StatsError::UpstreamUnavailable("connection refused".to_string()));
        }
        Ok(())
    }

    pub fn feature_calls(&self) -> usize {
        self.feature_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListeningSource for FakeSource {
    async fn fetch_top_tracks(
        &self,
        credential: &Credential,
        _window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<RawTrack>> {
        self.check(credential)?;
        Ok(self.top_tracks.iter().take(limit as usize).cloned().collect())
    }

    async fn fetch_top_artists(
        &self,
        credential: &Credential,
        _window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<RawArtist>> {
        self.check(credential)?;
        Ok(self.top_artists.iter().take(limit as usize).cloned().collect())
    }

    async fn fetch_recent_plays(
        &self,
        credential: &Credential,
        limit: u32,
    ) -> Result<Vec<RawPlayHistoryItem>> {
        self.check(credential)?;
        Ok(self.plays.iter().take(limit as usize).cloned().collect())
    }

    async fn fetch_audio_features(
        &self,
        credential: &Credential,
        track_ids: &[String],
    ) -> Result<Vec<Option<RawAudioFeatures>>> {
        self.check(credential)?;
        self.feature_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_ids
            .lock()
            .expect("id log")
            .extend(track_ids.iter().cloned());

        Ok(track_ids
            .iter()
            .map(|id| {
                self.features
                    .iter()
                    .find(|(fid, _)| fid == id)
                    .map(|(_, f)| f.clone())
            })
            .collect())
    }
}
