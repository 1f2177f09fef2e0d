use async_trait::async_trait;

use crate::{
    analytics::TimeWindow,
    error::Result,
    types::{Credential, RawArtist, RawAudioFeatures, RawPlayHistoryItem, RawTrack},
};

/// Fetch boundary for listening data.
///
/// Every call carries the caller's credential; implementations keep no
/// session of their own. Failures to reach upstream surface as
/// `StatsError::UpstreamUnavailable` and are not retried by the analytics.
#[async_trait]
pub trait ListeningSource: Send + Sync {
    /// Top tracks for `window`, in upstream rank order.
    async fn fetch_top_tracks(
        &self,
        credential: &Credential,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<RawTrack>>;

    /// Top artists for `window`, in upstream rank order.
    async fn fetch_top_artists(
        &self,
        credential: &Credential,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<RawArtist>>;

    /// Recently played items, newest first.
    async fn fetch_recent_plays(
        &self,
        credential: &Credential,
        limit: u32,
    ) -> Result<Vec<RawPlayHistoryItem>>;

    /// Audio features for `track_ids`, one entry per ID; `None` where upstream
    /// has no features for the track.
    async fn fetch_audio_features(
        &self,
        credential: &Credential,
        track_ids: &[String],
    ) -> Result<Vec<Option<RawAudioFeatures>>>;
}
