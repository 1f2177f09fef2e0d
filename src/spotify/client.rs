use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{
    analytics::TimeWindow,
    config,
    error::{Result, StatsError},
    source::ListeningSource,
    types::{
        AudioFeaturesResponse, Credential, RawArtist, RawAudioFeatures, RawPlayHistoryItem,
        RawTrack, RecentlyPlayedResponse, TopItemsResponse,
    },
};

/// Largest page the top-items and recently-played endpoints accept.
pub const MAX_PAGE_LIMIT: u32 = 50;
/// Largest ID batch the audio-features endpoint accepts.
pub const MAX_AUDIO_FEATURE_IDS: usize = 100;

const MAX_ATTEMPTS: u32 = 3;
const BAD_GATEWAY_BACKOFF: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Spotify Web API implementation of [`ListeningSource`].
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for the API base URL configured in the environment.
    pub fn from_env() -> Self {
        Self::new(config::spotify_apiurl())
    }

    /// GETs `path` (with its query string) under the API base and decodes the
    /// JSON body.
    ///
    /// 502 responses are retried after a fixed delay and 429 responses after
    /// the `Retry-After` delay, up to [`MAX_ATTEMPTS`] attempts in total. A
    /// body that does not match `T` is malformed data, not an outage.
    async fn get_json<T: DeserializeOwned>(&self, credential: &Credential, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.api_url);
        let endpoint = path.split('?').next().unwrap_or(path);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let response = self
                .http
                .get(&url)
                .bearer_auth(credential.bearer())
                .send()
                .await?;

            let status = response.status();
            if attempt < MAX_ATTEMPTS {
                if status == StatusCode::BAD_GATEWAY {
                    warn!(endpoint, attempt, "upstream answered 502, retrying");
                    sleep(BAD_GATEWAY_BACKOFF).await;
                    continue;
                }

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(1);
                    if retry_after <= MAX_RETRY_AFTER_SECS {
                        warn!(endpoint, retry_after, "rate limited, waiting before retry");
                        sleep(Duration::from_secs(retry_after)).await;
                        continue;
                    }
                    return Err(StatsError::UpstreamUnavailable(format!(
                        "rate limited for {retry_after} seconds"
                    )));
                }
            }

            let body = response.error_for_status()?.bytes().await?;
            debug!(endpoint, %status, bytes = body.len(), "upstream request succeeded");
            return serde_json::from_slice::<T>(&body)
                .map_err(|e| StatsError::malformed(format!("{endpoint} response"), e.to_string()));
        }
    }
}

#[async_trait]
impl ListeningSource for SpotifyClient {
    async fn fetch_top_tracks(
        &self,
        credential: &Credential,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<RawTrack>> {
        let url = format!(
            "/me/top/tracks?time_range={range}&limit={limit}",
            range = window.as_param(),
            limit = limit.clamp(1, MAX_PAGE_LIMIT)
        );
        let res = self
            .get_json::<TopItemsResponse<RawTrack>>(credential, &url)
            .await?;
        Ok(res.items)
    }

    async fn fetch_top_artists(
        &self,
        credential: &Credential,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<RawArtist>> {
        let url = format!(
            "/me/top/artists?time_range={range}&limit={limit}",
            range = window.as_param(),
            limit = limit.clamp(1, MAX_PAGE_LIMIT)
        );
        let res = self
            .get_json::<TopItemsResponse<RawArtist>>(credential, &url)
            .await?;
        Ok(res.items)
    }

    async fn fetch_recent_plays(
        &self,
        credential: &Credential,
        limit: u32,
    ) -> Result<Vec<RawPlayHistoryItem>> {
        let url = format!(
            "/me/player/recently-played?limit={limit}",
            limit = limit.clamp(1, MAX_PAGE_LIMIT)
        );
        let res = self
            .get_json::<RecentlyPlayedResponse>(credential, &url)
            .await?;
        Ok(res.items)
    }

    async fn fetch_audio_features(
        &self,
        credential: &Credential,
        track_ids: &[String],
    ) -> Result<Vec<Option<RawAudioFeatures>>> {
        let mut features = Vec::with_capacity(track_ids.len());
        for chunk in track_ids.chunks(MAX_AUDIO_FEATURE_IDS) {
            let url = format!("/audio-features?ids={}", chunk.join(","));
            let res = self
                .get_json::<AudioFeaturesResponse>(credential, &url)
                .await?;
            features.extend(res.audio_features);
        }
        Ok(features)
    }
}
