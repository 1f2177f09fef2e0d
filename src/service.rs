//! Metric orchestration: fetch a snapshot, normalize it, compute a metric.
//!
//! [`StatsService`] is stateless apart from its [`ListeningSource`]; each
//! call fetches its own snapshot with the caller's credential, so a single
//! instance can be shared between concurrent callers.

use tracing::debug;

use crate::{
    analytics::{
        AudioFeature, DayPeriod, PlayEvent, TimeWindow, Track, normalize,
    },
    error::Result,
    metrics::{self, Metric},
    source::ListeningSource,
    types::Credential,
};

/// Number of top artists/tracks returned when no limit is given.
pub const DEFAULT_TOP_LIMIT: u32 = 10;
/// Number of recent plays listed when no limit is given.
pub const DEFAULT_RECENT_LIMIT: u32 = 20;
/// Number of "most skipped" tracks returned when no limit is given.
pub const DEFAULT_SKIPPED_LIMIT: u32 = 10;
/// Play-history depth used by the history-based metrics.
pub const RECENT_HISTORY_LIMIT: u32 = 50;
/// Top-track depth used by the popularity and mood profiles.
pub const PROFILE_TRACK_LIMIT: u32 = 50;
/// Time window used by the popularity and mood profiles.
pub const PROFILE_WINDOW: TimeWindow = TimeWindow::MediumTerm;

/// One metric with its parameters, as requested by the CLI or API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricRequest {
    TopArtists { window: TimeWindow, limit: u32 },
    TopTracks { window: TimeWindow, limit: u32 },
    RecentlyPlayed { limit: u32 },
    HiddenGems { window: TimeWindow },
    MostSkipped { limit: u32 },
    TopArtistByTimeOfDay { period: DayPeriod },
    LongestStreak { limit: u32 },
    MostPopularTrack,
    LeastPopularTrack,
    PopularityDistribution,
    AvgPopularity,
    HappiestTrack,
    FeatureAverages,
    MoodDistribution,
    Dashboard,
}

pub struct StatsService<S> {
    source: S,
}

impl<S: ListeningSource> StatsService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn top_track_snapshot(
        &self,
        credential: &Credential,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<Track>> {
        let raw = self
            .source
            .fetch_top_tracks(credential, window, limit)
            .await?;
        debug!(window = %window, count = raw.len(), "fetched top tracks");
        normalize::normalize_tracks(&raw)
    }

    async fn play_snapshot(&self, credential: &Credential, limit: u32) -> Result<Vec<PlayEvent>> {
        let raw = self.source.fetch_recent_plays(credential, limit).await?;
        debug!(count = raw.len(), "fetched recent plays");
        normalize::normalize_plays(&raw)
    }

    /// Profile tracks paired with their audio features. Features for all
    /// tracks are requested in one batch.
    async fn mood_snapshot(&self, credential: &Credential) -> Result<Vec<(Track, AudioFeature)>> {
        let tracks = self
            .top_track_snapshot(credential, PROFILE_WINDOW, PROFILE_TRACK_LIMIT)
            .await?;
        self.with_features(credential, tracks).await
    }

    async fn with_features(
        &self,
        credential: &Credential,
        tracks: Vec<Track>,
    ) -> Result<Vec<(Track, AudioFeature)>> {
        let ids: Vec<String> = tracks.iter().filter_map(|t| t.id.clone()).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw = self.source.fetch_audio_features(credential, &ids).await?;
        let features = normalize::normalize_features(&raw)?;
        debug!(
            requested = ids.len(),
            received = features.len(),
            "fetched audio features"
        );
        Ok(normalize::attach_features(&tracks, &features))
    }

    pub async fn top_artists(
        &self,
        credential: &Credential,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Metric> {
        let raw = self
            .source
            .fetch_top_artists(credential, window, limit)
            .await?;
        let artists = normalize::normalize_artists(&raw)?;
        Ok(metrics::top_artists(window, &artists, limit as usize))
    }

    pub async fn top_tracks(
        &self,
        credential: &Credential,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Metric> {
        let tracks = self.top_track_snapshot(credential, window, limit).await?;
        Ok(metrics::top_tracks(window, &tracks, limit as usize))
    }

    pub async fn recently_played(&self, credential: &Credential, limit: u32) -> Result<Metric> {
        let events = self.play_snapshot(credential, limit).await?;
        Ok(metrics::recently_played(&events, limit as usize))
    }

    pub async fn hidden_gems(&self, credential: &Credential, window: TimeWindow) -> Result<Metric> {
        let tracks = self
            .top_track_snapshot(credential, window, PROFILE_TRACK_LIMIT)
            .await?;
        Ok(metrics::hidden_gems(&tracks))
    }

    pub async fn most_skipped(&self, credential: &Credential, limit: u32) -> Result<Metric> {
        let events = self.play_snapshot(credential, RECENT_HISTORY_LIMIT).await?;
        Ok(metrics::most_skipped(&events, limit as usize))
    }

    pub async fn top_artist_by_time_of_day(
        &self,
        credential: &Credential,
        period: DayPeriod,
    ) -> Result<Metric> {
        let events = self.play_snapshot(credential, RECENT_HISTORY_LIMIT).await?;
        Ok(metrics::top_artist_by_time_of_day(&events, period))
    }

    pub async fn longest_streak(&self, credential: &Credential, limit: u32) -> Result<Metric> {
        let events = self.play_snapshot(credential, limit).await?;
        Ok(metrics::longest_streak(&events))
    }

    pub async fn most_popular_track(&self, credential: &Credential) -> Result<Metric> {
        let tracks = self.profile_tracks(credential).await?;
        Ok(metrics::most_popular_track(&tracks))
    }

    pub async fn least_popular_track(&self, credential: &Credential) -> Result<Metric> {
        let tracks = self.profile_tracks(credential).await?;
        Ok(metrics::least_popular_track(&tracks))
    }

    pub async fn popularity_distribution(&self, credential: &Credential) -> Result<Metric> {
        let tracks = self.profile_tracks(credential).await?;
        Ok(metrics::popularity_distribution(&tracks))
    }

    pub async fn avg_popularity(&self, credential: &Credential) -> Result<Metric> {
        let tracks = self.profile_tracks(credential).await?;
        Ok(metrics::avg_popularity(&tracks))
    }

    pub async fn happiest_track(&self, credential: &Credential) -> Result<Metric> {
        let pairs = self.mood_snapshot(credential).await?;
        Ok(metrics::happiest_track(&pairs))
    }

    pub async fn feature_averages(&self, credential: &Credential) -> Result<Metric> {
        let pairs = self.mood_snapshot(credential).await?;
        Ok(metrics::feature_averages(&pairs))
    }

    pub async fn mood_distribution(&self, credential: &Credential) -> Result<Metric> {
        let pairs = self.mood_snapshot(credential).await?;
        Ok(metrics::mood_distribution(&pairs))
    }

    /// Everything the dashboard shows, from a single snapshot per data set.
    pub async fn dashboard(&self, credential: &Credential) -> Result<Metric> {
        let window = TimeWindow::ShortTerm;
        let (artists, top, profile, events) = tokio::try_join!(
            self.source
                .fetch_top_artists(credential, window, DEFAULT_TOP_LIMIT),
            self.top_track_snapshot(credential, window, DEFAULT_TOP_LIMIT),
            self.profile_tracks(credential),
            self.play_snapshot(credential, RECENT_HISTORY_LIMIT),
        )?;
        let artists = normalize::normalize_artists(&artists)?;
        let pairs = self.with_features(credential, profile.clone()).await?;

        Ok(Metric::merge([
            metrics::top_artists(window, &artists, DEFAULT_TOP_LIMIT as usize),
            metrics::top_tracks(window, &top, DEFAULT_TOP_LIMIT as usize),
            metrics::hidden_gems(&profile),
            metrics::mood_distribution(&pairs),
            metrics::longest_streak(&events),
            metrics::happiest_track(&pairs).nested("happiest_track"),
            metrics::feature_averages(&pairs).nested("top_tracks_averages"),
            metrics::top_artist_by_time_of_day(&events, DayPeriod::Morning),
            metrics::top_artist_by_time_of_day(&events, DayPeriod::Evening),
        ]))
    }

    pub async fn compute(&self, credential: &Credential, request: MetricRequest) -> Result<Metric> {
        match request {
            MetricRequest::TopArtists { window, limit } => {
                self.top_artists(credential, window, limit).await
            }
            MetricRequest::TopTracks { window, limit } => {
                self.top_tracks(credential, window, limit).await
            }
            MetricRequest::RecentlyPlayed { limit } => self.recently_played(credential, limit).await,
            MetricRequest::HiddenGems { window } => self.hidden_gems(credential, window).await,
            MetricRequest::MostSkipped { limit } => self.most_skipped(credential, limit).await,
            MetricRequest::TopArtistByTimeOfDay { period } => {
                self.top_artist_by_time_of_day(credential, period).await
            }
            MetricRequest::LongestStreak { limit } => self.longest_streak(credential, limit).await,
            MetricRequest::MostPopularTrack => self.most_popular_track(credential).await,
            MetricRequest::LeastPopularTrack => self.least_popular_track(credential).await,
            MetricRequest::PopularityDistribution => {
                self.popularity_distribution(credential).await
            }
            MetricRequest::AvgPopularity => self.avg_popularity(credential).await,
            MetricRequest::HappiestTrack => self.happiest_track(credential).await,
            MetricRequest::FeatureAverages => self.feature_averages(credential).await,
            MetricRequest::MoodDistribution => self.mood_distribution(credential).await,
            MetricRequest::Dashboard => self.dashboard(credential).await,
        }
    }

    async fn profile_tracks(&self, credential: &Credential) -> Result<Vec<Track>> {
        self.top_track_snapshot(credential, PROFILE_WINDOW, PROFILE_TRACK_LIMIT)
            .await
    }
}
