use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    analytics::{DayPeriod, TimeWindow},
    metrics::Metric,
    service::{
        DEFAULT_RECENT_LIMIT, DEFAULT_SKIPPED_LIMIT, DEFAULT_TOP_LIMIT, MetricRequest,
        RECENT_HISTORY_LIMIT, StatsService,
    },
    source::ListeningSource,
    types::Credential,
};

use super::error::ApiResult;

type Service<S> = State<Arc<StatsService<S>>>;

#[derive(Debug, Default, Deserialize)]
pub struct TopQuery {
    pub window: Option<TimeWindow>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub window: Option<TimeWindow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub period: DayPeriod,
}

async fn run<S: ListeningSource>(
    service: &StatsService<S>,
    credential: &Credential,
    request: MetricRequest,
) -> ApiResult<Json<Metric>> {
    Ok(Json(service.compute(credential, request).await?))
}

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Hello from the spotistats API!" }))
}

pub async fn top_artists<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
    Query(q): Query<TopQuery>,
) -> ApiResult<Json<Metric>> {
    let request = MetricRequest::TopArtists {
        window: q.window.unwrap_or_default(),
        limit: q.limit.unwrap_or(DEFAULT_TOP_LIMIT),
    };
    run(&service, &credential, request).await
}

pub async fn top_artists_medium<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    let request = MetricRequest::TopArtists {
        window: TimeWindow::MediumTerm,
        limit: DEFAULT_TOP_LIMIT,
    };
    run(&service, &credential, request).await
}

pub async fn top_artists_long<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    let request = MetricRequest::TopArtists {
        window: TimeWindow::LongTerm,
        limit: DEFAULT_TOP_LIMIT,
    };
    run(&service, &credential, request).await
}

pub async fn top_tracks<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
    Query(q): Query<TopQuery>,
) -> ApiResult<Json<Metric>> {
    let request = MetricRequest::TopTracks {
        window: q.window.unwrap_or_default(),
        limit: q.limit.unwrap_or(DEFAULT_TOP_LIMIT),
    };
    run(&service, &credential, request).await
}

pub async fn recently_played<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
    Query(q): Query<LimitQuery>,
) -> ApiResult<Json<Metric>> {
    let limit = q.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    run(&service, &credential, MetricRequest::RecentlyPlayed { limit }).await
}

pub async fn hidden_gems<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
    Query(q): Query<WindowQuery>,
) -> ApiResult<Json<Metric>> {
    let window = q.window.unwrap_or(TimeWindow::MediumTerm);
    run(&service, &credential, MetricRequest::HiddenGems { window }).await
}

pub async fn most_skipped<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
    Query(q): Query<LimitQuery>,
) -> ApiResult<Json<Metric>> {
    let limit = q.limit.unwrap_or(DEFAULT_SKIPPED_LIMIT);
    run(&service, &credential, MetricRequest::MostSkipped { limit }).await
}

pub async fn top_artist_by_time_of_day<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
    Query(q): Query<PeriodQuery>,
) -> ApiResult<Json<Metric>> {
    let request = MetricRequest::TopArtistByTimeOfDay { period: q.period };
    run(&service, &credential, request).await
}

pub async fn top_artist_morning<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    let request = MetricRequest::TopArtistByTimeOfDay {
        period: DayPeriod::Morning,
    };
    run(&service, &credential, request).await
}

pub async fn top_artist_evening<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    let request = MetricRequest::TopArtistByTimeOfDay {
        period: DayPeriod::Evening,
    };
    run(&service, &credential, request).await
}

pub async fn longest_streak<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
    Query(q): Query<LimitQuery>,
) -> ApiResult<Json<Metric>> {
    let limit = q.limit.unwrap_or(RECENT_HISTORY_LIMIT);
    run(&service, &credential, MetricRequest::LongestStreak { limit }).await
}

pub async fn most_popular_track<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    run(&service, &credential, MetricRequest::MostPopularTrack).await
}

pub async fn least_popular_track<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    run(&service, &credential, MetricRequest::LeastPopularTrack).await
}

pub async fn popularity_distribution<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    run(&service, &credential, MetricRequest::PopularityDistribution).await
}

pub async fn avg_popularity<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    run(&service, &credential, MetricRequest::AvgPopularity).await
}

pub async fn happiest_track<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    run(&service, &credential, MetricRequest::HappiestTrack).await
}

pub async fn feature_averages<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    run(&service, &credential, MetricRequest::FeatureAverages).await
}

pub async fn mood_distribution<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    run(&service, &credential, MetricRequest::MoodDistribution).await
}

pub async fn dashboard<S: ListeningSource>(
    State(service): Service<S>,
    credential: Credential,
) -> ApiResult<Json<Metric>> {
    run(&service, &credential, MetricRequest::Dashboard).await
}
