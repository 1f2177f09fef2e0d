use clap::ValueEnum;
use serde_json::Value;
use tabled::builder::Builder;

use crate::{
    analytics::{DayPeriod, TimeWindow},
    error, info,
    management::TokenManager,
    metrics::Metric,
    service::{
        DEFAULT_RECENT_LIMIT, DEFAULT_SKIPPED_LIMIT, DEFAULT_TOP_LIMIT, MetricRequest,
        RECENT_HISTORY_LIMIT, StatsService,
    },
    spotify::SpotifyClient,
    types::Credential,
    utils, warning,
};

/// Metrics selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricKind {
    TopArtists,
    TopTracks,
    RecentlyPlayed,
    HiddenGems,
    MostSkipped,
    TimeOfDay,
    Streak,
    MostPopular,
    LeastPopular,
    PopularityDistribution,
    AvgPopularity,
    HappiestTrack,
    FeatureAverages,
    MoodDistribution,
}

impl MetricKind {
    /// Request for this metric. Unset options fall back to the same defaults
    /// the HTTP API uses.
    pub fn request(
        self,
        window: Option<TimeWindow>,
        limit: Option<u32>,
        period: Option<DayPeriod>,
    ) -> MetricRequest {
        match self {
            MetricKind::TopArtists => MetricRequest::TopArtists {
                window: window.unwrap_or_default(),
                limit: limit.unwrap_or(DEFAULT_TOP_LIMIT),
            },
            MetricKind::TopTracks => MetricRequest::TopTracks {
                window: window.unwrap_or_default(),
                limit: limit.unwrap_or(DEFAULT_TOP_LIMIT),
            },
            MetricKind::RecentlyPlayed => MetricRequest::RecentlyPlayed {
                limit: limit.unwrap_or(DEFAULT_RECENT_LIMIT),
            },
            MetricKind::HiddenGems => MetricRequest::HiddenGems {
                window: window.unwrap_or(TimeWindow::MediumTerm),
            },
            MetricKind::MostSkipped => MetricRequest::MostSkipped {
                limit: limit.unwrap_or(DEFAULT_SKIPPED_LIMIT),
            },
            MetricKind::TimeOfDay => MetricRequest::TopArtistByTimeOfDay {
                period: period.unwrap_or(DayPeriod::Morning),
            },
            MetricKind::Streak => MetricRequest::LongestStreak {
                limit: limit.unwrap_or(RECENT_HISTORY_LIMIT),
            },
            MetricKind::MostPopular => MetricRequest::MostPopularTrack,
            MetricKind::LeastPopular => MetricRequest::LeastPopularTrack,
            MetricKind::PopularityDistribution => MetricRequest::PopularityDistribution,
            MetricKind::AvgPopularity => MetricRequest::AvgPopularity,
            MetricKind::HappiestTrack => MetricRequest::HappiestTrack,
            MetricKind::FeatureAverages => MetricRequest::FeatureAverages,
            MetricKind::MoodDistribution => MetricRequest::MoodDistribution,
        }
    }
}

async fn load_credential() -> Credential {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run spotistats auth\n Error: {}",
                e
            );
        }
    };

    match token_mgr.get_valid_token().await {
        Ok(credential) => credential,
        Err(e) => error!(
            "Failed to refresh token. Please run spotistats auth\n Error: {}",
            e
        ),
    }
}

/// Computes one metric for the authorized user and prints it.
pub async fn stats(request: MetricRequest, as_json: bool) {
    let credential = load_credential().await;
    let service = StatsService::new(SpotifyClient::from_env());

    let pb = utils::spinner("Fetching listening data...");
    let result = service.compute(&credential, request).await;
    pb.finish_and_clear();

    match result {
        Ok(metric) => print_metric(&metric, as_json),
        Err(e) => error!("Cannot compute statistics. Err: {}", e),
    }
}

pub async fn dashboard(as_json: bool) {
    stats(MetricRequest::Dashboard, as_json).await
}

fn print_metric(metric: &Metric, as_json: bool) {
    if as_json {
        match serde_json::to_string_pretty(metric) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Cannot serialize statistics. Err: {}", e),
        }
        return;
    }

    for (key, value) in metric.entries() {
        print_entry(key, value);
    }
}

fn print_entry(key: &str, value: &Value) {
    let title = utils::metric_title(key);
    match value {
        Value::Array(items) if items.is_empty() => warning!("{}: no data", title),
        Value::Array(items) => {
            info!("{}", title);
            println!("{}", list_table(items));
        }
        Value::Object(map) => {
            info!("{}", title);
            let mut builder = Builder::default();
            for (k, v) in map {
                builder.push_record([utils::metric_title(k), utils::display_value(v)]);
            }
            println!("{}", builder.build());
        }
        scalar => info!("{}: {}", title, utils::display_value(scalar)),
    }
}

fn list_table(items: &[Value]) -> String {
    let mut builder = Builder::default();

    let columns: Vec<String> = match items.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => Vec::new(),
    };

    if columns.is_empty() {
        builder.push_record(["#".to_string(), "Name".to_string()]);
        for (i, item) in items.iter().enumerate() {
            builder.push_record([(i + 1).to_string(), utils::display_value(item)]);
        }
    } else {
        let mut header = vec!["#".to_string()];
        header.extend(columns.iter().map(|c| utils::metric_title(c)));
        builder.push_record(header);

        for (i, item) in items.iter().enumerate() {
            let mut row = vec![(i + 1).to_string()];
            row.extend(
                columns
                    .iter()
                    .map(|c| utils::display_value(item.get(c).unwrap_or(&Value::Null))),
            );
            builder.push_record(row);
        }
    }

    builder.build().to_string()
}
