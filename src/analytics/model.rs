use std::{fmt, ops::Range};

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Upstream-defined span for top artists and tracks.
///
/// The engine never recomputes window membership; the label is passed to the
/// upstream fetch and the returned set is trusted as already filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// Roughly the last 4 weeks
    #[default]
    #[value(name = "short_term")]
    ShortTerm,
    /// Roughly the last 6 months
    #[value(name = "medium_term")]
    MediumTerm,
    /// All time
    #[value(name = "long_term")]
    LongTerm,
}

impl TimeWindow {
    /// Value of the `time_range` query parameter upstream.
    pub fn as_param(&self) -> &'static str {
        match self {
            TimeWindow::ShortTerm => "short_term",
            TimeWindow::MediumTerm => "medium_term",
            TimeWindow::LongTerm => "long_term",
        }
    }

    /// Suffix used in metric keys, e.g. `top_artists_last_4_weeks`.
    pub fn span_label(&self) -> &'static str {
        match self {
            TimeWindow::ShortTerm => "last_4_weeks",
            TimeWindow::MediumTerm => "last_6_months",
            TimeWindow::LongTerm => "all_time",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Part of the day a play event falls into, by UTC hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    Morning,
    Evening,
}

impl DayPeriod {
    /// Half-open hour interval covered by the period.
    pub fn hours(&self) -> Range<u32> {
        match self {
            DayPeriod::Morning => 5..11,
            DayPeriod::Evening => 17..23,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.hours().contains(&hour)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Evening => "evening",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// `None` for tracks upstream has no catalog ID for, such as local files.
    pub id: Option<String>,
    pub name: String,
    /// First entry of the upstream artist list.
    pub artist: String,
    /// Upstream popularity in `0..=100`; `None` when upstream omitted it.
    pub popularity: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// Track snapshot as recorded in play history. The referenced track may have
/// been renamed or removed upstream since.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TrackRef {
    pub id: Option<String>,
    pub name: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayEvent {
    pub track: TrackRef,
    pub played_at: DateTime<Utc>,
    date: NaiveDate,
    hour: u32,
}

impl PlayEvent {
    pub fn new(track: TrackRef, played_at: DateTime<Utc>) -> Self {
        Self {
            track,
            played_at,
            date: played_at.date_naive(),
            hour: played_at.hour(),
        }
    }

    /// Calendar date of the play (UTC).
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Hour of day of the play, `0..=23` (UTC).
    pub fn hour(&self) -> u32 {
        self.hour
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioFeature {
    pub track_id: String,
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
}
