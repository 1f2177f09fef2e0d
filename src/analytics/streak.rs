use chrono::NaiveDate;

use crate::analytics::{model::PlayEvent, temporal};

/// Longest run of consecutive calendar days among `dates`.
///
/// Duplicates collapse to one day. Returns 0 for no dates.
pub fn longest_run<I>(dates: I) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
    dates.sort_unstable();
    dates.dedup();

    let Some(first) = dates.first() else {
        return 0;
    };

    let mut longest = 1;
    let mut current = 1;
    let mut previous = *first;
    for date in dates.into_iter().skip(1) {
        if date.signed_duration_since(previous).num_days() == 1 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
        previous = date;
    }

    longest
}

/// Longest run of consecutive days with at least one play.
pub fn longest_streak(events: &[PlayEvent]) -> u32 {
    longest_run(temporal::plays_per_day(events).into_keys())
}
