//! Total and mean trip duration.

use serde::Serialize;

use super::{Section, mean, round2};
use crate::view::FilteredView;

const SECS_PER_MINUTE: f64 = 60.0;
const SECS_PER_HOUR: f64 = 3_600.0;
const SECS_PER_DAY: f64 = 86_400.0;

/// `total_seconds` is exact; every other value is rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub total_minutes: f64,
    pub total_hours: f64,
    pub total_days: f64,
    pub mean_seconds: f64,
    pub mean_minutes: f64,
}

#[tracing::instrument(level = "debug", skip_all, fields(rows = view.len()))]
pub fn duration_stats(view: &FilteredView<'_>) -> Section<DurationStats> {
    let durations: Vec<f64> = view.records().iter().map(|r| r.record.trip_duration).collect();

    let Some(avg) = mean(&durations) else {
        return Section::NoData;
    };
    let total: f64 = durations.iter().sum();

    Section::Ready(DurationStats {
        total_seconds: total,
        total_minutes: round2(total / SECS_PER_MINUTE),
        total_hours: round2(total / SECS_PER_HOUR),
        total_days: round2(total / SECS_PER_DAY),
        mean_seconds: round2(avg),
        mean_minutes: round2(avg / SECS_PER_MINUTE),
    })
}
