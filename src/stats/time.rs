//! Most frequent times of travel.

use serde::Serialize;

use super::{Section, mode};
use crate::filters::month_name;
use crate::view::FilteredView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub month: u32,
    pub month_name: String,
    pub weekday: String,
    pub start_hour: u32,
}

/// Most common month, weekday and start hour of the selection.
#[tracing::instrument(level = "debug", skip_all, fields(rows = view.len()))]
pub fn time_stats(view: &FilteredView<'_>) -> Section<TimeStats> {
    let records = view.records();

    let month = mode(records.iter().map(|r| r.month));
    let weekday = mode(records.iter().map(|r| r.weekday_name()));
    let start_hour = mode(records.iter().map(|r| r.start_hour));

    let (Some(month), Some(weekday), Some(start_hour)) = (month, weekday, start_hour) else {
        return Section::NoData;
    };

    Section::Ready(TimeStats {
        month,
        month_name: month_name(month).unwrap_or_default(),
        weekday: weekday.to_string(),
        start_hour,
    })
}
