//! Most popular stations and trip.

use serde::Serialize;

use super::{Section, mode};
use crate::view::FilteredView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    pub trip: String,
}

#[tracing::instrument(level = "debug", skip_all, fields(rows = view.len()))]
pub fn station_stats(view: &FilteredView<'_>) -> Section<StationStats> {
    let records = view.records();

    let start = mode(records.iter().map(|r| r.record.start_station.as_str()));
    let end = mode(records.iter().map(|r| r.record.end_station.as_str()));
    let trip = mode(records.iter().map(|r| r.trip.as_str()));

    let (Some(start), Some(end), Some(trip)) = (start, end, trip) else {
        return Section::NoData;
    };

    Section::Ready(StationStats {
        start_station: start.to_string(),
        end_station: end.to_string(),
        trip: trip.to_string(),
    })
}
