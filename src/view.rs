//! Derived, filtered projections of a city dataset.

use chrono::{Datelike, Timelike, Weekday};
use tracing::info;

use crate::dataset::{City, DatasetRegistry, TripRecord};
use crate::filters::{DayFilter, FilterParams, MonthFilter};

/// Full English weekday name, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A trip record plus the columns derived from its start time and stations.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRecord<'a> {
    pub record: &'a TripRecord,
    /// 1..=12
    pub month: u32,
    pub weekday: Weekday,
    /// 0..=23
    pub start_hour: u32,
    /// `"<start station> - <end station>"`
    pub trip: String,
}

impl<'a> ViewRecord<'a> {
    pub fn derive(record: &'a TripRecord) -> Self {
        let start = record.start_time;
        Self {
            record,
            month: start.month(),
            weekday: start.weekday(),
            start_hour: start.hour(),
            trip: format!("{} - {}", record.start_station, record.end_station),
        }
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

/// The records of one city that match a month/day selection, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    params: FilterParams,
    records: Vec<ViewRecord<'a>>,
}

impl<'a> FilteredView<'a> {
    pub fn city(&self) -> City {
        self.params.city
    }

    pub fn params(&self) -> FilterParams {
        self.params
    }

    pub fn records(&self) -> &[ViewRecord<'a>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn matches(params: &FilterParams, rec: &ViewRecord<'_>) -> bool {
    let month_ok = match params.month {
        MonthFilter::All => true,
        MonthFilter::Month(m) => rec.month == m,
    };
    let day_ok = match params.day {
        DayFilter::All => true,
        DayFilter::Day(d) => rec.weekday_name() == weekday_name(d),
    };
    month_ok && day_ok
}

/// Selects the city's dataset, derives the computed columns and keeps the
/// rows that match the month and day filters. The dataset itself is untouched.
#[tracing::instrument(level = "debug", skip(registry, params), fields(params = %params))]
pub fn build_view(registry: &DatasetRegistry, params: FilterParams) -> FilteredView<'_> {
    let dataset = registry.get(params.city);

    let records: Vec<ViewRecord<'_>> = dataset
        .records()
        .iter()
        .map(ViewRecord::derive)
        .filter(|rec| matches(&params, rec))
        .collect();

    info!(
        city = %params.city,
        month = %params.month,
        day = %params.day,
        source_rows = dataset.len(),
        rows = records.len(),
        "View built"
    );

    FilteredView { params, records }
}
