//! Descriptive statistics over a [`FilteredView`].
//!
//! Four reporters each produce one [`Section`]; [`SelectionReport`] runs the
//! ones that apply to the selected city.

pub mod duration;
pub mod stations;
pub mod time;
pub mod users;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::filters::FilterParams;
use crate::view::FilteredView;

use duration::DurationStats;
use stations::StationStats;
use time::TimeStats;
use users::UserStats;

/// Result of one reporter: its statistics, or an explicit empty selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "stats", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    NoData,
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(stats) => Some(stats),
            Section::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Section::NoData)
    }
}

impl<T> From<Option<T>> for Section<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Section::NoData, Section::Ready)
    }
}

/// Most frequent value. Ties go to the smallest value; `None` for empty input.
pub fn mode<T: Ord>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    let mut best: Option<(T, usize)> = None;
    // ascending key order, so only a strictly higher count replaces the current pick
    for (value, count) in counts {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Distinct values with their counts, by descending count then ascending value.
pub fn value_counts<T: Ord>(values: impl IntoIterator<Item = T>) -> Vec<(T, usize)> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    let mut table: Vec<(T, usize)> = counts.into_iter().collect();
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

/// Arithmetic mean. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Rounds to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Every applicable reporter's output for one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionReport {
    pub params: FilterParams,
    pub rows: usize,
    pub time: Section<TimeStats>,
    pub stations: Section<StationStats>,
    pub durations: Section<DurationStats>,
    /// `None` when the city has no demographic columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Section<UserStats>>,
}

impl SelectionReport {
    pub fn build(view: &FilteredView<'_>, has_demographics: bool) -> Self {
        Self {
            params: view.params(),
            rows: view.len(),
            time: time::time_stats(view),
            stations: stations::station_stats(view),
            durations: duration::duration_stats(view),
            users: has_demographics.then(|| users::user_stats(view)),
        }
    }
}
