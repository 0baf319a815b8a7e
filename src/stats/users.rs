//! Rider demographics. Only run for cities whose files carry the columns.

use serde::Serialize;

use super::{Section, mean, value_counts};
use crate::view::FilteredView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    /// Rounded to the nearest whole year.
    pub mean: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<ValueCount>,
    pub genders: Vec<ValueCount>,
    /// `None` when no record in the selection has a birth year.
    pub birth_years: Option<BirthYearStats>,
}

fn counts<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<ValueCount> {
    value_counts(values.flatten())
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

fn birth_year_stats(years: &[f64]) -> Option<BirthYearStats> {
    let avg = mean(years)?;
    let earliest = years.iter().copied().fold(f64::INFINITY, f64::min);
    let most_recent = years.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(BirthYearStats {
        earliest: earliest as i32,
        most_recent: most_recent as i32,
        mean: avg.round() as i32,
    })
}

/// User type and gender counts plus birth-year range and mean.
/// Records missing a value are left out of that value's statistic.
#[tracing::instrument(level = "debug", skip_all, fields(rows = view.len()))]
pub fn user_stats(view: &FilteredView<'_>) -> Section<UserStats> {
    if view.is_empty() {
        return Section::NoData;
    }
    let records = view.records();

    let user_types = counts(records.iter().map(|r| r.record.user_type.as_deref()));
    let genders = counts(records.iter().map(|r| r.record.gender.as_deref()));

    let years: Vec<f64> = records.iter().filter_map(|r| r.record.birth_year).collect();

    Section::Ready(UserStats {
        user_types,
        genders,
        birth_years: birth_year_stats(&years),
    })
}
