//! Output formatting for selection reports and raw rows.
//!
//! Supports the plain-text console layout, JSON serialization, and a debug
//! pretty-print for the log.

use anyhow::Result;
use std::io::Write;
use tracing::debug;

use crate::console::RULE;
use crate::dataset::TripRecord;
use crate::filters::{DayFilter, MonthFilter};
use crate::stats::duration::DurationStats;
use crate::stats::stations::StationStats;
use crate::stats::time::TimeStats;
use crate::stats::users::{UserStats, ValueCount};
use crate::stats::{Section, SelectionReport};

pub const NO_DATA: &str = "No data for this selection.";

pub const SELECTION_NOTE: &str = "Note: with a month or day filter active, the most common \
                                  values only cover the trips in your selection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &SelectionReport) {
    debug!("{:#?}", report);
}

/// Writes a report as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(out: &mut W, report: &SelectionReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_report<W: Write>(
    out: &mut W,
    report: &SelectionReport,
    format: OutputFormat,
) -> Result<()> {
    print_pretty(report);
    match format {
        OutputFormat::Text => write_text(out, report),
        OutputFormat::Json => write_json(out, report),
    }
}

/// Writes every section of a report in the console layout.
pub fn write_text<W: Write>(out: &mut W, report: &SelectionReport) -> Result<()> {
    writeln!(out, "\n\nCalculating The Most Frequent Times of Travel...\n")?;
    if report.params.month != MonthFilter::All || report.params.day != DayFilter::All {
        writeln!(out, "{SELECTION_NOTE}\n")?;
    }
    write_section(out, &report.time, write_time)?;

    writeln!(out, "\n\nCalculating The Most Popular Stations and Trip...\n")?;
    write_section(out, &report.stations, write_stations)?;

    writeln!(out, "\n\nCalculating Trip Duration...\n")?;
    write_section(out, &report.durations, write_durations)?;

    if let Some(users) = &report.users {
        writeln!(out, "\nCalculating User Stats...\n")?;
        write_section(out, users, write_users)?;
    }
    Ok(())
}

fn write_section<W: Write, T>(
    out: &mut W,
    section: &Section<T>,
    body: fn(&mut W, &T) -> Result<()>,
) -> Result<()> {
    match section {
        Section::Ready(stats) => body(out, stats)?,
        Section::NoData => writeln!(out, "{NO_DATA}")?,
    }
    writeln!(out, "{RULE}")?;
    Ok(())
}

fn write_time<W: Write>(out: &mut W, s: &TimeStats) -> Result<()> {
    writeln!(out, "The most common month is: {}", s.month_name)?;
    writeln!(out, "The most common day of week is: {}", s.weekday)?;
    writeln!(out, "The most common start hour is: {}:00", s.start_hour)?;
    Ok(())
}

fn write_stations<W: Write>(out: &mut W, s: &StationStats) -> Result<()> {
    writeln!(out, "The most common start station is: {}", s.start_station)?;
    writeln!(out, "The most common end station is: {}", s.end_station)?;
    writeln!(out, "The most common trip is between these two stations: {}", s.trip)?;
    Ok(())
}

fn write_durations<W: Write>(out: &mut W, s: &DurationStats) -> Result<()> {
    writeln!(out, "The total travel time is shown below (rounded to two decimal places)")?;
    writeln!(out, "Total time in seconds: {}", s.total_seconds)?;
    writeln!(out, "Total time in minutes: {}", s.total_minutes)?;
    writeln!(out, "Total time in hours: {}", s.total_hours)?;
    writeln!(out, "Total time in days: {}", s.total_days)?;

    writeln!(out, "\nThe mean travel time is shown below")?;
    writeln!(out, "Mean time in seconds: {}", s.mean_seconds)?;
    writeln!(out, "Mean time in minutes: {}", s.mean_minutes)?;
    Ok(())
}

fn write_counts<W: Write>(out: &mut W, table: &[ValueCount]) -> Result<()> {
    let width = table.iter().map(|vc| vc.value.len()).max().unwrap_or(0);
    for vc in table {
        writeln!(out, "{:<width$}  {:>8}", vc.value, vc.count)?;
    }
    Ok(())
}

fn write_users<W: Write>(out: &mut W, s: &UserStats) -> Result<()> {
    writeln!(out, "The count per user type is shown below:")?;
    if s.user_types.is_empty() {
        writeln!(out, "{NO_DATA}")?;
    }
    write_counts(out, &s.user_types)?;

    writeln!(out, "\nThe count per gender is shown below:")?;
    if s.genders.is_empty() {
        writeln!(out, "{NO_DATA}")?;
    }
    write_counts(out, &s.genders)?;

    writeln!(out)?;
    match &s.birth_years {
        Some(by) => {
            writeln!(out, "The earliest year of birth is: {}", by.earliest)?;
            writeln!(out, "The most recent year of birth is: {}", by.most_recent)?;
            writeln!(out, "The mean year of birth is: {}", by.mean)?;
        }
        None => writeln!(out, "Year of birth: {NO_DATA}")?,
    }
    Ok(())
}

/// One raw dataset row, prefixed with its position in the dataset.
pub fn raw_row(index: usize, rec: &TripRecord) -> String {
    let mut line = format!(
        "{index:>7}  {}  {}  {:>10}  {} -> {}",
        rec.start_time, rec.end_time, rec.trip_duration, rec.start_station, rec.end_station
    );
    if let Some(user_type) = &rec.user_type {
        line.push_str(&format!("  {user_type}"));
    }
    if let Some(gender) = &rec.gender {
        line.push_str(&format!("  {gender}"));
    }
    if let Some(year) = rec.birth_year {
        line.push_str(&format!("  {year}"));
    }
    line
}

pub fn write_raw_rows<W: Write>(out: &mut W, first_index: usize, rows: &[TripRecord]) -> Result<()> {
    for (offset, rec) in rows.iter().enumerate() {
        writeln!(out, "{}", raw_row(first_index + offset, rec))?;
    }
    Ok(())
}
