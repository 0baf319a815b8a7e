//! Filter vocabularies and the interactive parameter prompts.
//!
//! Tokens are matched case-insensitively against fixed word lists. Anything
//! outside a list is rejected and the user is asked again, without limit.

use anyhow::{Result, anyhow};
use chrono::Weekday;
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

use crate::console::Console;
use crate::dataset::City;

pub const CITY_CHOICES: &[&str] = &["chicago", "new york city", "washington"];

/// `"none"` followed by the months in calendar order, so a month's index is its ordinal.
pub const MONTH_CHOICES: &[&str] = &[
    "none",
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub const DAY_CHOICES: &[&str] = &[
    "all",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Title-cased month name for a 1-based month ordinal.
pub fn month_name(month: u32) -> Option<String> {
    match month {
        1..=12 => Some(title_case(MONTH_CHOICES[month as usize])),
        _ => None,
    }
}

/// Upper-cases the first letter of every space separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthFilter {
    All,
    Month(u32),
}

impl FromStr for MonthFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_lowercase();
        match MONTH_CHOICES.iter().position(|m| *m == token) {
            Some(0) => Ok(MonthFilter::All),
            Some(idx) => Ok(MonthFilter::Month(idx as u32)),
            None => Err(anyhow!("unknown month '{}'", s.trim())),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str(MONTH_CHOICES[0]),
            MonthFilter::Month(m) => f.write_str(MONTH_CHOICES[*m as usize]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayFilter {
    All,
    Day(#[serde(serialize_with = "ser_weekday")] Weekday),
}

fn ser_weekday<S: serde::Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(crate::view::weekday_name(*day))
}

impl FromStr for DayFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_lowercase();
        match DAY_CHOICES.iter().position(|d| *d == token) {
            Some(0) => Ok(DayFilter::All),
            Some(idx) => Ok(DayFilter::Day(WEEKDAYS[idx - 1])),
            None => Err(anyhow!("unknown day '{}'", s.trim())),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str(DAY_CHOICES[0]),
            DayFilter::Day(d) => f.write_str(DAY_CHOICES[d.num_days_from_monday() as usize + 1]),
        }
    }
}

/// A fully resolved (city, month, day) selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl fmt::Display for FilterParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.city, self.month, self.day)
    }
}

fn choices_line(choices: &[&str]) -> String {
    title_case(&choices.join(", "))
}

/// Asks for a city, month and day in turn, re-prompting on every invalid token.
pub fn collect_filters<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<FilterParams> {
    console.say("Hello! Let's explore some US bikeshare data!\n")?;

    let city_msg = format!(
        "Which city data would you like to explore?\nChoose between {}: ",
        choices_line(CITY_CHOICES)
    );
    let city = console.ask_until(&city_msg, "city name")?;

    let month_msg = format!(
        "Which month would you like to explore? \n\nAvailable options:\n{}\n\nPlease select month: ",
        choices_line(MONTH_CHOICES)
    );
    let month = console.ask_until(&month_msg, "month")?;

    let day_msg = format!(
        "\nWould you like to explore a specific day of the week? Select all if not.\n\
         Options are:\n{}\n\nPlease select day: ",
        choices_line(DAY_CHOICES)
    );
    let day = console.ask_until(&day_msg, "day")?;

    let params = FilterParams { city, month, day };
    debug!(%params, "Filters collected");

    console.say(&format!(
        "\nStatistics will be created using the following parameters: {params}"
    ))?;
    console.rule()?;
    Ok(params)
}
