//! Fixture builders shared by unit tests.

use crate::dataset::{City, Dataset, DatasetRegistry, TripRecord, parse_timestamp};
use crate::filters::FilterParams;

pub fn trip(start: &str, from: &str, to: &str, duration: f64) -> TripRecord {
    let start_time = parse_timestamp(start).unwrap();
    TripRecord {
        start_time,
        end_time: start_time + chrono::Duration::seconds(duration as i64),
        trip_duration: duration,
        start_station: from.to_string(),
        end_station: to.to_string(),
        user_type: None,
        gender: None,
        birth_year: None,
    }
}

pub fn rider(mut record: TripRecord, user_type: &str, gender: Option<&str>, birth_year: Option<f64>) -> TripRecord {
    record.user_type = Some(user_type.to_string());
    record.gender = gender.map(str::to_string);
    record.birth_year = birth_year;
    record
}

/// A registry where `city` holds `records` and the other two cities are empty.
pub fn registry_with(city: City, records: Vec<TripRecord>) -> DatasetRegistry {
    let datasets = City::ALL.into_iter().map(|c| {
        let rows = if c == city { records.clone() } else { Vec::new() };
        Dataset::new(c, rows, c != City::Washington)
    });
    DatasetRegistry::from_datasets(datasets).unwrap()
}

pub fn params(city: City, month: &str, day: &str) -> FilterParams {
    FilterParams {
        city,
        month: month.parse().unwrap(),
        day: day.parse().unwrap(),
    }
}
