//! In-memory trip datasets for the three supported cities.
//!
//! Each city's CSV is read once at startup into a [`Dataset`]. The
//! [`DatasetRegistry`] owns all three and is never mutated afterwards.

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
];

/// Columns that together make up the rider demographics capability.
pub const DEMOGRAPHIC_COLUMNS: &[&str] = &["User Type", "Gender", "Birth Year"];

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum City {
    #[serde(rename = "chicago")]
    Chicago,
    #[serde(rename = "new york city")]
    NewYorkCity,
    #[serde(rename = "washington")]
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name, as typed by the user.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.name() == token)
            .ok_or_else(|| anyhow::anyhow!("unknown city '{}'", s.trim()))
    }
}

/// A single row of a city trip log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripRecord {
    #[serde(rename = "Start Time", deserialize_with = "de_timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "End Time", deserialize_with = "de_timestamp")]
    pub end_time: NaiveDateTime,
    /// Seconds.
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

/// Parses a naive (timezone-less) timestamp in any of the accepted layouts.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| anyhow::anyhow!("unrecognised timestamp '{raw}'"))
}

fn de_timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// All trip records for one city.
#[derive(Debug, Clone)]
pub struct Dataset {
    city: City,
    records: Vec<TripRecord>,
    has_demographics: bool,
}

impl Dataset {
    pub fn new(city: City, records: Vec<TripRecord>, has_demographics: bool) -> Self {
        Self {
            city,
            records,
            has_demographics,
        }
    }

    /// Reads a city trip log from CSV.
    ///
    /// # Errors
    ///
    /// Fails if a required column is missing or any row cannot be parsed.
    pub fn from_reader<R: Read>(city: City, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .with_context(|| format!("failed to read header row for {city}"))?
            .clone();
        let has_column = |name: &str| headers.iter().any(|h| h == name);

        for column in REQUIRED_COLUMNS {
            if !has_column(*column) {
                bail!("{city} dataset is missing required column '{column}'");
            }
        }
        let has_demographics = DEMOGRAPHIC_COLUMNS.iter().all(|c| has_column(*c));

        let mut records = Vec::new();
        for (idx, result) in rdr.deserialize().enumerate() {
            let record: TripRecord =
                result.with_context(|| format!("{city} dataset: bad row {}", idx + 1))?;
            records.push(record);
        }

        Ok(Self::new(city, records, has_demographics))
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether rider demographics (user type, gender, birth year) are present.
    pub fn has_demographics(&self) -> bool {
        self.has_demographics
    }
}

/// Read-only set of the city datasets, built once before any session starts.
#[derive(Debug)]
pub struct DatasetRegistry {
    datasets: BTreeMap<City, Dataset>,
}

impl DatasetRegistry {
    /// Loads `<dir>/<city file>` for every supported city.
    #[tracing::instrument(skip(dir), fields(dir = %dir.display()))]
    pub fn load(dir: &Path) -> Result<Self> {
        let mut datasets = Vec::with_capacity(City::ALL.len());
        for city in City::ALL {
            let path = dir.join(city.file_name());
            debug!(path = %path.display(), "Opening city dataset");
            let file = File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let dataset = Dataset::from_reader(city, file)?;
            info!(
                city = %city,
                rows = dataset.len(),
                has_demographics = dataset.has_demographics(),
                "Dataset loaded"
            );
            datasets.push(dataset);
        }
        Self::from_datasets(datasets)
    }

    /// Builds a registry from already-loaded datasets. Every city must be present exactly once.
    pub fn from_datasets(datasets: impl IntoIterator<Item = Dataset>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for dataset in datasets {
            let city = dataset.city();
            if map.insert(city, dataset).is_some() {
                bail!("duplicate dataset for {city}");
            }
        }
        if let Some(missing) = City::ALL.iter().find(|c| !map.contains_key(*c)) {
            bail!("no dataset registered for {missing}");
        }
        Ok(Self { datasets: map })
    }

    pub fn get(&self, city: City) -> &Dataset {
        // from_datasets guarantees every city is present
        &self.datasets[&city]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,,
";

    const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    #[test]
    fn test_city_from_str_is_case_insensitive() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("  NEW YORK CITY ".parse::<City>().unwrap(), City::NewYorkCity);
        assert!("boston".parse::<City>().is_err());
    }

    #[test]
    fn test_from_reader_with_demographics() {
        let ds = Dataset::from_reader(City::Chicago, CHICAGO_CSV.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert!(ds.has_demographics());

        let first = &ds.records()[0];
        assert_eq!(first.trip_duration, 321.0);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992.0));

        let second = &ds.records()[1];
        assert_eq!(second.gender, None);
        assert_eq!(second.birth_year, None);
    }

    #[test]
    fn test_from_reader_without_demographics() {
        let ds = Dataset::from_reader(City::Washington, WASHINGTON_CSV.as_bytes()).unwrap();

        assert_eq!(ds.len(), 1);
        assert!(!ds.has_demographics());
        assert_eq!(ds.records()[0].trip_duration, 489.066);
        assert_eq!(ds.records()[0].user_type.as_deref(), Some("Subscriber"));
        assert_eq!(ds.records()[0].birth_year, None);
    }

    #[test]
    fn test_from_reader_padded_headers_still_deserialize() {
        let csv = "\
 Start Time , End Time,Trip Duration,Start Station,End Station, User Type , Gender,Birth Year 
2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St,Damen Ave,Subscriber,Female,1992.0
";
        let ds = Dataset::from_reader(City::Chicago, csv.as_bytes()).unwrap();

        assert!(ds.has_demographics());
        let rec = &ds.records()[0];
        assert_eq!(rec.user_type.as_deref(), Some("Subscriber"));
        assert_eq!(rec.gender.as_deref(), Some("Female"));
        assert_eq!(rec.birth_year, Some(1992.0));
    }

    #[test]
    fn test_from_reader_missing_required_column() {
        let csv = "Start Time,End Time,Start Station,End Station\n";
        let err = Dataset::from_reader(City::Chicago, csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Trip Duration"));
    }

    #[test]
    fn test_from_reader_bad_timestamp() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station
yesterday,2017-06-21 08:44:43,10,A,B
";
        assert!(Dataset::from_reader(City::Washington, csv.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let a = parse_timestamp("2017-01-01 09:07:57").unwrap();
        let b = parse_timestamp("2017-01-01T09:07:57").unwrap();
        let c = parse_timestamp("2017-01-01 09:07:57.000").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_registry_requires_every_city() {
        let ds = Dataset::new(City::Chicago, vec![], true);
        assert!(DatasetRegistry::from_datasets([ds]).is_err());
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let datasets = [
            Dataset::new(City::Chicago, vec![], true),
            Dataset::new(City::Chicago, vec![], true),
            Dataset::new(City::NewYorkCity, vec![], true),
            Dataset::new(City::Washington, vec![], false),
        ];
        assert!(DatasetRegistry::from_datasets(datasets).is_err());
    }

    #[test]
    fn test_registry_get() {
        let registry = DatasetRegistry::from_datasets([
            Dataset::new(City::Washington, vec![], false),
            Dataset::new(City::Chicago, vec![], true),
            Dataset::new(City::NewYorkCity, vec![], true),
        ])
        .unwrap();

        assert_eq!(registry.get(City::Washington).city(), City::Washington);
        assert!(!registry.get(City::Washington).has_demographics());
        assert!(registry.get(City::Chicago).has_demographics());
    }
}
