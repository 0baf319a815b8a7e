use bikeshare_explorer::console::Console;
use bikeshare_explorer::dataset::{City, DatasetRegistry};
use bikeshare_explorer::filters::FilterParams;
use bikeshare_explorer::output::OutputFormat;
use bikeshare_explorer::session::Session;
use bikeshare_explorer::stats::users::BirthYearStats;
use bikeshare_explorer::view::build_view;
use std::io::Cursor;
use std::path::Path;

fn registry() -> DatasetRegistry {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    DatasetRegistry::load(&dir).expect("Failed to load fixtures")
}

fn params(city: City, month: &str, day: &str) -> FilterParams {
    FilterParams {
        city,
        month: month.parse().unwrap(),
        day: day.parse().unwrap(),
    }
}

#[test]
fn test_fixture_capabilities() {
    let registry = registry();

    assert_eq!(registry.get(City::Chicago).len(), 8);
    assert_eq!(registry.get(City::NewYorkCity).len(), 7);
    assert_eq!(registry.get(City::Washington).len(), 5);

    assert!(registry.get(City::Chicago).has_demographics());
    assert!(registry.get(City::NewYorkCity).has_demographics());
    assert!(!registry.get(City::Washington).has_demographics());
}

#[test]
fn test_full_chicago_report() {
    let registry = registry();
    let session = Session::new(&registry, OutputFormat::Text);
    let report = session.run_once(params(City::Chicago, "none", "all"));

    assert_eq!(report.rows, 8);

    let time = report.time.ready().unwrap();
    assert_eq!(time.month_name, "January");
    assert_eq!(time.weekday, "Friday");
    assert_eq!(time.start_hour, 9);

    let stations = report.stations.ready().unwrap();
    assert_eq!(stations.start_station, "Clark St & Randolph St");
    assert_eq!(stations.end_station, "Canal St & Madison St");
    assert_eq!(stations.trip, "Clinton St & Washington Blvd - Canal St & Madison St");

    let durations = report.durations.ready().unwrap();
    assert_eq!(durations.total_seconds, 4821.0);
    assert_eq!(durations.total_minutes, 80.35);
    assert_eq!(durations.total_hours, 1.34);
    assert_eq!(durations.total_days, 0.06);

    let users = report.users.as_ref().unwrap().ready().unwrap();
    assert_eq!(users.user_types[0].value, "Subscriber");
    assert_eq!(users.user_types[0].count, 7);
    assert_eq!(users.genders.len(), 2);
    assert_eq!(users.genders[0].value, "Male");
    assert_eq!(users.genders[0].count, 5);
    assert_eq!(
        users.birth_years,
        Some(BirthYearStats {
            earliest: 1975,
            most_recent: 1992,
            mean: 1986,
        })
    );
}

#[test]
fn test_month_filter_report() {
    let registry = registry();
    let session = Session::new(&registry, OutputFormat::Text);
    let report = session.run_once(params(City::Chicago, "january", "all"));

    assert_eq!(report.rows, 3);
    let time = report.time.ready().unwrap();
    assert_eq!(time.start_hour, 14);
    assert_eq!(time.weekday, "Saturday");
    assert_eq!(report.durations.ready().unwrap().total_seconds, 1673.0);
}

#[test]
fn test_empty_selection_reports_no_data() {
    let registry = registry();
    let session = Session::new(&registry, OutputFormat::Text);
    let report = session.run_once(params(City::Chicago, "january", "monday"));

    assert_eq!(report.rows, 0);
    assert!(report.time.is_no_data());
    assert!(report.stations.is_no_data());
    assert!(report.durations.is_no_data());
    assert!(report.users.unwrap().is_no_data());
}

#[test]
fn test_washington_has_no_user_stats() {
    let registry = registry();
    let session = Session::new(&registry, OutputFormat::Text);
    let report = session.run_once(params(City::Washington, "none", "all"));

    assert!(report.users.is_none());
    let time = report.time.ready().unwrap();
    assert_eq!(time.month_name, "June");
    assert_eq!(time.weekday, "Saturday");
    assert_eq!(time.start_hour, 8);
}

#[test]
fn test_unfiltered_view_matches_dataset() {
    let registry = registry();
    let view = build_view(&registry, params(City::NewYorkCity, "none", "all"));
    let source = registry.get(City::NewYorkCity).records();

    assert_eq!(view.len(), source.len());
    for (derived, raw) in view.records().iter().zip(source) {
        assert_eq!(derived.record, raw);
    }
}

#[test]
fn test_interactive_session_end_to_end() {
    let registry = registry();
    let session = Session::new(&registry, OutputFormat::Text);
    let input = "\
Seattle
new york city
June
sometime
all
y
n
yes
Washington
none
saturday
n
no
";
    let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    session.run(&mut console).unwrap();

    let out = String::from_utf8(console.into_output()).unwrap();
    assert!(out.contains("Invalid entry. You entered: seattle"));
    assert!(out.contains("Invalid entry. You entered: sometime"));
    assert!(out.contains("parameters: new york city, june, all"));
    assert!(out.contains("Suffolk St & Stanton St -> W Broadway & Spring St"));
    assert!(out.contains("parameters: washington, none, saturday"));
    assert!(out.contains("The most common day of week is: Saturday"));
    assert_eq!(out.matches("Calculating User Stats").count(), 1);
}

#[test]
fn test_json_session_output() {
    let registry = registry();
    let session = Session::new(&registry, OutputFormat::Json);
    let input = "chicago\nmay\nall\nn\nno\n";
    let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    session.run(&mut console).unwrap();

    let out = String::from_utf8(console.into_output()).unwrap();
    let start = out.find('{').unwrap();
    let end = out.rfind('}').unwrap();
    let value: serde_json::Value = serde_json::from_str(&out[start..=end]).unwrap();

    assert_eq!(value["rows"], 2);
    assert_eq!(value["params"]["month"]["month"], 5);
    assert_eq!(value["users"]["stats"]["genders"][0]["value"], "Female");
}
