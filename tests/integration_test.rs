use co2stats::aggregate;
use co2stats::cleaning::{self, DropReport};
use co2stats::driver::{self, DashboardArgs};
use co2stats::input::{self, RawRow};
use co2stats::output::Dashboard;
use co2stats::ranking;
use co2stats::xlsx;
use itertools::Itertools;
use std::path::PathBuf;
use std::{env, fs};

fn init() {
    let _ = pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

fn path(filename: &str) -> PathBuf {
    let dir = env!("CARGO_MANIFEST_DIR");
    let mut path = PathBuf::from(dir);
    path.push(filename);
    path
}

fn load(filename: &str) -> Vec<RawRow> {
    input::load_rows(&path(filename)).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_clean_countries() {
    init();
    let rows = load("sample-data/co2-dataclean.csv");
    assert_eq!(rows.len(), 20);
    let (records, report) = cleaning::normalize_with_report(&rows);
    assert_eq!(
        report,
        DropReport {
            total: 20,
            incomplete: 1,
            skipped: 0,
            invalid: 3,
            kept: 16,
        }
    );
    assert!(records.iter().all(|r| r.year >= 1750 && r.emissions >= 0.0));
    assert!(records.windows(2).all(|w| w[0].year <= w[1].year));
    assert_eq!(aggregate::available_years(&records), [2019, 2020]);
    assert!(!aggregate::unique_countries(&records).contains(&"Atlantis".to_owned()));
}

#[test]
fn test_world_series() {
    init();
    let rows = load("sample-data/co2-data.csv");
    let (global, report) = cleaning::extract_global_with_report(&rows, cleaning::WORLD_ENTITIES);
    assert_eq!(report.kept, 6);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.incomplete, 1);
    assert_eq!(global[0].year, 1750);
    let top = ranking::top_contaminated_years(&global, 3);
    assert_eq!(top.iter().map(|y| y.year).collect_vec(), [2021, 2019, 2018]);
    assert_eq!(top.iter().map(|y| y.rank).collect_vec(), [1, 2, 3]);
    let worst = ranking::most_contaminated_year(&global).unwrap();
    assert_eq!(worst.year, 2021);
    assert_eq!(worst.emissions, 37124.69);
}

#[test]
fn test_database_rows() {
    init();
    let rows = load("sample-data/emissions.json");
    let (records, report) = cleaning::normalize_with_report(&rows);
    assert_eq!(report.kept, 6);
    assert_eq!(report.incomplete, 1);
    let germany = records.iter().find(|r| r.entity == "Germany").unwrap();
    assert_eq!(germany.code, "");
    let top = ranking::top_countries(&records, 2020, 3);
    assert_eq!(
        top.iter().map(|c| c.country.as_str()).collect_vec(),
        ["China", "United States", "India"]
    );
}

#[test]
fn test_dashboard() {
    init();
    let countries = load("sample-data/co2-dataclean.csv");
    let world = load("sample-data/co2-data.csv");
    let args = DashboardArgs {
        map_names: true,
        ..DashboardArgs::default()
    };
    let d = driver::calc(&args, &countries, &world).unwrap();
    assert_eq!(d.range, (1990, 2023));
    assert_eq!(d.trend.iter().map(|t| t.year).collect_vec(), [2019, 2020]);
    assert_eq!(d.trend[0].variation, 0.0);
    assert_eq!(d.trend[1].variation, 0.97);
    assert_eq!(d.kpis.latest_year, 2020);
    let total_2020 = 467.12 + 10668.23 + 677.52 + 2456.78 + 1145.67 + 456.89 + 1765.34
        + 345.23
        + 4832.45;
    assert!(close(d.kpis.global_emissions, total_2020));
    assert_eq!(d.kpis.top_emitter.as_deref(), Some("China"));
    assert_eq!(
        d.top_countries
            .iter()
            .map(|c| c.country.as_str())
            .collect_vec(),
        ["China", "United States", "India", "Russia", "Japan"]
    );
    assert!(d.kpis.top_share > 90.0 && d.kpis.top_share < 100.0);
    assert_eq!(d.global.top_years.len(), 5);
    assert_eq!(d.global.most_contaminated.as_ref().unwrap().year, 2021);
    assert_eq!(d.map.year, 2020);
    assert!(d.map.records.iter().any(|r| r.entity == "United States of America"));
    assert!(d.countries.contains(&"United States".to_owned()));
    assert_eq!(d.cleaning.countries.kept, 16);

    let json = serde_json::to_string(&d).unwrap();
    let back: Dashboard = serde_json::from_str(&json).unwrap();
    assert_eq!(back.countries, d.countries);
    assert_eq!(back.global.top_years.len(), 5);
}

#[test]
fn test_dashboard_country() {
    init();
    let countries = load("sample-data/co2-dataclean.csv");
    let world = load("sample-data/co2-data.csv");
    let args = DashboardArgs {
        country: Some("Japan"),
        ..DashboardArgs::default()
    };
    let d = driver::calc(&args, &countries, &world).unwrap();
    assert_eq!(d.kpis.global_emissions, 1145.67);
    assert_eq!(d.kpis.yearly_variation, 3.57);
    assert_eq!(d.top_countries.len(), 1);
    let japan = &d.top_countries[0];
    assert_eq!(japan.growth, Some(3.57));
    assert_eq!(japan.global_rank, Some(5));
    assert_eq!(d.kpis.top_share, 100.0);
}

#[test]
fn test_missing_file() {
    init();
    let err = input::load_rows(&path("sample-data/missing.csv")).unwrap_err();
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn test_xlsx() {
    init();
    let countries = load("sample-data/co2-dataclean.csv");
    let world = load("sample-data/co2-data.csv");
    let d = driver::calc(&DashboardArgs::default(), &countries, &world).unwrap();
    let mut out = env::temp_dir();
    out.push(format!("co2stats-test-{}.xlsx", std::process::id()));
    xlsx::write_xlsx(&d, &out).unwrap();
    assert!(fs::metadata(&out).unwrap().len() > 0);
    fs::remove_file(&out).unwrap();
}
