//! Main entry point for building the dashboard.

use crate::aggregate;
use crate::cleaning;
use crate::errors::{self, Result};
use crate::information;
use crate::input::{RawRow, Year};
use crate::names;
use crate::output::{self, Cleaning, Dashboard, GlobalSection, Kpis, MapSection};
use crate::ranking;
use crate::records::{self, CountryRank, EmissionRecord};
use log::{debug, info};

pub const DEFAULT_START: Year = 1990;
pub const DEFAULT_END: Year = 2023;
pub const DEFAULT_TOP: usize = 5;

/// What to show?
pub struct DashboardArgs<'a> {
    /// First year of the trend (inclusive).
    pub start: Year,

    /// Last year of the trend (inclusive).
    /// A range with `end < start` is not an error; it just selects nothing.
    pub end: Year,

    /// Restrict the trend to a single entity.
    /// The top-countries listing then shows only this entity, with growth and global rank.
    pub country: Option<&'a str>,

    /// How many countries to list.
    pub top_limit: usize,

    /// How many world-series years to list.
    pub years_limit: usize,

    /// Year shown on the map.
    /// Defaults to the latest year in the country data.
    pub map_year: Option<Year>,

    /// Use the map boundary names for entities on the map.
    pub map_names: bool,
}

impl Default for DashboardArgs<'_> {
    fn default() -> Self {
        DashboardArgs {
            start: DEFAULT_START,
            end: DEFAULT_END,
            country: None,
            top_limit: DEFAULT_TOP,
            years_limit: DEFAULT_TOP,
            map_year: None,
            map_names: false,
        }
    }
}

fn kpis(
    latest_year: Year,
    global_emissions: f64,
    yearly_variation: f64,
    top: &[CountryRank],
) -> Kpis {
    let top_total: f64 = top.iter().map(|c| c.emissions).sum();
    let top_share = if top.is_empty() || global_emissions == 0.0 {
        0.0
    } else {
        records::round_to(top_total / global_emissions * 100.0, 1)
    };
    Kpis {
        latest_year,
        global_emissions,
        yearly_variation,
        top_emitter: top.first().map(|c| c.country.clone()),
        top_emitter_emissions: top.first().map_or(0.0, |c| c.emissions),
        top_share,
    }
}

fn map_section(args: &DashboardArgs, records: &[EmissionRecord]) -> MapSection {
    let year = args
        .map_year
        .or_else(|| records.iter().map(|r| r.year).max())
        .unwrap_or(args.end);
    let mut data = aggregate::data_for_year(records, year);
    if args.map_names {
        data = names::normalize_country_names(&data);
    }
    debug!(target: "co2stats", "map {}: {} entities", year, data.len());
    MapSection {
        year,
        records: data,
    }
}

/// Builds the dashboard from raw country rows and raw world rows.
///
/// This is the main entry point for the library.
pub fn calc(
    args: &DashboardArgs,
    country_rows: &[RawRow],
    world_rows: &[RawRow],
) -> Result<Dashboard> {
    let (records, country_report) = cleaning::normalize_with_report(country_rows);
    information::statistics(&records, &country_report);
    let (global, world_report) =
        cleaning::extract_global_with_report(world_rows, cleaning::WORLD_ENTITIES);
    information::global_statistics(&global, &world_report);
    if records.is_empty() {
        return Err(errors::invalid_input_ref("no valid country records"));
    }
    if let Some(c) = args.country {
        if !records.iter().any(|r| r.entity == c) {
            return Err(errors::invalid_argument(format!("unknown country '{c}'")));
        }
    }

    let mut filtered = aggregate::filter_by_year_range(&records, args.start, args.end);
    if let Some(c) = args.country {
        filtered.retain(|r| r.entity == c);
    }
    let range = (args.start, args.end);
    info!(
        target: "co2stats",
        "selected {}: {} records",
        output::pretty_range(&range),
        filtered.len()
    );

    let trend = aggregate::with_variation(&aggregate::aggregate_by_year(&filtered));
    let Some(latest) = trend.last() else {
        return Err(errors::invalid_input(format!(
            "no records in {}",
            output::pretty_range(&range)
        )));
    };
    let top_countries =
        ranking::top_countries_for(&records, latest.year, args.top_limit, args.country);
    let kpis = kpis(
        latest.year,
        latest.total_emissions,
        latest.variation,
        &top_countries,
    );
    info!(
        target: "co2stats",
        "{}: {} t, {} vs. previous year",
        kpis.latest_year,
        output::format_emissions(kpis.global_emissions),
        output::variation_string(kpis.yearly_variation)
    );

    let global_section = GlobalSection {
        top_years: ranking::top_contaminated_years(&global, args.years_limit),
        most_contaminated: ranking::most_contaminated_year(&global).cloned(),
    };
    let map = map_section(args, &records);

    Ok(Dashboard {
        range,
        country: args.country.map(str::to_owned),
        kpis,
        trend,
        top_countries,
        global: global_section,
        map,
        years: aggregate::available_years(&records),
        countries: aggregate::unique_countries(&records),
        cleaning: Cleaning {
            countries: country_report,
            world: world_report,
        },
    })
}
