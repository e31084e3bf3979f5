//! Data structures for representing the output.

use crate::cleaning::DropReport;
use crate::input::Year;
use crate::records::{ContaminatedYear, CountryRank, EmissionRecord, GlobalRecord, YearVariation};
use serde::{Deserialize, Serialize};

pub type Years = (Year, Year);

/// Headline figures for the latest year in the selection.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Kpis {
    pub latest_year: Year,
    pub global_emissions: f64,
    pub yearly_variation: f64,
    pub top_emitter: Option<String>,
    pub top_emitter_emissions: f64,
    /// Share of the listed top countries in the global total, in percent.
    pub top_share: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GlobalSection {
    pub top_years: Vec<ContaminatedYear>,
    pub most_contaminated: Option<GlobalRecord>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MapSection {
    pub year: Year,
    pub records: Vec<EmissionRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Cleaning {
    pub countries: DropReport,
    pub world: DropReport,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Dashboard {
    pub range: Years,
    pub country: Option<String>,
    pub kpis: Kpis,
    pub trend: Vec<YearVariation>,
    pub top_countries: Vec<CountryRank>,
    pub global: GlobalSection,
    pub map: MapSection,
    pub years: Vec<Year>,
    pub countries: Vec<String>,
    pub cleaning: Cleaning,
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}

/// Emissions with a T/B/M suffix for large values.
pub fn format_emissions(x: f64) -> String {
    if x >= 1e12 {
        format!("{:.2}T", x / 1e12)
    } else if x >= 1e9 {
        format!("{:.2}B", x / 1e9)
    } else if x >= 1e6 {
        format!("{:.2}M", x / 1e6)
    } else {
        format!("{:.2}", x)
    }
}

pub fn variation_string(v: f64) -> String {
    if v > 0.0 {
        format!("+{v}%")
    } else {
        format!("{v}%")
    }
}

pub fn pretty_range(p: &Years) -> String {
    format!("{}-{}", p.0, p.1)
}
