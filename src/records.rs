//! Cleaned records and the views derived from them.

use crate::input::Year;
use serde::{Deserialize, Serialize};

/// One country (or region) and year, after cleaning.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EmissionRecord {
    pub entity: String,
    pub code: String,
    pub year: Year,
    pub emissions: f64,
}

/// One year of a world-aggregate series.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GlobalRecord {
    pub entity: String,
    pub year: Year,
    pub emissions: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTotal {
    pub year: Year,
    pub total_emissions: f64,
}

/// A [YearTotal] with the percentage change relative to the previous entry.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearVariation {
    pub year: Year,
    pub total_emissions: f64,
    pub variation: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRank {
    pub country: String,
    pub emissions: f64,
    pub code: String,
    /// Only filled in single-country mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<f64>,
    /// Only filled in single-country mode, and only if the country has a rank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_rank: Option<usize>,
}

/// A single country-year with its growth over the previous year and its rank among all countries.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryGrowth {
    pub entity: String,
    pub code: String,
    pub year: Year,
    pub emissions: f64,
    pub growth: f64,
    pub global_rank: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ContaminatedYear {
    pub rank: usize,
    pub year: Year,
    pub emissions: f64,
    pub entity: String,
}

impl From<&EmissionRecord> for CountryRank {
    fn from(r: &EmissionRecord) -> Self {
        CountryRank {
            country: r.entity.clone(),
            emissions: r.emissions,
            code: r.code.clone(),
            growth: None,
            global_rank: None,
        }
    }
}

impl From<CountryGrowth> for CountryRank {
    fn from(g: CountryGrowth) -> Self {
        CountryRank {
            country: g.entity,
            emissions: g.emissions,
            code: g.code,
            growth: Some(g.growth),
            global_rank: g.global_rank,
        }
    }
}

/// Anything that sits on a year axis.
pub trait Dated {
    fn year(&self) -> Year;
}

impl Dated for EmissionRecord {
    fn year(&self) -> Year {
        self.year
    }
}

impl Dated for GlobalRecord {
    fn year(&self) -> Year {
        self.year
    }
}

impl Dated for YearTotal {
    fn year(&self) -> Year {
        self.year
    }
}

/// Percentage change from `previous` to `current`, rounded to two decimals.
/// A zero (or negative) previous value gives 0 instead of an infinity.
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous > 0.0 {
        round_to(((current - previous) / previous) * 100.0, 2)
    } else {
        0.0
    }
}

pub fn round_to(x: f64, decimals: i32) -> f64 {
    let m = 10f64.powi(decimals);
    (x * m).round() / m
}
