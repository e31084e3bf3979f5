//! Turning raw rows into validated records.
//!
//! Column names differ between datasets (`Entity` vs. `country`, `Year` vs. `year`, ...),
//! so every logical field is looked up through an ordered list of aliases and the first
//! present value wins. Rows that are incomplete or fail validation are dropped silently;
//! the `*_with_report` variants count them.

use crate::input::{RawRow, RawValue, Year};
use crate::records::{EmissionRecord, GlobalRecord};
use log::debug;
use serde::{Deserialize, Serialize};

pub const ENTITY_ALIASES: &[&str] = &["Entity", "country", "entity"];
pub const YEAR_ALIASES: &[&str] = &["Year", "year"];
pub const EMISSIONS_ALIASES: &[&str] = &["Annual CO₂ emissions", "emissions", "co2"];
pub const CODE_ALIASES: &[&str] = &["Code", "code", "iso_code"];

pub const UNKNOWN_ENTITY: &str = "Unknown";

/// Earliest year accepted for country records.
pub const MIN_YEAR: Year = 1750;

/// Entities that make up the world series.
pub const WORLD_ENTITIES: &[&str] = &["World", "OWID_WRL"];

/// Aggregate (non-country) entities found in the datasets.
/// Not used for extraction, which only looks at [WORLD_ENTITIES].
pub const GLOBAL_ENTITIES: &[&str] = &[
    "World",
    "OWID_WRL",
    "Africa",
    "Asia",
    "Europe",
    "North America",
    "South America",
    "Oceania",
    "European Union",
    "Asia (excl. China and India)",
    "North America (excl. USA)",
    "International transport",
    "Non-OECD",
    "OECD",
];

/// First present value among the aliases.
pub fn lookup<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a RawValue> {
    aliases
        .iter()
        .filter_map(|k| row.get(*k))
        .find(|v| v.is_present())
}

fn lookup_string(row: &RawRow, aliases: &[&str]) -> Option<String> {
    lookup(row, aliases).map(|v| v.to_string())
}

/// How many rows went where.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DropReport {
    pub total: usize,
    /// Missing entity, year or emissions.
    pub incomplete: usize,
    /// Not one of the requested entities.
    pub skipped: usize,
    /// Unparsable numbers or values out of range.
    pub invalid: usize,
    pub kept: usize,
}

struct Fields<'a> {
    entity: &'a RawValue,
    year: &'a RawValue,
    emissions: &'a RawValue,
}

fn admit(row: &RawRow) -> Option<Fields<'_>> {
    let entity = lookup(row, ENTITY_ALIASES)?;
    let year = lookup(row, YEAR_ALIASES)?;
    let emissions = lookup(row, EMISSIONS_ALIASES)?;
    Some(Fields {
        entity,
        year,
        emissions,
    })
}

/// Cleans country rows. Output is sorted by year, stable within a year.
pub fn normalize(rows: &[RawRow]) -> Vec<EmissionRecord> {
    normalize_with_report(rows).0
}

pub fn normalize_with_report(rows: &[RawRow]) -> (Vec<EmissionRecord>, DropReport) {
    let mut report = DropReport {
        total: rows.len(),
        ..DropReport::default()
    };
    let mut records = Vec::new();
    for row in rows {
        let Some(fields) = admit(row) else {
            report.incomplete += 1;
            continue;
        };
        let year = fields.year.as_int();
        let emissions = fields.emissions.as_float();
        match (year, emissions) {
            (Some(year), Some(emissions)) if emissions >= 0.0 && year >= MIN_YEAR => {
                let mut entity = fields.entity.to_string();
                if entity.is_empty() {
                    entity = UNKNOWN_ENTITY.to_owned();
                }
                records.push(EmissionRecord {
                    entity,
                    code: lookup_string(row, CODE_ALIASES).unwrap_or_default(),
                    year,
                    emissions,
                });
            }
            _ => report.invalid += 1,
        }
    }
    records.sort_by_key(|r| r.year);
    report.kept = records.len();
    debug!(target: "co2stats", "normalize: {report:?}");
    (records, report)
}

/// Extracts the world series. Unlike [normalize], there is no minimum year, and emissions must be finite.
pub fn extract_global(rows: &[RawRow]) -> Vec<GlobalRecord> {
    extract_global_with_report(rows, WORLD_ENTITIES).0
}

/// Like [extract_global], but for an arbitrary set of entity names (matched exactly).
pub fn extract_global_with_report(
    rows: &[RawRow],
    entities: &[&str],
) -> (Vec<GlobalRecord>, DropReport) {
    let mut report = DropReport {
        total: rows.len(),
        ..DropReport::default()
    };
    let mut records = Vec::new();
    for row in rows {
        let entity = lookup_string(row, ENTITY_ALIASES).unwrap_or_default();
        if !entities.contains(&entity.as_str()) {
            report.skipped += 1;
            continue;
        }
        let Some(fields) = admit(row) else {
            report.incomplete += 1;
            continue;
        };
        match (fields.year.as_int(), fields.emissions.as_float()) {
            (Some(year), Some(emissions)) if emissions >= 0.0 && emissions.is_finite() => {
                records.push(GlobalRecord {
                    entity,
                    year,
                    emissions,
                });
            }
            _ => report.invalid += 1,
        }
    }
    records.sort_by_key(|r| r.year);
    report.kept = records.len();
    debug!(target: "co2stats", "extract_global: {report:?}");
    (records, report)
}
