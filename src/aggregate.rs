//! Yearly totals, variations and simple subsetting.

use crate::input::Year;
use crate::records::{self, Dated, EmissionRecord, YearTotal, YearVariation};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Sums emissions per year. One entry per distinct year, in ascending order.
pub fn aggregate_by_year(records: &[EmissionRecord]) -> Vec<YearTotal> {
    let mut totals: BTreeMap<Year, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.year).or_insert(0.0) += r.emissions;
    }
    totals
        .into_iter()
        .map(|(year, total_emissions)| YearTotal {
            year,
            total_emissions,
        })
        .collect_vec()
}

/// Attaches the percentage change to the previous entry. The input is taken in the given order.
pub fn with_variation(totals: &[YearTotal]) -> Vec<YearVariation> {
    totals
        .iter()
        .enumerate()
        .map(|(i, t)| YearVariation {
            year: t.year,
            total_emissions: t.total_emissions,
            variation: if i == 0 {
                0.0
            } else {
                records::percent_change(totals[i - 1].total_emissions, t.total_emissions)
            },
        })
        .collect_vec()
}

/// Keeps items with `start <= year <= end`.
pub fn filter_by_year_range<T: Dated + Clone>(items: &[T], start: Year, end: Year) -> Vec<T> {
    items
        .iter()
        .filter(|x| start <= x.year() && x.year() <= end)
        .cloned()
        .collect_vec()
}

/// First and last year, if there is anything at all.
pub fn year_span<T: Dated>(items: &[T]) -> Option<(Year, Year)> {
    items.iter().map(|x| x.year()).minmax().into_option()
}

/// Records of one entity, in ascending year order.
pub fn country_series(records: &[EmissionRecord], country: &str) -> Vec<EmissionRecord> {
    records
        .iter()
        .filter(|r| r.entity == country)
        .cloned()
        .sorted_by_key(|r| r.year)
        .collect_vec()
}

pub fn data_for_year(records: &[EmissionRecord], year: Year) -> Vec<EmissionRecord> {
    records.iter().filter(|r| r.year == year).cloned().collect_vec()
}

/// Distinct years, ascending.
pub fn available_years(records: &[EmissionRecord]) -> Vec<Year> {
    records.iter().map(|r| r.year).sorted().dedup().collect_vec()
}

/// Distinct entity names, sorted.
pub fn unique_countries(records: &[EmissionRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.entity.as_str())
        .sorted()
        .dedup()
        .map(str::to_owned)
        .collect_vec()
}

/// Records matching an optional year and entity, ordered by year and entity,
/// truncated to `limit` if given.
pub fn select(
    records: &[EmissionRecord],
    year: Option<Year>,
    country: Option<&str>,
    limit: Option<usize>,
) -> Vec<EmissionRecord> {
    records
        .iter()
        .filter(|r| year.is_none_or(|y| r.year == y))
        .filter(|r| country.is_none_or(|c| r.entity == c))
        .sorted_by(|a, b| a.year.cmp(&b.year).then_with(|| a.entity.cmp(&b.entity)))
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect_vec()
}
