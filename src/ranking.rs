//! Top-N listings and per-country rankings.
//!
//! All sorts are stable, so records with equal emissions keep their input order.

use crate::input::Year;
use crate::records::{
    self, ContaminatedYear, CountryGrowth, CountryRank, EmissionRecord, GlobalRecord,
};
use itertools::Itertools;
use std::cmp::Ordering;

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn by_emissions_desc<'a>(
    records: impl Iterator<Item = &'a EmissionRecord>,
) -> Vec<&'a EmissionRecord> {
    records
        .sorted_by(|a, b| desc(a.emissions, b.emissions))
        .collect_vec()
}

/// The `limit` largest emitters of `year`.
pub fn top_countries(records: &[EmissionRecord], year: Year, limit: usize) -> Vec<CountryRank> {
    by_emissions_desc(records.iter().filter(|r| r.year == year))
        .into_iter()
        .take(limit)
        .map(CountryRank::from)
        .collect_vec()
}

/// Like [top_countries], but if `country` is given, returns just that country
/// (with growth and global rank), or nothing if it has no record for `year`.
pub fn top_countries_for(
    records: &[EmissionRecord],
    year: Year,
    limit: usize,
    country: Option<&str>,
) -> Vec<CountryRank> {
    match country {
        None => top_countries(records, year, limit),
        Some(c) => country_with_growth(records, c, year)
            .map(CountryRank::from)
            .into_iter()
            .collect_vec(),
    }
}

/// 1-based position of `country` among all records of `year`, largest first.
pub fn global_rank(records: &[EmissionRecord], country: &str, year: Year) -> Option<usize> {
    by_emissions_desc(records.iter().filter(|r| r.year == year))
        .iter()
        .position(|r| r.entity == country)
        .map(|i| i + 1)
}

pub fn country_with_growth(
    records: &[EmissionRecord],
    country: &str,
    year: Year,
) -> Option<CountryGrowth> {
    let find = |y: Year| records.iter().find(|r| r.entity == country && r.year == y);
    let current = find(year)?;
    let growth = match year.checked_sub(1).and_then(find) {
        Some(previous) => records::percent_change(previous.emissions, current.emissions),
        None => 0.0,
    };
    Some(CountryGrowth {
        entity: current.entity.clone(),
        code: current.code.clone(),
        year: current.year,
        emissions: current.emissions,
        growth,
        global_rank: global_rank(records, country, year),
    })
}

/// The `limit` years with the largest emissions, ranked from 1.
pub fn top_contaminated_years(global: &[GlobalRecord], limit: usize) -> Vec<ContaminatedYear> {
    global
        .iter()
        .sorted_by(|a, b| desc(a.emissions, b.emissions))
        .take(limit)
        .enumerate()
        .map(|(i, r)| ContaminatedYear {
            rank: i + 1,
            year: r.year,
            emissions: r.emissions,
            entity: r.entity.clone(),
        })
        .collect_vec()
}

/// The record with the largest emissions; the earliest one wins a tie.
pub fn most_contaminated_year(global: &[GlobalRecord]) -> Option<&GlobalRecord> {
    global
        .iter()
        .reduce(|max, r| if r.emissions > max.emissions { r } else { max })
}

#[cfg(test)]
mod test {
    use super::*;

    fn rec(entity: &str, year: Year, emissions: f64) -> EmissionRecord {
        EmissionRecord {
            entity: entity.to_owned(),
            code: entity.to_uppercase(),
            year,
            emissions,
        }
    }

    fn world(year: Year, emissions: f64) -> GlobalRecord {
        GlobalRecord {
            entity: "World".to_owned(),
            year,
            emissions,
        }
    }

    fn names(r: &[CountryRank]) -> Vec<&str> {
        r.iter().map(|x| x.country.as_str()).collect_vec()
    }

    #[test]
    fn top_countries_basic() {
        let records = [rec("A", 2020, 100.0), rec("B", 2020, 300.0), rec("C", 2020, 50.0)];
        let top = top_countries(&records, 2020, 2);
        assert_eq!(
            top,
            [
                CountryRank {
                    country: "B".to_owned(),
                    emissions: 300.0,
                    code: "B".to_owned(),
                    growth: None,
                    global_rank: None,
                },
                CountryRank {
                    country: "A".to_owned(),
                    emissions: 100.0,
                    code: "A".to_owned(),
                    growth: None,
                    global_rank: None,
                },
            ]
        );
    }

    #[test]
    fn top_countries_other_years_and_ties() {
        let records = [
            rec("X", 2019, 999.0),
            rec("A", 2020, 10.0),
            rec("B", 2020, 10.0),
            rec("C", 2020, 20.0),
        ];
        assert_eq!(names(&top_countries(&records, 2020, 10)), ["C", "A", "B"]);
        assert!(top_countries(&records, 2020, 0).is_empty());
        assert!(top_countries(&records, 1990, 5).is_empty());
    }

    #[test]
    fn growth_and_rank() {
        let records = [
            rec("A", 2019, 100.0),
            rec("A", 2020, 150.0),
            rec("B", 2020, 300.0),
            rec("C", 2020, 50.0),
        ];
        let g = country_with_growth(&records, "A", 2020).unwrap();
        assert_eq!(g.growth, 50.0);
        assert_eq!(g.global_rank, Some(2));
        assert_eq!(g.emissions, 150.0);
        assert_eq!(g.code, "A");
    }

    #[test]
    fn growth_without_previous_year() {
        let records = [rec("B", 2020, 300.0), rec("B", 2018, 1.0)];
        let g = country_with_growth(&records, "B", 2020).unwrap();
        assert_eq!(g.growth, 0.0);
        assert_eq!(g.global_rank, Some(1));
    }

    #[test]
    fn growth_zero_previous() {
        let records = [rec("B", 2019, 0.0), rec("B", 2020, 300.0)];
        assert_eq!(country_with_growth(&records, "B", 2020).unwrap().growth, 0.0);
    }

    #[test]
    fn growth_missing_country() {
        let records = [rec("B", 2019, 1.0)];
        assert_eq!(country_with_growth(&records, "B", 2020), None);
        assert_eq!(country_with_growth(&records, "Z", 2019), None);
        assert_eq!(global_rank(&records, "Z", 2019), None);
    }

    #[test]
    fn top_countries_single_mode() {
        let records = [
            rec("A", 2019, 200.0),
            rec("A", 2020, 100.0),
            rec("B", 2020, 300.0),
        ];
        let r = top_countries_for(&records, 2020, 5, Some("A"));
        assert_eq!(
            r,
            [CountryRank {
                country: "A".to_owned(),
                emissions: 100.0,
                code: "A".to_owned(),
                growth: Some(-50.0),
                global_rank: Some(2),
            }]
        );
        assert!(top_countries_for(&records, 2020, 5, Some("Z")).is_empty());
        assert_eq!(names(&top_countries_for(&records, 2020, 5, None)), ["B", "A"]);
    }

    #[test]
    fn contaminated_years() {
        let global = [world(1950, 5.0), world(2019, 100.0), world(2020, 100.0), world(2000, 50.0)];
        let top = top_contaminated_years(&global, 3);
        assert_eq!(
            top.iter().map(|c| (c.rank, c.year)).collect_vec(),
            [(1, 2019), (2, 2020), (3, 2000)]
        );
        assert_eq!(top[0].entity, "World");
        assert!(top_contaminated_years(&[], 5).is_empty());
    }

    #[test]
    fn most_contaminated_first_max() {
        let global = [world(1950, 5.0), world(2019, 100.0), world(2020, 100.0)];
        assert_eq!(most_contaminated_year(&global), Some(&world(2019, 100.0)));
        assert_eq!(most_contaminated_year(&[]), None);
    }
}
