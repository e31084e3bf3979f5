//! Entity names as they appear in the map boundary data.

use crate::records::EmissionRecord;
use itertools::Itertools;

const MAP_NAMES: &[(&str, &str)] = &[
    ("United States", "United States of America"),
    ("Russia", "Russian Federation"),
    ("Iran", "Iran (Islamic Republic of)"),
    ("South Korea", "Korea, Republic of"),
    ("North Korea", "Korea, Democratic People's Republic of"),
    ("Vietnam", "Viet Nam"),
];

pub fn map_name(entity: &str) -> &str {
    MAP_NAMES
        .iter()
        .find(|(from, _)| *from == entity)
        .map_or(entity, |&(_, to)| to)
}

/// Copies of the records with known entity names replaced by their map names.
pub fn normalize_country_names(records: &[EmissionRecord]) -> Vec<EmissionRecord> {
    records
        .iter()
        .map(|r| EmissionRecord {
            entity: map_name(&r.entity).to_owned(),
            ..r.clone()
        })
        .collect_vec()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renames_known() {
        assert_eq!(map_name("Russia"), "Russian Federation");
        assert_eq!(map_name("Vietnam"), "Viet Nam");
        assert_eq!(map_name("Chile"), "Chile");
        assert_eq!(map_name("russia"), "russia");
    }

    #[test]
    fn records_renamed() {
        let records = vec![EmissionRecord {
            entity: "United States".to_owned(),
            code: "USA".to_owned(),
            year: 2020,
            emissions: 4832.45,
        }];
        let renamed = normalize_country_names(&records);
        assert_eq!(renamed[0].entity, "United States of America");
        assert_eq!(renamed[0].code, "USA");
        assert_eq!(records[0].entity, "United States");
    }
}
