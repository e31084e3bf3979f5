use crate::aggregate;
use crate::cleaning::{self, DropReport};
use crate::output;
use crate::records::{EmissionRecord, GlobalRecord};
use itertools::Itertools;
use log::{info, warn};
use std::collections::HashSet;

fn explain_drops(what: &str, report: &DropReport) {
    info!(
        target: "co2stats",
        "{what}: {} rows, {} kept, {} incomplete, {} invalid",
        report.total,
        report.kept,
        report.incomplete,
        report.invalid
    );
    if report.total > 0 && report.kept == 0 {
        warn!(target: "co2stats", "{what}: no usable rows");
    }
}

pub fn statistics(records: &[EmissionRecord], report: &DropReport) {
    explain_drops("country data", report);
    let entities: HashSet<&str> = records.iter().map(|r| r.entity.as_str()).collect();
    info!(target: "co2stats", "distinct entities: {}", entities.len());
    let aggregates = entities
        .iter()
        .filter(|e| cleaning::GLOBAL_ENTITIES.contains(*e))
        .sorted()
        .join(", ");
    if !aggregates.is_empty() {
        info!(target: "co2stats", "aggregate entities among countries: {aggregates}");
    }
    if let Some(span) = aggregate::year_span(records) {
        info!(target: "co2stats", "years in country data: {}", output::pretty_range(&span));
    }
}

pub fn global_statistics(records: &[GlobalRecord], report: &DropReport) {
    explain_drops("world data", report);
    if let Some(span) = aggregate::year_span(records) {
        info!(target: "co2stats", "years in world data: {}", output::pretty_range(&span));
    }
}
