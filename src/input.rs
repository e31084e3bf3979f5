//! Raw tabular rows as they come out of a CSV file or a JSON dump.

use crate::errors::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub type Year = i32;

/// A single cell. CSV cells are always [RawValue::Text]; JSON rows may carry any of these.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Header name to cell value.
pub type RawRow = HashMap<String, RawValue>;

impl RawValue {
    /// Null cells and empty strings count as missing.
    pub fn is_present(&self) -> bool {
        match self {
            RawValue::Null => false,
            RawValue::Text(s) => !s.is_empty(),
            RawValue::Bool(_) | RawValue::Number(_) => true,
        }
    }

    /// Integer value, parsed leniently from the longest numeric prefix of text.
    pub fn as_int(&self) -> Option<Year> {
        match self {
            RawValue::Number(x) if x.is_finite() => {
                let t = x.trunc();
                if t >= Year::MIN as f64 && t <= Year::MAX as f64 {
                    Some(t as Year)
                } else {
                    None
                }
            }
            RawValue::Text(s) => parse_int_prefix(s),
            _ => None,
        }
    }

    /// Floating-point value, parsed leniently from the longest numeric prefix of text.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RawValue::Number(x) if !x.is_nan() => Some(*x),
            RawValue::Text(s) => parse_float_prefix(s),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "null"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Number(x) => write!(f, "{x}"),
            RawValue::Text(s) => write!(f, "{s}"),
        }
    }
}

fn sign_len(s: &str) -> usize {
    match s.as_bytes().first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    }
}

fn digits_len(s: &str) -> usize {
    s.bytes().take_while(|b| b.is_ascii_digit()).count()
}

/// `"  2020abc"` parses as 2020; `"abc"` does not parse.
pub fn parse_int_prefix(s: &str) -> Option<Year> {
    let s = s.trim_start();
    let sign = sign_len(s);
    let digits = digits_len(&s[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// `"12.5 Mt"` parses as 12.5, `".5"` as 0.5, `"1e3"` as 1000.
/// `"Infinity"` and overflowing values such as `"1e400"` parse as infinite; nothing parses as NaN.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = sign_len(s);
    if s[end..].starts_with("Infinity") {
        let inf = f64::INFINITY;
        return Some(if s.starts_with('-') { -inf } else { inf });
    }
    let int_digits = digits_len(&s[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if s[end..].starts_with('.') {
        frac_digits = digits_len(&s[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    let rest = &s[end..];
    if rest.starts_with('e') || rest.starts_with('E') {
        let exp_sign = sign_len(&rest[1..]);
        let exp_digits = digits_len(&rest[1 + exp_sign..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }
    s[..end].parse::<f64>().ok()
}

/// Reads CSV with a header row. Short rows simply lack the trailing columns.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_owned(), RawValue::Text(v.to_owned())))
            .collect();
        rows.push(row);
    }
    debug!(target: "co2stats", "csv: {} columns, {} rows", headers.len(), rows.len());
    Ok(rows)
}

/// Reads a JSON array of objects, e.g. rows exported from the database.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let rows: Vec<RawRow> = serde_json::from_reader(reader)?;
    debug!(target: "co2stats", "json: {} rows", rows.len());
    Ok(rows)
}

/// Loads a file, as JSON if the extension says so and as CSV otherwise.
/// JSON rows for a `.json` extension, CSV otherwise.
pub fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn read_rows<R: Read>(reader: R, json: bool) -> Result<Vec<RawRow>> {
    if json {
        read_json(reader)
    } else {
        read_csv(reader)
    }
}

pub fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    let file = fs::File::open(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    read_rows(io::BufReader::new(file), is_json(path))
        .map_err(|e| format!("cannot parse {}: {e}", path.display()).into())
}
