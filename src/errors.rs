//! Errors raised while loading an emissions dataset or selecting from it.
//!
//! The library returns boxed errors; `co2-query` wraps them in `anyhow`.

use std::{error, fmt, result};

/// Result of loading rows or building a dashboard.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// The data cannot produce a dashboard: every country row was dropped by the
/// normalizer, or the `--start`..`--end` range selects no records.
#[derive(Debug)]
pub struct InvalidInput(pub String);

/// A selection that does not match the data, such as a `--country` that is not
/// among the cleaned entities.
#[derive(Debug)]
pub struct InvalidArgument(pub String);

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid input: {}", self.0)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl error::Error for InvalidInput {}

impl error::Error for InvalidArgument {}

/// Used with a formatted message naming the empty year range.
pub fn invalid_input(s: String) -> Box<dyn error::Error> {
    InvalidInput(s).into()
}

pub fn invalid_input_ref(s: &str) -> Box<dyn error::Error> {
    InvalidInput(s.to_owned()).into()
}

/// Wraps a message naming the rejected selection.
pub fn invalid_argument(s: String) -> Box<dyn error::Error> {
    InvalidArgument(s).into()
}
