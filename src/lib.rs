pub mod aggregate;
pub mod cleaning;
pub mod driver;
pub mod errors;
mod information;
pub mod input;
pub mod names;
pub mod output;
pub mod ranking;
pub mod records;
pub mod xlsx;
