use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use co2stats::aggregate;
use co2stats::cleaning;
use co2stats::input::{self, RawRow, Year};
use co2stats::records::EmissionRecord;
use co2stats::ranking;
use itertools::Itertools;
use log::info;
use serde::Serialize;
use std::fs;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

/// Answer one question about an emissions dataset
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input file (CSV, or JSON rows)
    infile: PathBuf,
    #[command(subcommand)]
    query: Query,
    /// Produce compact JSON
    #[arg(long, global = true)]
    compact: bool,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
enum Query {
    /// Records, ordered by year and entity
    Emissions {
        #[arg(long)]
        year: Option<Year>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Total emissions per year, with the change over the previous year
    Trends {
        #[arg(long, default_value_t = 1990)]
        from: Year,
    },
    /// Largest emitters of a year
    TopCountries {
        #[arg(long, default_value_t = 2023)]
        year: Year,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Show only this country, with growth and global rank
        #[arg(long)]
        country: Option<String>,
    },
    /// Yearly records of one country
    Country {
        name: String,
        #[arg(long, default_value_t = 1990)]
        from: Year,
    },
    /// Available years, latest first
    Years,
    /// Available entities, sorted by name
    Countries,
    /// Years with the largest world emissions
    TopYears {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// The year with the largest world emissions
    WorstYear,
}

fn print<T: Serialize>(args: &Args, value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.compact {
        serde_json::to_writer(&mut out, value)?;
    } else {
        serde_json::to_writer_pretty(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn records(rows: &[RawRow]) -> Vec<EmissionRecord> {
    let records = cleaning::normalize(rows);
    info!(target: "co2stats", "{} valid records", records.len());
    records
}

fn run(args: &Args) -> Result<()> {
    let file = fs::File::open(&args.infile)
        .with_context(|| format!("cannot read {}", args.infile.display()))?;
    let rows = input::read_rows(BufReader::new(file), input::is_json(&args.infile))
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("cannot parse {}", args.infile.display()))?;
    info!(target: "co2stats", "{} rows", rows.len());
    match &args.query {
        Query::Emissions {
            year,
            country,
            limit,
        } => print(
            args,
            &aggregate::select(&records(&rows), *year, country.as_deref(), *limit),
        ),
        Query::Trends { from } => {
            let records = aggregate::filter_by_year_range(&records(&rows), *from, Year::MAX);
            print(
                args,
                &aggregate::with_variation(&aggregate::aggregate_by_year(&records)),
            )
        }
        Query::TopCountries {
            year,
            limit,
            country,
        } => print(
            args,
            &ranking::top_countries_for(&records(&rows), *year, *limit, country.as_deref()),
        ),
        Query::Country { name, from } => {
            let series = aggregate::country_series(&records(&rows), name);
            if series.is_empty() {
                bail!("no records for '{name}'");
            }
            print(
                args,
                &aggregate::filter_by_year_range(&series, *from, Year::MAX),
            )
        }
        Query::Years => {
            let years = aggregate::available_years(&records(&rows))
                .into_iter()
                .rev()
                .collect_vec();
            print(args, &years)
        }
        Query::Countries => print(args, &aggregate::unique_countries(&records(&rows))),
        Query::TopYears { limit } => {
            let global = cleaning::extract_global(&rows);
            print(args, &ranking::top_contaminated_years(&global, *limit))
        }
        Query::WorstYear => {
            let global = cleaning::extract_global(&rows);
            print(args, &ranking::most_contaminated_year(&global))
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    run(&args)
}
