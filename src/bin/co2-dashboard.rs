use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use co2stats::driver::{self, DashboardArgs};
use co2stats::errors::Result;
use co2stats::input::{self, Year};
use co2stats::output::{Dashboard, OError};
use co2stats::xlsx;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::{error, fs, io, process};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Country data (CSV, or JSON rows)
    countries: PathBuf,
    /// World data (CSV, or JSON rows)
    world: PathBuf,
    /// Output file (JSON)
    outfile: PathBuf,
    /// Starting year
    #[arg(long, default_value_t = driver::DEFAULT_START)]
    start: Year,
    /// Ending year
    #[arg(long, default_value_t = driver::DEFAULT_END)]
    end: Year,
    /// Restrict to one country
    #[arg(long)]
    country: Option<String>,
    /// Number of countries to list
    #[arg(long, default_value_t = driver::DEFAULT_TOP)]
    top: usize,
    /// Number of world-series years to list
    #[arg(long, default_value_t = driver::DEFAULT_TOP)]
    top_years: usize,
    /// Year shown on the map (default: latest)
    #[arg(long)]
    map_year: Option<Year>,
    /// Use map boundary names on the map
    #[arg(long)]
    map_names: bool,
    /// Also write the tables as a spreadsheet
    #[arg(long)]
    xlsx: Option<PathBuf>,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<PathBuf>,
    /// Produce compact JSON files
    #[arg(long)]
    compact: bool,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn write_json(args: &Args, dashboard: &Dashboard) -> Result<()> {
    let file = fs::File::create(&args.outfile)?;
    let writer = io::BufWriter::new(file);
    if args.compact {
        serde_json::to_writer(writer, dashboard)?;
    } else {
        serde_json::to_writer_pretty(writer, dashboard)?;
    }
    info!(target: "co2stats", "wrote {}", args.outfile.display());
    Ok(())
}

fn process(args: &Args) -> Result<()> {
    info!(target: "co2stats", "read: {}", args.countries.display());
    let country_rows = input::load_rows(&args.countries)?;
    info!(target: "co2stats", "read: {}", args.world.display());
    let world_rows = input::load_rows(&args.world)?;
    let driver_args = DashboardArgs {
        start: args.start,
        end: args.end,
        country: args.country.as_deref(),
        top_limit: args.top,
        years_limit: args.top_years,
        map_year: args.map_year,
        map_names: args.map_names,
    };
    let dashboard = driver::calc(&driver_args, &country_rows, &world_rows)?;
    write_json(args, &dashboard)?;
    if let Some(path) = &args.xlsx {
        xlsx::write_xlsx(&dashboard, path)?;
    }
    Ok(())
}

fn store_error(error_file: &Path, e: &dyn error::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    let file = fs::File::create(error_file)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer(writer, &error)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            match &args.error_file {
                Some(filename) => match store_error(filename, &*e) {
                    Ok(()) => {
                        info!(target: "co2stats", "error reported: {e}");
                    }
                    Err(e2) => {
                        error!(target: "co2stats", "{e}");
                        error!(target: "co2stats", "{e2}");
                    }
                },
                None => error!(target: "co2stats", "{e}"),
            }
            process::exit(1);
        }
    }
}
