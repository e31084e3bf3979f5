//! Spreadsheet export of the dashboard tables.

use crate::errors::Result;
use crate::output::Dashboard;
use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

fn header(sheet: &mut Worksheet, names: &[&str]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (col, name) in names.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }
    Ok(())
}

fn trend(sheet: &mut Worksheet, d: &Dashboard) -> Result<()> {
    sheet.set_name("Trend")?;
    header(sheet, &["Year", "Total emissions", "Variation (%)"])?;
    for (i, t) in d.trend.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, t.year)?;
        sheet.write_number(row, 1, t.total_emissions)?;
        sheet.write_number(row, 2, t.variation)?;
    }
    Ok(())
}

fn top_countries(sheet: &mut Worksheet, d: &Dashboard) -> Result<()> {
    sheet.set_name("Top countries")?;
    header(sheet, &["Country", "Code", "Emissions", "Growth (%)", "Global rank"])?;
    for (i, c) in d.top_countries.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &c.country)?;
        sheet.write_string(row, 1, &c.code)?;
        sheet.write_number(row, 2, c.emissions)?;
        if let Some(growth) = c.growth {
            sheet.write_number(row, 3, growth)?;
        }
        if let Some(rank) = c.global_rank {
            sheet.write_number(row, 4, rank as f64)?;
        }
    }
    Ok(())
}

fn top_years(sheet: &mut Worksheet, d: &Dashboard) -> Result<()> {
    sheet.set_name("Top years")?;
    header(sheet, &["Rank", "Year", "Emissions", "Entity"])?;
    for (i, y) in d.global.top_years.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, y.rank as f64)?;
        sheet.write_number(row, 1, y.year)?;
        sheet.write_number(row, 2, y.emissions)?;
        sheet.write_string(row, 3, &y.entity)?;
    }
    Ok(())
}

fn map(sheet: &mut Worksheet, d: &Dashboard) -> Result<()> {
    sheet.set_name("Map")?;
    header(sheet, &["Entity", "Code", "Year", "Emissions"])?;
    for (i, r) in d.map.records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &r.entity)?;
        sheet.write_string(row, 1, &r.code)?;
        sheet.write_number(row, 2, r.year)?;
        sheet.write_number(row, 3, r.emissions)?;
    }
    Ok(())
}

pub fn write_xlsx(d: &Dashboard, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    trend(workbook.add_worksheet(), d)?;
    top_countries(workbook.add_worksheet(), d)?;
    top_years(workbook.add_worksheet(), d)?;
    map(workbook.add_worksheet(), d)?;
    workbook.save(path)?;
    info!(target: "co2stats", "wrote {}", path.display());
    Ok(())
}
