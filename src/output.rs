//! Output formatting and export for derived views.
//!
//! Supports pretty-printing, JSON serialization, and chart-data CSV export.

use anyhow::Result;
use serde::Serialize;
use std::fs;
use tracing::{debug, info};

use crate::report::DashboardReport;
use crate::stats::{MakeFrequency, YearFrequency};

/// Logs a derived view using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(view: &T) {
    debug!("{:#?}", view);
}

/// Logs a derived view as pretty-printed JSON.
pub fn print_json<T: Serialize>(view: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

/// Writes the full report as a JSON file, overwriting any previous report.
pub fn write_report(path: &str, report: &DashboardReport) -> Result<()> {
    debug!(path, "Writing report JSON");
    fs::write(path, serde_json::to_string_pretty(report)?)?;
    Ok(())
}

/// Exports the top-makes chart data as CSV with a header row.
pub fn export_make_csv(path: &str, makes: &[MakeFrequency]) -> Result<()> {
    export_csv(path, makes)
}

/// Exports the model-year histogram as CSV with a header row.
pub fn export_year_csv(path: &str, years: &[YearFrequency]) -> Result<()> {
    export_csv(path, years)
}

fn export_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    debug!(path, rows = rows.len(), "Exporting chart CSV");

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path, "Chart CSV written");
    Ok(())
}
