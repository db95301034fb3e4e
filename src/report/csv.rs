use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::controller::UnitRow;

pub(crate) const REPORT_BASENAME: &str = "DBSuspensionReport.csv";

/// Fixed column order of the report. Kept in sync with `ReportRow`.
const COLUMNS: [&str; 9] = [
    "name",
    "excluded",
    "size_gb",
    "disk_free_gb",
    "disk_free_pct",
    "whitespace_gb",
    "whitespace_pct",
    "total_free_gb",
    "total_free_pct",
];

/// One line of the suspension report. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReportRow {
    pub name: String,
    pub excluded: bool,
    pub size_gb: f64,
    pub disk_free_gb: f64,
    pub disk_free_pct: i64,
    pub whitespace_gb: f64,
    pub whitespace_pct: i64,
    pub total_free_gb: f64,
    pub total_free_pct: i64,
}

impl From<&UnitRow> for ReportRow {
    fn from(row: &UnitRow) -> Self {
        Self {
            name: row.name.clone(),
            excluded: row.excluded,
            size_gb: row.metrics.size_gb,
            disk_free_gb: row.metrics.disk_free_gb,
            disk_free_pct: row.metrics.disk_free_pct,
            whitespace_gb: row.metrics.whitespace_gb,
            whitespace_pct: row.metrics.whitespace_pct,
            total_free_gb: row.metrics.total_free_gb,
            total_free_pct: row.metrics.total_free_pct,
        }
    }
}

/// Write the metrics table as `<ISO-date> DBSuspensionReport.csv` under `dir`.
pub(crate) fn write_report(rows: &BTreeMap<String, UnitRow>, dir: &Path) -> Result<PathBuf> {
    let file_name = format!("{} {REPORT_BASENAME}", Local::now().format("%Y-%m-%d"));
    let path = dir.join(file_name);
    write_report_to(rows, &path)?;
    info!("Wrote suspension report with {} row(s) to {}", rows.len(), path.display());
    Ok(path)
}

/// Serialize the table to `path`: `;`-delimited, UTF-8, header row, rows in
/// the map's name order.
pub(crate) fn write_report_to(rows: &BTreeMap<String, UnitRow>, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;

    // Written explicitly so an empty table still yields a parseable file.
    writer.write_record(COLUMNS)?;
    for row in rows.values() {
        writer.serialize(ReportRow::from(row))?;
    }

    writer.flush().context("Failed to flush report file")?;
    Ok(())
}
