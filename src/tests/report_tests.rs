use std::collections::BTreeMap;
use std::io::Read;

use crate::controller::UnitRow;
use crate::engine::metrics::SpaceMetrics;
use crate::report::csv::{write_report, write_report_to, ReportRow, REPORT_BASENAME};

fn row(name: &str, excluded: bool, total_free_pct: i64) -> UnitRow {
    UnitRow {
        name: name.to_string(),
        excluded,
        metrics: SpaceMetrics {
            size_gb: 120.5,
            disk_free_gb: 30.2,
            disk_free_pct: 12,
            whitespace_gb: 8.1,
            whitespace_pct: 7,
            total_free_gb: 38.3,
            total_free_pct,
        },
    }
}

fn table(rows: Vec<UnitRow>) -> BTreeMap<String, UnitRow> {
    rows.into_iter().map(|r| (r.name.clone(), r)).collect()
}

#[test]
fn export_round_trips_values_and_ordering() {
    let rows = table(vec![row("bravo", true, 15), row("alpha", false, 42)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.csv");

    write_report_to(&rows, &path).unwrap();

    let mut reader = csv::ReaderBuilder::new().delimiter(b';').from_path(&path).unwrap();
    let parsed: Vec<ReportRow> =
        reader.deserialize().collect::<Result<Vec<_>, _>>().unwrap();

    let expected: Vec<ReportRow> = rows.values().map(ReportRow::from).collect();
    assert_eq!(parsed, expected, "re-parsed rows must match the in-memory table");
    assert_eq!(parsed[0].name, "alpha", "rows come out in name order");
    assert_eq!(parsed[1].name, "bravo", "rows come out in name order");
}

#[test]
fn export_uses_semicolons_and_a_header_row() {
    let rows = table(vec![row("alpha", false, 42)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("format.csv");

    write_report_to(&rows, &path).unwrap();

    let mut contents = String::new();
    std::fs::File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
    let mut lines = contents.lines();

    let header = lines.next().unwrap();
    assert_eq!(
        header,
        "name;excluded;size_gb;disk_free_gb;disk_free_pct;whitespace_gb;whitespace_pct;total_free_gb;total_free_pct",
        "header must carry the fixed column order"
    );

    let first = lines.next().unwrap();
    assert!(first.starts_with("alpha;false;120.5;"), "data rows are semicolon-delimited");
}

#[test]
fn report_file_name_carries_the_iso_date() {
    let rows = table(vec![row("alpha", false, 42)]);
    let dir = tempfile::tempdir().unwrap();

    let path = write_report(&rows, dir.path()).unwrap();
    let file_name = path.file_name().unwrap().to_string_lossy();

    assert!(
        file_name.ends_with(&format!(" {REPORT_BASENAME}")),
        "file name must end with the fixed basename"
    );
    let date_part = file_name.strip_suffix(&format!(" {REPORT_BASENAME}")).unwrap();
    assert_eq!(date_part.len(), 10, "prefix is an ISO date (YYYY-MM-DD)");
    assert!(
        chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d").is_ok(),
        "prefix parses as a date"
    );
}

#[test]
fn empty_table_still_writes_a_header() {
    let rows = table(vec![]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    write_report_to(&rows, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(
        contents.starts_with("name;excluded;"),
        "an empty pass still produces a parseable report"
    );
}
