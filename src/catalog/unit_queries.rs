use super::models::Unit;
use super::optional_ext::OptionalExt;
use super::Catalog;
use anyhow::Result;
use rusqlite::params;
use std::collections::HashSet;

/// Map a row from the units table into a `Unit`.
fn map_unit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Unit> {
    Ok(Unit {
        id: row.get(0)?,
        name: row.get(1)?,
        host: row.get(2)?,
        storage_path: row.get(3)?,
        configured_size: row.get::<_, i64>(4)? as u64,
        allocatable_whitespace: row.get::<_, i64>(5)? as u64,
        excluded: row.get::<_, i64>(6)? != 0,
        exclusion_reason: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

const UNIT_COLUMNS: &str = "id, name, host, storage_path, configured_size, \
     allocatable_whitespace, excluded, exclusion_reason, updated_at";

impl Catalog {
    /// List all manageable units, name-sorted, skipping explicitly excluded names.
    ///
    /// The `exclude` set holds unit names the operator asked this run to ignore
    /// entirely; it is unrelated to the admission-exclusion flag.
    pub fn list_units(&self, exclude: &HashSet<String>) -> Result<Vec<Unit>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("SELECT {UNIT_COLUMNS} FROM units ORDER BY name"))?;

        let units = stmt
            .query_map([], map_unit_row)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|u| !exclude.contains(&u.name))
            .collect();

        Ok(units)
    }

    /// Get a unit by name.
    pub fn get_unit(&self, name: &str) -> Result<Option<Unit>> {
        let conn = self.conn();
        let unit = conn
            .query_row(
                &format!("SELECT {UNIT_COLUMNS} FROM units WHERE name = ?1"),
                params![name],
                map_unit_row,
            )
            .optional()?;

        Ok(unit)
    }

    /// Insert or update a unit record, returning its ID in a single round-trip.
    ///
    /// Used by inventory sync and tests; a pass itself never registers units.
    pub fn upsert_unit(
        &self,
        name: &str,
        host: &str,
        storage_path: &str,
        configured_size: u64,
        allocatable_whitespace: u64,
    ) -> Result<i64> {
        let conn = self.conn();
        let id: i64 = conn.query_row(
            "INSERT INTO units (name, host, storage_path, configured_size, \
             allocatable_whitespace, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, strftime('%Y-%m-%dT%H:%M:%fZ','now'))
             ON CONFLICT(name) DO UPDATE SET
                host = excluded.host,
                storage_path = excluded.storage_path,
                configured_size = excluded.configured_size,
                allocatable_whitespace = excluded.allocatable_whitespace,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
             RETURNING id",
            params![
                name,
                host,
                storage_path,
                configured_size as i64,
                allocatable_whitespace as i64
            ],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Write a unit's admission-exclusion flag to the system of record.
    pub fn set_excluded(&self, name: &str, excluded: bool, reason: Option<&str>) -> Result<()> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE units SET excluded = ?1, exclusion_reason = ?2, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now') WHERE name = ?3",
            params![excluded as i64, reason, name],
        )?;
        anyhow::ensure!(changed == 1, "No unit named '{name}' in the catalog");
        Ok(())
    }
}
