use serde::{Deserialize, Serialize};

/// A managed storage-backed database unit as recorded in the inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Unit {
    pub id: i64,
    /// Unique identifier; the sort and lookup key for the whole pass.
    pub name: String,
    /// Machine that owns the unit's storage.
    pub host: String,
    /// Path to the unit's primary data file, used to resolve the volume.
    pub storage_path: String,
    /// Current on-disk size of the unit's data, in bytes.
    pub configured_size: u64,
    /// Free space reclaimable inside the unit without growing the file, in bytes.
    pub allocatable_whitespace: u64,
    /// Admission-exclusion flag as last read from the system of record.
    pub excluded: bool,
    pub exclusion_reason: Option<String>,
    pub updated_at: Option<String>,
}
