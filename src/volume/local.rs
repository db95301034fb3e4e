use super::VolumeFacts;
use anyhow::{bail, Result};

/// Get volume facts for the filesystem containing `path` via statvfs.
#[cfg(unix)]
#[allow(unsafe_code)]
pub(super) fn volume_facts(path: &str) -> Result<VolumeFacts> {
    use std::ffi::CString;

    let c_path = CString::new(path)?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };

    let ret = unsafe { libc::statvfs(c_path.as_ptr(), &raw mut stat) };
    if ret != 0 {
        bail!("statvfs failed for {}: {}", path, std::io::Error::last_os_error());
    }

    let block_size = stat.f_frsize as u64;
    let total_capacity = stat.f_blocks as u64 * block_size;
    let remaining_free = stat.f_bfree as u64 * block_size;

    Ok(VolumeFacts { total_capacity, remaining_free })
}

/// Fallback for non-unix platforms (development on macOS/Windows).
#[cfg(not(unix))]
pub(super) fn volume_facts(_path: &str) -> Result<VolumeFacts> {
    tracing::warn!("volume_facts: using dummy values on non-unix platform");
    Ok(VolumeFacts { total_capacity: 1_000_000_000_000, remaining_free: 500_000_000_000 })
}
