mod local;
pub(crate) mod remote;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Capacity facts for the volume backing a unit's storage path.
///
/// Computed fresh each pass, never cached. `remaining_free <= total_capacity`
/// as reported by the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VolumeFacts {
    pub total_capacity: u64,
    pub remaining_free: u64,
}

/// Capability interface for resolving a unit's volume facts.
///
/// The decision engine and metrics calculator never learn whether a local
/// statvfs or a remote channel served a given unit.
#[async_trait]
pub(crate) trait VolumeSource: Send + Sync {
    async fn volume_info(&self, host: &str, path: &str) -> Result<VolumeFacts>;
}

/// Real collector: statvfs when the unit's host is this machine, ssh+df
/// otherwise. Read-only; holds no connection state between calls.
pub(crate) struct SystemVolumes {
    local_host: String,
    ssh_timeout: Duration,
}

impl SystemVolumes {
    pub fn new(local_host: String, ssh_timeout: Duration) -> Self {
        Self { local_host, ssh_timeout }
    }
}

#[async_trait]
impl VolumeSource for SystemVolumes {
    async fn volume_info(&self, host: &str, path: &str) -> Result<VolumeFacts> {
        if host.eq_ignore_ascii_case(&self.local_host) {
            let path = path.to_string();
            tokio::task::spawn_blocking(move || local::volume_facts(&path)).await?
        } else {
            remote::volume_facts(host, path, self.ssh_timeout).await
        }
    }
}

/// This machine's host identity, for the local-vs-remote dispatch.
pub(crate) fn local_host_identity() -> Result<String> {
    let name = hostname::get()?;
    Ok(name.to_string_lossy().to_string())
}
