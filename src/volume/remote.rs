use super::VolumeFacts;
use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Pre-compiled regex for the data line of POSIX `df -P` output with 1-byte
/// blocks: filesystem, total, used, available, capacity%, mount point.
static DF_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\S+\s+(\d+)\s+\d+\s+(\d+)\s+\d+%\s+\S").unwrap());

/// Query volume facts for `path` on a remote `host` by running df over ssh.
///
/// BatchMode keeps ssh from ever prompting; the whole exchange is bounded by
/// `timeout`. Errors carry the host and path so per-unit warnings are useful.
pub(super) async fn volume_facts(host: &str, path: &str, timeout: Duration) -> Result<VolumeFacts> {
    let connect_timeout = timeout.as_secs().max(1).to_string();

    debug!("Querying volume for {path} on {host} over ssh");

    let output = tokio::time::timeout(
        timeout,
        Command::new("ssh")
            .arg("-o")
            .arg("BatchMode=yes")
            .arg("-o")
            .arg(format!("ConnectTimeout={connect_timeout}"))
            .arg(host)
            .arg("--")
            .arg("df")
            .arg("-P")
            .arg("-B1")
            .arg(path)
            .output(),
    )
    .await
    .map_err(|_| anyhow!("Volume query to {host} timed out after {}s", timeout.as_secs()))?
    .with_context(|| format!("Failed to spawn ssh to {host}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("Remote volume query on {host} for {path} failed: {}", stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_df(&stdout).with_context(|| format!("Unparseable df output from {host} for {path}"))
}

/// Extract (total, available) from df output.
pub(crate) fn parse_df(output: &str) -> Result<VolumeFacts> {
    let caps =
        DF_LINE_RE.captures(output).ok_or_else(|| anyhow!("No df data line in output"))?;

    let total_capacity: u64 = caps[1].parse()?;
    let remaining_free: u64 = caps[2].parse()?;

    Ok(VolumeFacts { total_capacity, remaining_free })
}
