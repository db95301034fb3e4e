use crate::catalog::Unit;
use crate::volume::VolumeFacts;
use serde::Serialize;
use thiserror::Error;

const GIB: f64 = 1_073_741_824.0;

/// Why metrics could not be computed for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum MetricsError {
    #[error("unit has zero configured size")]
    ZeroConfiguredSize,
    #[error("volume reports zero capacity")]
    ZeroCapacity,
}

/// Normalized space metrics for one unit, recomputed each pass.
///
/// GB figures use binary (1024-based) units rounded to one decimal;
/// percentages are integers. Percentages are deliberately not clamped to
/// [0, 100] — a total-free figure above 100% signals whitespace exceeding
/// what the volume could absorb, which the report should show as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct SpaceMetrics {
    pub size_gb: f64,
    pub disk_free_gb: f64,
    pub disk_free_pct: i64,
    pub whitespace_gb: f64,
    pub whitespace_pct: i64,
    pub total_free_gb: f64,
    pub total_free_pct: i64,
}

/// Derive space metrics from a unit's catalog record and its volume facts.
///
/// Fails on zero configured size or zero capacity (division guards); such a
/// unit is skipped for the rest of the pass, never crashes it.
pub(crate) fn compute(unit: &Unit, facts: &VolumeFacts) -> Result<SpaceMetrics, MetricsError> {
    if unit.configured_size == 0 {
        return Err(MetricsError::ZeroConfiguredSize);
    }
    if facts.total_capacity == 0 {
        return Err(MetricsError::ZeroCapacity);
    }

    let total_free = facts.remaining_free.saturating_add(unit.allocatable_whitespace);

    Ok(SpaceMetrics {
        size_gb: gib(unit.configured_size),
        disk_free_gb: gib(facts.remaining_free),
        disk_free_pct: pct(facts.remaining_free, facts.total_capacity),
        whitespace_gb: gib(unit.allocatable_whitespace),
        whitespace_pct: pct(unit.allocatable_whitespace, unit.configured_size),
        total_free_gb: gib(total_free),
        total_free_pct: pct(total_free, facts.total_capacity),
    })
}

/// Bytes to binary gigabytes, one decimal place, ties away from zero.
fn gib(bytes: u64) -> f64 {
    (bytes as f64 / GIB * 10.0).round() / 10.0
}

/// Integer percentage, ties away from zero (`f64::round` semantics).
fn pct(numerator: u64, denominator: u64) -> i64 {
    (numerator as f64 / denominator as f64 * 100.0).round() as i64
}
