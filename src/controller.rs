use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::catalog::{Catalog, Unit};
use crate::engine::decision::{self, Action};
use crate::engine::metrics::{self, MetricsError, SpaceMetrics};
use crate::volume::VolumeSource;

/// Reason string recorded when a unit is suspended. Resumes carry no reason.
pub(crate) const SUSPEND_REASON: &str = "insufficient free-space headroom";

/// Why a single unit dropped out of the pass. Distinguishes the stage so the
/// end-of-pass summary can say what failed, not just that something did.
#[derive(Debug, Error)]
pub(crate) enum UnitError {
    #[error("volume query failed: {0:#}")]
    Volume(anyhow::Error),
    #[error("metrics computation failed: {0}")]
    Metrics(#[from] MetricsError),
    #[error("admission-flag write failed: {0:#}")]
    FlagWrite(anyhow::Error),
}

/// A recorded per-unit failure. Never fatal to the pass.
#[derive(Debug)]
pub(crate) struct UnitFailure {
    pub unit: String,
    pub error: UnitError,
}

/// One line of the final metrics table.
#[derive(Debug, Clone)]
pub(crate) struct UnitRow {
    pub name: String,
    /// Last *confirmed* admission-exclusion state. Only updated after a
    /// successful flag write, so the report never shows an attempted state.
    pub excluded: bool,
    pub metrics: SpaceMetrics,
}

/// Admission-flag write seam. The catalog is the production implementation;
/// tests substitute failing writers.
pub(crate) trait AdmissionWriter: Send + Sync {
    fn set_excluded(&self, name: &str, excluded: bool, reason: Option<&str>)
        -> anyhow::Result<()>;
}

impl AdmissionWriter for Catalog {
    fn set_excluded(
        &self,
        name: &str,
        excluded: bool,
        reason: Option<&str>,
    ) -> anyhow::Result<()> {
        Self::set_excluded(self, name, excluded, reason)
    }
}

/// Pass-wide knobs.
pub(crate) struct PassConfig {
    /// Total-free percentage at or below which an included unit is suspended.
    pub threshold: i64,
    /// Worker-pool bound across units.
    pub jobs: usize,
}

/// Everything one pass produced: the name-keyed metrics table, the recorded
/// per-unit failures, and how many flags actually changed.
#[derive(Debug, Default)]
pub(crate) struct PassOutcome {
    pub rows: BTreeMap<String, UnitRow>,
    pub failures: Vec<UnitFailure>,
    pub resumed: u32,
    pub suspended: u32,
}

/// Per-unit pipeline result, merged into the outcome after the pool drains.
struct Processed {
    row: Option<UnitRow>,
    /// Action confirmed against the system of record (write succeeded).
    applied: Option<Action>,
    failure: Option<UnitFailure>,
}

/// Run one pass: facts -> metrics -> decision -> flag write, per unit.
///
/// Units run through a bounded worker pool; queries to the same host are
/// serialized by a per-host semaphore while different hosts proceed in
/// parallel. Results are merged afterward into a `BTreeMap`, which gives the
/// name-sorted report order regardless of completion order. One unit's
/// failure at any step never aborts the others.
pub(crate) async fn run_pass<V, W>(
    units: Vec<Unit>,
    volumes: &V,
    writer: &W,
    cfg: &PassConfig,
) -> PassOutcome
where
    V: VolumeSource,
    W: AdmissionWriter,
{
    let host_gates: HashMap<String, Arc<Semaphore>> = units
        .iter()
        .map(|u| (u.host.clone(), Arc::new(Semaphore::new(1))))
        .collect();

    let jobs = cfg.jobs.max(1);
    let threshold = cfg.threshold;

    let results: Vec<Processed> = stream::iter(units.into_iter().map(|unit| {
        let gate = host_gates
            .get(&unit.host)
            .cloned()
            .unwrap_or_else(|| Arc::new(Semaphore::new(1)));
        process_unit(unit, volumes, writer, threshold, gate)
    }))
    .buffer_unordered(jobs)
    .collect()
    .await;

    let mut outcome = PassOutcome::default();
    for processed in results {
        if let Some(row) = processed.row {
            outcome.rows.insert(row.name.clone(), row);
        }
        match processed.applied {
            Some(Action::Resume) => outcome.resumed += 1,
            Some(Action::Suspend) => outcome.suspended += 1,
            Some(Action::None) | None => {}
        }
        if let Some(failure) = processed.failure {
            warn!("Unit {}: {}", failure.unit, failure.error);
            outcome.failures.push(failure);
        }
    }
    outcome.failures.sort_by(|a, b| a.unit.cmp(&b.unit));

    info!(
        "Pass complete: {} unit(s) in table, {} resumed, {} suspended, {} failure(s)",
        outcome.rows.len(),
        outcome.resumed,
        outcome.suspended,
        outcome.failures.len()
    );

    outcome
}

/// The strictly sequential per-unit pipeline.
async fn process_unit<V, W>(
    unit: Unit,
    volumes: &V,
    writer: &W,
    threshold: i64,
    host_gate: Arc<Semaphore>,
) -> Processed
where
    V: VolumeSource,
    W: AdmissionWriter,
{
    let name = unit.name.clone();

    let facts = {
        // Holding the Result keeps the permit alive for the duration of the
        // query; the semaphore is never closed.
        let _permit = host_gate.acquire().await;
        volumes.volume_info(&unit.host, &unit.storage_path).await
    };
    let facts = match facts {
        Ok(f) => f,
        Err(e) => {
            return Processed {
                row: None,
                applied: None,
                failure: Some(UnitFailure { unit: name, error: UnitError::Volume(e) }),
            }
        }
    };

    let computed = match metrics::compute(&unit, &facts) {
        Ok(m) => m,
        Err(e) => {
            return Processed {
                row: None,
                applied: None,
                failure: Some(UnitFailure { unit: name, error: UnitError::Metrics(e) }),
            }
        }
    };

    let decision = decision::decide(unit.excluded, computed.total_free_pct, threshold);
    let mut row = UnitRow { name: name.clone(), excluded: unit.excluded, metrics: computed };

    match decision.action {
        Action::None => Processed { row: Some(row), applied: None, failure: None },
        Action::Resume | Action::Suspend => {
            let reason = (decision.action == Action::Suspend).then_some(SUSPEND_REASON);
            match writer.set_excluded(&name, decision.new_excluded, reason) {
                Ok(()) => {
                    info!(
                        "Unit {name}: {} (total free {}% vs threshold {}%)",
                        decision.action, computed.total_free_pct, threshold
                    );
                    row.excluded = decision.new_excluded;
                    Processed { row: Some(row), applied: Some(decision.action), failure: None }
                }
                Err(e) => Processed {
                    // Row keeps the last confirmed excluded state.
                    row: Some(row),
                    applied: None,
                    failure: Some(UnitFailure { unit: name, error: UnitError::FlagWrite(e) }),
                },
            }
        }
    }
}
