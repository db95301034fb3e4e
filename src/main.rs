use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

mod catalog;
mod cli;
mod config;
mod controller;
mod engine;
mod report;
mod volume;

#[cfg(test)]
mod tests;

use catalog::Catalog;
use config::RunConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "db_headroom=info".into()),
        )
        .init();

    let config = RunConfig::from_cli(cli::Cli::parse())?;

    info!(
        "db-headroom v{} starting pass (threshold {}%)",
        env!("CARGO_PKG_VERSION"),
        config.threshold
    );

    let catalog = Catalog::open(&config.catalog_path)?;
    catalog.run_migrations()?;

    let local_host = match config.local_host.clone() {
        Some(host) => host,
        None => volume::local_host_identity()?,
    };
    info!("Local host identity: {local_host}");

    // A catalog listing failure is the one fatal error: nothing to process.
    let units = catalog.list_units(&config.exclude)?;
    if units.is_empty() {
        warn!("Catalog returned no manageable units; nothing to do");
        return Ok(());
    }
    info!("Evaluating {} unit(s)", units.len());

    let volumes = volume::SystemVolumes::new(local_host, config.ssh_timeout);
    let pass_cfg = controller::PassConfig {
        threshold: i64::from(config.threshold),
        jobs: config.jobs,
    };
    let outcome = controller::run_pass(units, &volumes, &catalog, &pass_cfg).await;

    if let Some(report_cfg) = &config.report {
        // Report and mail failures are logged but never fatal; the flag
        // changes already applied are the primary effect.
        match report::csv::write_report(&outcome.rows, &report_cfg.dir) {
            Ok(path) => {
                if let Some(mail_cfg) = &report_cfg.mail {
                    if let Err(e) = report::mail::send_report(mail_cfg, &path).await {
                        error!("Report mail delivery failed: {e:#}");
                    }
                }
            }
            Err(e) => error!("Report export failed: {e:#}"),
        }
    }

    info!(
        "Pass finished: {} unit(s) reported, {} resumed, {} suspended, {} failure(s)",
        outcome.rows.len(),
        outcome.resumed,
        outcome.suspended,
        outcome.failures.len()
    );

    Ok(())
}
