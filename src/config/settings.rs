use super::defaults::DEFAULT_SUBJECT;
use crate::cli::Cli;
use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// Immutable per-run settings, built once from the CLI and passed explicitly
/// to the collaborators that need them.
#[derive(Debug, Clone)]
pub(crate) struct RunConfig {
    /// Total-free percentage at or below which an included unit is suspended.
    pub threshold: u32,
    /// Unit names this run skips entirely (unrelated to the exclusion flag).
    pub exclude: HashSet<String>,
    pub catalog_path: String,
    /// Override for the local host identity; defaults to the machine hostname.
    pub local_host: Option<String>,
    pub ssh_timeout: Duration,
    pub jobs: usize,
    pub report: Option<ReportConfig>,
}

/// Report-export options; present only when `--report-dir` is given.
#[derive(Debug, Clone)]
pub(crate) struct ReportConfig {
    pub dir: PathBuf,
    pub mail: Option<MailConfig>,
}

/// Mail-delivery options; present only when recipients are configured.
#[derive(Debug, Clone)]
pub(crate) struct MailConfig {
    pub recipients: Vec<String>,
    pub sender: String,
    pub server: String,
    pub port: u16,
    pub starttls: bool,
    pub user: Option<String>,
    pub password: Option<String>,
    pub subject: String,
}

impl RunConfig {
    /// Build and validate the run configuration from parsed CLI arguments.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let mail = if cli.mail_to.is_empty() {
            None
        } else {
            Some(MailConfig {
                recipients: cli.mail_to,
                sender: cli.mail_from.unwrap_or_default(),
                server: cli.smtp_server.unwrap_or_default(),
                port: cli.smtp_port,
                starttls: cli.smtp_starttls,
                user: cli.smtp_user,
                password: cli.smtp_password,
                subject: cli.subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            })
        };

        anyhow::ensure!(
            cli.report_dir.is_some() || mail.is_none(),
            "Mail delivery requires --report-dir (there is nothing to attach otherwise)"
        );

        let config = Self {
            threshold: cli.threshold,
            exclude: cli.exclude.into_iter().collect(),
            catalog_path: cli.catalog,
            local_host: cli.local_host,
            ssh_timeout: Duration::from_secs(cli.ssh_timeout),
            jobs: cli.jobs,
            report: cli.report_dir.map(|dir| ReportConfig { dir, mail }),
        };

        config.validate()?;
        Ok(config)
    }
}
