use crate::config::defaults::{
    DEFAULT_CATALOG_PATH, DEFAULT_JOBS, DEFAULT_SMTP_PORT, DEFAULT_SSH_TIMEOUT_SECS,
};
use clap::Parser;
use std::path::PathBuf;

/// Evaluate free-space headroom for managed database units and toggle their
/// admission-exclusion flags accordingly. One invocation is one pass.
#[derive(Debug, Parser)]
#[clap(name = "db-headroom", version, term_width = 80)]
pub(crate) struct Cli {
    /// Total-free percentage at or below which an included unit is suspended.
    #[clap(long, short = 't', value_name = "PERCENT")]
    pub threshold: u32,

    /// Unit name to skip entirely this run (repeatable).
    #[clap(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Path to the catalog SQLite database.
    #[clap(long, value_name = "PATH", default_value = DEFAULT_CATALOG_PATH)]
    pub catalog: String,

    /// Override the local host identity used to pick local vs remote queries.
    #[clap(long, value_name = "HOST")]
    pub local_host: Option<String>,

    /// Timeout in seconds for remote volume queries.
    #[clap(long, value_name = "SECS", default_value_t = DEFAULT_SSH_TIMEOUT_SECS)]
    pub ssh_timeout: u64,

    /// Maximum number of units processed in parallel.
    #[clap(long, short = 'j', value_name = "N", default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,

    /// Directory to write the CSV suspension report into.
    #[clap(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Report recipient address (repeatable); enables mail delivery.
    #[clap(long = "mail-to", value_name = "ADDR", requires = "report_dir")]
    pub mail_to: Vec<String>,

    /// Sender address for the report mail.
    #[clap(long, value_name = "ADDR", requires = "mail_to")]
    pub mail_from: Option<String>,

    /// SMTP server host.
    #[clap(long, value_name = "HOST", requires = "mail_to")]
    pub smtp_server: Option<String>,

    /// SMTP server port.
    #[clap(long, value_name = "PORT", default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,

    /// Negotiate STARTTLS with the SMTP server.
    #[clap(long)]
    pub smtp_starttls: bool,

    /// SMTP username.
    #[clap(long, value_name = "USER")]
    pub smtp_user: Option<String>,

    /// SMTP password.
    #[clap(long, value_name = "PASS")]
    pub smtp_password: Option<String>,

    /// Override the report mail subject.
    #[clap(long, value_name = "TEXT")]
    pub subject: Option<String>,
}
