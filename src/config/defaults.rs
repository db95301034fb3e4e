/// Default location of the SQLite unit catalog.
pub(crate) const DEFAULT_CATALOG_PATH: &str = "/var/lib/db-headroom/catalog.db";

/// Default number of units processed in parallel.
pub(crate) const DEFAULT_JOBS: usize = 4;

/// Default timeout for remote volume queries, in seconds.
pub(crate) const DEFAULT_SSH_TIMEOUT_SECS: u64 = 30;

/// Default SMTP port.
pub(crate) const DEFAULT_SMTP_PORT: u16 = 25;

/// Default subject line for the report mail.
pub(crate) const DEFAULT_SUBJECT: &str = "Database Suspension Report";
