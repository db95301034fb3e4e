pub(crate) mod defaults;
mod settings;
mod validation;

pub(crate) use settings::{MailConfig, ReportConfig, RunConfig};
