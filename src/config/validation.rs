use super::settings::RunConfig;
use anyhow::Result;

impl RunConfig {
    /// Validate configuration values are sane.
    pub(crate) fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.jobs >= 1 && self.jobs <= 32,
            "jobs must be between 1 and 32"
        );
        anyhow::ensure!(
            self.ssh_timeout.as_secs() >= 1,
            "ssh-timeout must be at least 1 second"
        );

        if let Some(report) = &self.report {
            if let Some(mail) = &report.mail {
                anyhow::ensure!(
                    !mail.recipients.is_empty(),
                    "Mail delivery requires at least one --mail-to recipient"
                );
                anyhow::ensure!(!mail.sender.is_empty(), "Mail delivery requires --mail-from");
                anyhow::ensure!(!mail.server.is_empty(), "Mail delivery requires --smtp-server");
                anyhow::ensure!(mail.port > 0, "smtp-port must be > 0");
            }
        }

        Ok(())
    }
}
