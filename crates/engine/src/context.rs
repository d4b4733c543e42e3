//! Per-operation state threaded through the installer

use crate::logger::Logger;
use dotdrop_config::InstallerConfig;
use dotdrop_core::Templater;

/// Everything one install or link operation needs
///
/// The configuration is borrowed immutably, so a shadow install simply builds
/// a context around a different snapshot.
#[derive(Clone, Copy)]
pub struct InstallContext<'a> {
    /// Settings in effect for this operation
    pub config: &'a InstallerConfig,

    /// Produces the content written for each source file
    pub templater: &'a dyn Templater,

    /// Receives every decision and failure
    pub logger: &'a dyn Logger,
}

impl<'a> InstallContext<'a> {
    /// Bundle the collaborators of one operation
    pub fn new(
        config: &'a InstallerConfig,
        templater: &'a dyn Templater,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            config,
            templater,
            logger,
        }
    }

    /// Forward a debug message when debugging is enabled
    pub fn debug(&self, msg: &str) {
        if self.config.debug {
            self.logger.debug(msg);
        }
    }

    pub(crate) fn dry_run(&self) -> bool {
        self.config.dry_run
    }
}

impl std::fmt::Debug for InstallContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallContext")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{Level, MemoryLogger};
    use dotdrop_core::PassthroughTemplater;

    #[test]
    fn test_debug_gated_by_config() {
        let logger = MemoryLogger::default();
        let templater = PassthroughTemplater;

        let quiet = InstallerConfig::default();
        InstallContext::new(&quiet, &templater, &logger).debug("hidden");
        assert_eq!(logger.count(Level::Debug), 0);

        let loud = InstallerConfig::default().with_debug(true);
        InstallContext::new(&loud, &templater, &logger).debug("shown");
        assert_eq!(logger.messages(Level::Debug), vec!["shown"]);
    }
}
