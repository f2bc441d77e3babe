use std::sync::Arc;
use std::time::Duration;

use carrental_infra::DatabaseProbe;

/// Database dependency handed to handlers through a request extension.
///
/// Built once at startup; every request shares the same probe.
#[derive(Clone)]
pub struct DatabaseContext {
    probe: Arc<dyn DatabaseProbe>,
    ping_timeout: Duration,
}

impl DatabaseContext {
    pub fn new(probe: Arc<dyn DatabaseProbe>, ping_timeout: Duration) -> Self {
        Self { probe, ping_timeout }
    }

    pub fn probe(&self) -> &dyn DatabaseProbe {
        self.probe.as_ref()
    }

    pub fn ping_timeout(&self) -> Duration {
        self.ping_timeout
    }
}

impl core::fmt::Debug for DatabaseContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DatabaseContext")
            .field("ping_timeout", &self.ping_timeout)
            .finish_non_exhaustive()
    }
}
