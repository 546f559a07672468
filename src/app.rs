use crate::config::ConsoleConfig;
use crate::console::SessionStore;
use crate::gateway::Gateway;
use std::time::Duration;

/// Everything a request handler needs, shared by all workers.
pub struct App {
    pub config: ConsoleConfig,
    pub gateway: Box<dyn Gateway>,
    pub sessions: SessionStore,
}

impl App {
    pub fn new(config: ConsoleConfig, gateway: Box<dyn Gateway>) -> Self {
        let sessions = SessionStore::new(config.published_only_default, config.max_upload_bytes)
            .with_limits(
                Duration::from_secs(config.session_ttl_secs),
                config.max_sessions,
            );
        Self {
            config,
            gateway,
            sessions,
        }
    }

    pub fn gateway(&self) -> &dyn Gateway {
        self.gateway.as_ref()
    }
}
