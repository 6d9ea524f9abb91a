// Application state module
// Read-only runtime state shared across connections

use std::sync::atomic::AtomicBool;

use super::types::Config;

/// Application state
///
/// Built once in `main` from the loaded configuration and never mutated
/// afterwards. The access-log toggle is cached in an atomic so the request
/// path reads it without any locking.
pub struct AppState {
    pub config: Config,
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            cached_access_log: AtomicBool::new(config.logging.access_log),
        }
    }
}
