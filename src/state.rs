// Application state module
// Read-only state shared by every request handler task

use std::path::PathBuf;

use crate::config::Config;
use crate::http::{MimeTable, PolicyHeaderSet};

/// Application state
///
/// Built once at startup and never mutated: configuration, the MIME table
/// (defaults plus overrides merged), and the policy header set.
pub struct AppState {
    pub config: Config,
    /// Root directory as configured, resolved per request
    pub root: PathBuf,
    pub mime: MimeTable,
    pub policy: PolicyHeaderSet,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let root = PathBuf::from(&config.serve.root);
        Self {
            config,
            root,
            mime: MimeTable::new(),
            policy: PolicyHeaderSet::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;

    #[test]
    fn test_state_carries_configured_root() {
        let overrides = Overrides {
            root: Some("/srv/www".to_string()),
            ..Overrides::default()
        };
        let cfg = Config::load_from("no_such_config_file", &overrides).unwrap();
        let state = AppState::new(cfg);
        assert_eq!(state.root, PathBuf::from("/srv/www"));
    }
}
