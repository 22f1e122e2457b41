//! Application state for the payroll assistant API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::command::{ActionPlanner, IntentParser};
use crate::config::ConfigLoader;

/// Shared application state.
///
/// The intent parser and action planner are built once from the loaded
/// configuration and shared across handlers, so keyword regexes are
/// compiled a single time at startup.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    parser: Arc<IntentParser>,
    planner: Arc<ActionPlanner>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let parser = IntentParser::new(config.config().keywords().clone());
        let planner = ActionPlanner::new(config.config().routes().clone());
        Self {
            config: Arc::new(config),
            parser: Arc::new(parser),
            planner: Arc::new(planner),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared intent parser.
    pub fn parser(&self) -> &IntentParser {
        &self.parser
    }

    /// Returns the shared action planner.
    pub fn planner(&self) -> &ActionPlanner {
        &self.planner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_state_from_defaults() {
        let state = AppState::new(ConfigLoader::with_defaults());
        let intent = state.parser().parse("sync payroll with tally");
        assert_eq!(intent.module.as_deref(), Some("payroll"));
    }
}
