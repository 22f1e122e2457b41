//! Error types for the assistant engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during auto-mapping and command
//! interpretation.

use thiserror::Error;

/// The main error type for the assistant engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tally_assist::error::AssistError;
///
/// let error = AssistError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum AssistError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A command could not be interpreted with enough confidence to act on.
    ///
    /// Recoverable: the user should rephrase. Never retried automatically.
    #[error("Command could not be understood: {}", reasons.join("; "))]
    AmbiguousCommand {
        /// Human-readable reasons the command failed validation.
        reasons: Vec<String>,
    },

    /// The mapping persistence collaborator rejected a mapping creation.
    #[error("Failed to persist mapping for payroll item {payroll_item_id}: {message}")]
    MappingPersistence {
        /// The payroll item whose mapping could not be saved.
        payroll_item_id: u64,
        /// A description of the persistence failure.
        message: String,
    },

    /// A new plan was submitted while another plan is still executing.
    #[error("A plan is already executing in this session")]
    SessionBusy,

    /// An execution or step-advance was requested with no plan prepared.
    #[error("No execution plan has been prepared for this session")]
    NoActivePlan,

    /// Plan execution stopped on a failed step.
    #[error("Execution failed at step '{step_id}': {message}")]
    ExecutionFailed {
        /// The id of the step that failed.
        step_id: String,
        /// The failure message reported by the execution engine.
        message: String,
    },
}

/// A type alias for Results that return AssistError.
pub type AssistResult<T> = Result<T, AssistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = AssistError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_ambiguous_command_joins_reasons() {
        let error = AssistError::AmbiguousCommand {
            reasons: vec![
                "no module recognized".to_string(),
                "no action recognized".to_string(),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Command could not be understood: no module recognized; no action recognized"
        );
    }

    #[test]
    fn test_mapping_persistence_displays_item_and_message() {
        let error = AssistError::MappingPersistence {
            payroll_item_id: 42,
            message: "backend unavailable".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to persist mapping for payroll item 42: backend unavailable"
        );
    }

    #[test]
    fn test_execution_failed_displays_step_and_message() {
        let error = AssistError::ExecutionFailed {
            step_id: "step_4".to_string(),
            message: "element not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Execution failed at step 'step_4': element not found"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<AssistError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_session_busy() -> AssistResult<()> {
            Err(AssistError::SessionBusy)
        }

        fn propagates_error() -> AssistResult<()> {
            returns_session_busy()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
