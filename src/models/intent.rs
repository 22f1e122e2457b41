//! Parsed command intent and validation result.

use serde::{Deserialize, Serialize};

/// A structured intent extracted from one free-text command.
///
/// Created fresh per user utterance (typed or transcribed from speech),
/// consumed by the action planner, and never persisted.
///
/// # Example
///
/// ```
/// use tally_assist::models::ParsedIntent;
///
/// let intent = ParsedIntent {
///     module: Some("payroll".to_string()),
///     action: Some("push".to_string()),
///     target_system: Some("tally".to_string()),
///     financial_year: None,
///     period: Some("December-2025".to_string()),
///     confidence: 0.8,
///     raw_text: "push payroll for December 2025 to tally".to_string(),
/// };
/// assert!(intent.confidence <= 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIntent {
    /// The console module the command concerns (e.g., "payroll").
    pub module: Option<String>,
    /// The action to perform (e.g., "push", "sync", "export").
    pub action: Option<String>,
    /// The external system the action targets (e.g., "tally").
    pub target_system: Option<String>,
    /// The financial year, "current", or a normalized "YYYY-YYYY" span.
    pub financial_year: Option<String>,
    /// The period, formatted "Month-YYYY", a bare month name, or "QN".
    pub period: Option<String>,
    /// Additive recognition confidence, capped at 1.0.
    pub confidence: f64,
    /// The original command text as received.
    pub raw_text: String,
}

/// The outcome of validating a [`ParsedIntent`] before planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentValidation {
    /// Whether the intent carries enough information to plan from.
    pub valid: bool,
    /// Human-readable reasons the intent failed validation, if any.
    pub reasons: Vec<String>,
}

impl IntentValidation {
    /// A passing validation with no reasons.
    pub fn ok() -> Self {
        Self {
            valid: true,
            reasons: Vec::new(),
        }
    }

    /// A failing validation carrying the given reasons.
    pub fn failed(reasons: Vec<String>) -> Self {
        Self {
            valid: false,
            reasons,
        }
    }
}
