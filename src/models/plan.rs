//! Action steps, execution plans, and step execution results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ParsedIntent;

/// The kind of UI interaction a step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    /// Navigate to a route.
    Navigate,
    /// Choose a value in a selection control.
    Select,
    /// Activate a button or link.
    Click,
    /// Type a value into an input control.
    Input,
    /// Wait for an element to become ready.
    Wait,
    /// Run an attached predicate against the UI.
    Validate,
    /// Pause for explicit human confirmation.
    Confirm,
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StepType::Navigate => "navigate",
            StepType::Select => "select",
            StepType::Click => "click",
            StepType::Input => "input",
            StepType::Wait => "wait",
            StepType::Validate => "validate",
            StepType::Confirm => "confirm",
        };
        write!(f, "{}", name)
    }
}

/// How risky the planned action is for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Read-only or easily reversible actions.
    Low,
    /// Actions that produce artifacts (exports, reports).
    Medium,
    /// Actions that mutate an external system (sync, push).
    High,
}

/// One step of an execution plan.
///
/// Steps are created once by the planner, are immutable afterwards, and are
/// consumed sequentially by the execution engine. The `target` is a logical
/// locator string resolved by the UI driver; the planner never inspects live
/// UI state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionStep {
    /// Unique step identifier within the plan (e.g., "step_3").
    pub id: String,
    /// Position of the step in the plan, ascending from 1.
    pub order: u32,
    /// The kind of interaction to perform.
    pub step_type: StepType,
    /// Human-readable description shown while guiding or executing.
    pub description: String,
    /// Logical locator of the element or route the step acts on.
    pub target: String,
    /// The value to select or type, when the step needs one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether the step must not run without explicit confirmation.
    #[serde(default)]
    pub requires_confirmation: bool,
    /// Whether the element should be visually emphasized before acting.
    #[serde(default)]
    pub highlight: bool,
}

/// An ordered plan produced by the action planner for one intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    /// The intent the plan was derived from.
    pub intent: ParsedIntent,
    /// The steps to perform, sorted ascending by `order`.
    pub steps: Vec<ActionStep>,
    /// Rough duration estimate (fixed per-step cost, not measured).
    pub estimated_duration_secs: u32,
    /// Whether the plan ends in an explicit confirmation step.
    pub requires_confirmation: bool,
    /// Risk classification of the underlying action.
    pub risk_level: RiskLevel,
}

/// The outcome of executing one step.
///
/// Created one-per-executed-step and accumulated into the session log;
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The id of the executed step.
    pub step_id: String,
    /// Whether the step succeeded.
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// When the step finished.
    pub timestamp: DateTime<Utc>,
    /// How long the step took, in milliseconds.
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// Creates a successful result for the given step.
    pub fn success(step_id: &str, message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            step_id: step_id.to_string(),
            success: true,
            message: message.into(),
            timestamp: Utc::now(),
            duration_ms,
        }
    }

    /// Creates a failed result for the given step.
    pub fn failure(step_id: &str, message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            step_id: step_id.to_string(),
            success: false,
            message: message.into(),
            timestamp: Utc::now(),
            duration_ms,
        }
    }
}
