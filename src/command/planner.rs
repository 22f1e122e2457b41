//! Expansion of parsed intents into ordered execution plans.

use crate::config::RouteConfig;
use crate::models::{ActionStep, ExecutionPlan, ParsedIntent, RiskLevel, StepType};

/// Fixed per-step duration estimate, in seconds.
const STEP_ESTIMATE_SECS: u32 = 3;

/// Accumulates steps with ascending order numbers.
struct StepBuilder {
    steps: Vec<ActionStep>,
}

impl StepBuilder {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn push(&mut self, step_type: StepType, description: &str, target: &str) -> &mut ActionStep {
        let order = self.steps.len() as u32 + 1;
        self.steps.push(ActionStep {
            id: format!("step_{}", order),
            order,
            step_type,
            description: description.to_string(),
            target: target.to_string(),
            value: None,
            requires_confirmation: false,
            highlight: false,
        });
        self.steps.last_mut().expect("just pushed")
    }
}

/// Expands a [`ParsedIntent`] into an ordered sequence of typed steps.
///
/// Step sequences are selected by a dispatch table keyed on
/// (module, action); high-risk actions get a mandatory terminal confirm
/// step. The planner is a pure transformation: it never inspects live UI
/// state, it only emits a plan against logical locators.
///
/// # Example
///
/// ```
/// use tally_assist::command::{ActionPlanner, IntentParser};
/// use tally_assist::config::{KeywordConfig, RouteConfig};
/// use tally_assist::models::{RiskLevel, StepType};
///
/// let parser = IntentParser::new(KeywordConfig::default());
/// let planner = ActionPlanner::new(RouteConfig::default());
///
/// let intent = parser.parse("push payroll for December 2025 to tally");
/// let plan = planner.create_plan(&intent);
///
/// assert_eq!(plan.risk_level, RiskLevel::High);
/// assert!(plan.requires_confirmation);
/// assert_eq!(plan.steps.last().unwrap().step_type, StepType::Confirm);
/// ```
#[derive(Debug, Clone)]
pub struct ActionPlanner {
    routes: RouteConfig,
}

impl ActionPlanner {
    /// Creates a planner over the given route tables.
    pub fn new(routes: RouteConfig) -> Self {
        Self { routes }
    }

    /// Creates an execution plan for the intent.
    ///
    /// Total over all intents: unrecognized (module, action) combinations
    /// fall back to a single generic navigate step.
    pub fn create_plan(&self, intent: &ParsedIntent) -> ExecutionPlan {
        let risk_level = classify_risk(intent.action.as_deref());
        let requires_confirmation = risk_level == RiskLevel::High;

        let mut builder = StepBuilder::new();
        let module = intent.module.as_deref().unwrap_or("dashboard");

        match (module, intent.action.as_deref()) {
            ("payroll", Some("sync") | Some("push")) => {
                self.payroll_sync_steps(&mut builder, intent);
            }
            ("expense" | "ngo" | "accounting", Some("sync") | Some("push")) => {
                self.module_sync_steps(&mut builder, module, intent);
            }
            _ => {
                builder.push(
                    StepType::Navigate,
                    &format!("Open the {} module", module),
                    &self.routes.module_route(module),
                );
            }
        }

        if requires_confirmation {
            let step = builder.push(
                StepType::Confirm,
                "Confirm before any data is sent to the target system",
                "confirm-dialog",
            );
            step.requires_confirmation = true;
        }

        let steps = builder.steps;
        ExecutionPlan {
            intent: intent.clone(),
            estimated_duration_secs: steps.len() as u32 * STEP_ESTIMATE_SECS,
            requires_confirmation,
            risk_level,
            steps,
        }
    }

    /// The fixed three-stage wizard template for payroll sync/push.
    fn payroll_sync_steps(&self, builder: &mut StepBuilder, intent: &ParsedIntent) {
        let action = intent.action.as_deref().unwrap_or("sync");

        builder.push(
            StepType::Navigate,
            "Open the payroll Tally sync page",
            &self.routes.sync_route("payroll"),
        );
        builder.push(
            StepType::Wait,
            "Wait for the sync page to load",
            "payroll-sync-page",
        );

        match intent.financial_year.as_deref() {
            // "current" is preselected by the page; there is nothing to set.
            Some("current") => {
                builder.push(
                    StepType::Wait,
                    "Financial year will be selected manually (current year is preselected)",
                    "financial-year-select",
                );
            }
            fy => {
                let step = builder.push(
                    StepType::Select,
                    "Select the financial year",
                    "financial-year-select",
                );
                step.value = fy.map(str::to_string);
            }
        }

        builder.push(
            StepType::Wait,
            "Wait for periods to load for the financial year",
            "period-select",
        );
        let step = builder.push(StepType::Select, "Select the period", "period-select");
        step.value = intent.period.clone();
        builder.push(
            StepType::Wait,
            "Wait for the payroll table to load",
            "payroll-table",
        );

        for stage in ["mapping review", "journal preview", "final summary"] {
            let step = builder.push(
                StepType::Click,
                &format!("Advance to the {} stage", stage),
                "wizard-next",
            );
            step.highlight = true;
        }

        let (target, description) = if action == "push" {
            ("btn-push-tally", "Push the payroll journal to Tally")
        } else {
            ("btn-sync-tally", "Sync the payroll journal with Tally")
        };
        let step = builder.push(StepType::Click, description, target);
        step.requires_confirmation = true;
        step.highlight = true;
    }

    /// The short template for expense/NGO/accounting sync intents.
    fn module_sync_steps(&self, builder: &mut StepBuilder, module: &str, intent: &ParsedIntent) {
        builder.push(
            StepType::Navigate,
            &format!("Open the {} Tally sync page", module),
            &self.routes.sync_route(module),
        );

        if intent.period.is_some() {
            let step = builder.push(StepType::Select, "Select the period", "period-select");
            step.value = intent.period.clone();
        }
    }
}

/// Classifies the risk of an action.
fn classify_risk(action: Option<&str>) -> RiskLevel {
    match action {
        Some("sync") | Some("push") => RiskLevel::High,
        Some("export") | Some("report") => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}
