//! Per-user assistant session: parse, explain, guide, execute.

use tracing::{info, warn};

use crate::error::{AssistError, AssistResult};
use crate::models::{ActionStep, ExecutionPlan, ExecutionResult};

use super::driver::UiDriver;
use super::executor::ExecutionEngine;
use super::parser::IntentParser;
use super::planner::ActionPlanner;

/// Where a session currently is in its command lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No command in flight.
    Idle,
    /// A command is being parsed.
    Parsing,
    /// A plan is being prepared for a parsed intent.
    Planning,
    /// A plan is ready and shown to the user for review.
    Explain,
    /// The user is stepping through the plan one step at a time.
    Guided,
    /// The engine is running the plan.
    Executing,
    /// The last plan ran to completion.
    Completed,
}

/// Orchestrates the command pipeline for one user.
///
/// A session owns its parser, planner, and engine, and enforces the state
/// machine around them: a submitted command produces a plan to review, the
/// user then either walks it step by step (guided), runs it, or cancels.
/// Only one plan is in flight per session; executing is exclusive.
///
/// The execution log accumulates across plans and survives cancellation, so
/// the user can always see what was actually done.
///
/// # Example
///
/// ```
/// use tally_assist::command::{
///     ActionPlanner, AssistantSession, ExecutionEngine, IntentParser, SessionState,
///     SimulatedDriver,
/// };
/// use tally_assist::config::{KeywordConfig, RouteConfig, TimingConfig};
///
/// let mut session = AssistantSession::new(
///     IntentParser::new(KeywordConfig::default()),
///     ActionPlanner::new(RouteConfig::default()),
///     ExecutionEngine::new(SimulatedDriver::new(), TimingConfig::instant()),
/// );
///
/// let plan = session.submit("push payroll for December 2025 to tally").unwrap().clone();
/// assert!(plan.requires_confirmation);
/// assert_eq!(session.state(), SessionState::Explain);
/// ```
pub struct AssistantSession<D: UiDriver> {
    parser: IntentParser,
    planner: ActionPlanner,
    engine: ExecutionEngine<D>,
    state: SessionState,
    plan: Option<ExecutionPlan>,
    guided_index: usize,
    log: Vec<ExecutionResult>,
    last_error: Option<String>,
}

impl<D: UiDriver> AssistantSession<D> {
    /// Creates an idle session over the given pipeline components.
    pub fn new(parser: IntentParser, planner: ActionPlanner, engine: ExecutionEngine<D>) -> Self {
        Self {
            parser,
            planner,
            engine,
            state: SessionState::Idle,
            plan: None,
            guided_index: 0,
            log: Vec::new(),
            last_error: None,
        }
    }

    /// The session's current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The plan currently under review, if any.
    pub fn plan(&self) -> Option<&ExecutionPlan> {
        self.plan.as_ref()
    }

    /// Every step result executed in this session, oldest first.
    pub fn log(&self) -> &[ExecutionResult] {
        &self.log
    }

    /// The failure message of the last failed execution, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The engine's underlying driver.
    pub fn driver(&self) -> &D {
        self.engine.driver()
    }

    /// Parses a typed command, validates it, and prepares a plan for review.
    ///
    /// On success the session moves to [`SessionState::Explain`] and the plan
    /// is returned; an unintelligible command leaves the session idle and
    /// returns [`AssistError::AmbiguousCommand`] with every failure reason.
    pub fn submit(&mut self, text: &str) -> AssistResult<&ExecutionPlan> {
        if self.state == SessionState::Executing {
            return Err(AssistError::SessionBusy);
        }

        self.state = SessionState::Parsing;
        let intent = self.parser.parse(text);
        info!(
            module = intent.module.as_deref().unwrap_or("-"),
            action = intent.action.as_deref().unwrap_or("-"),
            confidence = intent.confidence,
            "command parsed"
        );

        let validation = self.parser.validate(&intent);
        if !validation.valid {
            warn!(reasons = ?validation.reasons, "command rejected");
            self.state = SessionState::Idle;
            self.plan = None;
            return Err(AssistError::AmbiguousCommand {
                reasons: validation.reasons,
            });
        }

        self.state = SessionState::Planning;
        let plan = self.planner.create_plan(&intent);
        info!(steps = plan.steps.len(), risk = ?plan.risk_level, "plan prepared");

        self.plan = Some(plan);
        self.guided_index = 0;
        self.state = SessionState::Explain;
        Ok(self.plan.as_ref().expect("plan just stored"))
    }

    /// Parses a voice transcript; identical to [`Self::submit`] once the
    /// speech layer has produced text.
    pub fn submit_transcript(&mut self, transcript: &str) -> AssistResult<&ExecutionPlan> {
        self.submit(transcript)
    }

    /// Enters guided mode at the first step of the prepared plan.
    pub fn begin_guided(&mut self) -> AssistResult<&ActionStep> {
        let plan = self.plan.as_ref().ok_or(AssistError::NoActivePlan)?;
        self.guided_index = 0;
        self.state = SessionState::Guided;
        Ok(&plan.steps[0])
    }

    /// The step the guided walkthrough is currently on.
    pub fn current_step(&self) -> Option<&ActionStep> {
        self.plan.as_ref().and_then(|p| p.steps.get(self.guided_index))
    }

    /// Advances the guided walkthrough; `Ok(None)` past the last step, which
    /// also completes the session.
    pub fn next_step(&mut self) -> AssistResult<Option<&ActionStep>> {
        let plan = self.plan.as_ref().ok_or(AssistError::NoActivePlan)?;
        if self.guided_index + 1 >= plan.steps.len() {
            self.guided_index = plan.steps.len();
            self.state = SessionState::Completed;
            return Ok(None);
        }
        self.guided_index += 1;
        Ok(plan.steps.get(self.guided_index))
    }

    /// Steps the guided walkthrough backwards, saturating at the first step.
    pub fn previous_step(&mut self) -> AssistResult<&ActionStep> {
        let plan = self.plan.as_ref().ok_or(AssistError::NoActivePlan)?;
        self.guided_index = self.guided_index.saturating_sub(1).min(plan.steps.len() - 1);
        self.state = SessionState::Guided;
        Ok(&plan.steps[self.guided_index])
    }

    /// Runs the prepared plan to completion through the execution engine.
    ///
    /// Step results are appended to the session log as they happen. On
    /// success the session is [`SessionState::Completed`]; on a failed step
    /// the session returns to idle with the failure recorded in
    /// [`Self::last_error`] and an [`AssistError::ExecutionFailed`] is
    /// returned.
    pub async fn execute(&mut self) -> AssistResult<()> {
        let steps = match &self.plan {
            Some(plan) => plan.steps.clone(),
            None => return Err(AssistError::NoActivePlan),
        };

        self.engine.cancel_token().reset();
        self.state = SessionState::Executing;
        self.last_error = None;

        let results = self.engine.execute_plan(&steps, |_, _| {}).await;
        let failed = results.iter().find(|r| !r.success).cloned();
        self.log.extend(results);

        match failed {
            None => {
                self.state = SessionState::Completed;
                info!(steps = steps.len(), "plan executed");
                Ok(())
            }
            Some(result) => {
                warn!(step_id = %result.step_id, message = %result.message, "plan aborted");
                self.state = SessionState::Idle;
                self.last_error = Some(result.message.clone());
                Err(AssistError::ExecutionFailed {
                    step_id: result.step_id,
                    message: result.message,
                })
            }
        }
    }

    /// Abandons the current plan and flags any running execution to stop.
    ///
    /// The execution log is kept; only the plan and walkthrough position are
    /// discarded.
    pub fn cancel(&mut self) {
        self.engine.cancel_token().cancel();
        self.plan = None;
        self.guided_index = 0;
        self.state = SessionState::Idle;
    }
}
