//! Natural-language command pipeline.
//!
//! Free text (typed or transcribed) flows through the [`IntentParser`] into
//! a [`crate::models::ParsedIntent`], which the [`ActionPlanner`] expands
//! into an ordered [`crate::models::ExecutionPlan`]; the [`ExecutionEngine`]
//! then performs the plan step by step against an abstract [`UiDriver`],
//! orchestrated by the [`AssistantSession`] state machine.

mod driver;
mod executor;
mod parser;
mod planner;
mod session;

pub use driver::{SelectOption, SimulatedDriver, SimulatedElement, UiDriver};
pub use executor::{CancelToken, ExecutionEngine};
pub use parser::IntentParser;
pub use planner::ActionPlanner;
pub use session::{AssistantSession, SessionState};
