//! Core data models for the assistant engine.
//!
//! This module contains all the domain models used throughout the engine.

mod intent;
mod ledger_head;
mod mapping;
mod payroll_item;
mod plan;

pub use intent::{IntentValidation, ParsedIntent};
pub use ledger_head::{LedgerCategory, LedgerHead};
pub use mapping::PayrollMapping;
pub use payroll_item::{PayrollItem, PayrollItemType};
pub use plan::{ActionStep, ExecutionPlan, ExecutionResult, RiskLevel, StepType};
