//! Auto-mapping and command-assistant engine for the payroll/Tally console.
//!
//! This crate provides the two algorithmic subsystems behind the accounting
//! administration console: fuzzy auto-mapping of payroll items to ledger
//! heads (similarity scoring plus greedy assignment), and the natural-language
//! command pipeline (intent parsing, action planning, and step-by-step plan
//! execution against an abstract UI driver).

#![warn(missing_docs)]

pub mod api;
pub mod command;
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
