//! Fuzzy auto-mapping logic for pairing payroll items with ledger heads.
//!
//! This module contains the similarity scorer, the per-item ledger matcher
//! with its category bonus, and the greedy auto-mapper that claims each
//! ledger at most once per run.

mod auto_mapper;
mod ledger_matcher;
mod similarity;

pub use auto_mapper::{AutoMapOutcome, AutoMapper, InMemoryMappingStore, MappingStore};
pub use ledger_matcher::{MIN_MATCH_SCORE, MatchCandidate, TYPE_BONUS, find_best_match};
pub use similarity::similarity;
