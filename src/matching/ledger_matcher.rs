//! Best-match selection between one payroll item and the candidate ledgers.

use std::collections::HashSet;

use crate::models::{LedgerCategory, LedgerHead, PayrollItemType};

use super::similarity;

/// Minimum combined score a candidate must reach to be considered a match.
pub const MIN_MATCH_SCORE: f64 = 0.3;

/// Bonus added when the item type and ledger category form a recognized
/// accounting pairing.
pub const TYPE_BONUS: f64 = 0.2;

/// A candidate ledger together with its combined match score.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate<'a> {
    /// The matched ledger head.
    pub ledger: &'a LedgerHead,
    /// The combined name similarity plus category bonus.
    pub score: f64,
}

/// Finds the best-scoring unclaimed ledger for one payroll item.
///
/// Each active, unclaimed candidate is scored as name similarity plus a
/// fixed category bonus; the highest total wins, provided it reaches
/// [`MIN_MATCH_SCORE`]. Ties are broken by candidate list order (the first
/// candidate encountered wins) so that repeated runs over the same inputs
/// always pick the same ledger.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use tally_assist::matching::find_best_match;
/// use tally_assist::models::{LedgerCategory, LedgerHead, PayrollItemType};
///
/// let ledgers = vec![LedgerHead {
///     id: 10,
///     name: "Salary Expense".to_string(),
///     code: None,
///     category: LedgerCategory::Expense,
///     is_active: true,
/// }];
///
/// let best = find_best_match(
///     "Basic Salary",
///     PayrollItemType::Earning,
///     &ledgers,
///     &HashSet::new(),
/// )
/// .unwrap();
/// assert_eq!(best.ledger.id, 10);
/// ```
pub fn find_best_match<'a>(
    item_name: &str,
    item_type: PayrollItemType,
    candidates: &'a [LedgerHead],
    claimed: &HashSet<u64>,
) -> Option<MatchCandidate<'a>> {
    let mut best: Option<MatchCandidate<'a>> = None;

    for ledger in candidates {
        if !ledger.is_active || claimed.contains(&ledger.id) {
            continue;
        }

        let name_score = similarity(item_name, &ledger.name);
        let total = name_score + type_bonus(item_type, ledger);

        // Strictly-greater keeps the first candidate on ties.
        if total >= MIN_MATCH_SCORE && best.as_ref().is_none_or(|b| total > b.score) {
            best = Some(MatchCandidate {
                ledger,
                score: total,
            });
        }
    }

    best
}

/// Returns [`TYPE_BONUS`] when (item type, ledger category) is a recognized
/// pairing, 0.0 otherwise.
fn type_bonus(item_type: PayrollItemType, ledger: &LedgerHead) -> f64 {
    let name = ledger.name.to_lowercase();
    let paired = match item_type {
        PayrollItemType::Earning => {
            ledger.category == LedgerCategory::Expense || name.contains("salary")
        }
        PayrollItemType::Deduction => {
            ledger.category == LedgerCategory::Liability || name.contains("deduction")
        }
        PayrollItemType::Asset => ledger.category == LedgerCategory::Asset,
        PayrollItemType::Liability => ledger.category == LedgerCategory::Liability,
    };
    if paired { TYPE_BONUS } else { 0.0 }
}
