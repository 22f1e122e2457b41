//! Greedy auto-mapping of unmapped payroll items onto ledger heads.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AssistError, AssistResult};
use crate::models::{LedgerHead, PayrollItem, PayrollMapping};

use super::find_best_match;

/// The external mapping persistence collaborator.
///
/// The auto-mapper issues one `create_mapping` call per confident match and
/// never updates or deletes mappings. Implementations wrap whatever backend
/// the console talks to; the crate ships [`InMemoryMappingStore`] for tests
/// and the HTTP API.
pub trait MappingStore {
    /// Persists a new mapping and returns the stored record.
    fn create_mapping(
        &mut self,
        payroll_item_id: u64,
        ledger_head_id: u64,
        financial_year: &str,
    ) -> AssistResult<PayrollMapping>;

    /// Lists all mappings currently persisted.
    fn list_mappings(&self) -> Vec<PayrollMapping>;
}

/// A mapping store backed by a plain vector.
#[derive(Debug, Default)]
pub struct InMemoryMappingStore {
    mappings: Vec<PayrollMapping>,
    /// Payroll item ids for which `create_mapping` should fail, used to
    /// exercise the per-item partial-failure path.
    pub fail_for_items: HashSet<u64>,
}

impl InMemoryMappingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with existing mappings.
    pub fn with_mappings(mappings: Vec<PayrollMapping>) -> Self {
        Self {
            mappings,
            fail_for_items: HashSet::new(),
        }
    }
}

impl MappingStore for InMemoryMappingStore {
    fn create_mapping(
        &mut self,
        payroll_item_id: u64,
        ledger_head_id: u64,
        financial_year: &str,
    ) -> AssistResult<PayrollMapping> {
        if self.fail_for_items.contains(&payroll_item_id) {
            return Err(AssistError::MappingPersistence {
                payroll_item_id,
                message: "simulated persistence failure".to_string(),
            });
        }
        let mapping = PayrollMapping::new(payroll_item_id, ledger_head_id, financial_year);
        self.mappings.push(mapping.clone());
        Ok(mapping)
    }

    fn list_mappings(&self) -> Vec<PayrollMapping> {
        self.mappings.clone()
    }
}

/// Counters describing one auto-map run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoMapOutcome {
    /// Number of mappings successfully created.
    pub created: u32,
    /// Number of unmapped items that found no ledger or failed to persist.
    pub skipped: u32,
    /// The mappings created during this run, in creation order.
    pub mappings: Vec<PayrollMapping>,
}

/// Greedy single-pass auto-mapper.
///
/// Iterates the unmapped payroll items in input order, finds the best
/// unclaimed ledger for each, and emits one mapping creation per confident
/// match. A ledger is claimed by at most one item per run; already-mapped
/// ledgers are claimed from the start. The assignment is deliberately greedy
/// and order-dependent rather than a globally optimal bipartite matching, so
/// the same inputs always produce the same mapping outcome.
#[derive(Debug, Clone)]
pub struct AutoMapper {
    financial_year: String,
}

impl AutoMapper {
    /// Creates an auto-mapper that stamps created mappings with the given
    /// financial year.
    pub fn new(financial_year: &str) -> Self {
        Self {
            financial_year: financial_year.to_string(),
        }
    }

    /// Maps every unmapped payroll item to its best available ledger.
    ///
    /// Persistence failures are caught per item, logged, and counted as
    /// skipped; the batch continues because mapping creation is independent
    /// across items. An empty ledger pool skips every item without error.
    ///
    /// # Example
    ///
    /// ```
    /// use tally_assist::matching::{AutoMapper, InMemoryMappingStore};
    /// use tally_assist::models::{LedgerCategory, LedgerHead, PayrollItem, PayrollItemType};
    ///
    /// let items = vec![PayrollItem {
    ///     id: 1,
    ///     name: "Basic Salary".to_string(),
    ///     item_type: PayrollItemType::Earning,
    ///     description: None,
    /// }];
    /// let ledgers = vec![LedgerHead {
    ///     id: 10,
    ///     name: "Salary Expense".to_string(),
    ///     code: None,
    ///     category: LedgerCategory::Expense,
    ///     is_active: true,
    /// }];
    ///
    /// let mut store = InMemoryMappingStore::new();
    /// let outcome = AutoMapper::new("2025-2026").auto_map(&items, &ledgers, &[], &mut store);
    /// assert_eq!(outcome.created, 1);
    /// assert_eq!(outcome.mappings[0].ledger_head_id, 10);
    /// ```
    pub fn auto_map<S: MappingStore>(
        &self,
        items: &[PayrollItem],
        ledgers: &[LedgerHead],
        existing: &[PayrollMapping],
        store: &mut S,
    ) -> AutoMapOutcome {
        let mapped_items: HashSet<u64> = existing.iter().map(|m| m.payroll_item_id).collect();
        let mut claimed: HashSet<u64> = existing.iter().map(|m| m.ledger_head_id).collect();

        let mut outcome = AutoMapOutcome {
            created: 0,
            skipped: 0,
            mappings: Vec::new(),
        };

        for item in items.iter().filter(|i| !mapped_items.contains(&i.id)) {
            let Some(candidate) = find_best_match(&item.name, item.item_type, ledgers, &claimed)
            else {
                debug!(item_id = item.id, item_name = %item.name, "no confident ledger match");
                outcome.skipped += 1;
                continue;
            };

            match store.create_mapping(item.id, candidate.ledger.id, &self.financial_year) {
                Ok(mapping) => {
                    info!(
                        item_id = item.id,
                        ledger_id = candidate.ledger.id,
                        score = candidate.score,
                        "auto-mapped payroll item"
                    );
                    claimed.insert(candidate.ledger.id);
                    outcome.created += 1;
                    outcome.mappings.push(mapping);
                }
                Err(err) => {
                    warn!(item_id = item.id, error = %err, "mapping creation failed");
                    outcome.skipped += 1;
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LedgerCategory, PayrollItemType};

    fn item(id: u64, name: &str, item_type: PayrollItemType) -> PayrollItem {
        PayrollItem {
            id,
            name: name.to_string(),
            item_type,
            description: None,
        }
    }

    fn ledger(id: u64, name: &str, category: LedgerCategory) -> LedgerHead {
        LedgerHead {
            id,
            name: name.to_string(),
            code: None,
            category,
            is_active: true,
        }
    }

    // ==========================================================================
    // AM-001: single confident match creates exactly one mapping
    // ==========================================================================
    #[test]
    fn test_am_001_single_item_maps_to_expense_ledger() {
        let items = vec![item(1, "Basic Salary", PayrollItemType::Earning)];
        let ledgers = vec![
            ledger(10, "Salary Expense", LedgerCategory::Expense),
            ledger(11, "TDS Payable", LedgerCategory::Liability),
        ];

        let mut store = InMemoryMappingStore::new();
        let outcome = AutoMapper::new("2025-2026").auto_map(&items, &ledgers, &[], &mut store);

        assert_eq!(outcome.created, 1);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.mappings[0].payroll_item_id, 1);
        assert_eq!(outcome.mappings[0].ledger_head_id, 10);
        assert_eq!(store.list_mappings().len(), 1);
    }

    // ==========================================================================
    // AM-002: no ledger is claimed twice within one run
    // ==========================================================================
    #[test]
    fn test_am_002_no_double_claim_within_run() {
        let items = vec![
            item(1, "Basic Salary", PayrollItemType::Earning),
            item(2, "Salary Arrears", PayrollItemType::Earning),
        ];
        let ledgers = vec![
            ledger(10, "Salary Expense", LedgerCategory::Expense),
            ledger(12, "Salaries and Wages", LedgerCategory::Expense),
        ];

        let mut store = InMemoryMappingStore::new();
        let outcome = AutoMapper::new("2025-2026").auto_map(&items, &ledgers, &[], &mut store);

        assert_eq!(outcome.created, 2);
        let claimed: HashSet<u64> = outcome.mappings.iter().map(|m| m.ledger_head_id).collect();
        assert_eq!(claimed.len(), 2, "each ledger claimed at most once");
    }

    // ==========================================================================
    // AM-003: already-mapped items and ledgers are excluded
    // ==========================================================================
    #[test]
    fn test_am_003_existing_mappings_are_respected() {
        let items = vec![
            item(1, "Basic Salary", PayrollItemType::Earning),
            item(2, "House Rent Allowance", PayrollItemType::Earning),
        ];
        let ledgers = vec![
            ledger(10, "Salary Expense", LedgerCategory::Expense),
            ledger(13, "House Rent Allowance", LedgerCategory::Expense),
        ];
        let existing = vec![PayrollMapping::new(1, 10, "2025-2026")];

        let mut store = InMemoryMappingStore::with_mappings(existing.clone());
        let outcome = AutoMapper::new("2025-2026").auto_map(&items, &ledgers, &existing, &mut store);

        // Item 1 is already mapped; ledger 10 is already claimed.
        assert_eq!(outcome.created, 1);
        assert_eq!(outcome.mappings[0].payroll_item_id, 2);
        assert_eq!(outcome.mappings[0].ledger_head_id, 13);
    }

    // ==========================================================================
    // AM-004: empty ledger pool skips everything without error
    // ==========================================================================
    #[test]
    fn test_am_004_empty_ledger_pool_skips_all() {
        let items = vec![
            item(1, "Basic Salary", PayrollItemType::Earning),
            item(2, "TDS", PayrollItemType::Deduction),
        ];

        let mut store = InMemoryMappingStore::new();
        let outcome = AutoMapper::new("2025-2026").auto_map(&items, &[], &[], &mut store);

        assert_eq!(outcome.created, 0);
        assert_eq!(outcome.skipped, 2);
    }

    // ==========================================================================
    // AM-005: persistence failures skip the item, not the batch
    // ==========================================================================
    #[test]
    fn test_am_005_persistence_failure_continues_batch() {
        let items = vec![
            item(1, "Basic Salary", PayrollItemType::Earning),
            item(2, "TDS", PayrollItemType::Deduction),
        ];
        let ledgers = vec![
            ledger(10, "Salary Expense", LedgerCategory::Expense),
            ledger(11, "TDS Payable", LedgerCategory::Liability),
        ];

        let mut store = InMemoryMappingStore::new();
        store.fail_for_items.insert(1);
        let outcome = AutoMapper::new("2025-2026").auto_map(&items, &ledgers, &[], &mut store);

        assert_eq!(outcome.created, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.mappings[0].payroll_item_id, 2);
    }

    // ==========================================================================
    // AM-006: repeated runs over the same inputs assign identically
    // ==========================================================================
    #[test]
    fn test_am_006_greedy_assignment_is_deterministic() {
        let items = vec![
            item(1, "Basic Salary", PayrollItemType::Earning),
            item(2, "Provident Fund", PayrollItemType::Deduction),
            item(3, "Professional Tax", PayrollItemType::Deduction),
        ];
        let ledgers = vec![
            ledger(10, "Salary Expense", LedgerCategory::Expense),
            ledger(11, "Provident Fund Payable", LedgerCategory::Liability),
            ledger(12, "Professional Tax Payable", LedgerCategory::Liability),
        ];

        let mapper = AutoMapper::new("2025-2026");
        let assignments = |outcome: &AutoMapOutcome| {
            outcome
                .mappings
                .iter()
                .map(|m| (m.payroll_item_id, m.ledger_head_id))
                .collect::<Vec<_>>()
        };

        let mut store_a = InMemoryMappingStore::new();
        let first = mapper.auto_map(&items, &ledgers, &[], &mut store_a);
        for _ in 0..5 {
            let mut store_b = InMemoryMappingStore::new();
            let again = mapper.auto_map(&items, &ledgers, &[], &mut store_b);
            assert_eq!(assignments(&first), assignments(&again));
        }
    }

    // ==========================================================================
    // AM-007: created mappings carry the run's financial year
    // ==========================================================================
    #[test]
    fn test_am_007_mappings_carry_financial_year() {
        let items = vec![item(1, "Basic Salary", PayrollItemType::Earning)];
        let ledgers = vec![ledger(10, "Salary Expense", LedgerCategory::Expense)];

        let mut store = InMemoryMappingStore::new();
        let outcome = AutoMapper::new("2024-2025").auto_map(&items, &ledgers, &[], &mut store);

        assert_eq!(outcome.mappings[0].financial_year, "2024-2025");
    }

    #[test]
    fn test_no_match_counts_as_skipped() {
        let items = vec![item(9, "Zzz Qqq", PayrollItemType::Earning)];
        let ledgers = vec![ledger(10, "Mmm Nnn", LedgerCategory::Income)];

        let mut store = InMemoryMappingStore::new();
        let outcome = AutoMapper::new("2025-2026").auto_map(&items, &ledgers, &[], &mut store);

        assert_eq!(outcome.created, 0);
        assert_eq!(outcome.skipped, 1);
        assert!(store.list_mappings().is_empty());
    }
}
