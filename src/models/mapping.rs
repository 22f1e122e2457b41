//! Payroll-to-ledger mapping model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted mapping between one payroll item and one ledger head for a
/// financial year.
///
/// Mappings are created by the auto-mapper (one creation call per confident
/// match) or manually through the console; they are updated and deleted only
/// through the external mapping service, never by the matching core itself.
///
/// # Example
///
/// ```
/// use tally_assist::models::PayrollMapping;
///
/// let mapping = PayrollMapping::new(1, 10, "2025-2026");
/// assert_eq!(mapping.payroll_item_id, 1);
/// assert_eq!(mapping.ledger_head_id, 10);
/// assert_eq!(mapping.financial_year, "2025-2026");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollMapping {
    /// Unique identifier of the mapping record.
    pub id: Uuid,
    /// The mapped payroll item.
    pub payroll_item_id: u64,
    /// The ledger head the item posts to.
    pub ledger_head_id: u64,
    /// The financial year the mapping applies to (e.g., "2025-2026").
    pub financial_year: String,
    /// When the mapping record was created.
    pub created_at: DateTime<Utc>,
    /// When the mapping record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl PayrollMapping {
    /// Creates a new mapping with a fresh id and current timestamps.
    pub fn new(payroll_item_id: u64, ledger_head_id: u64, financial_year: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            payroll_item_id,
            ledger_head_id,
            financial_year: financial_year.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
