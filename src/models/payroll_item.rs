//! Payroll item model and related types.
//!
//! Payroll items are fetched from the payroll backend and are immutable
//! from this engine's perspective; the matching core only reads them.

use serde::{Deserialize, Serialize};

/// The accounting nature of a payroll item.
///
/// Used by the matcher to award a category bonus when the item type and
/// the candidate ledger's category form a recognized pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollItemType {
    /// Pay components added to gross pay (basic, HRA, allowances).
    Earning,
    /// Amounts withheld from pay (PF, TDS, professional tax).
    Deduction,
    /// Items held as assets (advances, loans to employees).
    Asset,
    /// Items held as liabilities (payables awaiting remittance).
    Liability,
}

impl std::fmt::Display for PayrollItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayrollItemType::Earning => write!(f, "Earning"),
            PayrollItemType::Deduction => write!(f, "Deduction"),
            PayrollItemType::Asset => write!(f, "Asset"),
            PayrollItemType::Liability => write!(f, "Liability"),
        }
    }
}

/// A payroll item as served by the payroll backend.
///
/// # Example
///
/// ```
/// use tally_assist::models::{PayrollItem, PayrollItemType};
///
/// let item = PayrollItem {
///     id: 1,
///     name: "Basic Salary".to_string(),
///     item_type: PayrollItemType::Earning,
///     description: None,
/// };
/// assert_eq!(item.item_type, PayrollItemType::Earning);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollItem {
    /// Unique identifier assigned by the payroll backend.
    pub id: u64,
    /// Display name of the item (e.g., "Basic Salary").
    pub name: String,
    /// The accounting nature of the item.
    #[serde(rename = "type")]
    pub item_type: PayrollItemType,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
