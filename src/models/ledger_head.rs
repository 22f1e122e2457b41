//! Ledger head model and related types.

use serde::{Deserialize, Serialize};

/// The accounting category of a ledger head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerCategory {
    /// Asset ledgers (advances, receivables).
    Asset,
    /// Liability ledgers (payables, statutory dues).
    Liability,
    /// Expense ledgers (salary expense, benefits expense).
    Expense,
    /// Income ledgers.
    Income,
}

impl std::fmt::Display for LedgerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerCategory::Asset => write!(f, "Asset"),
            LedgerCategory::Liability => write!(f, "Liability"),
            LedgerCategory::Expense => write!(f, "Expense"),
            LedgerCategory::Income => write!(f, "Income"),
        }
    }
}

/// A ledger head as served by the ledger backend.
///
/// The matching core only considers active ledgers as candidates.
///
/// # Example
///
/// ```
/// use tally_assist::models::{LedgerCategory, LedgerHead};
///
/// let ledger = LedgerHead {
///     id: 10,
///     name: "Salary Expense".to_string(),
///     code: Some("5001".to_string()),
///     category: LedgerCategory::Expense,
///     is_active: true,
/// };
/// assert!(ledger.is_active);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerHead {
    /// Unique identifier assigned by the ledger backend.
    pub id: u64,
    /// Display name of the ledger (e.g., "Salary Expense").
    pub name: String,
    /// Optional account code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// The accounting category of the ledger.
    pub category: LedgerCategory,
    /// Whether the ledger is active. Inactive ledgers are never matched.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&LedgerCategory::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
    }

    #[test]
    fn test_ledger_roundtrip() {
        let ledger = LedgerHead {
            id: 11,
            name: "TDS Payable".to_string(),
            code: None,
            category: LedgerCategory::Liability,
            is_active: true,
        };

        let json = serde_json::to_string(&ledger).unwrap();
        let back: LedgerHead = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn test_code_defaults_to_none() {
        let json = r#"{"id": 5, "name": "Cash", "category": "asset", "is_active": false}"#;
        let ledger: LedgerHead = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.code, None);
        assert!(!ledger.is_active);
    }
}
