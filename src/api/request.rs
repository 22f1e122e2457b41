//! Request types for the payroll assistant API.
//!
//! This module defines the JSON request structures for the `/automap` and
//! `/interpret` endpoints.

use serde::{Deserialize, Serialize};

use crate::models::{LedgerHead, PayrollItem, PayrollMapping};

/// Request body for the `/automap` endpoint.
///
/// Carries the full payroll item and ledger head pools for one financial
/// year, plus any mappings that already exist so they are neither redone
/// nor double-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoMapRequest {
    /// The financial year the created mappings belong to (e.g., "2025-2026").
    pub financial_year: String,
    /// The payroll items to map.
    pub items: Vec<PayrollItem>,
    /// The ledger heads available as mapping targets.
    pub ledgers: Vec<LedgerHead>,
    /// Mappings that already exist for this financial year.
    #[serde(default)]
    pub existing_mappings: Vec<PayrollMapping>,
}

/// Request body for the `/interpret` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretRequest {
    /// The free-text command, typed or transcribed from speech.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automap_request_existing_mappings_default_empty() {
        let json = r#"{
            "financial_year": "2025-2026",
            "items": [],
            "ledgers": []
        }"#;
        let request: AutoMapRequest = serde_json::from_str(json).unwrap();
        assert!(request.existing_mappings.is_empty());
    }

    #[test]
    fn test_automap_request_parses_typed_items() {
        let json = r#"{
            "financial_year": "2025-2026",
            "items": [{"id": 1, "name": "Basic Salary", "type": "earning"}],
            "ledgers": [{
                "id": 10,
                "name": "Salary Expense",
                "category": "expense",
                "is_active": true
            }]
        }"#;
        let request: AutoMapRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.items[0].name, "Basic Salary");
        assert_eq!(request.ledgers[0].id, 10);
    }
}
