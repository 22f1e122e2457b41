//! Configuration types for the assistant engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;

use serde::Deserialize;

/// One named keyword group (e.g., the "payroll" module and its synonyms).
///
/// Groups are kept in a list, not a map, because recognition is
/// first-match-wins and therefore order-sensitive.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordGroup {
    /// The canonical name emitted when any keyword matches.
    pub name: String,
    /// Keywords recognized for this group, matched on word boundaries.
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    /// Convenience constructor for building defaults.
    fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Keyword tables and confidence weights for the intent parser.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordConfig {
    /// Module keyword groups, scanned in order.
    pub modules: Vec<KeywordGroup>,
    /// Action keyword groups, scanned in order.
    pub actions: Vec<KeywordGroup>,
    /// Target-system keyword groups, scanned in order.
    pub targets: Vec<KeywordGroup>,
    /// Confidence added when a module keyword matches.
    #[serde(default = "default_module_weight")]
    pub module_weight: f64,
    /// Confidence added when an action keyword matches.
    #[serde(default = "default_action_weight")]
    pub action_weight: f64,
    /// Confidence added when a target-system keyword matches.
    #[serde(default = "default_target_weight")]
    pub target_weight: f64,
}

fn default_module_weight() -> f64 {
    0.3
}

fn default_action_weight() -> f64 {
    0.25
}

fn default_target_weight() -> f64 {
    0.25
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            modules: vec![
                KeywordGroup::new("payroll", &["payroll", "salary", "salaries", "payslip", "wages"]),
                KeywordGroup::new("expense", &["expense", "expenses", "voucher", "vouchers"]),
                KeywordGroup::new("ngo", &["ngo", "donor", "grant", "grants"]),
                KeywordGroup::new("accounting", &["accounting", "ledger", "ledgers", "journal", "books"]),
            ],
            actions: vec![
                KeywordGroup::new("sync", &["sync", "synchronise", "synchronize"]),
                KeywordGroup::new("push", &["push", "send", "upload"]),
                KeywordGroup::new("export", &["export", "download"]),
                KeywordGroup::new("report", &["report", "summary"]),
                KeywordGroup::new("map", &["map", "automap", "mapping"]),
                KeywordGroup::new("open", &["open", "navigate", "show", "view"]),
            ],
            targets: vec![KeywordGroup::new("tally", &["tally", "erp"])],
            module_weight: default_module_weight(),
            action_weight: default_action_weight(),
            target_weight: default_target_weight(),
        }
    }
}

/// Route tables mapping console modules to their pages.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// Base route per module (used by the generic navigate fallback).
    pub modules: HashMap<String, String>,
    /// Sync/push page route per module.
    pub sync_pages: HashMap<String, String>,
}

impl RouteConfig {
    /// Returns the base route for a module, falling back to `/{module}`.
    pub fn module_route(&self, module: &str) -> String {
        self.modules
            .get(module)
            .cloned()
            .unwrap_or_else(|| format!("/{}", module))
    }

    /// Returns the sync page route for a module, falling back to
    /// `/{module}/tally-sync`.
    pub fn sync_route(&self, module: &str) -> String {
        self.sync_pages
            .get(module)
            .cloned()
            .unwrap_or_else(|| format!("/{}/tally-sync", module))
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        let modules = [
            ("payroll", "/payroll"),
            ("expense", "/expense"),
            ("ngo", "/ngo"),
            ("accounting", "/accounting"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let sync_pages = [
            ("payroll", "/payroll/tally-sync"),
            ("expense", "/expense/tally-sync"),
            ("ngo", "/ngo/tally-sync"),
            ("accounting", "/accounting/tally-sync"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            modules,
            sync_pages,
        }
    }
}

/// Timing constants for the execution engine.
///
/// These values are calibrated against the console's rendering latency;
/// they are configuration, not hard constants.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Settle delay after a navigation request, in milliseconds.
    #[serde(default = "default_navigate_settle_ms")]
    pub navigate_settle_ms: u64,
    /// Number of element-lookup attempts before a select/click fails.
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    /// Delay between element-lookup attempts, in milliseconds.
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
    /// Ceiling for wait steps, in milliseconds.
    #[serde(default = "default_wait_ceiling_ms")]
    pub wait_ceiling_ms: u64,
    /// Poll interval inside wait steps, in milliseconds.
    #[serde(default = "default_wait_poll_ms")]
    pub wait_poll_ms: u64,
    /// Visual-feedback gap between plan steps, in milliseconds.
    #[serde(default = "default_step_gap_ms")]
    pub step_gap_ms: u64,
    /// Duration of the pre-click visual emphasis, in milliseconds.
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
}

fn default_navigate_settle_ms() -> u64 {
    1000
}

fn default_retry_count() -> u32 {
    10
}

fn default_retry_interval_ms() -> u64 {
    500
}

fn default_wait_ceiling_ms() -> u64 {
    20_000
}

fn default_wait_poll_ms() -> u64 {
    500
}

fn default_step_gap_ms() -> u64 {
    800
}

fn default_highlight_ms() -> u64 {
    300
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            navigate_settle_ms: default_navigate_settle_ms(),
            retry_count: default_retry_count(),
            retry_interval_ms: default_retry_interval_ms(),
            wait_ceiling_ms: default_wait_ceiling_ms(),
            wait_poll_ms: default_wait_poll_ms(),
            step_gap_ms: default_step_gap_ms(),
            highlight_ms: default_highlight_ms(),
        }
    }
}

impl TimingConfig {
    /// A configuration with all delays collapsed to zero and a small retry
    /// budget, for unit and integration tests.
    pub fn instant() -> Self {
        Self {
            navigate_settle_ms: 0,
            retry_count: 3,
            retry_interval_ms: 0,
            wait_ceiling_ms: 0,
            wait_poll_ms: 0,
            step_gap_ms: 0,
            highlight_ms: 0,
        }
    }
}

/// The complete assistant configuration.
#[derive(Debug, Clone, Default)]
pub struct AssistConfig {
    /// Keyword tables for the intent parser.
    keywords: KeywordConfig,
    /// Route tables for the action planner.
    routes: RouteConfig,
    /// Timing constants for the execution engine.
    timings: TimingConfig,
}

impl AssistConfig {
    /// Creates a configuration from its component parts.
    pub fn new(keywords: KeywordConfig, routes: RouteConfig, timings: TimingConfig) -> Self {
        Self {
            keywords,
            routes,
            timings,
        }
    }

    /// Returns the keyword configuration.
    pub fn keywords(&self) -> &KeywordConfig {
        &self.keywords
    }

    /// Returns the route configuration.
    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    /// Returns the timing configuration.
    pub fn timings(&self) -> &TimingConfig {
        &self.timings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keyword_weights() {
        let config = KeywordConfig::default();
        assert_eq!(config.module_weight, 0.3);
        assert_eq!(config.action_weight, 0.25);
        assert_eq!(config.target_weight, 0.25);
    }

    #[test]
    fn test_route_fallbacks() {
        let routes = RouteConfig::default();
        assert_eq!(routes.module_route("payroll"), "/payroll");
        assert_eq!(routes.module_route("unknown"), "/unknown");
        assert_eq!(routes.sync_route("payroll"), "/payroll/tally-sync");
        assert_eq!(routes.sync_route("unknown"), "/unknown/tally-sync");
    }

    #[test]
    fn test_timing_defaults() {
        let timings = TimingConfig::default();
        assert_eq!(timings.navigate_settle_ms, 1000);
        assert_eq!(timings.wait_ceiling_ms, 20_000);
    }

    #[test]
    fn test_keyword_config_deserializes_with_default_weights() {
        let yaml = r#"
modules:
  - name: payroll
    keywords: [payroll]
actions:
  - name: sync
    keywords: [sync]
targets:
  - name: tally
    keywords: [tally]
"#;
        let config: KeywordConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.module_weight, 0.3);
        assert_eq!(config.modules[0].name, "payroll");
    }

    #[test]
    fn test_timing_config_partial_yaml_uses_defaults() {
        let yaml = "wait_ceiling_ms: 5000";
        let timings: TimingConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(timings.wait_ceiling_ms, 5000);
        assert_eq!(timings.retry_count, 10);
    }
}
