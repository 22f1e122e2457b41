//! Free-text command parsing into structured intents.

use regex::Regex;

use crate::config::{KeywordConfig, KeywordGroup};
use crate::models::{IntentValidation, ParsedIntent};

/// A keyword group with its matchers compiled once at construction.
#[derive(Debug)]
struct CompiledGroup {
    name: String,
    matchers: Vec<Regex>,
}

fn compile_groups(groups: &[KeywordGroup]) -> Vec<CompiledGroup> {
    groups
        .iter()
        .map(|group| CompiledGroup {
            name: group.name.clone(),
            matchers: group
                .keywords
                .iter()
                .map(|kw| {
                    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw)))
                        .expect("escaped keyword is a valid pattern")
                })
                .collect(),
        })
        .collect()
}

/// Extracts structured intents from free-text commands.
///
/// Recognition is table-driven: module, action, and target-system keywords
/// come from a [`KeywordConfig`], are scanned in table order, and the first
/// matching keyword wins. Each categorical hit adds its configured weight to
/// the confidence, which is capped at 1.0. Financial years and periods are
/// extracted with fixed patterns.
///
/// The parser is agnostic of input modality; typed text and speech
/// transcripts enter through the same [`parse`](IntentParser::parse) call.
///
/// # Example
///
/// ```
/// use tally_assist::command::IntentParser;
/// use tally_assist::config::KeywordConfig;
///
/// let parser = IntentParser::new(KeywordConfig::default());
/// let intent = parser.parse("push payroll for December 2025 to tally");
///
/// assert_eq!(intent.module.as_deref(), Some("payroll"));
/// assert_eq!(intent.action.as_deref(), Some("push"));
/// assert_eq!(intent.target_system.as_deref(), Some("tally"));
/// assert_eq!(intent.period.as_deref(), Some("December-2025"));
/// assert_eq!(intent.financial_year, None);
/// assert!(parser.validate(&intent).valid);
/// ```
#[derive(Debug)]
pub struct IntentParser {
    config: KeywordConfig,
    modules: Vec<CompiledGroup>,
    actions: Vec<CompiledGroup>,
    targets: Vec<CompiledGroup>,
    current_year_re: Regex,
    year_span_re: Regex,
    lone_year_re: Regex,
    month_re: Regex,
    quarter_re: Regex,
}

impl IntentParser {
    /// Creates a parser from a keyword configuration, compiling all
    /// matchers up front.
    pub fn new(config: KeywordConfig) -> Self {
        let modules = compile_groups(&config.modules);
        let actions = compile_groups(&config.actions);
        let targets = compile_groups(&config.targets);

        let valid = "fixed pattern compiles";
        Self {
            config,
            modules,
            actions,
            targets,
            current_year_re: Regex::new(r"(?i)\bcurrent\s+(?:financial\s+year|year|fy)\b")
                .expect(valid),
            year_span_re: Regex::new(r"\b(20\d{2})\s*-\s*(20\d{2})\b").expect(valid),
            lone_year_re: Regex::new(r"\b(20\d{2})\b").expect(valid),
            month_re: Regex::new(
                r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\b(?:\s+(\d{4}))?",
            )
            .expect(valid),
            quarter_re: Regex::new(r"(?i)\b(?:q\s*([1-4])|quarter\s+([1-4]))\b").expect(valid),
        }
    }

    /// Parses one command into a [`ParsedIntent`].
    ///
    /// Never fails; unrecognized fields come back as `None` with a lower
    /// confidence.
    pub fn parse(&self, text: &str) -> ParsedIntent {
        let mut confidence = 0.0;

        let module = first_match(&self.modules, text);
        if module.is_some() {
            confidence += self.config.module_weight;
        }

        let action = first_match(&self.actions, text);
        if action.is_some() {
            confidence += self.config.action_weight;
        }

        let target_system = first_match(&self.targets, text);
        if target_system.is_some() {
            confidence += self.config.target_weight;
        }

        let (period, remainder) = self.extract_period(text);
        let financial_year = self.extract_financial_year(&remainder);

        ParsedIntent {
            module,
            action,
            target_system,
            financial_year,
            period,
            confidence: confidence.min(1.0),
            raw_text: text.to_string(),
        }
    }

    /// Validates that an intent carries enough information to plan from.
    ///
    /// Collects every failure reason rather than stopping at the first, so
    /// the user can fix the whole command in one rephrase.
    pub fn validate(&self, intent: &ParsedIntent) -> IntentValidation {
        let mut reasons = Vec::new();

        if intent.module.is_none() {
            reasons.push(
                "no module recognized; mention payroll, expense, ngo, or accounting".to_string(),
            );
        }
        if intent.action.is_none() {
            reasons.push("no action recognized; say what to do (sync, push, export, ...)".to_string());
        }
        if matches!(intent.action.as_deref(), Some("sync") | Some("push"))
            && intent.target_system.is_none()
        {
            reasons.push("sync and push need a target system (e.g., tally)".to_string());
        }

        if reasons.is_empty() {
            IntentValidation::ok()
        } else {
            IntentValidation::failed(reasons)
        }
    }

    /// Extracts the period and returns it together with the text with the
    /// matched span blanked out, so a month's year is not re-read as a
    /// financial year.
    fn extract_period(&self, text: &str) -> (Option<String>, String) {
        if let Some(caps) = self.month_re.captures(text) {
            let month = capitalize(&caps[1]);
            let period = match caps.get(2) {
                Some(year) => format!("{}-{}", month, year.as_str()),
                None => month,
            };
            let full = caps.get(0).expect("whole match exists");
            let mut remainder = text.to_string();
            remainder.replace_range(full.range(), &" ".repeat(full.as_str().len()));
            return (Some(period), remainder);
        }

        if let Some(caps) = self.quarter_re.captures(text) {
            let digit = caps
                .get(1)
                .or_else(|| caps.get(2))
                .expect("one quarter group matches");
            return (Some(format!("Q{}", digit.as_str())), text.to_string());
        }

        (None, text.to_string())
    }

    /// Extracts the financial year from text whose period span has already
    /// been blanked out.
    fn extract_financial_year(&self, text: &str) -> Option<String> {
        if self.current_year_re.is_match(text) {
            return Some("current".to_string());
        }

        if let Some(caps) = self.year_span_re.captures(text) {
            return Some(format!("{}-{}", &caps[1], &caps[2]));
        }

        if let Some(caps) = self.lone_year_re.captures(text) {
            let year: u32 = caps[1].parse().expect("four digits parse");
            return Some(format!("{}-{}", year, year + 1));
        }

        None
    }
}

/// Scans the groups in order and returns the first group with a matching
/// keyword.
fn first_match(groups: &[CompiledGroup], text: &str) -> Option<String> {
    groups
        .iter()
        .find(|group| group.matchers.iter().any(|m| m.is_match(text)))
        .map(|group| group.name.clone())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordConfig;

    fn parser() -> IntentParser {
        IntentParser::new(KeywordConfig::default())
    }

    // ==========================================================================
    // IP-001: full push command
    // ==========================================================================
    #[test]
    fn test_ip_001_push_payroll_to_tally() {
        let intent = parser().parse("push payroll for December 2025 to tally");

        assert_eq!(intent.module.as_deref(), Some("payroll"));
        assert_eq!(intent.action.as_deref(), Some("push"));
        assert_eq!(intent.target_system.as_deref(), Some("tally"));
        assert_eq!(intent.period.as_deref(), Some("December-2025"));
        assert_eq!(intent.financial_year, None);
        assert!((intent.confidence - 0.8).abs() < 1e-9);
        assert!(parser().validate(&intent).valid);
    }

    // ==========================================================================
    // IP-002: current financial year phrases
    // ==========================================================================
    #[test]
    fn test_ip_002_current_year_phrases() {
        for text in [
            "sync payroll with tally for current year",
            "sync payroll with tally for the current fy",
            "sync payroll with tally for the current financial year",
        ] {
            let intent = parser().parse(text);
            assert_eq!(intent.financial_year.as_deref(), Some("current"), "{text}");
        }
    }

    // ==========================================================================
    // IP-003: year span kept verbatim, lone year normalized
    // ==========================================================================
    #[test]
    fn test_ip_003_year_span_and_lone_year() {
        let intent = parser().parse("open payroll for 2024-2025");
        assert_eq!(intent.financial_year.as_deref(), Some("2024-2025"));

        let intent = parser().parse("open payroll for 2024");
        assert_eq!(intent.financial_year.as_deref(), Some("2024-2025"));
    }

    // ==========================================================================
    // IP-004: period extraction
    // ==========================================================================
    #[test]
    fn test_ip_004_month_without_year() {
        let intent = parser().parse("push payroll for december to tally");
        assert_eq!(intent.period.as_deref(), Some("December"));
        assert_eq!(intent.financial_year, None);
    }

    #[test]
    fn test_ip_004_quarter_patterns() {
        let intent = parser().parse("export expense report for Q3");
        assert_eq!(intent.period.as_deref(), Some("Q3"));

        let intent = parser().parse("export expense report for quarter 2");
        assert_eq!(intent.period.as_deref(), Some("Q2"));
    }

    // ==========================================================================
    // IP-005: month year is not double-counted as financial year
    // ==========================================================================
    #[test]
    fn test_ip_005_period_year_not_reused_as_financial_year() {
        let intent = parser().parse("push payroll for March 2026 to tally");
        assert_eq!(intent.period.as_deref(), Some("March-2026"));
        assert_eq!(intent.financial_year, None);

        // A separate year span still comes through.
        let intent = parser().parse("push payroll for March 2026 to tally for 2025-2026");
        assert_eq!(intent.period.as_deref(), Some("March-2026"));
        assert_eq!(intent.financial_year.as_deref(), Some("2025-2026"));
    }

    // ==========================================================================
    // IP-006: confidence is additive and capped
    // ==========================================================================
    #[test]
    fn test_ip_006_confidence_additive() {
        let p = parser();

        let nothing = p.parse("hello there");
        assert_eq!(nothing.confidence, 0.0);

        let module_only = p.parse("payroll");
        assert!((module_only.confidence - 0.3).abs() < 1e-9);

        let module_action = p.parse("sync payroll");
        assert!((module_action.confidence - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_ip_006_confidence_capped_for_keyword_dense_input() {
        let text = "sync push export payroll salary expense ledger tally erp \
                    tally payroll sync push"
            .repeat(4);
        let intent = parser().parse(&text);
        assert!(intent.confidence <= 1.0);
    }

    // ==========================================================================
    // IP-007: validation reasons
    // ==========================================================================
    #[test]
    fn test_ip_007_validation_missing_module_and_action() {
        let p = parser();
        let intent = p.parse("hello there");
        let validation = p.validate(&intent);

        assert!(!validation.valid);
        assert_eq!(validation.reasons.len(), 2);
    }

    #[test]
    fn test_ip_007_sync_without_target_is_invalid() {
        let p = parser();
        let intent = p.parse("sync payroll for december");
        let validation = p.validate(&intent);

        assert!(!validation.valid);
        assert!(
            validation
                .reasons
                .iter()
                .any(|r| r.contains("target system"))
        );
    }

    #[test]
    fn test_export_without_target_is_valid() {
        let p = parser();
        let intent = p.parse("export payroll summary");
        assert!(p.validate(&intent).valid);
    }

    // ==========================================================================
    // IP-008: first-match-wins scanning
    // ==========================================================================
    #[test]
    fn test_ip_008_first_group_wins() {
        // "salary" (payroll) appears after "ledger" (accounting) in the
        // text, but the payroll group is scanned first.
        let intent = parser().parse("map salary heads to ledger accounts");
        assert_eq!(intent.module.as_deref(), Some("payroll"));
        assert_eq!(intent.action.as_deref(), Some("map"));
    }

    #[test]
    fn test_keywords_match_word_boundaries_only() {
        // "pushy" must not match the "push" keyword.
        let intent = parser().parse("a pushy salesperson");
        assert_eq!(intent.action, None);
    }

    #[test]
    fn test_raw_text_is_preserved() {
        let text = "push payroll to tally";
        assert_eq!(parser().parse(text).raw_text, text);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::config::KeywordConfig;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn confidence_is_always_capped(text in ".{0,200}") {
            let parser = IntentParser::new(KeywordConfig::default());
            let intent = parser.parse(&text);
            prop_assert!(intent.confidence >= 0.0);
            prop_assert!(intent.confidence <= 1.0);
        }

        #[test]
        fn parse_is_deterministic(text in ".{0,100}") {
            let parser = IntentParser::new(KeywordConfig::default());
            prop_assert_eq!(parser.parse(&text), parser.parse(&text));
        }
    }
}
