//! Step-by-step execution of action plans against a UI driver.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::TimingConfig;
use crate::models::{ActionStep, ExecutionResult, StepType};

use super::driver::{SelectOption, UiDriver};

/// Cooperative cancellation flag, checked between steps and between poll
/// iterations.
///
/// Cancellation is coarse: a poll already sleeping finishes its nap before
/// noticing the flag, but no further UI interaction happens afterwards.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clears the flag so the token can be reused for the next plan.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// A predicate attached to a validate step, keyed by the step's target.
type Validator<D> = Box<dyn Fn(&D) -> bool + Send + Sync>;

/// Executes ordered step sequences against the live UI, one step at a time.
///
/// Every step function converts its internal errors into a failed
/// [`ExecutionResult`] rather than returning `Err` or panicking; the caller
/// decides whether a failure aborts the plan (it does, on the first failed
/// non-confirm step). All waiting is cooperative polling with explicit yield
/// points, so only one plan step is ever in flight per engine.
///
/// # Example
///
/// ```
/// use tally_assist::command::{ExecutionEngine, SimulatedDriver, SimulatedElement};
/// use tally_assist::config::TimingConfig;
/// use tally_assist::models::{ActionStep, StepType};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let driver = SimulatedDriver::new();
/// driver.add_element("btn-sync-tally", SimulatedElement::ready());
///
/// let engine = ExecutionEngine::new(driver, TimingConfig::instant());
/// let step = ActionStep {
///     id: "step_1".to_string(),
///     order: 1,
///     step_type: StepType::Click,
///     description: "Sync".to_string(),
///     target: "btn-sync-tally".to_string(),
///     value: None,
///     requires_confirmation: false,
///     highlight: false,
/// };
/// let result = engine.execute_step(&step).await;
/// assert!(result.success);
/// # });
/// ```
pub struct ExecutionEngine<D: UiDriver> {
    driver: D,
    timings: TimingConfig,
    cancel: CancelToken,
    validators: HashMap<String, Validator<D>>,
}

impl<D: UiDriver> ExecutionEngine<D> {
    /// Creates an engine over the given driver and timing constants.
    pub fn new(driver: D, timings: TimingConfig) -> Self {
        Self {
            driver,
            timings,
            cancel: CancelToken::new(),
            validators: HashMap::new(),
        }
    }

    /// Returns the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Returns a handle to the engine's cancellation token.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Attaches a predicate to validate steps targeting `target`.
    pub fn attach_validator<F>(&mut self, target: &str, predicate: F)
    where
        F: Fn(&D) -> bool + Send + Sync + 'static,
    {
        self.validators.insert(target.to_string(), Box::new(predicate));
    }

    /// Executes one step, converting every internal error into a failed
    /// result.
    pub async fn execute_step(&self, step: &ActionStep) -> ExecutionResult {
        let start = Instant::now();

        let outcome = match step.step_type {
            StepType::Navigate => self.run_navigate(step).await,
            StepType::Select => self.run_select(step).await,
            StepType::Click => self.run_click(step).await,
            StepType::Input => self.run_input(step).await,
            StepType::Wait => self.run_wait(step).await,
            StepType::Validate => self.run_validate(step),
            StepType::Confirm => Ok("confirmation is handled by the operator".to_string()),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        match outcome {
            Ok(message) => {
                debug!(step_id = %step.id, step_type = %step.step_type, "step succeeded");
                ExecutionResult::success(&step.id, message, duration_ms)
            }
            Err(message) => {
                warn!(step_id = %step.id, step_type = %step.step_type, error = %message, "step failed");
                ExecutionResult::failure(&step.id, message, duration_ms)
            }
        }
    }

    /// Executes steps strictly in order, skipping confirm steps and
    /// stopping at the first failure.
    ///
    /// `on_progress` is invoked after each executed step with its result.
    pub async fn execute_plan<F>(&self, steps: &[ActionStep], mut on_progress: F) -> Vec<ExecutionResult>
    where
        F: FnMut(&ActionStep, &ExecutionResult),
    {
        let mut results = Vec::new();

        for step in steps {
            if self.cancel.is_cancelled() {
                break;
            }
            // Confirmation is the orchestration layer's job, not the engine's.
            if step.step_type == StepType::Confirm {
                continue;
            }

            let result = self.execute_step(step).await;
            on_progress(step, &result);
            let failed = !result.success;
            results.push(result);
            if failed {
                break;
            }

            // Visual-feedback gap so the operator can follow along.
            self.sleep_ms(self.timings.step_gap_ms).await;
        }

        results
    }

    async fn run_navigate(&self, step: &ActionStep) -> Result<String, String> {
        self.driver.navigate(&step.target);
        self.sleep_ms(self.timings.navigate_settle_ms).await;

        let path = self.driver.current_path();
        if path == step.target || step.target.starts_with(&path) {
            Ok(format!("navigated to {}", path))
        } else {
            Err(format!(
                "navigation verification failed: at '{}', expected '{}'",
                path, step.target
            ))
        }
    }

    async fn run_select(&self, step: &ActionStep) -> Result<String, String> {
        let Some(value) = step.value.as_deref() else {
            return Ok("skipped (no value to select)".to_string());
        };

        self.find_with_retries(&step.target).await?;

        if self.driver.is_native_select(&step.target) {
            let options = self.driver.options(&step.target);
            let Some(option) = resolve_option(&options, value) else {
                return Err(option_failure_message(&step.target, value, &options));
            };
            let text = option.text.clone();
            self.driver.set_value(&step.target, &option.value);
            return Ok(format!("selected '{}'", text));
        }

        // Custom dropdown: simulate an open-then-click-option interaction.
        if self.driver.open_and_pick(&step.target, value) {
            Ok(format!("picked '{}'", value))
        } else {
            Err(format!(
                "could not pick '{}' from custom control '{}'",
                value, step.target
            ))
        }
    }

    async fn run_click(&self, step: &ActionStep) -> Result<String, String> {
        self.find_with_retries(&step.target).await?;

        // A disabled element means an unmet precondition; retrying cannot
        // change that.
        if self.driver.is_disabled(&step.target) {
            return Err(format!("element '{}' is disabled", step.target));
        }

        self.driver.scroll_into_view(&step.target);
        if step.highlight {
            self.driver.highlight(&step.target);
            self.sleep_ms(self.timings.highlight_ms).await;
        }
        self.driver.click(&step.target);
        Ok(format!("clicked '{}'", step.target))
    }

    async fn run_input(&self, step: &ActionStep) -> Result<String, String> {
        let Some(value) = step.value.as_deref() else {
            return Ok("skipped (no value to enter)".to_string());
        };

        self.find_with_retries(&step.target).await?;
        self.driver.set_value(&step.target, value);
        Ok(format!("entered '{}'", value))
    }

    async fn run_wait(&self, step: &ActionStep) -> Result<String, String> {
        let deadline = Instant::now() + Duration::from_millis(self.timings.wait_ceiling_ms);

        loop {
            if self.cancel.is_cancelled() {
                return Err("execution cancelled".to_string());
            }
            if self.element_ready(&step.target) {
                return Ok(format!("'{}' is ready", step.target));
            }
            if Instant::now() >= deadline {
                break;
            }
            self.sleep_ms(self.timings.wait_poll_ms).await;
        }

        // Degrade gracefully: an element that at least exists is treated as
        // usable rather than failing the whole plan at the ceiling.
        if self.driver.exists(&step.target) {
            Ok(format!(
                "'{}' found but may not be fully ready",
                step.target
            ))
        } else {
            Err(format!("timed out waiting for '{}'", step.target))
        }
    }

    fn run_validate(&self, step: &ActionStep) -> Result<String, String> {
        match self.validators.get(&step.target) {
            Some(predicate) if predicate(&self.driver) => Ok("validation passed".to_string()),
            Some(_) => Err(format!("validation failed for '{}'", step.target)),
            None => Ok("no validation attached".to_string()),
        }
    }

    /// Polls for an element with a bounded retry budget.
    async fn find_with_retries(&self, locator: &str) -> Result<(), String> {
        for attempt in 0..self.timings.retry_count {
            if self.cancel.is_cancelled() {
                return Err("execution cancelled".to_string());
            }
            if self.driver.exists(locator) {
                return Ok(());
            }
            if attempt + 1 < self.timings.retry_count {
                self.sleep_ms(self.timings.retry_interval_ms).await;
            }
        }
        Err(format!(
            "element '{}' not found after {} attempts",
            locator, self.timings.retry_count
        ))
    }

    /// Whether the element exists, is visible, is enabled, and (for native
    /// selects) has more than a placeholder option loaded.
    fn element_ready(&self, locator: &str) -> bool {
        if !self.driver.exists(locator)
            || !self.driver.is_visible(locator)
            || self.driver.is_disabled(locator)
        {
            return false;
        }
        if self.driver.is_native_select(locator) {
            let options = self.driver.options(locator);
            return options.len() > 1
                || options.first().is_some_and(|o| !o.value.is_empty());
        }
        true
    }

    async fn sleep_ms(&self, ms: u64) {
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        } else {
            // Explicit yield point even when delays are collapsed to zero.
            tokio::task::yield_now().await;
        }
    }
}

/// Resolves a requested value against a native control's options.
///
/// Resolution order: exact value/text match, case-insensitive substring
/// match over text and value, month/year token matching, then the first
/// non-empty option for the `"current"` sentinel.
fn resolve_option<'a>(options: &'a [SelectOption], value: &str) -> Option<&'a SelectOption> {
    let wanted = value.trim().to_lowercase();

    if let Some(option) = options.iter().find(|o| {
        o.value.to_lowercase() == wanted || o.text.to_lowercase() == wanted
    }) {
        return Some(option);
    }

    if let Some(option) = options.iter().find(|o| {
        let text = o.text.to_lowercase();
        let val = o.value.to_lowercase();
        text.contains(&wanted)
            || val.contains(&wanted)
            || (!text.is_empty() && wanted.contains(&text))
    }) {
        return Some(option);
    }

    if let Some(option) = options
        .iter()
        .find(|o| month_year_match(&o.text.to_lowercase(), &wanted))
    {
        return Some(option);
    }

    if wanted == "current" {
        return options.iter().find(|o| !o.value.is_empty());
    }

    None
}

/// Token-wise match for period-like values such as "December-2025":
/// every token must appear in the option text, with month names also
/// accepted by their three-letter prefix.
fn month_year_match(option_text: &str, wanted: &str) -> bool {
    let tokens: Vec<&str> = wanted
        .split(['-', '/', ' '])
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return false;
    }

    tokens.iter().all(|token| {
        if option_text.contains(token) {
            return true;
        }
        MONTHS.contains(token) && token.len() >= 3 && option_text.contains(&token[..3])
    })
}

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Builds the descriptive failure message for an unresolved option,
/// sampling up to five available options.
fn option_failure_message(target: &str, value: &str, options: &[SelectOption]) -> String {
    let sample: Vec<&str> = options.iter().take(5).map(|o| o.text.as_str()).collect();
    let suffix = if options.len() > 5 { ", ..." } else { "" };
    format!(
        "no option matching '{}' in '{}' (available: {}{})",
        value,
        target,
        sample.join(", "),
        suffix
    )
}
