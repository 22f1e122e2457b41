//! Abstract UI driver the execution engine runs against.
//!
//! The engine's retry/backoff and step-dispatch logic is unit-testable
//! without a real browser because every DOM primitive goes through this
//! trait; [`SimulatedDriver`] is the shipped double, able to simulate
//! delayed element availability.

use std::collections::HashMap;
use std::sync::Mutex;

/// One choice in a native selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// The machine value submitted when the option is chosen.
    pub value: String,
    /// The visible option text.
    pub text: String,
}

impl SelectOption {
    /// Creates an option.
    pub fn new(value: &str, text: &str) -> Self {
        Self {
            value: value.to_string(),
            text: text.to_string(),
        }
    }
}

/// The UI/DOM collaborator interface.
///
/// All methods take logical locator strings; how a locator resolves to a
/// concrete element is the driver's concern. Drivers are expected to be
/// cheap to call repeatedly, since the engine polls them.
pub trait UiDriver: Send + Sync {
    /// Requests navigation to a route.
    fn navigate(&self, route: &str);

    /// Returns the current route path.
    fn current_path(&self) -> String;

    /// Returns whether the element currently exists.
    fn exists(&self, locator: &str) -> bool;

    /// Returns whether the element is visible.
    fn is_visible(&self, locator: &str) -> bool;

    /// Returns whether the element is disabled.
    fn is_disabled(&self, locator: &str) -> bool;

    /// Returns whether the element is a native selection control.
    fn is_native_select(&self, locator: &str) -> bool;

    /// Returns the options of a selection control, empty when it has none.
    fn options(&self, locator: &str) -> Vec<SelectOption>;

    /// Sets a control's value and dispatches the platform's input-changed
    /// and change notifications.
    fn set_value(&self, locator: &str, value: &str);

    /// Dispatches a primary activation on the element.
    fn click(&self, locator: &str);

    /// Opens a non-native dropdown and picks the option whose text matches;
    /// returns whether an option was picked.
    fn open_and_pick(&self, locator: &str, option_text: &str) -> bool;

    /// Scrolls the element into view.
    fn scroll_into_view(&self, locator: &str);

    /// Applies a brief visual emphasis to the element.
    fn highlight(&self, locator: &str);
}

/// A scriptable element inside the [`SimulatedDriver`].
#[derive(Debug, Clone, Default)]
pub struct SimulatedElement {
    /// Whether the element is visible.
    pub visible: bool,
    /// Whether the element is disabled.
    pub disabled: bool,
    /// Whether the element behaves as a native selection control.
    pub native_select: bool,
    /// Options exposed by a selection control.
    pub options: Vec<SelectOption>,
    /// Number of existence polls to absorb before the element "appears",
    /// simulating rendering latency.
    pub appears_after_polls: u32,
}

impl SimulatedElement {
    /// A visible, enabled, non-select element.
    pub fn ready() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    /// A visible native select with the given options.
    pub fn select(options: Vec<SelectOption>) -> Self {
        Self {
            visible: true,
            native_select: true,
            options,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct SimulatedState {
    path: String,
    elements: HashMap<String, SimulatedElement>,
    clicks: Vec<String>,
    values: Vec<(String, String)>,
    picks: Vec<(String, String)>,
}

/// An in-memory UI double.
///
/// Elements are registered by locator and can be scripted to appear only
/// after a number of existence polls, which exercises the engine's retry
/// and wait paths.
///
/// # Example
///
/// ```
/// use tally_assist::command::{SimulatedDriver, SimulatedElement, UiDriver};
///
/// let driver = SimulatedDriver::new();
/// driver.add_element("payroll-table", SimulatedElement::ready());
/// assert!(driver.exists("payroll-table"));
/// assert!(!driver.exists("missing"));
/// ```
#[derive(Debug, Default)]
pub struct SimulatedDriver {
    state: Mutex<SimulatedState>,
}

impl SimulatedDriver {
    /// Creates an empty simulated UI at path "/".
    pub fn new() -> Self {
        let driver = Self::default();
        driver.state.lock().expect("sim lock").path = "/".to_string();
        driver
    }

    /// Registers (or replaces) an element.
    pub fn add_element(&self, locator: &str, element: SimulatedElement) {
        self.state
            .lock()
            .expect("sim lock")
            .elements
            .insert(locator.to_string(), element);
    }

    /// Removes an element.
    pub fn remove_element(&self, locator: &str) {
        self.state.lock().expect("sim lock").elements.remove(locator);
    }

    /// Returns the locators clicked so far, in order.
    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().expect("sim lock").clicks.clone()
    }

    /// Returns the (locator, value) pairs set so far, in order.
    pub fn values_set(&self) -> Vec<(String, String)> {
        self.state.lock().expect("sim lock").values.clone()
    }

    /// Returns the (locator, option text) pairs picked from non-native
    /// dropdowns so far, in order.
    pub fn picks(&self) -> Vec<(String, String)> {
        self.state.lock().expect("sim lock").picks.clone()
    }
}

impl UiDriver for SimulatedDriver {
    fn navigate(&self, route: &str) {
        self.state.lock().expect("sim lock").path = route.to_string();
    }

    fn current_path(&self) -> String {
        self.state.lock().expect("sim lock").path.clone()
    }

    fn exists(&self, locator: &str) -> bool {
        let mut state = self.state.lock().expect("sim lock");
        match state.elements.get_mut(locator) {
            Some(element) if element.appears_after_polls > 0 => {
                element.appears_after_polls -= 1;
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    fn is_visible(&self, locator: &str) -> bool {
        self.state
            .lock()
            .expect("sim lock")
            .elements
            .get(locator)
            .is_some_and(|e| e.visible && e.appears_after_polls == 0)
    }

    fn is_disabled(&self, locator: &str) -> bool {
        self.state
            .lock()
            .expect("sim lock")
            .elements
            .get(locator)
            .is_some_and(|e| e.disabled)
    }

    fn is_native_select(&self, locator: &str) -> bool {
        self.state
            .lock()
            .expect("sim lock")
            .elements
            .get(locator)
            .is_some_and(|e| e.native_select)
    }

    fn options(&self, locator: &str) -> Vec<SelectOption> {
        self.state
            .lock()
            .expect("sim lock")
            .elements
            .get(locator)
            .map(|e| e.options.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, locator: &str, value: &str) {
        self.state
            .lock()
            .expect("sim lock")
            .values
            .push((locator.to_string(), value.to_string()));
    }

    fn click(&self, locator: &str) {
        self.state
            .lock()
            .expect("sim lock")
            .clicks
            .push(locator.to_string());
    }

    fn open_and_pick(&self, locator: &str, option_text: &str) -> bool {
        let mut state = self.state.lock().expect("sim lock");
        let found = state
            .elements
            .get(locator)
            .is_some_and(|e| e.options.iter().any(|o| o.text == option_text));
        if found {
            state
                .picks
                .push((locator.to_string(), option_text.to_string()));
        }
        found
    }

    fn scroll_into_view(&self, _locator: &str) {}

    fn highlight(&self, _locator: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delayed_element_appears_after_polls() {
        let driver = SimulatedDriver::new();
        driver.add_element(
            "slow-table",
            SimulatedElement {
                visible: true,
                appears_after_polls: 2,
                ..SimulatedElement::default()
            },
        );

        assert!(!driver.exists("slow-table"));
        assert!(!driver.exists("slow-table"));
        assert!(driver.exists("slow-table"));
    }

    #[test]
    fn test_navigation_updates_path() {
        let driver = SimulatedDriver::new();
        assert_eq!(driver.current_path(), "/");
        driver.navigate("/payroll/tally-sync");
        assert_eq!(driver.current_path(), "/payroll/tally-sync");
    }

    #[test]
    fn test_interactions_are_recorded() {
        let driver = SimulatedDriver::new();
        driver.add_element("btn", SimulatedElement::ready());
        driver.click("btn");
        driver.set_value("period-select", "December-2025");

        assert_eq!(driver.clicks(), vec!["btn".to_string()]);
        assert_eq!(
            driver.values_set(),
            vec![("period-select".to_string(), "December-2025".to_string())]
        );
    }

    #[test]
    fn test_open_and_pick_requires_matching_option() {
        let driver = SimulatedDriver::new();
        driver.add_element(
            "dropdown",
            SimulatedElement {
                visible: true,
                options: vec![SelectOption::new("1", "December 2025")],
                ..SimulatedElement::default()
            },
        );

        assert!(driver.open_and_pick("dropdown", "December 2025"));
        assert!(!driver.open_and_pick("dropdown", "January 2026"));
        assert_eq!(driver.picks().len(), 1);
    }
}
