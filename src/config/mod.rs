//! Configuration for the assistant engine.
//!
//! Keyword tables, route tables, and timing constants are explicit
//! configuration structs rather than module-scoped globals, so multiple
//! parser configurations (e.g., locales) can coexist and the empirically
//! calibrated timing constants stay tunable.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AssistConfig, KeywordConfig, KeywordGroup, RouteConfig, TimingConfig};
