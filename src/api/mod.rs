//! HTTP API module for the payroll assistant engine.
//!
//! This module provides the REST API endpoints for auto-mapping payroll
//! items to ledger heads and for interpreting free-text commands.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AutoMapRequest, InterpretRequest};
pub use response::{ApiError, AutoMapResponse, InterpretResponse};
pub use state::AppState;
