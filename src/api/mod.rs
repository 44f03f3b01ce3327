//! HTTP API module for the prescription engine.
//!
//! This module provides the REST endpoint that validates a case and returns
//! its prescription dates with the full audit trail.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, SuspensionRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
