//! Core data models for the prescription engine.
//!
//! This module contains the case input snapshot, penalty terms, suspension
//! periods and the calculation result with its audit trail.

mod calculation_result;
mod case_input;
mod penalty_term;
mod suspension;

pub use calculation_result::{AuditKind, AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use case_input::{CapTier, CaseInput, MAX_BASE_MONTHS, MAX_BASE_YEARS, OffenseCategory};
pub use penalty_term::{Fraction, PenaltyTerm};
pub use suspension::{ManualSuspension, SuspensionPeriod, SuspensionSource};
