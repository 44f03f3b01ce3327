//! Prescription deadline engine for Italian criminal offenses.
//!
//! This crate computes the ordinary and maximum statute-of-limitations
//! ("prescrizione") dates for an offense from its base statutory penalty,
//! the applicable legal modifiers and the suspension periods, together with
//! a step-by-step audit trail of every adjustment.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
