//! Calculation logic for the prescription engine.
//!
//! This module contains the three stages of a prescription calculation and
//! the function combining them:
//! - the rule pipeline, applying the legal modifiers to the base penalty in
//!   their mandated order to obtain the ordinary term,
//! - the suspension aggregator, summing manual and automatic suspensions,
//! - the date resolver, deriving the maximum term and turning both terms into
//!   calendar dates.

mod date_resolver;
mod engine;
mod formatting;
mod modifier;
mod rule_pipeline;
mod suspensions;

pub use date_resolver::{
    OrdinaryAnchor, ResolvedDates, add_months_then_days, maximum_term, maximum_term_step,
    ordinary_anchor, resolve_dates,
};
pub use engine::{INTERRUPTION_DATE_MISSING, calculate_prescription};
pub use formatting::{describe_days, describe_months, format_date};
pub use modifier::{Modifier, ModifierOutcome, PIPELINE_ORDER};
pub use rule_pipeline::{OrdinaryTermResult, compute_ordinary_term, run_modifiers};
pub use suspensions::{CountedSuspension, SuspensionAggregate, aggregate_suspensions};
