//! Calculation result models for the prescription engine.
//!
//! This module contains the [`CalculationResult`] type and the structured
//! audit trail explaining every adjustment that produced its dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of adjustment an audit step records.
///
/// # Example
///
/// ```
/// use prescrizione_engine::models::AuditKind;
///
/// assert_eq!(AuditKind::AttemptReduction.as_str(), "attempt_reduction");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    /// The base statutory penalty.
    BaseTerm,
    /// Increase for special-effect aggravations (recidivism tier).
    SpecialAggravation,
    /// Increase for concurrence of aggravations.
    AggravationConcurrence,
    /// Reduction for an attempted offense.
    AttemptReduction,
    /// Substitution with the statutory minimum.
    StatutoryMinimum,
    /// Doubling of the term.
    Doubling,
    /// A manually entered suspension.
    ManualSuspension,
    /// The fixed COVID-19 suspension.
    CovidSuspension,
    /// The automatic Orlando reform suspension.
    OrlandoSuspension,
    /// Total of all suspensions.
    SuspensionTotal,
    /// Derivation of the maximum term.
    MaximumTerm,
}

impl AuditKind {
    /// Returns the snake_case identifier of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditKind::BaseTerm => "base_term",
            AuditKind::SpecialAggravation => "special_aggravation",
            AuditKind::AggravationConcurrence => "aggravation_concurrence",
            AuditKind::AttemptReduction => "attempt_reduction",
            AuditKind::StatutoryMinimum => "statutory_minimum",
            AuditKind::Doubling => "doubling",
            AuditKind::ManualSuspension => "manual_suspension",
            AuditKind::CovidSuspension => "covid_suspension",
            AuditKind::OrlandoSuspension => "orlando_suspension",
            AuditKind::SuspensionTotal => "suspension_total",
            AuditKind::MaximumTerm => "maximum_term",
        }
    }
}

/// A single step in the audit trail.
///
/// `input` and `output` carry the structured operands and result, so the
/// presentation layer can format them independently; `reasoning` is a
/// ready-made Italian sentence for direct display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// What kind of adjustment this step records.
    pub kind: AuditKind,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the legal provision for this rule.
    pub clause_ref: String,
    /// The operands of this step.
    pub input: serde_json::Value,
    /// The result of this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the step.
    pub reasoning: String,
}

/// A warning about a non-fatal condition met during calculation.
///
/// # Example
///
/// ```
/// use prescrizione_engine::models::AuditWarning;
///
/// let warning = AuditWarning {
///     code: "INTERRUPTION_DATE_MISSING".to_string(),
///     message: "Interruption flagged without a date".to_string(),
///     severity: "medium".to_string(),
/// };
/// assert_eq!(warning.severity, "medium");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace of a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The steps in computation order: penalty, suspensions, total, maximum term.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The outcome of a prescription calculation.
///
/// Produced fresh on every computation and never stored. Contains no
/// timestamps or random identifiers, so equal inputs give equal results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The ordinary term after all modifiers.
    pub ordinary_term_months: u32,
    /// The maximum term, the ordinary term times the cap multiplier.
    pub maximum_term_months: u32,
    /// The ordinary prescription date.
    pub ordinary_date: NaiveDate,
    /// The date the ordinary term runs from.
    pub ordinary_anchor_date: NaiveDate,
    /// The maximum prescription date.
    pub maximum_date: NaiveDate,
    /// The date the maximum term runs from, always the commission date.
    pub maximum_anchor_date: NaiveDate,
    /// All suspension days added to both dates.
    pub total_suspension_days: u32,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl CalculationResult {
    /// Returns the reasoning of every audit step, in order.
    pub fn audit_lines(&self) -> Vec<&str> {
        self.audit_trace
            .steps
            .iter()
            .map(|step| step.reasoning.as_str())
            .collect()
    }

    /// Returns the first audit step of the given kind.
    pub fn step(&self, kind: AuditKind) -> Option<&AuditStep> {
        self.audit_trace.steps.iter().find(|step| step.kind == kind)
    }
}
