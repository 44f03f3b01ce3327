//! Ordinary term computation.
//!
//! Starts from the base statutory penalty and runs every modifier of
//! [`PIPELINE_ORDER`] in turn, logging each step.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::RegimeConfig;
use crate::models::{AuditKind, AuditStep, CaseInput, PenaltyTerm};

use super::formatting::describe_months;
use super::modifier::{Modifier, PIPELINE_ORDER};

/// The result of the rule pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinaryTermResult {
    /// The base statutory penalty.
    pub base_term: PenaltyTerm,
    /// The ordinary term after all modifiers.
    pub term: PenaltyTerm,
    /// One audit step for the base term and one per modifier.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the ordinary term with the legally mandated modifier order.
///
/// # Arguments
///
/// * `input` - The case being calculated
/// * `config` - The regime configuration (statutory minimums)
/// * `step_number_start` - The step number of the first audit step
///
/// # Example
///
/// ```
/// use prescrizione_engine::calculation::compute_ordinary_term;
/// use prescrizione_engine::config::RegimeConfig;
/// use prescrizione_engine::models::CaseInput;
/// use chrono::NaiveDate;
///
/// let mut input = CaseInput::new(6, 0, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
/// input.attempted = true;
///
/// let result = compute_ordinary_term(&input, &RegimeConfig::default(), 1);
///
/// // 72 - 24 = 48 months, raised back to the 6-year minimum
/// assert_eq!(result.term.months(), 72);
/// assert_eq!(result.audit_steps.len(), 6);
/// ```
pub fn compute_ordinary_term(
    input: &CaseInput,
    config: &RegimeConfig,
    step_number_start: u32,
) -> OrdinaryTermResult {
    run_modifiers(&PIPELINE_ORDER, input, config, step_number_start)
}

/// Runs an explicit list of modifiers over the base term, in slice order.
pub fn run_modifiers(
    modifiers: &[Modifier],
    input: &CaseInput,
    config: &RegimeConfig,
    step_number_start: u32,
) -> OrdinaryTermResult {
    let base_term = input.base_term();
    let mut audit_steps = Vec::with_capacity(modifiers.len() + 1);
    audit_steps.push(base_term_step(input, base_term, step_number_start));

    let mut term = base_term;
    let mut step_number = step_number_start + 1;
    for modifier in modifiers {
        let outcome = modifier.apply(term, input, config, step_number);
        term = outcome.term;
        audit_steps.push(outcome.audit_step);
        step_number += 1;
    }

    OrdinaryTermResult {
        base_term,
        term,
        audit_steps,
    }
}

fn base_term_step(input: &CaseInput, base_term: PenaltyTerm, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        kind: AuditKind::BaseTerm,
        rule_id: AuditKind::BaseTerm.as_str().to_string(),
        rule_name: "Pena edittale".to_string(),
        clause_ref: "art. 157 c.1 c.p.".to_string(),
        input: json!({
            "base_years": input.base_years,
            "base_months": input.base_months
        }),
        output: json!({ "term_months": base_term.months() }),
        reasoning: format!(
            "Pena edittale base: {} mesi ({})",
            base_term.months(),
            describe_months(base_term.months())
        ),
    }
}
