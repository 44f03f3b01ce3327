//! Legal modifiers applied to the base term.
//!
//! Each [`Modifier`] variant carries its own applicability check and effect.
//! The legally mandated order is the data constant [`PIPELINE_ORDER`]; the
//! modifiers do not commute, so reordering it changes results.
//!
//! ## Rounding
//!
//! Increases and reductions are exact fractions of the current term whose
//! amount is rounded up to a whole month (e.g. 1/3 of 73 months = 25 months).

use serde_json::json;

use crate::config::RegimeConfig;
use crate::models::{AuditKind, AuditStep, CapTier, CaseInput, Fraction, PenaltyTerm};

use super::formatting::describe_months;

/// A legal rule transforming the running term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Increase of the base term for special-effect aggravations, driven by the cap tier.
    SpecialAggravation,
    /// Increase of one third for concurrence of aggravations.
    AggravationConcurrence,
    /// Reduction of one third for an attempted offense.
    AttemptReduction,
    /// Substitution with the statutory minimum of the offense category.
    StatutoryMinimum,
    /// Doubling of the term.
    Doubling,
}

/// The legally mandated order of the modifiers.
pub const PIPELINE_ORDER: [Modifier; 5] = [
    Modifier::SpecialAggravation,
    Modifier::AggravationConcurrence,
    Modifier::AttemptReduction,
    Modifier::StatutoryMinimum,
    Modifier::Doubling,
];

/// The result of running one modifier, including the audit step.
#[derive(Debug, Clone)]
pub struct ModifierOutcome {
    /// The term after the modifier.
    pub term: PenaltyTerm,
    /// Whether the modifier changed anything.
    pub applied: bool,
    /// The audit step recording this modifier.
    pub audit_step: AuditStep,
}

impl Modifier {
    /// Returns the unique rule identifier.
    pub fn rule_id(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Returns the audit kind for this modifier.
    pub fn kind(&self) -> AuditKind {
        match self {
            Modifier::SpecialAggravation => AuditKind::SpecialAggravation,
            Modifier::AggravationConcurrence => AuditKind::AggravationConcurrence,
            Modifier::AttemptReduction => AuditKind::AttemptReduction,
            Modifier::StatutoryMinimum => AuditKind::StatutoryMinimum,
            Modifier::Doubling => AuditKind::Doubling,
        }
    }

    /// Returns the human-readable rule name.
    pub fn rule_name(&self) -> &'static str {
        match self {
            Modifier::SpecialAggravation => "Aggravanti ad effetto speciale",
            Modifier::AggravationConcurrence => "Concorso di aggravanti",
            Modifier::AttemptReduction => "Reato tentato",
            Modifier::StatutoryMinimum => "Minimo edittale",
            Modifier::Doubling => "Raddoppio termini",
        }
    }

    /// Returns the legal provision the modifier implements.
    pub fn clause_ref(&self, config: &RegimeConfig) -> String {
        match self {
            Modifier::SpecialAggravation => "art. 157 c.2 c.p.".to_string(),
            Modifier::AggravationConcurrence => "art. 63 c.4 c.p.".to_string(),
            Modifier::AttemptReduction => "art. 56 c.p.".to_string(),
            Modifier::StatutoryMinimum => config.minimums().clause.clone(),
            Modifier::Doubling => "art. 157 c.6 c.p.".to_string(),
        }
    }

    /// Returns true if the modifier changes `term` for this case.
    pub fn applies(&self, term: PenaltyTerm, input: &CaseInput, config: &RegimeConfig) -> bool {
        match self {
            Modifier::SpecialAggravation => input.cap_tier.base_increase().is_some(),
            Modifier::AggravationConcurrence => input.aggravation_concurrence,
            Modifier::AttemptReduction => input.attempted,
            Modifier::StatutoryMinimum => term < config.minimums().term_for(input.category),
            Modifier::Doubling => input.doubled,
        }
    }

    /// Runs the modifier on `term`, always producing an audit step.
    ///
    /// A modifier that does not apply returns the term unchanged and logs a
    /// no-op step with `applied: false`.
    pub fn apply(
        &self,
        term: PenaltyTerm,
        input: &CaseInput,
        config: &RegimeConfig,
        step_number: u32,
    ) -> ModifierOutcome {
        if !self.applies(term, input, config) {
            return self.skipped(term, input, config, step_number);
        }

        match self {
            Modifier::SpecialAggravation => {
                let Some(fraction) = input.cap_tier.base_increase() else {
                    return self.skipped(term, input, config, step_number);
                };
                let (increase, after) = term.increased_by(fraction);
                let label = match input.cap_tier {
                    CapTier::Habitual => "Aumento abitualità (+100%)".to_string(),
                    _ => format!("Aumento recidiva (+{})", fraction),
                };
                self.outcome(
                    term,
                    after,
                    json!({
                        "term_months": term.months(),
                        "cap_tier": input.cap_tier.as_str(),
                        "fraction": fraction.to_string(),
                        "exact_delta": fraction.exact_of(term.months()).to_string()
                    }),
                    format!(
                        "{} su base: {} + {} = {} mesi",
                        label,
                        term.months(),
                        increase,
                        after.months()
                    ),
                    config,
                    step_number,
                )
            }
            Modifier::AggravationConcurrence => {
                let fraction = Fraction::ONE_THIRD;
                let (increase, after) = term.increased_by(fraction);
                self.outcome(
                    term,
                    after,
                    json!({
                        "term_months": term.months(),
                        "fraction": fraction.to_string(),
                        "exact_delta": fraction.exact_of(term.months()).to_string()
                    }),
                    format!(
                        "Aumento concorso di aggravanti (+1/3): {} + {} = {} mesi",
                        term.months(),
                        increase,
                        after.months()
                    ),
                    config,
                    step_number,
                )
            }
            Modifier::AttemptReduction => {
                let fraction = Fraction::ONE_THIRD;
                let (reduction, after) = term.reduced_by(fraction);
                self.outcome(
                    term,
                    after,
                    json!({
                        "term_months": term.months(),
                        "fraction": fraction.to_string(),
                        "exact_delta": fraction.exact_of(term.months()).to_string()
                    }),
                    format!(
                        "Riduzione tentativo (-1/3): {} - {} = {} mesi",
                        term.months(),
                        reduction,
                        after.months()
                    ),
                    config,
                    step_number,
                )
            }
            Modifier::StatutoryMinimum => {
                let minimum_years = config.minimums().years_for(input.category);
                let floor = config.minimums().term_for(input.category);
                let after = term.at_least(floor);
                self.outcome(
                    term,
                    after,
                    json!({
                        "term_months": term.months(),
                        "category": input.category.as_str(),
                        "minimum_months": floor.months()
                    }),
                    format!(
                        "Minimo edittale ({} anni): termine portato da {} a {} mesi ({})",
                        minimum_years,
                        term.months(),
                        after.months(),
                        describe_months(after.months())
                    ),
                    config,
                    step_number,
                )
            }
            Modifier::Doubling => {
                let after = term.scaled_by(Fraction::new(2, 1));
                self.outcome(
                    term,
                    after,
                    json!({ "term_months": term.months(), "factor": 2 }),
                    format!("Raddoppio termini: {} × 2 = {} mesi", term.months(), after.months()),
                    config,
                    step_number,
                )
            }
        }
    }

    fn skipped(
        &self,
        term: PenaltyTerm,
        input: &CaseInput,
        config: &RegimeConfig,
        step_number: u32,
    ) -> ModifierOutcome {
        self.outcome(
            term,
            term,
            json!({ "term_months": term.months() }),
            self.skipped_reasoning(term, input, config),
            config,
            step_number,
        )
    }

    fn skipped_reasoning(
        &self,
        term: PenaltyTerm,
        input: &CaseInput,
        config: &RegimeConfig,
    ) -> String {
        match self {
            Modifier::SpecialAggravation => {
                "Nessun aumento per aggravanti ad effetto speciale sulla pena base".to_string()
            }
            Modifier::AggravationConcurrence => "Nessun concorso di aggravanti".to_string(),
            Modifier::AttemptReduction => {
                "Reato consumato: nessuna riduzione per tentativo".to_string()
            }
            Modifier::StatutoryMinimum => format!(
                "Termine di {} mesi non inferiore al minimo edittale di {} anni",
                term.months(),
                config.minimums().years_for(input.category)
            ),
            Modifier::Doubling => "Nessun raddoppio dei termini".to_string(),
        }
    }

    fn outcome(
        &self,
        before: PenaltyTerm,
        after: PenaltyTerm,
        input: serde_json::Value,
        reasoning: String,
        config: &RegimeConfig,
        step_number: u32,
    ) -> ModifierOutcome {
        let applied = before != after;
        let delta = i64::from(after.months()) - i64::from(before.months());

        ModifierOutcome {
            term: after,
            applied,
            audit_step: AuditStep {
                step_number,
                kind: self.kind(),
                rule_id: self.rule_id().to_string(),
                rule_name: self.rule_name().to_string(),
                clause_ref: self.clause_ref(config),
                input,
                output: json!({
                    "term_months": after.months(),
                    "delta_months": delta,
                    "applied": applied
                }),
                reasoning,
            },
        }
    }
}
