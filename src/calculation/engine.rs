//! End-to-end prescription calculation.
//!
//! Runs the rule pipeline and the suspension aggregator, resolves both dates
//! and assembles the [`CalculationResult`] with the audit trail in
//! computation order: penalty steps, suspension steps ending with the total,
//! then the maximum term derivation.

use tracing::debug;

use crate::config::RegimeConfig;
use crate::error::EngineResult;
use crate::models::{AuditTrace, AuditWarning, CalculationResult, CaseInput};

use super::date_resolver::{maximum_term_step, ordinary_anchor, resolve_dates};
use super::formatting::format_date;
use super::rule_pipeline::compute_ordinary_term;
use super::suspensions::aggregate_suspensions;

/// Warning code emitted when an interruption is flagged without a date.
pub const INTERRUPTION_DATE_MISSING: &str = "INTERRUPTION_DATE_MISSING";

/// Calculates the ordinary and maximum prescription dates for a case.
///
/// The input is assumed to be validated (see [`CaseInput::validate`]). The
/// calculation is pure: equal inputs produce equal results, audit text
/// included.
///
/// # Errors
///
/// Returns [`EngineError::DateOutOfRange`](crate::error::EngineError::DateOutOfRange)
/// if a date leaves the supported calendar range, which cannot happen for
/// inputs within the validated bounds.
///
/// # Example
///
/// ```
/// use prescrizione_engine::calculation::calculate_prescription;
/// use prescrizione_engine::config::RegimeConfig;
/// use prescrizione_engine::models::CaseInput;
/// use chrono::NaiveDate;
///
/// let input = CaseInput::new(6, 0, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
/// let result = calculate_prescription(&input, &RegimeConfig::default()).unwrap();
///
/// assert_eq!(result.ordinary_date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
/// assert_eq!(result.maximum_date, NaiveDate::from_ymd_opt(2022, 7, 1).unwrap());
/// ```
pub fn calculate_prescription(
    input: &CaseInput,
    config: &RegimeConfig,
) -> EngineResult<CalculationResult> {
    let ordinary = compute_ordinary_term(input, config, 1);
    let next_step = ordinary.audit_steps.len() as u32 + 1;

    let suspensions = aggregate_suspensions(input, config, next_step);
    let next_step = next_step + suspensions.audit_steps.len() as u32;

    let anchor = ordinary_anchor(input);
    let mut warnings = Vec::new();
    if anchor.fell_back {
        warnings.push(AuditWarning {
            code: INTERRUPTION_DATE_MISSING.to_string(),
            message: format!(
                "Interruzione senza data: termine ordinario decorrente dalla data del reato ({})",
                format_date(input.commission_date)
            ),
            severity: "medium".to_string(),
        });
    }

    let dates = resolve_dates(
        ordinary.term,
        input.cap_tier,
        anchor.date,
        input.commission_date,
        suspensions.total_days,
    )?;

    let mut steps = ordinary.audit_steps;
    steps.extend(suspensions.audit_steps);
    steps.push(maximum_term_step(
        ordinary.term,
        input.cap_tier,
        dates.maximum_term,
        next_step,
    ));

    debug!(
        base_months = ordinary.base_term.months(),
        ordinary_months = ordinary.term.months(),
        maximum_months = dates.maximum_term.months(),
        suspension_days = suspensions.total_days,
        ordinary_date = %dates.ordinary_date,
        maximum_date = %dates.maximum_date,
        "Prescription calculated"
    );

    Ok(CalculationResult {
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        ordinary_term_months: ordinary.term.months(),
        maximum_term_months: dates.maximum_term.months(),
        ordinary_date: dates.ordinary_date,
        ordinary_anchor_date: anchor.date,
        maximum_date: dates.maximum_date,
        maximum_anchor_date: input.commission_date,
        total_suspension_days: suspensions.total_days,
        audit_trace: AuditTrace { steps, warnings },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{AuditKind, CapTier, ManualSuspension, OffenseCategory};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario_a() -> CaseInput {
        CaseInput::new(6, 0, date(2015, 1, 1))
    }

    fn calculate(input: &CaseInput) -> CalculationResult {
        calculate_prescription(input, &RegimeConfig::default()).unwrap()
    }

    #[test]
    fn test_scenario_a_no_modifiers() {
        let result = calculate(&scenario_a());

        assert_eq!(result.ordinary_term_months, 72);
        assert_eq!(result.ordinary_date, date(2021, 1, 1));
        assert_eq!(result.ordinary_anchor_date, date(2015, 1, 1));
        assert_eq!(result.maximum_term_months, 90);
        assert_eq!(result.maximum_date, date(2022, 7, 1));
        assert_eq!(result.maximum_anchor_date, date(2015, 1, 1));
        assert_eq!(result.total_suspension_days, 0);
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_scenario_b_covid_shifts_both_dates_by_64_days() {
        let baseline = calculate(&scenario_a());
        let mut input = scenario_a();
        input.covid_suspension = true;

        let result = calculate(&input);

        assert_eq!(result.total_suspension_days, 64);
        assert_eq!((result.ordinary_date - baseline.ordinary_date).num_days(), 64);
        assert_eq!((result.maximum_date - baseline.maximum_date).num_days(), 64);
        assert_eq!(result.ordinary_date, date(2021, 3, 6));
    }

    #[test]
    fn test_scenario_c_orlando_applies_automatically() {
        let input = CaseInput::new(6, 0, date(2018, 6, 1));
        let result = calculate(&input);

        assert_eq!(result.total_suspension_days, 548);
        // 2024-06-01 + 548 days
        assert_eq!(result.ordinary_date, date(2025, 12, 1));
        // 2025-12-01 + 548 days
        assert_eq!(result.maximum_date, date(2027, 6, 2));
        assert!(result.step(AuditKind::OrlandoSuspension).is_some());
    }

    #[test]
    fn test_scenario_d_attempt_reduction_then_floor() {
        let mut input = scenario_a();
        input.attempted = true;

        let result = calculate(&input);

        let attempt = result.step(AuditKind::AttemptReduction).unwrap();
        assert_eq!(attempt.output["delta_months"], -24);
        assert_eq!(attempt.output["term_months"], 48);

        let floor = result.step(AuditKind::StatutoryMinimum).unwrap();
        assert_eq!(floor.output["applied"], true);

        assert_eq!(result.ordinary_term_months, 72);
        assert_eq!(result.ordinary_date, date(2021, 1, 1));
    }

    #[test]
    fn test_audit_order_ends_with_maximum_term() {
        let mut input = scenario_a();
        input.covid_suspension = true;
        input.manual_suspensions =
            vec![ManualSuspension::between(date(2016, 1, 1), date(2016, 1, 5))];

        let result = calculate(&input);
        let kinds: Vec<AuditKind> = result.audit_trace.steps.iter().map(|s| s.kind).collect();

        assert_eq!(
            kinds,
            vec![
                AuditKind::BaseTerm,
                AuditKind::SpecialAggravation,
                AuditKind::AggravationConcurrence,
                AuditKind::AttemptReduction,
                AuditKind::StatutoryMinimum,
                AuditKind::Doubling,
                AuditKind::ManualSuspension,
                AuditKind::CovidSuspension,
                AuditKind::SuspensionTotal,
                AuditKind::MaximumTerm,
            ]
        );
        let numbers: Vec<u32> = result.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_interruption_moves_only_ordinary_date() {
        let mut input = scenario_a();
        input.interrupted = true;
        input.interruption_date = Some(date(2019, 3, 1));

        let result = calculate(&input);

        assert_eq!(result.ordinary_anchor_date, date(2019, 3, 1));
        assert_eq!(result.ordinary_date, date(2025, 3, 1));
        assert_eq!(result.maximum_anchor_date, date(2015, 1, 1));
        assert_eq!(result.maximum_date, date(2022, 7, 1));
    }

    #[test]
    fn test_missing_interruption_date_falls_back_with_warning() {
        let mut input = scenario_a();
        input.interrupted = true;

        let result = calculate(&input);

        assert_eq!(result.ordinary_anchor_date, date(2015, 1, 1));
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, INTERRUPTION_DATE_MISSING);
    }

    #[test]
    fn test_recidivism_tier_affects_both_terms() {
        let mut input = scenario_a();
        input.cap_tier = CapTier::RecidivismTwoThirds;

        let result = calculate(&input);

        // 72 + 48 = 120, maximum 120 * 5/3 = 200
        assert_eq!(result.ordinary_term_months, 120);
        assert_eq!(result.maximum_term_months, 200);
        assert_eq!(result.ordinary_date, date(2025, 1, 1));
        assert_eq!(result.maximum_date, date(2031, 9, 1));
    }

    #[test]
    fn test_contravvenzione_doubled() {
        let mut input = CaseInput::new(1, 0, date(2015, 1, 1));
        input.category = OffenseCategory::Contravvenzione;
        input.doubled = true;

        let result = calculate(&input);

        // 12 -> floor 48 -> x2 = 96, maximum 120
        assert_eq!(result.ordinary_term_months, 96);
        assert_eq!(result.maximum_term_months, 120);
    }

    #[test]
    fn test_overflowing_suspension_total_is_out_of_range() {
        let mut input = scenario_a();
        input.manual_suspensions =
            vec![ManualSuspension::between(date(1, 1, 1), date(9999, 12, 31)); 1177];

        let result = calculate_prescription(&input, &RegimeConfig::default());

        match result {
            Err(EngineError::DateOutOfRange { days, .. }) => assert_eq!(days, u32::MAX),
            other => panic!("Expected DateOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let mut input = scenario_a();
        input.covid_suspension = true;
        input.attempted = true;

        assert_eq!(calculate(&input), calculate(&input));
    }
}
