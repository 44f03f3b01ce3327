//! Suspension aggregation.
//!
//! Sums manual suspension rows and the automatic suspensions into a single
//! day count that both prescription dates are extended by.
//!
//! ## Sources
//!
//! - Manual rows: `(end - start) + 1` days each. Rows with a missing endpoint
//!   or `end < start` are skipped without error and without a log entry.
//! - COVID-19: a fixed day count when the case flag is set.
//! - Orlando reform: a fixed day count when the commission date falls in the
//!   configured window. Not user-togglable.
//!
//! Day counts saturate at `u32::MAX`. A saturated total lies far beyond the
//! calendar, so date resolution reports it as `DateOutOfRange`.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::RegimeConfig;
use crate::models::{AuditKind, AuditStep, CaseInput, SuspensionPeriod, SuspensionSource};

use super::formatting::{describe_days, format_date};

/// A suspension that counted towards the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountedSuspension {
    /// Where the suspension comes from.
    pub source: SuspensionSource,
    /// The date range, for manual suspensions.
    pub period: Option<SuspensionPeriod>,
    /// The days added.
    pub days: u32,
}

/// The result of suspension aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionAggregate {
    /// All suspension days.
    pub total_days: u32,
    /// Days from manual rows.
    pub manual_days: u32,
    /// Days from automatic suspensions.
    pub automatic_days: u32,
    /// Every suspension that counted, manual rows first.
    pub counted: Vec<CountedSuspension>,
    /// Audit steps, ending with the total.
    pub audit_steps: Vec<AuditStep>,
}

/// Aggregates manual and automatic suspensions for a case.
///
/// # Example
///
/// ```
/// use prescrizione_engine::calculation::aggregate_suspensions;
/// use prescrizione_engine::config::RegimeConfig;
/// use prescrizione_engine::models::{CaseInput, ManualSuspension};
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let mut input = CaseInput::new(6, 0, date(2015, 1, 1));
/// input.covid_suspension = true;
/// input.manual_suspensions = vec![
///     ManualSuspension::between(date(2016, 3, 1), date(2016, 3, 10)),
///     ManualSuspension { start: Some(date(2016, 5, 1)), end: None },
/// ];
///
/// let result = aggregate_suspensions(&input, &RegimeConfig::default(), 1);
/// assert_eq!(result.manual_days, 10);
/// assert_eq!(result.total_days, 74);
/// ```
pub fn aggregate_suspensions(
    input: &CaseInput,
    config: &RegimeConfig,
    step_number_start: u32,
) -> SuspensionAggregate {
    let mut step_number = step_number_start;
    let mut counted = Vec::new();
    let mut audit_steps = Vec::new();

    for period in input.manual_suspensions.iter().filter_map(|row| row.to_period()) {
        let days = period.days();
        audit_steps.push(AuditStep {
            step_number,
            kind: AuditKind::ManualSuspension,
            rule_id: AuditKind::ManualSuspension.as_str().to_string(),
            rule_name: "Sospensione manuale".to_string(),
            clause_ref: "art. 159 c.1 c.p.".to_string(),
            input: json!({
                "start": period.start(),
                "end": period.end()
            }),
            output: json!({ "days": days }),
            reasoning: format!(
                "Sosp. manuale {} - {}: {}",
                format_date(period.start()),
                format_date(period.end()),
                describe_days(days)
            ),
        });
        step_number += 1;
        counted.push(CountedSuspension {
            source: SuspensionSource::Manual,
            period: Some(period),
            days,
        });
    }
    let manual_count = counted.len();
    let manual_days = saturating_total(&counted);

    let covid = &config.suspensions().covid;
    if input.covid_suspension {
        audit_steps.push(AuditStep {
            step_number,
            kind: AuditKind::CovidSuspension,
            rule_id: AuditKind::CovidSuspension.as_str().to_string(),
            rule_name: "Sospensione COVID-19".to_string(),
            clause_ref: covid.clause.clone(),
            input: json!({ "covid_suspension": true }),
            output: json!({ "days": covid.days }),
            reasoning: format!("Sospensione COVID: +{}", describe_days(covid.days)),
        });
        step_number += 1;
        counted.push(CountedSuspension {
            source: SuspensionSource::Covid,
            period: None,
            days: covid.days,
        });
    }

    let orlando = &config.suspensions().orlando;
    if orlando.covers(input.commission_date) {
        audit_steps.push(AuditStep {
            step_number,
            kind: AuditKind::OrlandoSuspension,
            rule_id: AuditKind::OrlandoSuspension.as_str().to_string(),
            rule_name: "Sospensione riforma Orlando".to_string(),
            clause_ref: orlando.clause.clone(),
            input: json!({
                "commission_date": input.commission_date,
                "window_start": orlando.start_date,
                "window_end": orlando.end_date
            }),
            output: json!({ "days": orlando.days }),
            reasoning: format!(
                "Sospensione Orlando (L. 103/2017), reato commesso tra il {} e il {}: +{}",
                format_date(orlando.start_date),
                format_date(orlando.end_date),
                describe_days(orlando.days)
            ),
        });
        step_number += 1;
        counted.push(CountedSuspension {
            source: SuspensionSource::Orlando,
            period: None,
            days: orlando.days,
        });
    }

    let automatic_days = saturating_total(&counted[manual_count..]);
    let total_days = manual_days.saturating_add(automatic_days);

    audit_steps.push(AuditStep {
        step_number,
        kind: AuditKind::SuspensionTotal,
        rule_id: AuditKind::SuspensionTotal.as_str().to_string(),
        rule_name: "Totale sospensioni".to_string(),
        clause_ref: "art. 159 c.p.".to_string(),
        input: json!({
            "manual_days": manual_days,
            "automatic_days": automatic_days
        }),
        output: json!({ "total_days": total_days }),
        reasoning: format!("TOTALE SOSPENSIONI: {}", describe_days(total_days)),
    });

    SuspensionAggregate {
        total_days,
        manual_days,
        automatic_days,
        counted,
        audit_steps,
    }
}

fn saturating_total(suspensions: &[CountedSuspension]) -> u32 {
    suspensions
        .iter()
        .fold(0u32, |total, suspension| total.saturating_add(suspension.days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ManualSuspension;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_input(commission_date: NaiveDate) -> CaseInput {
        CaseInput::new(6, 0, commission_date)
    }

    #[test]
    fn test_no_suspensions_logs_only_total() {
        let input = create_input(date(2015, 1, 1));
        let result = aggregate_suspensions(&input, &RegimeConfig::default(), 1);

        assert_eq!(result.total_days, 0);
        assert_eq!(result.audit_steps.len(), 1);
        assert_eq!(result.audit_steps[0].kind, AuditKind::SuspensionTotal);
        assert_eq!(result.audit_steps[0].reasoning, "TOTALE SOSPENSIONI: 0 giorni");
    }

    #[test]
    fn test_covid_adds_fixed_days() {
        let mut input = create_input(date(2015, 1, 1));
        input.covid_suspension = true;

        let result = aggregate_suspensions(&input, &RegimeConfig::default(), 1);

        assert_eq!(result.total_days, 64);
        assert_eq!(result.automatic_days, 64);
        assert_eq!(result.audit_steps[0].kind, AuditKind::CovidSuspension);
        assert_eq!(result.audit_steps[0].reasoning, "Sospensione COVID: +64 giorni");
    }

    #[test]
    fn test_orlando_applies_inside_window() {
        let input = create_input(date(2018, 6, 1));
        let result = aggregate_suspensions(&input, &RegimeConfig::default(), 1);

        assert_eq!(result.total_days, 548);
        assert_eq!(result.counted[0].source, SuspensionSource::Orlando);
        assert_eq!(result.audit_steps[0].kind, AuditKind::OrlandoSuspension);
    }

    #[test]
    fn test_orlando_window_edges() {
        let config = RegimeConfig::default();
        let total_for = |commission| {
            aggregate_suspensions(&create_input(commission), &config, 1).total_days
        };

        assert_eq!(total_for(date(2017, 8, 3)), 548);
        assert_eq!(total_for(date(2019, 12, 31)), 548);
        assert_eq!(total_for(date(2017, 8, 2)), 0);
        assert_eq!(total_for(date(2020, 1, 1)), 0);
    }

    #[test]
    fn test_single_day_manual_period_counts_one() {
        let mut input = create_input(date(2015, 1, 1));
        input.manual_suspensions =
            vec![ManualSuspension::between(date(2016, 4, 4), date(2016, 4, 4))];

        let result = aggregate_suspensions(&input, &RegimeConfig::default(), 1);

        assert_eq!(result.total_days, 1);
        assert_eq!(
            result.audit_steps[0].reasoning,
            "Sosp. manuale 04/04/2016 - 04/04/2016: 1 giorno"
        );
    }

    #[test]
    fn test_reversed_manual_period_is_excluded_from_log() {
        let mut input = create_input(date(2015, 1, 1));
        input.manual_suspensions =
            vec![ManualSuspension::between(date(2016, 4, 5), date(2016, 4, 4))];

        let result = aggregate_suspensions(&input, &RegimeConfig::default(), 1);

        assert_eq!(result.total_days, 0);
        assert!(result.counted.is_empty());
        assert!(
            result
                .audit_steps
                .iter()
                .all(|step| step.kind != AuditKind::ManualSuspension)
        );
    }

    #[test]
    fn test_incomplete_rows_are_skipped() {
        let mut input = create_input(date(2015, 1, 1));
        input.manual_suspensions = vec![
            ManualSuspension::default(),
            ManualSuspension {
                start: Some(date(2016, 1, 1)),
                end: None,
            },
            ManualSuspension::between(date(2016, 2, 1), date(2016, 2, 29)),
        ];

        let result = aggregate_suspensions(&input, &RegimeConfig::default(), 1);

        assert_eq!(result.manual_days, 29);
        assert_eq!(result.counted.len(), 1);
    }

    #[test]
    fn test_all_sources_combine() {
        let mut input = create_input(date(2018, 6, 1));
        input.covid_suspension = true;
        input.manual_suspensions =
            vec![ManualSuspension::between(date(2019, 1, 1), date(2019, 1, 10))];

        let result = aggregate_suspensions(&input, &RegimeConfig::default(), 7);

        assert_eq!(result.manual_days, 10);
        assert_eq!(result.automatic_days, 612);
        assert_eq!(result.total_days, 622);

        let kinds: Vec<AuditKind> = result.audit_steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AuditKind::ManualSuspension,
                AuditKind::CovidSuspension,
                AuditKind::OrlandoSuspension,
                AuditKind::SuspensionTotal,
            ]
        );
        assert_eq!(result.audit_steps[0].step_number, 7);
        assert_eq!(result.audit_steps[3].step_number, 10);
        assert_eq!(result.audit_steps[3].output["total_days"], 622);
    }

    fn full_calendar_rows(count: usize) -> Vec<ManualSuspension> {
        // 3,652,059 days each
        vec![ManualSuspension::between(date(1, 1, 1), date(9999, 12, 31)); count]
    }

    #[test]
    fn test_day_total_saturates_instead_of_wrapping() {
        let mut input = create_input(date(2018, 6, 1));
        input.covid_suspension = true;
        input.manual_suspensions = full_calendar_rows(1177);

        let result = aggregate_suspensions(&input, &RegimeConfig::default(), 1);

        assert_eq!(result.manual_days, u32::MAX);
        assert_eq!(result.automatic_days, 64 + 548);
        assert_eq!(result.total_days, u32::MAX);
    }

    #[test]
    fn test_large_total_below_limit_is_exact() {
        let mut input = create_input(date(2015, 1, 1));
        input.manual_suspensions = full_calendar_rows(1176);

        let result = aggregate_suspensions(&input, &RegimeConfig::default(), 1);

        assert_eq!(result.total_days, 1176 * 3_652_059);
    }

    #[test]
    fn test_total_is_independent_of_row_order() {
        let rows = vec![
            ManualSuspension::between(date(2016, 1, 1), date(2016, 1, 31)),
            ManualSuspension::between(date(2017, 3, 3), date(2017, 3, 3)),
            ManualSuspension::between(date(2016, 9, 10), date(2016, 9, 1)),
        ];
        let mut forward = create_input(date(2015, 1, 1));
        forward.manual_suspensions = rows.clone();
        let mut backward = create_input(date(2015, 1, 1));
        backward.manual_suspensions = rows.into_iter().rev().collect();

        let config = RegimeConfig::default();
        assert_eq!(
            aggregate_suspensions(&forward, &config, 1).total_days,
            aggregate_suspensions(&backward, &config, 1).total_days
        );
    }
}
