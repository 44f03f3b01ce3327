//! Conversion of terms into calendar dates.
//!
//! Whole months are added first with calendar semantics (the day of month is
//! kept, clamped to the last day of shorter months), then all day offsets.
//! The ordinary term runs from the ordinary anchor; the maximum term always
//! runs from the commission date.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditKind, AuditStep, CapTier, CaseInput, PenaltyTerm};

use super::formatting::describe_months;

/// The anchor the ordinary term runs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinaryAnchor {
    /// The anchor date.
    pub date: NaiveDate,
    /// True when an interruption was flagged without a date and the
    /// commission date was used instead.
    pub fell_back: bool,
}

/// The dates produced by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDates {
    /// The ordinary prescription date.
    pub ordinary_date: NaiveDate,
    /// The maximum term.
    pub maximum_term: PenaltyTerm,
    /// The maximum prescription date.
    pub maximum_date: NaiveDate,
}

/// Selects the anchor of the ordinary term.
///
/// The interruption date is used when an interruption is flagged and a date
/// is present; otherwise the commission date.
pub fn ordinary_anchor(input: &CaseInput) -> OrdinaryAnchor {
    match (input.interrupted, input.interruption_date) {
        (true, Some(date)) => OrdinaryAnchor {
            date,
            fell_back: false,
        },
        (true, None) => OrdinaryAnchor {
            date: input.commission_date,
            fell_back: true,
        },
        (false, _) => OrdinaryAnchor {
            date: input.commission_date,
            fell_back: false,
        },
    }
}

/// Returns the maximum term, the ordinary term times the tier's cap, rounded up.
///
/// # Example
///
/// ```
/// use prescrizione_engine::calculation::maximum_term;
/// use prescrizione_engine::models::{CapTier, PenaltyTerm};
///
/// let ordinary = PenaltyTerm::from_months(72);
/// assert_eq!(maximum_term(ordinary, CapTier::Standard).months(), 90);
/// assert_eq!(maximum_term(ordinary, CapTier::RecidivismTwoThirds).months(), 120);
/// ```
pub fn maximum_term(ordinary: PenaltyTerm, cap_tier: CapTier) -> PenaltyTerm {
    ordinary.scaled_by(cap_tier.cap_multiplier())
}

/// Adds whole months, then days, to `anchor`.
///
/// # Example
///
/// ```
/// use prescrizione_engine::calculation::add_months_then_days;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2019, 8, 31).unwrap();
/// // 31 August + 6 months clamps to 29 February, then + 1 day
/// let date = add_months_then_days(anchor, 6, 1).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
/// ```
pub fn add_months_then_days(anchor: NaiveDate, months: u32, days: u32) -> EngineResult<NaiveDate> {
    anchor
        .checked_add_months(Months::new(months))
        .and_then(|date| date.checked_add_days(Days::new(u64::from(days))))
        .ok_or(EngineError::DateOutOfRange {
            anchor,
            months,
            days,
        })
}

/// Resolves the ordinary and maximum prescription dates.
///
/// # Arguments
///
/// * `ordinary_term` - The ordinary term from the rule pipeline
/// * `cap_tier` - The tier selecting the cap multiplier
/// * `anchor_ordinary` - The date the ordinary term runs from
/// * `anchor_maximum` - The date the maximum term runs from (the commission date)
/// * `suspension_days` - Days added to both dates after the months
pub fn resolve_dates(
    ordinary_term: PenaltyTerm,
    cap_tier: CapTier,
    anchor_ordinary: NaiveDate,
    anchor_maximum: NaiveDate,
    suspension_days: u32,
) -> EngineResult<ResolvedDates> {
    let maximum_term = maximum_term(ordinary_term, cap_tier);

    let ordinary_date =
        add_months_then_days(anchor_ordinary, ordinary_term.months(), suspension_days)?;
    let maximum_date =
        add_months_then_days(anchor_maximum, maximum_term.months(), suspension_days)?;

    Ok(ResolvedDates {
        ordinary_date,
        maximum_term,
        maximum_date,
    })
}

/// Builds the audit step for the maximum term derivation.
pub fn maximum_term_step(
    ordinary_term: PenaltyTerm,
    cap_tier: CapTier,
    maximum_term: PenaltyTerm,
    step_number: u32,
) -> AuditStep {
    let multiplier = cap_tier.cap_multiplier();
    AuditStep {
        step_number,
        kind: AuditKind::MaximumTerm,
        rule_id: AuditKind::MaximumTerm.as_str().to_string(),
        rule_name: "Termine massimo".to_string(),
        clause_ref: "art. 161 c.2 c.p.".to_string(),
        input: json!({
            "ordinary_term_months": ordinary_term.months(),
            "cap_tier": cap_tier.as_str(),
            "multiplier": multiplier.to_string(),
            "exact_months": multiplier.exact_of(ordinary_term.months()).to_string()
        }),
        output: json!({ "maximum_term_months": maximum_term.months() }),
        reasoning: format!(
            "Termine massimo ({}): {} mesi × {} = {} mesi ({})",
            cap_tier.label(),
            ordinary_term.months(),
            multiplier.to_decimal(),
            maximum_term.months(),
            describe_months(maximum_term.months())
        ),
    }
}
