//! Case input model for a prescription calculation.
//!
//! This module contains the [`CaseInput`] snapshot together with the two
//! fixed legal selections it carries: the [`CapTier`] (art. 161 c.p.) and the
//! [`OffenseCategory`] (art. 157 c.1 c.p.).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Fraction, ManualSuspension, PenaltyTerm};

/// The highest number of base years accepted at the input boundary.
pub const MAX_BASE_YEARS: u32 = 30;

/// The highest number of base months accepted at the input boundary.
pub const MAX_BASE_MONTHS: u32 = 11;

/// The cap-increase tier selected for the case.
///
/// The tier drives two separate steps: an increase applied to the base term
/// for special-effect aggravations (none for the standard tier) and the
/// multiplier that turns the ordinary term into the maximum term.
///
/// # Example
///
/// ```
/// use prescrizione_engine::models::{CapTier, Fraction};
///
/// assert_eq!(CapTier::Standard.base_increase(), None);
/// assert_eq!(CapTier::Standard.cap_multiplier(), Fraction::new(5, 4));
/// assert_eq!(CapTier::RecidivismTwoThirds.base_increase(), Some(Fraction::TWO_THIRDS));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapTier {
    /// Standard cap, +1/4.
    #[default]
    Standard,
    /// Recidivism under art. 99 c. 2, 4, 5, +1/2.
    RecidivismHalf,
    /// Recidivism under art. 99 c. 6, +2/3.
    RecidivismTwoThirds,
    /// Habitual offender, double.
    Habitual,
}

impl CapTier {
    /// Returns the increase applied to the base term, if any.
    pub fn base_increase(&self) -> Option<Fraction> {
        match self {
            CapTier::Standard => None,
            CapTier::RecidivismHalf => Some(Fraction::ONE_HALF),
            CapTier::RecidivismTwoThirds => Some(Fraction::TWO_THIRDS),
            CapTier::Habitual => Some(Fraction::ONE),
        }
    }

    /// Returns the multiplier turning the ordinary term into the maximum term.
    pub fn cap_multiplier(&self) -> Fraction {
        match self {
            CapTier::Standard => Fraction::new(5, 4),
            CapTier::RecidivismHalf => Fraction::new(3, 2),
            CapTier::RecidivismTwoThirds => Fraction::new(5, 3),
            CapTier::Habitual => Fraction::new(2, 1),
        }
    }

    /// Returns the human-readable label of the tier.
    pub fn label(&self) -> &'static str {
        match self {
            CapTier::Standard => "Standard (+1/4)",
            CapTier::RecidivismHalf => "Recidiva art. 99 c. 2, 4, 5 (+1/2)",
            CapTier::RecidivismTwoThirds => "Recidiva art. 99 c. 6 (+2/3)",
            CapTier::Habitual => "Abitualità (doppio)",
        }
    }

    /// Returns the snake_case identifier used in requests and audit operands.
    pub fn as_str(&self) -> &'static str {
        match self {
            CapTier::Standard => "standard",
            CapTier::RecidivismHalf => "recidivism_half",
            CapTier::RecidivismTwoThirds => "recidivism_two_thirds",
            CapTier::Habitual => "habitual",
        }
    }
}

/// The offense category, which selects the statutory minimum term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffenseCategory {
    /// Crime (delitto), minimum six years.
    #[default]
    Delitto,
    /// Misdemeanour (contravvenzione), minimum four years.
    Contravvenzione,
}

impl OffenseCategory {
    /// Returns the snake_case identifier used in requests and audit operands.
    pub fn as_str(&self) -> &'static str {
        match self {
            OffenseCategory::Delitto => "delitto",
            OffenseCategory::Contravvenzione => "contravvenzione",
        }
    }
}

/// An immutable snapshot of everything a calculation needs.
///
/// # Example
///
/// ```
/// use prescrizione_engine::models::CaseInput;
/// use chrono::NaiveDate;
///
/// let input = CaseInput::new(6, 0, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
/// assert_eq!(input.base_term().months(), 72);
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInput {
    /// Years of the base statutory penalty.
    pub base_years: u32,
    /// Additional months of the base statutory penalty.
    pub base_months: u32,
    /// The date the offense was committed.
    pub commission_date: NaiveDate,
    /// Whether the running term was interrupted.
    pub interrupted: bool,
    /// The date of the last interruption, if known.
    pub interruption_date: Option<NaiveDate>,
    /// The offense was only attempted (art. 56 c.p.).
    pub attempted: bool,
    /// The term is doubled for the offense category.
    pub doubled: bool,
    /// Concurrence of aggravating circumstances.
    pub aggravation_concurrence: bool,
    /// The fixed COVID-19 suspension applies.
    pub covid_suspension: bool,
    /// The offense category selecting the statutory minimum.
    pub category: OffenseCategory,
    /// The cap-increase tier.
    pub cap_tier: CapTier,
    /// Manually entered suspension rows, possibly incomplete.
    pub manual_suspensions: Vec<ManualSuspension>,
}

impl CaseInput {
    /// Creates an input with no modifiers, no interruption and no suspensions.
    pub fn new(base_years: u32, base_months: u32, commission_date: NaiveDate) -> Self {
        Self {
            base_years,
            base_months,
            commission_date,
            interrupted: false,
            interruption_date: None,
            attempted: false,
            doubled: false,
            aggravation_concurrence: false,
            covid_suspension: false,
            category: OffenseCategory::default(),
            cap_tier: CapTier::default(),
            manual_suspensions: Vec::new(),
        }
    }

    /// Returns the base statutory penalty as a term.
    pub fn base_term(&self) -> PenaltyTerm {
        PenaltyTerm::from_years_months(self.base_years, self.base_months)
    }

    /// Checks the numeric bounds accepted at the input boundary.
    ///
    /// The engine assumes validated input and does not call this itself.
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_years > MAX_BASE_YEARS {
            return Err(EngineError::InvalidInput {
                field: "base_years".to_string(),
                message: format!("must be between 0 and {}", MAX_BASE_YEARS),
            });
        }
        if self.base_months > MAX_BASE_MONTHS {
            return Err(EngineError::InvalidInput {
                field: "base_months".to_string(),
                message: format!("must be between 0 and {}", MAX_BASE_MONTHS),
            });
        }
        Ok(())
    }
}
