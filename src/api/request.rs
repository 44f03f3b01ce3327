//! Request types for the prescription engine API.
//!
//! This module defines the JSON request structure for the `/calculate` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CapTier, CaseInput, ManualSuspension, OffenseCategory};

/// Request body for the `/calculate` endpoint.
///
/// Only the base penalty and the commission date are required; every flag
/// defaults to `false`, the category to `delitto` and the tier to `standard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Years of the base statutory penalty (0-30).
    pub base_years: u32,
    /// Additional months of the base statutory penalty (0-11).
    #[serde(default)]
    pub base_months: u32,
    /// The date the offense was committed.
    pub commission_date: NaiveDate,
    /// Whether the running term was interrupted.
    #[serde(default)]
    pub interrupted: bool,
    /// The date of the last interruption.
    #[serde(default)]
    pub interruption_date: Option<NaiveDate>,
    /// The offense was only attempted.
    #[serde(default)]
    pub attempted: bool,
    /// The term is doubled.
    #[serde(default)]
    pub doubled: bool,
    /// Concurrence of aggravating circumstances.
    #[serde(default)]
    pub aggravation_concurrence: bool,
    /// The COVID-19 suspension applies.
    #[serde(default)]
    pub covid_suspension: bool,
    /// The offense category.
    #[serde(default)]
    pub category: OffenseCategory,
    /// The cap-increase tier.
    #[serde(default)]
    pub cap_tier: CapTier,
    /// Manual suspension rows; incomplete rows are accepted and skipped.
    #[serde(default)]
    pub manual_suspensions: Vec<SuspensionRequest>,
}

/// A manual suspension row in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspensionRequest {
    /// First suspended day.
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Last suspended day.
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl From<SuspensionRequest> for ManualSuspension {
    fn from(req: SuspensionRequest) -> Self {
        ManualSuspension {
            start: req.start,
            end: req.end,
        }
    }
}

impl From<CalculationRequest> for CaseInput {
    fn from(req: CalculationRequest) -> Self {
        CaseInput {
            base_years: req.base_years,
            base_months: req.base_months,
            commission_date: req.commission_date,
            interrupted: req.interrupted,
            interruption_date: req.interruption_date,
            attempted: req.attempted,
            doubled: req.doubled,
            aggravation_concurrence: req.aggravation_concurrence,
            covid_suspension: req.covid_suspension,
            category: req.category,
            cap_tier: req.cap_tier,
            manual_suspensions: req.manual_suspensions.into_iter().map(Into::into).collect(),
        }
    }
}
