//! Configuration types for the prescription regime.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. [`RegimeConfig::default`]
//! carries the statutory values, so the engine runs without any files.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{OffenseCategory, PenaltyTerm};

/// Metadata about the regime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegimeMetadata {
    /// Short identifier of the regime (e.g., "CP-157").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// The version or effective date of the regime.
    pub version: String,
    /// URL to the official text.
    pub source_url: String,
}

/// Statutory minimum terms by offense category, from minimums.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatutoryMinimums {
    /// Reference to the provision setting the minimums.
    pub clause: String,
    /// Minimum years for a delitto.
    pub delitto_years: u32,
    /// Minimum years for a contravvenzione.
    pub contravvenzione_years: u32,
}

impl StatutoryMinimums {
    /// Returns the minimum years for a category.
    pub fn years_for(&self, category: OffenseCategory) -> u32 {
        match category {
            OffenseCategory::Delitto => self.delitto_years,
            OffenseCategory::Contravvenzione => self.contravvenzione_years,
        }
    }

    /// Returns the minimum term for a category.
    pub fn term_for(&self, category: OffenseCategory) -> PenaltyTerm {
        PenaltyTerm::from_years_months(self.years_for(category), 0)
    }
}

/// The fixed, flag-driven COVID-19 suspension.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CovidSuspensionConfig {
    /// Reference to the provision.
    pub clause: String,
    /// Days added when the flag is set.
    pub days: u32,
}

/// The automatic suspension of the Orlando reform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrlandoSuspensionConfig {
    /// Reference to the provision.
    pub clause: String,
    /// First commission date covered by the regime.
    pub start_date: NaiveDate,
    /// Last commission date covered by the regime.
    pub end_date: NaiveDate,
    /// Days added when the commission date falls in the window.
    pub days: u32,
}

impl OrlandoSuspensionConfig {
    /// Returns true if `commission_date` falls inside the window, both ends included.
    pub fn covers(&self, commission_date: NaiveDate) -> bool {
        self.start_date <= commission_date && commission_date <= self.end_date
    }
}

/// Suspension configuration from suspensions.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuspensionConfig {
    /// The COVID-19 suspension.
    pub covid: CovidSuspensionConfig,
    /// The Orlando reform suspension.
    pub orlando: OrlandoSuspensionConfig,
}

/// Complete regime configuration combining all configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegimeConfig {
    metadata: RegimeMetadata,
    minimums: StatutoryMinimums,
    suspensions: SuspensionConfig,
}

impl RegimeConfig {
    /// Creates a new regime configuration.
    pub fn new(
        metadata: RegimeMetadata,
        minimums: StatutoryMinimums,
        suspensions: SuspensionConfig,
    ) -> Self {
        Self {
            metadata,
            minimums,
            suspensions,
        }
    }

    /// Returns the regime metadata.
    pub fn metadata(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns the statutory minimums.
    pub fn minimums(&self) -> &StatutoryMinimums {
        &self.minimums
    }

    /// Returns the suspension configuration.
    pub fn suspensions(&self) -> &SuspensionConfig {
        &self.suspensions
    }
}

const CODICE_PENALE_URL: &str =
    "https://www.normattiva.it/uri-res/N2Ls?urn:nir:stato:regio.decreto:1930-10-19;1398";

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            metadata: RegimeMetadata {
                code: "CP-157".to_string(),
                name: "Prescrizione del reato (artt. 157-161 c.p.)".to_string(),
                version: "2017-08-03".to_string(),
                source_url: CODICE_PENALE_URL.to_string(),
            },
            minimums: StatutoryMinimums {
                clause: "art. 157 c.1 c.p.".to_string(),
                delitto_years: 6,
                contravvenzione_years: 4,
            },
            suspensions: SuspensionConfig {
                covid: CovidSuspensionConfig {
                    clause: "art. 83 c.4 D.L. 18/2020".to_string(),
                    days: 64,
                },
                orlando: OrlandoSuspensionConfig {
                    clause: "art. 159 c.2 c.p. (L. 103/2017)".to_string(),
                    start_date: NaiveDate::from_ymd_opt(2017, 8, 3).unwrap_or_default(),
                    end_date: NaiveDate::from_ymd_opt(2019, 12, 31).unwrap_or_default(),
                    days: 548,
                },
            },
        }
    }
}
