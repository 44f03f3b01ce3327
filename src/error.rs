//! Error types for the prescription engine.
//!
//! The computation itself degrades permissively (incomplete suspension rows
//! are skipped, short terms are floored), so these errors only cover
//! configuration loading, input validation at the boundary and calendar
//! overflow.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the prescription engine.
///
/// # Example
///
/// ```
/// use prescrizione_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/regime.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/regime.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or is inconsistent.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A case input field is outside its accepted range.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Adding a term to an anchor date left the supported calendar range.
    #[error("Date out of range: {anchor} + {months} months + {days} days")]
    DateOutOfRange {
        /// The anchor date the offsets were applied to.
        anchor: NaiveDate,
        /// The month offset.
        months: u32,
        /// The day offset.
        days: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/regime.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/regime.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/suspensions.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/suspensions.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "base_months".to_string(),
            message: "must be between 0 and 11".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input field 'base_months': must be between 0 and 11"
        );
    }

    #[test]
    fn test_date_out_of_range_displays_offsets() {
        let error = EngineError::DateOutOfRange {
            anchor: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            months: 72,
            days: 64,
        };
        assert_eq!(
            error.to_string(),
            "Date out of range: 2015-01-01 + 72 months + 64 days"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_input() -> EngineResult<()> {
            Err(EngineError::InvalidInput {
                field: "base_years".to_string(),
                message: "too large".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_input()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
