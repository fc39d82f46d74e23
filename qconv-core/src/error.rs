//! Structured conversion errors
//!
//! Errors never crash the host. Each carries a machine-readable code and a
//! usage hint so a front end can show both without matching on variants.

use crate::{Dimension, NumberError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const NO_QUANTITY: &str = "NO_QUANTITY";
    pub const NO_UNITS: &str = "NO_UNITS";
    pub const MALFORMED_NUMBER: &str = "MALFORMED_NUMBER";
    pub const UNRESOLVED_QUERY: &str = "UNRESOLVED_QUERY";
    pub const INCOMPATIBLE_DIMENSIONS: &str = "INCOMPATIBLE_DIMENSIONS";
    pub const CONVERSION_FAILED: &str = "CONVERSION_FAILED";
    pub const UNDEFINED_UNIT: &str = "UNDEFINED_UNIT";
    pub const INVALID_DEFINITIONS: &str = "INVALID_DEFINITIONS";
    pub const NUMERIC: &str = "NUMERIC";
}

/// Example queries shown next to an error
pub const USAGE_HINT: &str = "For example: 2.5cm in  |  178lb kg  |  200m/s mph";

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The query was not understood; the user should rephrase it
    Input,
    /// The query was understood but cannot be converted
    Conversion,
    /// Something is wrong with the program or its data
    Internal,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("Start your query with a number")]
    NoQuantity,

    #[error("No units specified")]
    NoUnits,

    #[error("Invalid number: {0}")]
    MalformedNumber(String),

    #[error("Not enough units recognised in '{0}'")]
    UnresolvedQuery(String),

    #[error("Cannot convert {from} ({from_dim}) to {to} ({to_dim})")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    #[error("Conversion failed. File a bug please.")]
    ConversionFailed,

    #[error("Unknown unit : {0}")]
    UndefinedUnit(String),

    #[error("Invalid unit definitions: {0}")]
    InvalidDefinitions(String),

    #[error("Numeric error: {0}")]
    Numeric(#[from] NumberError),
}

impl ConvertError {
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::NoQuantity => codes::NO_QUANTITY,
            ConvertError::NoUnits => codes::NO_UNITS,
            ConvertError::MalformedNumber(_) => codes::MALFORMED_NUMBER,
            ConvertError::UnresolvedQuery(_) => codes::UNRESOLVED_QUERY,
            ConvertError::IncompatibleDimensions { .. } => codes::INCOMPATIBLE_DIMENSIONS,
            ConvertError::ConversionFailed => codes::CONVERSION_FAILED,
            ConvertError::UndefinedUnit(_) => codes::UNDEFINED_UNIT,
            ConvertError::InvalidDefinitions(_) => codes::INVALID_DEFINITIONS,
            ConvertError::Numeric(_) => codes::NUMERIC,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ConvertError::NoQuantity
            | ConvertError::NoUnits
            | ConvertError::MalformedNumber(_)
            | ConvertError::UnresolvedQuery(_)
            | ConvertError::UndefinedUnit(_) => Severity::Input,
            ConvertError::IncompatibleDimensions { .. } => Severity::Conversion,
            ConvertError::ConversionFailed
            | ConvertError::InvalidDefinitions(_)
            | ConvertError::Numeric(_) => Severity::Internal,
        }
    }

    /// Suggestion for fixing the query
    pub fn suggestion(&self) -> String {
        match self {
            ConvertError::IncompatibleDimensions { from_dim, .. } => match from_dim.name() {
                Some(name) => format!("Pick a target unit of {}", name),
                None => USAGE_HINT.to_string(),
            },
            ConvertError::UndefinedUnit(name) => {
                format!("Check the spelling of '{}' or define it in your custom units", name)
            }
            ConvertError::InvalidDefinitions(_) => {
                "Fix the line shown in your custom units file".to_string()
            }
            _ => USAGE_HINT.to_string(),
        }
    }
}

/// Wire shape for front ends that emit JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
    pub suggestion: String,
    pub severity: Severity,
}

impl From<&ConvertError> for ErrorReport {
    fn from(err: &ConvertError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            suggestion: err.suggestion(),
            severity: err.severity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ConvertError::NoQuantity.code(), "NO_QUANTITY");
        assert_eq!(ConvertError::UnresolvedQuery("x".into()).code(), "UNRESOLVED_QUERY");
    }

    #[test]
    fn test_incompatible_message_names_dimensions() {
        let err = ConvertError::IncompatibleDimensions {
            from: "kg".into(),
            to: "m".into(),
            from_dim: Dimension::MASS,
            to_dim: Dimension::LENGTH,
        };
        assert_eq!(err.to_string(), "Cannot convert kg (M) to m (L)");
        assert_eq!(err.suggestion(), "Pick a target unit of mass");
        assert_eq!(err.severity(), Severity::Conversion);
    }

    #[test]
    fn test_undefined_unit_keeps_name() {
        let err = ConvertError::UndefinedUnit("furlongz".into());
        assert_eq!(err.to_string(), "Unknown unit : furlongz");
        assert!(err.suggestion().contains("furlongz"));
    }

    #[test]
    fn test_report_serializes_lowercase_severity() {
        let report = ErrorReport::from(&ConvertError::NoUnits);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"severity\":\"input\""));
        assert!(json.contains("\"code\":\"NO_UNITS\""));
    }
}
