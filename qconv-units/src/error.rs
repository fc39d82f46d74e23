//! Errors reported by the unit registry

use qconv_core::{ConvertError, Dimension, NumberError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnitError {
    #[error("unknown unit: {0}")]
    Undefined(String),

    #[error("invalid exponent in '{0}'")]
    InvalidExponent(String),

    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    #[error("line {line}: {reason}")]
    InvalidDefinition { line: usize, reason: String },

    #[error("line {line}: unknown unit: {name}")]
    UndefinedReference { line: usize, name: String },

    #[error("numeric error: {0}")]
    Number(#[from] NumberError),

    #[error("cannot read definitions from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UnitError {
    /// True when the expression simply did not name a known unit.
    pub fn is_undefined(&self) -> bool {
        matches!(self, UnitError::Undefined(_) | UnitError::InvalidExponent(_))
    }
}

impl From<UnitError> for ConvertError {
    fn from(err: UnitError) -> Self {
        match err {
            UnitError::Undefined(name) | UnitError::InvalidExponent(name) => {
                ConvertError::UndefinedUnit(name)
            }
            UnitError::IncompatibleDimensions { from, to, from_dim, to_dim } => {
                ConvertError::IncompatibleDimensions { from, to, from_dim, to_dim }
            }
            UnitError::UndefinedReference { name, .. } => ConvertError::UndefinedUnit(name),
            UnitError::Number(e) => ConvertError::Numeric(e),
            other @ (UnitError::InvalidDefinition { .. } | UnitError::Io { .. }) => {
                ConvertError::InvalidDefinitions(other.to_string())
            }
        }
    }
}
