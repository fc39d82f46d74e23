//! qconv core - shared types
//!
//! - `Number`: exact decimal factors backed by dashu
//! - `Dimension`: SI exponent vectors for compatibility checks
//! - `ConvertError`: the error taxonomy every layer reports through

mod dimension;
mod error;
mod number;

pub use dimension::Dimension;
pub use error::{codes, ConvertError, ErrorReport, Severity, USAGE_HINT};
pub use number::{Number, NumberError};
