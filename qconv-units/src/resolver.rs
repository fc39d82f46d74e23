//! Resolver trait

use crate::{Unit, UnitError};

/// Unit lookup and conversion capability used by the conversion engine
pub trait UnitResolver: Send + Sync {
    /// Resolve a unit expression. Must fail with an error for which
    /// `UnitError::is_undefined` holds when the expression names no unit.
    fn resolve(&self, expression: &str) -> Result<Unit, UnitError>;

    /// Convert `magnitude` in `from` into `to`.
    fn convert(&self, magnitude: f64, from: &Unit, to: &Unit) -> Result<f64, UnitError>;
}
