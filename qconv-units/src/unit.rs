//! Unit representation with conversion factors

use crate::UnitError;
use qconv_core::{Dimension, Number};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical unit: `value_si = value * factor + offset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Label used in results (e.g. "m", "kg", "km/h")
    pub symbol: String,
    /// Long name (e.g. "meter")
    pub name: String,
    /// Exponents of the SI base quantities
    pub dimension: Dimension,
    /// Factor to the SI coherent unit of `dimension`
    pub factor: Number,
    /// Non-zero only for temperature scales
    pub offset: Number,
    /// Grouping used for listings ("length", "derived", "custom")
    pub category: String,
}

impl Unit {
    pub fn new(symbol: &str, name: &str, dimension: Dimension, factor: Number, category: &str) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            factor,
            offset: Number::zero(),
            category: category.to_string(),
        }
    }

    /// Set the SI offset (temperature scales)
    pub fn with_offset(mut self, offset: Number) -> Self {
        self.offset = offset;
        self
    }

    /// The pure number 1
    pub fn dimensionless() -> Self {
        Unit::new("", "dimensionless", Dimension::DIMENSIONLESS, Number::one(), "dimensionless")
    }

    /// True for affine scales such as degC and degF
    pub fn has_offset(&self) -> bool {
        !self.offset.is_zero()
    }

    /// Same dimension, so values convert between the two
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Value in the coherent SI unit
    pub fn to_si(&self, value: &Number) -> Number {
        value.mul(&self.factor).add(&self.offset)
    }

    /// Inverse of [`Unit::to_si`]
    pub fn from_si(&self, value_si: &Number) -> Result<Number, UnitError> {
        Ok(value_si.sub(&self.offset).checked_div(&self.factor)?)
    }

    /// Convert `value` into `target`, going through SI.
    ///
    /// Fails with `IncompatibleDimensions` unless the dimensions match.
    pub fn convert_to(&self, value: &Number, target: &Unit) -> Result<Number, UnitError> {
        if !self.is_compatible(target) {
            return Err(UnitError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }
        target.from_si(&self.to_si(value))
    }

    /// Scale by a pure factor, keeping the dimension (`1000 m` for km)
    pub fn scaled(&self, symbol: &str, name: &str, by: &Number, category: &str) -> Unit {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension: self.dimension,
            factor: self.factor.mul(by),
            offset: Number::zero(),
            category: category.to_string(),
        }
    }

    // Offsets do not survive products, quotients or powers.

    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit {
            symbol: join_symbols(&self.symbol, "*", &other.symbol),
            name: format!("{} {}", self.name, other.name),
            dimension: self.dimension.multiply(&other.dimension),
            factor: self.factor.mul(&other.factor),
            offset: Number::zero(),
            category: "derived".to_string(),
        }
    }

    /// Quotient; fails only on a zero factor
    pub fn divide(&self, other: &Unit) -> Result<Unit, UnitError> {
        Ok(Unit {
            symbol: join_symbols(&self.symbol, "/", &other.symbol),
            name: format!("{} per {}", self.name, other.name),
            dimension: self.dimension.divide(&other.dimension),
            factor: self.factor.checked_div(&other.factor)?,
            offset: Number::zero(),
            category: "derived".to_string(),
        })
    }

    pub fn power(&self, exp: i32) -> Result<Unit, UnitError> {
        if exp == 1 {
            return Ok(self.clone());
        }
        Ok(Unit {
            symbol: format!("{}^{}", self.symbol, exp),
            name: format!("{} to the {}", self.name, exp),
            dimension: self.dimension.power(exp),
            factor: self.factor.powi(exp)?,
            offset: Number::zero(),
            category: self.category.clone(),
        })
    }
}

fn join_symbols(left: &str, op: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (_, true) => left.to_string(),
        (true, false) if op == "/" => format!("1/{}", right),
        (true, false) => right.to_string(),
        (false, false) => format!("{}{}{}", left, op, right),
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
