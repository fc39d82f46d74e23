//! Quantity type - a magnitude with an associated unit

use crate::{Unit, UnitError};
use qconv_core::{Dimension, Number, NumberError};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Quantity {
    pub value: Number,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: Number, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// `magnitude * unit`, starting from a float magnitude
    pub fn from_f64(magnitude: f64, unit: Unit) -> Result<Self, UnitError> {
        Ok(Quantity::new(Number::from_f64(magnitude)?, unit))
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, UnitError> {
        let value = self.unit.convert_to(&self.value, target)?;
        Ok(Quantity::new(value, target.clone()))
    }

    pub fn magnitude(&self) -> Result<f64, UnitError> {
        self.value.to_f64().ok_or(UnitError::Number(NumberError::OutOfRange))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pound() -> Unit {
        Unit::new("lb", "pound", Dimension::MASS, Number::from_str("0.45359237").unwrap(), "mass")
    }

    fn kilogram() -> Unit {
        Unit::new("kg", "kilogram", Dimension::MASS, Number::one(), "mass")
    }

    #[test]
    fn test_convert_to() {
        let q = Quantity::from_f64(178.0, pound()).unwrap();
        let kg = q.convert_to(&kilogram()).unwrap();
        assert_eq!(kg.value, Number::from_str("80.73944186").unwrap());
        assert_eq!(kg.unit.symbol, "kg");
    }

    #[test]
    fn test_magnitude() {
        let q = Quantity::from_f64(2.5, kilogram()).unwrap();
        assert_eq!(q.magnitude().unwrap(), 2.5);
        assert_eq!(q.dimension(), Dimension::MASS);
    }

    #[test]
    fn test_display() {
        let q = Quantity::from_f64(5.0, kilogram()).unwrap();
        assert_eq!(q.to_string(), "5 kg");
    }
}
