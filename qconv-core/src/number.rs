//! Exact decimal numbers for unit factors
//!
//! Unit factors such as `0.45359237` (lb) or `0.0254` (in) are exact in
//! decimal but not in binary. Keeping them as dashu `DBig` values lets a
//! chain like `lb -> kg -> oz` compose without drift; only the final
//! magnitude is lowered to `f64`.

use dashu_float::DBig;
use dashu_int::ops::BitTest;
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Value is not finite: {0}")]
    NotFinite(f64),

    #[error("Value does not fit in a 64-bit float")]
    OutOfRange,
}

/// Working precision (decimal digits)
const WORK_PRECISION: usize = 50;

/// Arbitrary precision decimal number
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    fn widen(val: DBig) -> DBig {
        val.with_precision(WORK_PRECISION).value()
    }

    /// Parse a decimal literal: "123", "0.0254", "1.602176634e-19", "-42"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        // dashu wants a fractional part before the exponent
        if (s.contains('e') || s.contains('E')) && !s.contains('.') {
            let lower = s.to_lowercase();
            if let Some((mantissa, exp)) = lower.split_once('e') {
                let mantissa: IBig = mantissa
                    .parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let exp: isize = exp
                    .parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                return Ok(Self { inner: Self::widen(DBig::from_parts(mantissa, exp)) });
            }
        }

        let inner: DBig = s
            .parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;
        Ok(Self { inner: Self::widen(inner) })
    }

    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::widen(DBig::from(n)) }
    }

    /// Lift a binary float through its shortest round-trip decimal text.
    pub fn from_f64(f: f64) -> Result<Self, NumberError> {
        if !f.is_finite() {
            return Err(NumberError::NotFinite(f));
        }
        Self::from_str(&f.to_string())
    }

    pub fn zero() -> Self {
        Self::from_i64(0)
    }

    pub fn one() -> Self {
        Self::from_i64(1)
    }

    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    pub fn is_one(&self) -> bool {
        self.inner == DBig::ONE
    }

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(Self { inner: &self.inner / &other.inner })
    }

    /// Integer power by repeated squaring; a negative exponent takes the
    /// reciprocal.
    pub fn powi(&self, exp: i32) -> Result<Self, NumberError> {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut n = exp.unsigned_abs();
        while n > 0 {
            if n & 1 == 1 {
                result = result.mul(&base);
            }
            n >>= 1;
            if n > 0 {
                base = base.mul(&base);
            }
        }
        if exp < 0 {
            Self::one().checked_div(&result)
        } else {
            Ok(result)
        }
    }

    /// Lower to f64. `None` when the value is outside the f64 range.
    pub fn to_f64(&self) -> Option<f64> {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();

        let sig_f64: f64 = if significand.bit_len() <= 53 {
            let small: i64 = significand.try_into().ok()?;
            small as f64
        } else {
            // keep the top 53 bits and scale back up
            let extra_bits = significand.bit_len() - 53;
            let shifted: i64 = (&significand >> extra_bits).try_into().ok()?;
            shifted as f64 * 2_f64.powi(extra_bits as i32)
        };

        let result = match exponent {
            0 => sig_f64,
            e if (1..=308).contains(&e) => sig_f64 * 10_f64.powi(e as i32),
            e if (-308..0).contains(&e) => sig_f64 / 10_f64.powi((-e) as i32),
            _ => return None,
        };

        result.is_finite().then_some(result)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_f64() {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "{}", self.inner),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_decimal() {
        let n = Number::from_str("0.0254").unwrap();
        assert_eq!(n.to_f64(), Some(0.0254));
    }

    #[test]
    fn test_from_str_scientific_integer_mantissa() {
        let n = Number::from_str("1602176634e-28").unwrap();
        let expected = Number::from_str("1.602176634e-19").unwrap();
        assert_eq!(n, expected);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(matches!(Number::from_str("1.2.3"), Err(NumberError::ParseError(_))));
    }

    #[test]
    fn test_exact_decimal_product() {
        // 178 lb in kg is exact in decimal
        let lb = Number::from_str("0.45359237").unwrap();
        let product = Number::from_i64(178).mul(&lb);
        assert_eq!(product, Number::from_str("80.73944186").unwrap());
    }

    #[test]
    fn test_checked_div_by_zero() {
        let result = Number::one().checked_div(&Number::zero());
        assert_eq!(result, Err(NumberError::DivisionByZero));
    }

    #[test]
    fn test_negative_power() {
        let cm = Number::from_str("0.01").unwrap();
        let inv = cm.powi(-2).unwrap();
        assert_eq!(inv, Number::from_i64(10000));
    }

    #[test]
    fn test_power_by_squaring() {
        let two = Number::from_i64(2);
        assert_eq!(two.powi(64).unwrap(), Number::from_str("18446744073709551616").unwrap());
        assert_eq!(two.powi(0).unwrap(), Number::one());
        let milli = Number::from_i64(10).powi(-3).unwrap();
        assert_eq!(milli, Number::from_str("0.001").unwrap());
    }

    #[test]
    fn test_from_f64_round_trips() {
        let n = Number::from_f64(2.5).unwrap();
        assert_eq!(n.to_f64(), Some(2.5));
        assert!(Number::from_f64(f64::NAN).is_err());
    }
}
