//! Leading quantity extraction

use qconv_core::ConvertError;

/// Magnitude plus everything after it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scanned<'a> {
    pub magnitude: f64,
    pub tail: &'a str,
}

/// Split `query` into its leading number and the unconsumed tail.
///
/// The number is the longest prefix of ASCII digits and dots; no sign, no
/// exponent, no leading whitespace. A prefix beyond the f64 range is
/// malformed.
pub fn scan(query: &str) -> Result<Scanned<'_>, ConvertError> {
    let end = query
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(query.len());

    if end == 0 {
        return Err(ConvertError::NoQuantity);
    }
    if end == query.len() {
        return Err(ConvertError::NoUnits);
    }

    let (number, tail) = query.split_at(end);
    let magnitude = number
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .ok_or_else(|| ConvertError::MalformedNumber(number.to_string()))?;

    tracing::debug!("quantity: {} tail: {:?}", magnitude, tail);
    Ok(Scanned { magnitude, tail })
}
