//! Unit expression parsing - "km/h", "m^2", "kg*m/s²", "sq ft"

use crate::{Unit, UnitError, UnitRegistry};

/// Largest accepted power, either sign
const MAX_EXPONENT: i32 = 64;

/// Parse a unit expression against a registry.
///
/// Supported forms:
/// - Names and aliases, including multi-word ones: "m", "meters", "nautical mile"
/// - Powers: "m^2", "m**2", "m²", "s⁻¹", "m2"
/// - Products: "kg*m", "N·m"
/// - Quotients: "m/s", "kg/m^3", "km/h/s"
///
/// Whitespace is not a product separator; spaced phrases only match
/// registered names.
pub fn parse_unit(expr: &str, registry: &UnitRegistry) -> Result<Unit, UnitError> {
    let expr = expr.trim();

    if expr.is_empty() {
        return Err(UnitError::Undefined(String::new()));
    }

    if let Some(unit) = registry.lookup(expr) {
        return Ok(unit);
    }

    let normalized = expr.replace("**", "^");
    let mut parts = normalized.split('/');

    let numerator = parts.next().unwrap_or_default();
    let mut result = parse_product(numerator, expr, registry)?;
    for denominator in parts {
        let unit = parse_product(denominator, expr, registry)?;
        result = result.divide(&unit)?;
    }

    Ok(result)
}

fn parse_product(s: &str, expr: &str, registry: &UnitRegistry) -> Result<Unit, UnitError> {
    let mut factors = s
        .split(|c| c == '*' || c == '·')
        .filter(|p| !p.is_empty());

    let first = factors
        .next()
        .ok_or_else(|| UnitError::Undefined(expr.to_string()))?;

    let mut result = parse_power(first, registry)?;
    for factor in factors {
        result = result.multiply(&parse_power(factor, registry)?);
    }
    Ok(result)
}

fn parse_power(token: &str, registry: &UnitRegistry) -> Result<Unit, UnitError> {
    if let Some((base, exp)) = token.split_once('^') {
        let exponent: i32 = exp
            .trim()
            .parse()
            .map_err(|_| UnitError::InvalidExponent(token.to_string()))?;
        return lookup_base(base, registry)?.power(bounded(exponent, token)?);
    }

    if let Some((base, exponent)) = split_superscript(token) {
        return lookup_base(base, registry)?.power(bounded(exponent, token)?);
    }

    if let Some(unit) = registry.lookup(token) {
        return Ok(unit);
    }

    // "m2", "cm3"
    if let Some((base, exponent)) = split_trailing_digits(token) {
        if let Some(unit) = registry.lookup(base) {
            return unit.power(bounded(exponent, token)?);
        }
    }

    lookup_base(token, registry)
}

fn bounded(exponent: i32, token: &str) -> Result<i32, UnitError> {
    if exponent.saturating_abs() > MAX_EXPONENT {
        return Err(UnitError::InvalidExponent(token.to_string()));
    }
    Ok(exponent)
}

fn lookup_base(s: &str, registry: &UnitRegistry) -> Result<Unit, UnitError> {
    let s = s.trim();
    if s == "1" {
        return Ok(Unit::dimensionless());
    }
    registry
        .lookup(s)
        .ok_or_else(|| UnitError::Undefined(s.to_string()))
}

fn superscript_digit(c: char) -> Option<char> {
    let digit = match c {
        '⁰' => '0',
        '¹' => '1',
        '²' => '2',
        '³' => '3',
        '⁴' => '4',
        '⁵' => '5',
        '⁶' => '6',
        '⁷' => '7',
        '⁸' => '8',
        '⁹' => '9',
        '⁻' => '-',
        _ => return None,
    };
    Some(digit)
}

/// "m²" -> ("m", 2), "s⁻¹" -> ("s", -1)
fn split_superscript(token: &str) -> Option<(&str, i32)> {
    let start = token
        .char_indices()
        .rev()
        .take_while(|(_, c)| superscript_digit(*c).is_some())
        .last()
        .map(|(i, _)| i)?;

    let exponent: String = token[start..].chars().filter_map(superscript_digit).collect();
    let base = &token[..start];
    if base.is_empty() {
        return None;
    }
    exponent.parse().ok().map(|exp| (base, exp))
}

fn split_trailing_digits(token: &str) -> Option<(&str, i32)> {
    let base = token.trim_end_matches(|c: char| c.is_ascii_digit());
    if base.is_empty() || base.len() == token.len() {
        return None;
    }
    token[base.len()..].parse().ok().map(|exp| (base, exp))
}
