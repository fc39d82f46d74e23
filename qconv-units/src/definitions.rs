//! Line-oriented unit definitions
//!
//! ```text
//! @category length
//! m   = [length] = meter = metre
//! km  = 1000 m = kilometer
//! degF = 5/9 K ; offset: 45967/180 = fahrenheit
//! ```
//!
//! Later lines may reference anything defined earlier, in this text or in
//! the registry already.

use crate::parse::parse_unit;
use crate::{Unit, UnitError, UnitRegistry};
use qconv_core::{Dimension, Number};

const DEFAULT_CATEGORY: &str = "custom";

pub(crate) fn load(registry: &mut UnitRegistry, text: &str) -> Result<usize, UnitError> {
    let mut category = DEFAULT_CATEGORY.to_string();
    let mut count = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        if let Some(rest) = content.strip_prefix("@category") {
            let name = rest.trim();
            if name.is_empty() {
                return Err(invalid(line, "@category needs a name"));
            }
            category = name.to_string();
            continue;
        }

        let definition = parse_line(content, line, &category, registry)?;
        let symbol = definition.unit.symbol.clone();
        registry.define(definition.unit);
        for alias in definition.aliases {
            registry.alias(alias, &symbol);
        }
        count += 1;
    }

    Ok(count)
}

struct Definition<'a> {
    unit: Unit,
    aliases: Vec<&'a str>,
}

fn parse_line<'a>(
    content: &'a str,
    line: usize,
    category: &str,
    registry: &UnitRegistry,
) -> Result<Definition<'a>, UnitError> {
    let mut parts = content.split('=').map(str::trim);

    let symbol = parts.next().unwrap_or_default();
    if symbol.is_empty() || symbol.contains(|c: char| c.is_whitespace() || "*/^".contains(c)) {
        return Err(invalid(line, &format!("invalid unit symbol '{}'", symbol)));
    }
    let rhs = parts
        .next()
        .ok_or_else(|| invalid(line, &format!("expected '=' after '{}'", symbol)))?;
    let aliases: Vec<&str> = parts.filter(|a| !a.is_empty()).collect();
    let name = aliases.first().copied().unwrap_or(symbol);

    let mut sections = rhs.split(';').map(str::trim);
    let body = sections.next().unwrap_or_default();
    let mut offset = None;
    for modifier in sections {
        match modifier.strip_prefix("offset:") {
            Some(value) => {
                let value = parse_factor(value.trim())
                    .ok_or_else(|| invalid(line, &format!("invalid offset '{}'", value.trim())))?;
                offset = Some(value);
            }
            None => return Err(invalid(line, &format!("unknown modifier '{}'", modifier))),
        }
    }

    let unit = if let Some(dim) = body.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
        let dimension = base_dimension(dim.trim())
            .ok_or_else(|| invalid(line, &format!("unknown dimension [{}]", dim.trim())))?;
        Unit::new(symbol, name, dimension, Number::one(), category)
            .with_offset(offset.unwrap_or_else(Number::zero))
    } else {
        derived_unit(symbol, name, body, offset, line, category, registry)?
    };

    Ok(Definition { unit, aliases })
}

fn derived_unit(
    symbol: &str,
    name: &str,
    body: &str,
    offset: Option<Number>,
    line: usize,
    category: &str,
    registry: &UnitRegistry,
) -> Result<Unit, UnitError> {
    let (scale, rest) = match body.split_once(char::is_whitespace) {
        Some((first, rest)) => match parse_factor(first) {
            Some(scale) => (Some(scale), rest.trim()),
            None => (None, body),
        },
        None => match parse_factor(body) {
            Some(scale) => (Some(scale), ""),
            None => (None, body),
        },
    };

    if rest.is_empty() {
        let scale = scale.ok_or_else(|| invalid(line, "empty definition"))?;
        let unit = Unit::new(symbol, name, Dimension::DIMENSIONLESS, scale, category);
        return Ok(unit.with_offset(offset.unwrap_or_else(Number::zero)));
    }

    let reference = parse_unit(rest, registry).map_err(|e| match e {
        UnitError::Undefined(name) => UnitError::UndefinedReference { line, name },
        UnitError::InvalidExponent(expr) => invalid(line, &format!("invalid exponent in '{}'", expr)),
        other => other,
    })?;

    // si = ((v * scale) + offset) * ref.factor + ref.offset
    let factor = match &scale {
        Some(scale) => scale.mul(&reference.factor),
        None => reference.factor.clone(),
    };
    let offset = match offset {
        Some(offset) => offset.mul(&reference.factor).add(&reference.offset),
        None => reference.offset.clone(),
    };

    Ok(Unit {
        symbol: symbol.to_string(),
        name: name.to_string(),
        dimension: reference.dimension,
        factor,
        offset,
        category: category.to_string(),
    })
}

/// Decimal, scientific or `a/b` ratio
fn parse_factor(s: &str) -> Option<Number> {
    match s.split_once('/') {
        Some((num, den)) => {
            let num = Number::from_str(num).ok()?;
            let den = Number::from_str(den).ok()?;
            num.checked_div(&den).ok()
        }
        None => Number::from_str(s).ok(),
    }
}

fn base_dimension(name: &str) -> Option<Dimension> {
    let dimension = match name {
        "" => Dimension::DIMENSIONLESS,
        "length" => Dimension::LENGTH,
        "mass" => Dimension::MASS,
        "time" => Dimension::TIME,
        "current" => Dimension::CURRENT,
        "temperature" => Dimension::TEMPERATURE,
        "amount" => Dimension::AMOUNT,
        "luminosity" => Dimension::LUMINOSITY,
        _ => return None,
    };
    Some(dimension)
}

fn invalid(line: usize, reason: &str) -> UnitError {
    UnitError::InvalidDefinition {
        line,
        reason: reason.to_string(),
    }
}
