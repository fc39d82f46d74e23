//! Resolving one phrase pair against the rate table or the unit registry

use qconv_core::ConvertError;
use qconv_currency::RateTable;
use qconv_units::{Unit, UnitError, UnitResolver};

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyMatch {
    pub rate: f64,
    /// Target currency code
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitMatch {
    pub magnitude: f64,
    pub label: String,
}

/// Look the pair up as currency codes.
///
/// An empty `to` converts into `default_currency` when one is set. A stored
/// rate of zero counts as no match.
pub fn resolve_currency(
    from: &str,
    to: &str,
    default_currency: Option<&str>,
    rates: &RateTable,
) -> Option<CurrencyMatch> {
    let c1 = from.to_uppercase();
    let c2 = to.to_uppercase();

    let (rate, label) = match default_currency {
        Some(default) if c2.is_empty() => (rates.get(&c1, default)?, default.to_string()),
        _ if !c2.is_empty() => (rates.get(&c1, &c2)?, c2),
        _ => return None,
    };

    if rate == 0.0 {
        return None;
    }
    Some(CurrencyMatch { rate, label })
}

/// Resolve the pair as unit expressions and convert.
///
/// `Ok(None)` when either phrase names no unit, so the caller can try the
/// next split. Incompatible dimensions are an error.
pub fn resolve_units(
    magnitude: f64,
    from: &str,
    to: &str,
    units: &dyn UnitResolver,
) -> Result<Option<UnitMatch>, ConvertError> {
    let Some(from_unit) = resolve_phrase(from, units)? else {
        return Ok(None);
    };

    if to.is_empty() {
        return Ok(Some(UnitMatch {
            magnitude,
            label: label(&from_unit),
        }));
    }

    let Some(to_unit) = resolve_phrase(to, units)? else {
        return Ok(None);
    };

    tracing::debug!("from '{}' to '{}'", from_unit, to_unit);
    let converted = units.convert(magnitude, &from_unit, &to_unit)?;
    Ok(Some(UnitMatch {
        magnitude: converted,
        label: label(&to_unit),
    }))
}

fn resolve_phrase(phrase: &str, units: &dyn UnitResolver) -> Result<Option<Unit>, UnitError> {
    match units.resolve(phrase) {
        Ok(unit) => Ok(Some(unit)),
        Err(e) if e.is_undefined() => {
            tracing::debug!("not a unit: {:?} ({})", phrase, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn label(unit: &Unit) -> String {
    if unit.symbol.is_empty() {
        "dimensionless".to_string()
    } else {
        unit.symbol.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qconv_currency::Quote;
    use qconv_units::UnitRegistry;

    fn rates() -> RateTable {
        let mut table = RateTable::new();
        table.insert("USD", "GBP", 0.8);
        table
    }

    #[test]
    fn test_currency_pair() {
        let hit = resolve_currency("usd", "gbp", None, &rates()).unwrap();
        assert_eq!(hit, CurrencyMatch { rate: 0.8, label: "GBP".into() });
        assert!(resolve_currency("USD", "JPY", None, &rates()).is_none());
    }

    #[test]
    fn test_currency_default_target() {
        let hit = resolve_currency("USD", "", Some("GBP"), &rates()).unwrap();
        assert_eq!(hit.label, "GBP");
        assert!(resolve_currency("USD", "", None, &rates()).is_none());
    }

    #[test]
    fn test_explicit_target_wins_over_default() {
        let mut table = rates();
        table.insert("USD", "EUR", 0.9);
        let hit = resolve_currency("USD", "EUR", Some("GBP"), &table).unwrap();
        assert_eq!(hit.label, "EUR");
        assert_eq!(hit.rate, 0.9);
    }

    #[test]
    fn test_zero_rate_is_a_miss() {
        let table = RateTable::from_quotes(vec![Quote {
            from: "USD".into(),
            to: "XAU".into(),
            rate: 0.0,
        }]);
        assert!(resolve_currency("USD", "XAU", None, &table).is_none());
    }

    #[test]
    fn test_units_without_target() {
        let reg = UnitRegistry::new();
        let hit = resolve_units(2.5, "cm", "", &reg).unwrap().unwrap();
        assert_eq!(hit, UnitMatch { magnitude: 2.5, label: "cm".into() });
    }

    #[test]
    fn test_units_undefined_is_none() {
        let reg = UnitRegistry::new();
        assert_eq!(resolve_units(1.0, "blorp", "", &reg).unwrap(), None);
        assert_eq!(resolve_units(1.0, "kg", "blorp", &reg).unwrap(), None);
    }

    #[test]
    fn test_units_incompatible_is_error() {
        let reg = UnitRegistry::new();
        let err = resolve_units(5.0, "kg", "m", &reg).unwrap_err();
        assert!(matches!(err, ConvertError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_dimensionless_label() {
        let reg = UnitRegistry::new();
        let hit = resolve_units(3.0, "1", "", &reg).unwrap().unwrap();
        assert_eq!(hit.label, "dimensionless");
    }
}
