//! Conversion engine

use crate::resolve::{resolve_currency, resolve_units};
use crate::scan::scan;
use crate::split::splits;
use qconv_core::ConvertError;
use qconv_currency::RateTable;
use qconv_units::UnitResolver;
use serde::Serialize;

pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// A successful conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub magnitude: f64,
    pub label: String,
    /// `magnitude` at the configured decimal places, then the label
    pub formatted: String,
}

/// Parses queries and resolves them against a rate table and a unit registry.
pub struct Converter<'a> {
    rates: &'a RateTable,
    units: &'a dyn UnitResolver,
    decimal_places: u32,
    default_currency: Option<String>,
}

impl<'a> Converter<'a> {
    pub fn new(rates: &'a RateTable, units: &'a dyn UnitResolver) -> Self {
        Self {
            rates,
            units,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            default_currency: None,
        }
    }

    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    pub fn with_default_currency(mut self, code: Option<&str>) -> Self {
        self.default_currency = code.map(str::to_string);
        self
    }

    /// Convert a query such as `2.5cm in`, `100 USD GBP` or `3 nautical miles km`.
    ///
    /// Every split of the tail is tried in order, currencies before units;
    /// the first that resolves wins.
    pub fn convert(&self, query: &str) -> Result<Conversion, ConvertError> {
        let scanned = scan(query)?;
        let magnitude = scanned.magnitude;
        let default_currency = self.default_currency.as_deref();

        let mut resolved = None;
        for pair in splits(scanned.tail) {
            tracing::debug!("trying from: {:?} to: {:?}", pair.from, pair.to);

            if let Some(hit) = resolve_currency(&pair.from, &pair.to, default_currency, self.rates) {
                resolved = Some((magnitude * hit.rate, hit.label));
                break;
            }

            if let Some(hit) = resolve_units(magnitude, &pair.from, &pair.to, self.units)? {
                resolved = Some((hit.magnitude, hit.label));
                break;
            }
        }

        let (magnitude, label) =
            resolved.ok_or_else(|| ConvertError::UnresolvedQuery(scanned.tail.trim().to_string()))?;

        if magnitude == 0.0 {
            return Err(ConvertError::ConversionFailed);
        }

        tracing::debug!("converted: {} {}", magnitude, label);
        let formatted = format!("{:.*} {}", self.decimal_places as usize, magnitude, label);
        Ok(Conversion {
            magnitude,
            label,
            formatted,
        })
    }
}

/// One-shot form of [`Converter::convert`], returning the formatted result.
pub fn convert(
    query: &str,
    decimal_places: u32,
    rates: &RateTable,
    default_currency: Option<&str>,
    units: &dyn UnitResolver,
) -> Result<String, ConvertError> {
    Converter::new(rates, units)
        .with_decimal_places(decimal_places)
        .with_default_currency(default_currency)
        .convert(query)
        .map(|c| c.formatted)
}
