//! Unit registry
//!
//! Owns every known unit plus its aliases. Built once by the host and then
//! shared read-only; only definition loading mutates it.

use crate::definitions;
use crate::parse::parse_unit;
use crate::{Quantity, Unit, UnitError, UnitResolver};
use qconv_core::Number;
use std::collections::HashMap;
use std::path::Path;

/// Built-in catalogue, in the custom-definitions format
pub const BUILTIN_DEFINITIONS: &str = include_str!("../definitions/builtin.units");

/// SI prefixes accepted in front of unit symbols (`Mm`, `kPa`, `µs`)
const PREFIXES: &[(&str, &str)] = &[
    ("T", "1e12"),
    ("G", "1e9"),
    ("M", "1e6"),
    ("k", "1000"),
    ("h", "100"),
    ("da", "10"),
    ("d", "0.1"),
    ("c", "0.01"),
    ("m", "0.001"),
    ("u", "1e-6"),
    ("µ", "1e-6"),
    ("μ", "1e-6"),
    ("n", "1e-9"),
    ("p", "1e-12"),
];

/// Long names shorter than this are matched case-sensitively only
const FOLD_MIN_LEN: usize = 4;

/// Units by symbol, with alias and case-folded indexes
#[derive(Debug)]
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
    folded: HashMap<String, String>,
}

impl UnitRegistry {
    /// Registry preloaded with the built-in catalogue
    pub fn new() -> Self {
        let mut registry = Self::empty();
        if let Err(e) = registry.load_definitions(BUILTIN_DEFINITIONS) {
            tracing::error!("built-in unit definitions failed to load: {}", e);
        }
        registry
    }

    /// No units at all; custom definitions must be self-contained
    pub fn empty() -> Self {
        UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
            folded: HashMap::new(),
        }
    }

    /// Get a unit by symbol or alias, tolerating plurals and case in long names.
    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.get_exact(name).or_else(|| {
            let singular = name
                .strip_suffix("es")
                .into_iter()
                .chain(name.strip_suffix('s'))
                .filter(|s| s.len() >= 2);
            for candidate in singular {
                if let Some(unit) = self.get_exact(candidate) {
                    return Some(unit);
                }
            }
            None
        })
    }

    fn get_exact(&self, name: &str) -> Option<&Unit> {
        if let Some(unit) = self.units.get(name) {
            return Some(unit);
        }
        if let Some(symbol) = self.aliases.get(name) {
            return self.units.get(symbol);
        }
        if name.chars().count() >= FOLD_MIN_LEN {
            if let Some(symbol) = self.folded.get(&name.to_lowercase()) {
                return self.units.get(symbol);
            }
        }
        None
    }

    /// `get`, falling back to an SI prefix on a registered symbol.
    pub fn lookup(&self, name: &str) -> Option<Unit> {
        if let Some(unit) = self.get(name) {
            return Some(unit.clone());
        }
        self.lookup_prefixed(name)
    }

    fn lookup_prefixed(&self, name: &str) -> Option<Unit> {
        for (prefix, factor) in PREFIXES {
            let Some(rest) = name.strip_prefix(prefix) else {
                continue;
            };
            // prefixes bind to symbols only, never to aliases
            let Some(base) = self.units.get(rest) else {
                continue;
            };
            if base.has_offset() {
                continue;
            }
            let Ok(factor) = Number::from_str(factor) else {
                continue;
            };
            let long = format!("{}{}", prefix, base.name);
            return Some(base.scaled(name, &long, &factor, &base.category));
        }
        None
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Units in `category`, sorted by symbol
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.units.values().filter(|u| u.category == category).collect();
        units.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        units
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.units.values().map(|u| u.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.units.keys().map(|s| s.as_str()).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Add or replace a unit under its symbol.
    pub fn define(&mut self, unit: Unit) {
        if self.units.contains_key(&unit.symbol) {
            tracing::debug!("redefining unit {}", unit.symbol);
        }
        if unit.symbol.chars().count() >= FOLD_MIN_LEN {
            self.folded.insert(unit.symbol.to_lowercase(), unit.symbol.clone());
        }
        self.units.insert(unit.symbol.clone(), unit);
    }

    /// Register another name for `symbol`. Names of four or more characters
    /// also match case-insensitively.
    pub fn alias(&mut self, alias: &str, symbol: &str) {
        if alias.chars().count() >= FOLD_MIN_LEN {
            self.folded.insert(alias.to_lowercase(), symbol.to_string());
        }
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    /// Parse definitions text; returns how many units were defined.
    pub fn load_definitions(&mut self, text: &str) -> Result<usize, UnitError> {
        definitions::load(self, text)
    }

    pub fn load_definitions_file(&mut self, path: impl AsRef<Path>) -> Result<usize, UnitError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| UnitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let count = self.load_definitions(&text)?;
        tracing::debug!("loaded {} unit definitions from {}", count, path.display());
        Ok(count)
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitResolver for UnitRegistry {
    fn resolve(&self, expression: &str) -> Result<Unit, UnitError> {
        parse_unit(expression, self)
    }

    fn convert(&self, magnitude: f64, from: &Unit, to: &Unit) -> Result<f64, UnitError> {
        Quantity::from_f64(magnitude, from.clone())?
            .convert_to(to)?
            .magnitude()
    }
}
