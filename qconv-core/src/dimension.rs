//! Dimensional analysis types
//!
//! Exponents of the 7 SI base quantities:
//! [length, mass, time, current, temperature, amount, luminosity]

use serde::{Deserialize, Serialize};
use std::fmt;

const SYMBOLS: [&str; 7] = ["L", "M", "T", "I", "Θ", "N", "J"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub exponents: [i32; 7],
}

impl Dimension {
    /// Pure numbers, ratios and counts
    pub const DIMENSIONLESS: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 0]);
    /// Meter
    pub const LENGTH: Dimension = Dimension::new([1, 0, 0, 0, 0, 0, 0]);
    /// Kilogram
    pub const MASS: Dimension = Dimension::new([0, 1, 0, 0, 0, 0, 0]);
    /// Second
    pub const TIME: Dimension = Dimension::new([0, 0, 1, 0, 0, 0, 0]);
    /// Ampere
    pub const CURRENT: Dimension = Dimension::new([0, 0, 0, 1, 0, 0, 0]);
    /// Kelvin
    pub const TEMPERATURE: Dimension = Dimension::new([0, 0, 0, 0, 1, 0, 0]);
    /// Mole
    pub const AMOUNT: Dimension = Dimension::new([0, 0, 0, 0, 0, 1, 0]);
    /// Candela
    pub const LUMINOSITY: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 1]);

    // Derived
    /// L²
    pub const AREA: Dimension = Dimension::new([2, 0, 0, 0, 0, 0, 0]);
    /// L³
    pub const VOLUME: Dimension = Dimension::new([3, 0, 0, 0, 0, 0, 0]);
    /// L·T⁻¹
    pub const VELOCITY: Dimension = Dimension::new([1, 0, -1, 0, 0, 0, 0]);
    /// L·T⁻²
    pub const ACCELERATION: Dimension = Dimension::new([1, 0, -2, 0, 0, 0, 0]);
    /// Newton: M·L·T⁻²
    pub const FORCE: Dimension = Dimension::new([1, 1, -2, 0, 0, 0, 0]);
    /// Joule: M·L²·T⁻²
    pub const ENERGY: Dimension = Dimension::new([2, 1, -2, 0, 0, 0, 0]);
    /// Watt: energy per second
    pub const POWER: Dimension = Dimension::new([2, 1, -3, 0, 0, 0, 0]);
    /// Pascal: force per area
    pub const PRESSURE: Dimension = Dimension::new([-1, 1, -2, 0, 0, 0, 0]);
    /// Hertz: T⁻¹
    pub const FREQUENCY: Dimension = Dimension::new([0, 0, -1, 0, 0, 0, 0]);
    /// Coulomb: I·T
    pub const CHARGE: Dimension = Dimension::new([0, 0, 1, 1, 0, 0, 0]);
    /// Volt: power per ampere
    pub const VOLTAGE: Dimension = Dimension::new([2, 1, -3, -1, 0, 0, 0]);

    pub const fn new(exponents: [i32; 7]) -> Self {
        Dimension { exponents }
    }

    /// True when every exponent is zero
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    fn zip_with(&self, other: &Dimension, f: impl Fn(i32, i32) -> i32) -> Dimension {
        let mut exponents = [0i32; 7];
        for (i, slot) in exponents.iter_mut().enumerate() {
            *slot = f(self.exponents[i], other.exponents[i]);
        }
        Dimension { exponents }
    }

    /// Product of two quantities adds exponents
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, |a, b| a + b)
    }

    /// Quotient subtracts exponents
    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, |a, b| a - b)
    }

    /// Raise to an integer power, scaling every exponent
    pub fn power(&self, exp: i32) -> Dimension {
        self.zip_with(&Dimension::DIMENSIONLESS, |a, _| a * exp)
    }

    /// Common name, if the exponents match a well-known quantity
    pub fn name(&self) -> Option<&'static str> {
        let named = [
            (Dimension::DIMENSIONLESS, "dimensionless"),
            (Dimension::LENGTH, "length"),
            (Dimension::MASS, "mass"),
            (Dimension::TIME, "time"),
            (Dimension::CURRENT, "current"),
            (Dimension::TEMPERATURE, "temperature"),
            (Dimension::AMOUNT, "amount"),
            (Dimension::LUMINOSITY, "luminosity"),
            (Dimension::AREA, "area"),
            (Dimension::VOLUME, "volume"),
            (Dimension::VELOCITY, "velocity"),
            (Dimension::ACCELERATION, "acceleration"),
            (Dimension::FORCE, "force"),
            (Dimension::ENERGY, "energy"),
            (Dimension::POWER, "power"),
            (Dimension::PRESSURE, "pressure"),
            (Dimension::FREQUENCY, "frequency"),
            (Dimension::CHARGE, "charge"),
            (Dimension::VOLTAGE, "voltage"),
        ];
        named.iter().find(|(d, _)| d == self).map(|(_, n)| *n)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .exponents
            .iter()
            .zip(SYMBOLS)
            .filter(|(exp, _)| **exp != 0)
            .map(|(exp, sym)| match *exp {
                1 => sym.to_string(),
                e => format!("{}^{}", sym, e),
            })
            .collect();

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}
