//! qconv units - dimensional unit registry
//!
//! Units are loaded from a line-oriented definitions format, both the
//! built-in catalogue and the user's custom file. Categories shipped
//! built in:
//! - Length, mass, time, temperature (K, degC, degF, degR)
//! - Current, amount, luminosity
//! - Area, volume, velocity, acceleration
//! - Force, energy, power, pressure, frequency
//! - Electrical, data, angle
//!
//! Expressions combine registered units: "km/h", "kg*m/s^2", "ft²".

mod definitions;
mod error;
mod parse;
mod quantity;
mod registry;
mod resolver;
mod unit;

pub use error::UnitError;
pub use parse::parse_unit;
pub use quantity::Quantity;
pub use registry::{UnitRegistry, BUILTIN_DEFINITIONS};
pub use resolver::UnitResolver;
pub use unit::Unit;
