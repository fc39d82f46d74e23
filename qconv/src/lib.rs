//! qconv - free-text unit and currency conversion
//!
//! ```text
//! 2.5cm in            -> 0.98 in
//! 178lb kg            -> 80.74 kg
//! 100 USD GBP         -> 80.00 GBP
//! 3 nautical miles km -> 5.56 km
//! ```
//!
//! A query is a leading number followed by one or two unit or currency
//! phrases with no explicit delimiter between them. Every split point of the
//! tail is tried, narrowest source phrase first; currency pairs are checked
//! before units and the first interpretation that resolves is returned.

pub mod config;
mod engine;
pub mod resolve;
mod scan;
mod split;

pub use engine::{convert, Conversion, Converter, DEFAULT_DECIMAL_PLACES};
pub use qconv_core::{ConvertError, ErrorReport, Severity, USAGE_HINT};
pub use scan::{scan, Scanned};
pub use split::{splits, PhrasePair, Splits};
