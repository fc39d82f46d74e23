//! qconv currency - exchange rates
//!
//! - `RateTable`: ordered code pairs to multipliers, reciprocal on insert
//! - `RateCache`: JSON snapshot of the last fetched table with its age
//! - `RateSource` / `refresh`: replace stale cached rates
//! - `CURRENCIES`: supported ISO 4217 codes

mod cache;
mod currencies;
mod error;
mod rates;
mod source;

pub use cache::{human_age, CachedRates, RateCache, DEFAULT_MAX_AGE};
pub use currencies::{currency_name, find_currencies, is_supported, CURRENCIES};
pub use error::CurrencyError;
pub use rates::{Quote, RateTable};
pub use source::{refresh, BaseRatesFile, RateSource, Refresh};
