use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rate data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid currency code '{0}'")]
    InvalidCode(String),

    #[error("{0} returned no usable exchange rates")]
    NoRates(String),
}
