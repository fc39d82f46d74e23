use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qconv")]
#[command(about = "Convert units and currencies from a free-text query.")]
#[command(args_conflicts_with_subcommands = true)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub convert: ConvertArgs,

    /// Log resolution steps to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Query, e.g. `2.5cm in`, `178lb kg` or `100 USD GBP`
    pub query: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a query (the default when no subcommand is given)
    Convert(ConvertArgs),
    /// List supported currencies, optionally filtered by code or name
    Currencies { filter: Option<String> },
    /// Set the number of decimal places in results
    Places { places: u32 },
    /// Set the currency used when a query names no target, or `none`
    DefaultCurrency { code: String },
    /// Manage the exchange-rate cache
    Rates {
        #[command(subcommand)]
        action: RatesCommand,
    },
    /// Custom unit definitions
    Units {
        #[command(subcommand)]
        action: UnitsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RatesCommand {
    /// Replace cached rates from a `{"base": .., "rates": {..}}` JSON file
    Import {
        file: PathBuf,
        /// Import even if the cached rates are still fresh
        #[arg(long)]
        force: bool,
    },
    /// Show when rates were last updated
    Status,
}

#[derive(Subcommand, Debug)]
pub enum UnitsCommand {
    /// Print the custom units file, creating it from the template if needed
    Path,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
