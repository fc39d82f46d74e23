//! qconv - convert units and currencies from the command line
//!
//! ```text
//! qconv 2.5cm in
//! qconv 100 USD GBP
//! qconv currencies dollar
//! qconv rates import eur.json
//! ```

mod cli;
mod commands;
mod error;
mod logger;

use cli::{CommandLine, Commands, RatesCommand, UnitsCommand};
use qconv::config::DataDir;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CommandLine::parse_args();
    logger::init_logger(args.verbose);

    let data = DataDir::from_env();
    tracing::debug!("data path: {}", data.root().display());

    let mut out = io::stdout().lock();
    let mut err = io::stderr();

    let result = match &args.command {
        None => commands::convert(&data, &args.convert, &mut out, &mut err),
        Some(Commands::Convert(convert)) => commands::convert(&data, convert, &mut out, &mut err),
        Some(Commands::Currencies { filter }) => {
            commands::currencies(&data, filter.as_deref(), &mut out).map(|_| true)
        }
        Some(Commands::Places { places }) => commands::places(&data, *places, &mut out).map(|_| true),
        Some(Commands::DefaultCurrency { code }) => {
            commands::default_currency(&data, code, &mut out).map(|_| true)
        }
        Some(Commands::Rates { action }) => match action {
            RatesCommand::Import { file, force } => {
                commands::rates_import(&data, file, *force, &mut out).map(|_| true)
            }
            RatesCommand::Status => commands::rates_status(&data, &mut out).map(|_| true),
        },
        Some(Commands::Units { action: UnitsCommand::Path }) => {
            commands::units_path(&data, &mut out).map(|_| true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
