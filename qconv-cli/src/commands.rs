//! Subcommand handlers. Results go to `out`, conversion errors to `err`.

use crate::cli::ConvertArgs;
use crate::error::Result;
use qconv::config::DataDir;
use qconv::{Converter, ErrorReport, USAGE_HINT};
use qconv_currency::{find_currencies, human_age, refresh, BaseRatesFile, Refresh, DEFAULT_MAX_AGE};
use qconv_units::UnitRegistry;
use serde_json::json;
use std::io::Write;
use std::path::Path;

/// Returns `false` when the query could not be converted.
pub fn convert(data: &DataDir, args: &ConvertArgs, out: &mut dyn Write, err: &mut dyn Write) -> Result<bool> {
    let query = args.query.join(" ");
    tracing::debug!("query: {:?}", query);

    let settings = data.settings()?;
    let cache = data.rate_cache();
    let rates = cache.table();
    if !rates.is_empty() && !cache.is_fresh(DEFAULT_MAX_AGE) {
        tracing::info!("exchange rates are stale; refresh with `qconv rates import`");
    }
    let units = match data.unit_registry() {
        Ok(registry) => registry,
        Err(e) => {
            tracing::warn!("custom units not loaded: {}", e);
            UnitRegistry::new()
        }
    };

    let result = Converter::new(&rates, &units)
        .with_decimal_places(settings.decimal_places)
        .with_default_currency(settings.default_currency.as_deref())
        .convert(&query);

    match (result, args.json) {
        (Ok(conversion), false) => {
            writeln!(out, "{}", conversion.formatted)?;
            Ok(true)
        }
        (Ok(conversion), true) => {
            writeln!(out, "{}", json!({ "result": conversion, "error": null }))?;
            Ok(true)
        }
        (Err(e), false) => {
            tracing::debug!("invalid query: {}", e);
            writeln!(err, "{}", e)?;
            writeln!(err, "{}", USAGE_HINT)?;
            Ok(false)
        }
        (Err(e), true) => {
            writeln!(out, "{}", json!({ "result": null, "error": ErrorReport::from(&e) }))?;
            Ok(false)
        }
    }
}

pub fn currencies(data: &DataDir, filter: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let filter = filter.unwrap_or_default();
    if filter.is_empty() {
        if let Some(age) = data.rate_cache().age() {
            writeln!(out, "Exchange rates updated {}", human_age(age))?;
        }
    }

    let found = find_currencies(filter);
    if found.is_empty() {
        writeln!(out, "No matching currencies")?;
    }
    for (code, name) in found {
        writeln!(out, "{} // {}", name, code)?;
    }
    Ok(())
}

pub fn places(data: &DataDir, places: u32, out: &mut dyn Write) -> Result<()> {
    let path = data.settings_path();
    let mut settings = data.settings()?;
    settings.decimal_places = places;
    settings.save(&path)?;
    writeln!(out, "Set decimal places to {}", places)?;
    Ok(())
}

pub fn default_currency(data: &DataDir, code: &str, out: &mut dyn Write) -> Result<()> {
    let path = data.settings_path();
    let mut settings = data.settings()?;
    let current = settings.set_default_currency(code)?.unwrap_or("None").to_string();
    settings.save(&path)?;
    writeln!(out, "Set default currency to {}", current)?;
    Ok(())
}

pub fn rates_import(data: &DataDir, file: &Path, force: bool, out: &mut dyn Write) -> Result<()> {
    let source = BaseRatesFile::new(file);
    match refresh(&data.rate_cache(), &source, DEFAULT_MAX_AGE, force)? {
        Refresh::Fresh(cached) => writeln!(
            out,
            "Exchange rates are up to date (updated {}); use --force to replace them",
            human_age(cached.age())
        )?,
        Refresh::Updated(cached) => writeln!(out, "Imported {} exchange rates", cached.rates.len())?,
    }
    Ok(())
}

pub fn rates_status(data: &DataDir, out: &mut dyn Write) -> Result<()> {
    let cache = data.rate_cache();
    match cache.load()? {
        Some(cached) => {
            writeln!(
                out,
                "Exchange rates updated {} ({} pairs)",
                human_age(cached.age()),
                cached.rates.len()
            )?;
            if cached.age() > DEFAULT_MAX_AGE {
                writeln!(out, "Rates are stale; run `qconv rates import <file>`")?;
            }
        }
        None => writeln!(out, "No exchange rates cached; run `qconv rates import <file>`")?,
    }
    Ok(())
}

pub fn units_path(data: &DataDir, out: &mut dyn Write) -> Result<()> {
    let path = data.provision_units()?;
    writeln!(out, "{}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn query(words: &[&str], json: bool) -> ConvertArgs {
        ConvertArgs {
            query: words.iter().map(|w| w.to_string()).collect(),
            json,
        }
    }

    fn run_convert(data: &DataDir, args: &ConvertArgs) -> (bool, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let ok = convert(data, args, &mut out, &mut err).unwrap();
        (ok, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    fn import_rates(data: &DataDir) {
        let file = data.root().join("eur.json");
        fs::write(&file, r#"{"base":"EUR","rates":{"USD":1.25,"GBP":1.0}}"#).unwrap();
        rates_import(data, &file, false, &mut Vec::new()).unwrap();
    }

    #[test]
    fn test_convert_units() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let (ok, out, err) = run_convert(&data, &query(&["178lb", "kg"], false));
        assert!(ok);
        assert_eq!(out, "80.74 kg\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_convert_error_prints_hint() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let (ok, out, err) = run_convert(&data, &query(&["abc"], false));
        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(err, format!("Start your query with a number\n{}\n", USAGE_HINT));
    }

    #[test]
    fn test_convert_json() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());

        let (_, out, _) = run_convert(&data, &query(&["2.5cm"], true));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["result"]["formatted"], "2.50 cm");
        assert!(value["error"].is_null());

        let (ok, out, _) = run_convert(&data, &query(&["42"], true));
        assert!(!ok);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["error"]["code"], "NO_UNITS");
    }

    #[test]
    fn test_currency_conversion_with_settings() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        import_rates(&data);

        let (_, out, _) = run_convert(&data, &query(&["100", "USD", "GBP"], false));
        assert_eq!(out, "80.00 GBP\n");

        default_currency(&data, "gbp", &mut Vec::new()).unwrap();
        places(&data, 1, &mut Vec::new()).unwrap();
        let (_, out, _) = run_convert(&data, &query(&["100", "usd"], false));
        assert_eq!(out, "80.0 GBP\n");
    }

    #[test]
    fn test_custom_units_are_used() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        fs::write(data.units_path(), "smoot = 1.7018 m = smoots\n").unwrap();
        let (_, out, _) = run_convert(&data, &query(&["10", "smoots", "m"], false));
        assert_eq!(out, "17.02 m\n");
    }

    #[test]
    fn test_broken_custom_units_fall_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        fs::write(data.units_path(), "widget = 3 gizmo\n").unwrap();
        let (ok, out, _) = run_convert(&data, &query(&["1", "km", "m"], false));
        assert!(ok);
        assert_eq!(out, "1000.00 m\n");
    }

    #[test]
    fn test_default_currency_messages() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());

        let mut out = Vec::new();
        default_currency(&data, "eur", &mut out).unwrap();
        default_currency(&data, "none", &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Set default currency to EUR\nSet default currency to None\n"
        );
        assert!(default_currency(&data, "zzz", &mut Vec::new()).is_err());
    }

    #[test]
    fn test_currencies_listing() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());

        let mut out = Vec::new();
        currencies(&data, Some("franc"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Swiss Franc // CHF\n");

        let mut out = Vec::new();
        currencies(&data, Some("nothing like this"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No matching currencies\n");
    }

    #[test]
    fn test_rates_status_and_import() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());

        let mut out = Vec::new();
        rates_status(&data, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("No exchange rates cached"));

        import_rates(&data);
        let mut out = Vec::new();
        rates_status(&data, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("(6 pairs)"));

        let file = data.root().join("eur.json");
        let mut out = Vec::new();
        rates_import(&data, &file, false, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Exchange rates are up to date"));
    }

    #[test]
    fn test_units_path_provisions_template() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path().join("data"));
        let mut out = Vec::new();
        units_path(&data, &mut out).unwrap();
        assert!(data.units_path().exists());
        assert_eq!(String::from_utf8(out).unwrap().trim(), data.units_path().display().to_string());
    }
}
