//! Supported currencies (ISO 4217)

pub const CURRENCIES: &[(&str, &str)] = &[
    ("AED", "United Arab Emirates Dirham"),
    ("ARS", "Argentine Peso"),
    ("AUD", "Australian Dollar"),
    ("BGN", "Bulgarian Lev"),
    ("BRL", "Brazilian Real"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CLP", "Chilean Peso"),
    ("CNY", "Chinese Yuan Renminbi"),
    ("COP", "Colombian Peso"),
    ("CZK", "Czech Koruna"),
    ("DKK", "Danish Krone"),
    ("EGP", "Egyptian Pound"),
    ("EUR", "Euro"),
    ("GBP", "British Pound Sterling"),
    ("HKD", "Hong Kong Dollar"),
    ("HUF", "Hungarian Forint"),
    ("IDR", "Indonesian Rupiah"),
    ("ILS", "Israeli New Shekel"),
    ("INR", "Indian Rupee"),
    ("ISK", "Icelandic Krona"),
    ("JPY", "Japanese Yen"),
    ("KRW", "South Korean Won"),
    ("MXN", "Mexican Peso"),
    ("MYR", "Malaysian Ringgit"),
    ("NOK", "Norwegian Krone"),
    ("NZD", "New Zealand Dollar"),
    ("PHP", "Philippine Peso"),
    ("PKR", "Pakistani Rupee"),
    ("PLN", "Polish Zloty"),
    ("RON", "Romanian Leu"),
    ("RUB", "Russian Ruble"),
    ("SAR", "Saudi Riyal"),
    ("SEK", "Swedish Krona"),
    ("SGD", "Singapore Dollar"),
    ("THB", "Thai Baht"),
    ("TRY", "Turkish Lira"),
    ("TWD", "New Taiwan Dollar"),
    ("UAH", "Ukrainian Hryvnia"),
    ("USD", "United States Dollar"),
    ("VND", "Vietnamese Dong"),
    ("ZAR", "South African Rand"),
];

pub fn currency_name(code: &str) -> Option<&'static str> {
    let code = code.to_uppercase();
    CURRENCIES
        .binary_search_by(|(c, _)| (*c).cmp(code.as_str()))
        .ok()
        .map(|i| CURRENCIES[i].1)
}

pub fn is_supported(code: &str) -> bool {
    currency_name(code).is_some()
}

/// Case-insensitive substring match on code or name, sorted by name.
/// An empty filter returns everything.
pub fn find_currencies(filter: &str) -> Vec<(&'static str, &'static str)> {
    let filter = filter.trim().to_lowercase();
    let mut found: Vec<(&'static str, &'static str)> = CURRENCIES
        .iter()
        .filter(|(code, name)| {
            filter.is_empty()
                || code.to_lowercase().contains(&filter)
                || name.to_lowercase().contains(&filter)
        })
        .copied()
        .collect();
    found.sort_by(|a, b| a.1.cmp(b.1));
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_sorted_by_code() {
        assert!(CURRENCIES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_currency_name() {
        assert_eq!(currency_name("gbp"), Some("British Pound Sterling"));
        assert!(is_supported("USD"));
        assert!(!is_supported("XYZ"));
    }

    #[test]
    fn test_find_currencies() {
        let dollars = find_currencies("dollar");
        assert!(dollars.len() >= 5);
        assert!(dollars.iter().all(|(_, name)| name.contains("Dollar")));
        assert_eq!(dollars[0].1, "Australian Dollar");

        assert_eq!(find_currencies("chf"), vec![("CHF", "Swiss Franc")]);
        assert_eq!(find_currencies("").len(), CURRENCIES.len());
    }
}
