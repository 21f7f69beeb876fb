use crate::errors::Error;
use std::collections::BTreeSet;

pub const DEFAULT_CURRENCY: &str = "GBP";

/// Where currency codes and their human-readable names come from.
///
/// On a desktop or mobile platform this would be the locale services of the
/// system.  `StaticCatalog` provides a built-in list.
pub trait CurrencyCatalog {
    /// All known ISO 4217 codes, sorted
    fn currency_codes(&self) -> BTreeSet<String>;

    /// The name of the currency, or the code itself when the name is not
    /// known.
    fn display_name(&self, code: &str) -> String;

    fn is_known(&self, code: &str) -> bool {
        self.currency_codes().contains(code)
    }
}

/// How a currency is shown in the currency picker, e.g. "Euro (EUR)"
pub fn picker_label(catalog: &dyn CurrencyCatalog, code: &str) -> String {
    format!("{} ({})", catalog.display_name(code), code)
}

const COMMON_CURRENCIES: &[(&str, &str)] = &[
    ("AED", "United Arab Emirates Dirham"),
    ("ARS", "Argentine Peso"),
    ("AUD", "Australian Dollar"),
    ("BRL", "Brazilian Real"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CLP", "Chilean Peso"),
    ("CNY", "Chinese Yuan"),
    ("COP", "Colombian Peso"),
    ("CZK", "Czech Koruna"),
    ("DKK", "Danish Krone"),
    ("EGP", "Egyptian Pound"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("HKD", "Hong Kong Dollar"),
    ("HUF", "Hungarian Forint"),
    ("IDR", "Indonesian Rupiah"),
    ("ILS", "Israeli New Shekel"),
    ("INR", "Indian Rupee"),
    ("ISK", "Icelandic Króna"),
    ("JPY", "Japanese Yen"),
    ("KRW", "South Korean Won"),
    ("MXN", "Mexican Peso"),
    ("MYR", "Malaysian Ringgit"),
    ("NGN", "Nigerian Naira"),
    ("NOK", "Norwegian Krone"),
    ("NZD", "New Zealand Dollar"),
    ("PHP", "Philippine Peso"),
    ("PLN", "Polish Zloty"),
    ("RON", "Romanian Leu"),
    ("SAR", "Saudi Riyal"),
    ("SEK", "Swedish Krona"),
    ("SGD", "Singapore Dollar"),
    ("THB", "Thai Baht"),
    ("TRY", "Turkish Lira"),
    ("TWD", "New Taiwan Dollar"),
    ("UAH", "Ukrainian Hryvnia"),
    ("USD", "US Dollar"),
    ("VND", "Vietnamese Dong"),
    ("ZAR", "South African Rand"),
];

/// A fixed list of the most common currencies, with English names.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCatalog;

impl CurrencyCatalog for StaticCatalog {
    fn currency_codes(&self) -> BTreeSet<String> {
        COMMON_CURRENCIES
            .iter()
            .map(|(code, _)| code.to_string())
            .collect()
    }

    fn display_name(&self, code: &str) -> String {
        COMMON_CURRENCIES
            .iter()
            .find(|(c, _)| *c == code)
            .map_or_else(|| code.to_string(), |(_, name)| name.to_string())
    }

    fn is_known(&self, code: &str) -> bool {
        COMMON_CURRENCIES.iter().any(|(c, _)| *c == code)
    }
}

/// Clean up a currency code as typed by the user: surrounding blanks are
/// removed and the code is upper-cased.  Codes missing from the catalog are
/// accepted, only empty codes or codes with blanks are rejected.
pub fn normalize_code(code: &str) -> Result<String, Error> {
    let code = code.trim();
    if code.is_empty() || code.chars().any(char::is_whitespace) {
        return Err(Error::InvalidCurrency(code.to_string()));
    }
    Ok(code.to_uppercase())
}

/// The currency used for new expenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySettings {
    selected: String,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            selected: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl CurrencySettings {
    pub fn new(code: &str) -> Result<Self, Error> {
        let mut settings = CurrencySettings::default();
        settings.select(code)?;
        Ok(settings)
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// The code goes through [`normalize_code`] first.
    pub fn select(&mut self, code: &str) -> Result<(), Error> {
        self.selected = normalize_code(code)?;
        Ok(())
    }
}
