use serde::{Deserialize, Serialize};

use crate::storage;

/// Backend root, baked in at build time (`FINANCE_API_URL=https://... trunk build`).
pub const API_BASE_URL: &str = match option_env!("FINANCE_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

const SETTINGS_KEY: &str = "settings";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub currency_code: String,
    pub currency_symbol: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency_code: "BRL".to_string(),
            currency_symbol: "R$".to_string(),
        }
    }
}

impl AppSettings {
    pub fn for_currency(code: &str) -> Self {
        Self {
            currency_code: code.to_string(),
            currency_symbol: currency_symbol_for(code).to_string(),
        }
    }

    /// Thousands and decimal separators used when printing amounts.
    pub fn separators(&self) -> (char, char) {
        match self.currency_code.as_str() {
            "BRL" | "EUR" => ('.', ','),
            _ => (',', '.'),
        }
    }
}

pub const CURRENCIES: &[(&str, &str)] = &[
    ("BRL", "BRL (R$)"),
    ("USD", "USD ($)"),
    ("EUR", "EUR (€)"),
    ("GBP", "GBP (£)"),
];

pub fn currency_symbol_for(code: &str) -> &'static str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        _ => "R$",
    }
}

pub fn load_settings() -> AppSettings {
    storage::load_json(SETTINGS_KEY).unwrap_or_default()
}

pub fn save_settings(settings: &AppSettings) {
    storage::save_json(SETTINGS_KEY, settings);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_currency_defaults_to_real() {
        assert_eq!(currency_symbol_for("XYZ"), "R$");
        assert_eq!(AppSettings::for_currency("USD").currency_symbol, "$");
    }

    #[test]
    fn separators_follow_currency() {
        assert_eq!(AppSettings::default().separators(), ('.', ','));
        assert_eq!(AppSettings::for_currency("GBP").separators(), (',', '.'));
    }
}
