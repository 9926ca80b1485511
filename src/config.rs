use crate::currency::DEFAULT_PREFIX;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_PATH: &str = "ledger.db";

const LOCALE_VARIABLES: [&str; 4] = ["LEDGER_LOCALE", "LC_ALL", "LC_MONETARY", "LANG"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub database_path: PathBuf,
    pub currency_prefix: String,
    pub locale: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            currency_prefix: DEFAULT_PREFIX.to_string(),
            locale: None,
        }
    }
}

impl LedgerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `LEDGER_DATABASE`, `LEDGER_CURRENCY_PREFIX` and the first
    /// non-empty of `LEDGER_LOCALE`, `LC_ALL`, `LC_MONETARY`, `LANG`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            database_path: non_empty("LEDGER_DATABASE")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            // an explicitly empty prefix is allowed
            currency_prefix: lookup("LEDGER_CURRENCY_PREFIX").unwrap_or(defaults.currency_prefix),
            locale: LOCALE_VARIABLES.iter().find_map(|key| non_empty(*key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = LedgerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.currency_prefix, "Rp ");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            ("LEDGER_DATABASE", "/tmp/expenses.db"),
            ("LEDGER_CURRENCY_PREFIX", "$"),
            ("LEDGER_LOCALE", "en_US.UTF-8"),
            ("LANG", "id_ID.UTF-8"),
        ]));
        assert_eq!(config.database_path, PathBuf::from("/tmp/expenses.db"));
        assert_eq!(config.currency_prefix, "$");
        assert_eq!(config.locale.as_deref(), Some("en_US.UTF-8"));
    }

    #[test]
    fn test_locale_precedence_skips_empty_values() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            ("LC_ALL", ""),
            ("LC_MONETARY", "de_DE.UTF-8"),
            ("LANG", "en_US.UTF-8"),
        ]));
        assert_eq!(config.locale.as_deref(), Some("de_DE.UTF-8"));
    }
}
