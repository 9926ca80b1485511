//! Currency rendering for ledger listings.
//!
//! Two strategies exist: grouping by the conventions of a known locale, or a
//! manual dot-grouped fallback. [`CurrencyFormatter::probe`] picks one up
//! front so formatting itself never fails.

use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_PREFIX: &str = "Rp ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleConventions {
    pub name: &'static str,
    pub thousands_separator: &'static str,
}

const KNOWN_LOCALES: &[LocaleConventions] = &[
    LocaleConventions::new("id_ID", "."),
    LocaleConventions::new("de_DE", "."),
    LocaleConventions::new("nl_NL", "."),
    LocaleConventions::new("es_ES", "."),
    LocaleConventions::new("en_US", ","),
    LocaleConventions::new("en_GB", ","),
    LocaleConventions::new("en_AU", ","),
    LocaleConventions::new("fr_FR", " "),
];

impl LocaleConventions {
    const fn new(name: &'static str, thousands_separator: &'static str) -> Self {
        Self {
            name,
            thousands_separator,
        }
    }

    /// Looks up a POSIX locale name such as `id_ID.UTF-8` or `en_US@euro`.
    pub fn lookup(locale_name: &str) -> Option<Self> {
        let base = locale_name
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        KNOWN_LOCALES
            .iter()
            .find(|conventions| conventions.name.eq_ignore_ascii_case(base))
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyFormatter {
    Locale {
        prefix: String,
        conventions: LocaleConventions,
    },
    Manual {
        prefix: String,
    },
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::Manual {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl CurrencyFormatter {
    /// Selects the locale strategy when the locale is known, the manual one otherwise.
    pub fn probe(prefix: &str, locale_name: Option<&str>) -> Self {
        match locale_name.and_then(LocaleConventions::lookup) {
            Some(conventions) => {
                tracing::debug!(
                    locale = conventions.name,
                    "using locale currency formatting"
                );
                Self::Locale {
                    prefix: prefix.to_string(),
                    conventions,
                }
            }
            None => {
                tracing::debug!(
                    ?locale_name,
                    "locale unavailable, using manual currency formatting"
                );
                Self::Manual {
                    prefix: prefix.to_string(),
                }
            }
        }
    }

    pub fn is_locale_aware(&self) -> bool {
        matches!(self, Self::Locale { .. })
    }

    pub fn format(&self, amount: Decimal) -> String {
        match self {
            // cents are rendered then dropped, so 1999.999 shows as 2.000
            Self::Locale { prefix, conventions } => {
                let whole = amount.round_dp(2).trunc();
                let grouped = group_whole_units(whole, conventions.thousands_separator);
                format!("{}{}", prefix, grouped)
            }
            Self::Manual { prefix } => {
                let whole =
                    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
                format!("{}{}", prefix, group_whole_units(whole, "."))
            }
        }
    }
}

fn group_whole_units(whole: Decimal, separator: &str) -> String {
    let rendered = whole.abs().to_string();
    let digits = rendered.split('.').next().unwrap_or_default();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }

    if whole.is_sign_negative() && !whole.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
