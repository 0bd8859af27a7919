//! Display name to ISO 4217 code lookup for the currencies listed on the
//! upstream rate table.

use std::collections::HashMap;
use std::sync::LazyLock;

static CURRENCY_CODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("US Dollar", "USD"),
        ("Euro", "EUR"),
        ("British Pound", "GBP"),
        ("Indian Rupee", "INR"),
        ("Australian Dollar", "AUD"),
        ("Canadian Dollar", "CAD"),
        ("Swiss Franc", "CHF"),
        ("Malaysian Ringgit", "MYR"),
        ("Japanese Yen", "JPY"),
        ("Chinese Yuan Renminbi", "CNY"),
        ("Indonesian Rupiah", "IDR"),
        ("Thai Baht", "THB"),
        ("Hong Kong Dollar", "HKD"),
        ("New Zealand Dollar", "NZD"),
        ("Philippine Peso", "PHP"),
        ("Vietnamese Dong", "VND"),
        ("Korean Won", "KRW"),
        ("Taiwan Dollar", "TWD"),
    ])
});

/// Returns the ISO code for a currency name exactly as the rate table prints it.
pub fn currency_code(name: &str) -> Option<&'static str> {
    CURRENCY_CODES.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_resolve() {
        assert_eq!(currency_code("US Dollar"), Some("USD"));
        assert_eq!(currency_code("Chinese Yuan Renminbi"), Some("CNY"));
        assert_eq!(currency_code("Indonesian Rupiah"), Some("IDR"));
        assert_eq!(currency_code("Taiwan Dollar"), Some("TWD"));
    }

    #[test]
    fn test_unknown_names_do_not_resolve() {
        assert_eq!(currency_code("Bitcoin"), None);
        // Lookup is exact; the table text is trimmed before it gets here
        assert_eq!(currency_code("us dollar"), None);
        assert_eq!(currency_code(" US Dollar"), None);
    }

    #[test]
    fn test_mapping_has_one_entry_per_currency() {
        assert_eq!(CURRENCY_CODES.len(), 18);
    }
}
