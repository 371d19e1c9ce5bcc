//! Currency token normalization.

use swapguard_config::CurrencyTable;

/// Maps free-form currency mentions to canonical uppercase symbols.
///
/// Structural words ("sell", "for", "stop", ...) are rejected outright so
/// they can never be emitted as a slot value, known aliases map through the
/// table, and anything else is accepted as an ad-hoc symbol only when it is
/// a 3-5 letter alphabetic token.
#[derive(Debug, Clone)]
pub struct CurrencyNormalizer {
    table: CurrencyTable,
}

impl CurrencyNormalizer {
    pub fn new(table: CurrencyTable) -> Self {
        Self { table }
    }

    /// Normalize a candidate token. Returns `None` when the token is a
    /// structural word or does not look like a currency.
    pub fn normalize(&self, token: &str) -> Option<String> {
        let token = token.trim();
        if token.is_empty() || self.table.is_stop_word(token) {
            return None;
        }
        if let Some(symbol) = self.table.alias(token) {
            return Some(symbol.to_string());
        }
        let upper = token.to_uppercase();
        if (3..=5).contains(&upper.len()) && upper.chars().all(|c| c.is_ascii_uppercase()) {
            return Some(upper);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> CurrencyNormalizer {
        CurrencyNormalizer::new(CurrencyTable::default())
    }

    #[test]
    fn test_alias_lookup_is_case_insensitive() {
        let n = normalizer();
        assert_eq!(n.normalize("Ethereum").as_deref(), Some("ETH"));
        assert_eq!(n.normalize("usdc").as_deref(), Some("USDC"));
        assert_eq!(n.normalize("TETHER").as_deref(), Some("USDT"));
    }

    #[test]
    fn test_stop_words_never_become_currencies() {
        let n = normalizer();
        for word in ["stop", "ORDER", "Sell", "for", "protect", "swap"] {
            assert_eq!(n.normalize(word), None, "{word}");
        }
    }

    #[test]
    fn test_ad_hoc_symbols_need_three_to_five_letters() {
        let n = normalizer();
        assert_eq!(n.normalize("xrp").as_deref(), Some("XRP"));
        assert_eq!(n.normalize("zzzzz").as_deref(), Some("ZZZZZ"));
        assert_eq!(n.normalize("ab"), None);
        assert_eq!(n.normalize("toolong"), None);
        assert_eq!(n.normalize("usd1"), None);
    }

    #[test]
    fn test_idempotent_on_success() {
        let n = normalizer();
        for token in ["ethereum", "usdc", "xrp", "tokena"] {
            let first = n.normalize(token).unwrap();
            assert_eq!(n.normalize(&first).as_deref(), Some(first.as_str()));
        }
    }
}
