//! Currency alias table and structural stop-list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps free-text currency mentions to canonical uppercase symbols.
///
/// The stop-list holds grammatical markers that must never be mistaken for
/// a currency ("sell", "for", "stop", ...). Both tables are read-only at
/// runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyTable {
    /// Lowercase alias -> canonical uppercase symbol.
    #[serde(default = "default_aliases")]
    pub aliases: HashMap<String, String>,
    /// Lowercase structural words rejected outright.
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self {
            aliases: default_aliases(),
            stop_words: default_stop_words(),
        }
    }
}

impl CurrencyTable {
    /// Look up an alias (case-insensitive). Returns the canonical symbol.
    pub fn alias(&self, token: &str) -> Option<&str> {
        self.aliases.get(&token.to_lowercase()).map(String::as_str)
    }

    /// Whether the token is a structural word, not a currency.
    pub fn is_stop_word(&self, token: &str) -> bool {
        let lower = token.to_lowercase();
        self.stop_words.iter().any(|w| *w == lower)
    }
}

fn default_stop_words() -> Vec<String> {
    [
        "stop", "order", "loss", "buy", "sell", "for", "and", "the", "with",
        "from", "into", "swap", "protect",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_aliases() -> HashMap<String, String> {
    let pairs: &[(&str, &str)] = &[
        ("usdc", "USDC"),
        ("usd coin", "USDC"),
        ("usdt", "USDT"),
        ("tether", "USDT"),
        ("dai", "DAI"),
        ("ethereum", "ETH"),
        ("eth", "ETH"),
        ("bitcoin", "BTC"),
        ("btc", "BTC"),
        ("matic", "MATIC"),
        ("polygon", "MATIC"),
        ("chainlink", "LINK"),
        ("link", "LINK"),
        ("solana", "SOL"),
        ("sol", "SOL"),
        ("binance", "BNB"),
        ("bnb", "BNB"),
        ("cardano", "ADA"),
        ("ada", "ADA"),
        ("avalanche", "AVAX"),
        ("avax", "AVAX"),
        ("polkadot", "DOT"),
        ("dot", "DOT"),
        ("uniswap", "UNI"),
        ("uni", "UNI"),
        ("algorand", "ALGO"),
        ("algo", "ALGO"),
        ("cosmos", "ATOM"),
        ("atom", "ATOM"),
        ("fantom", "FTM"),
        ("ftm", "FTM"),
        ("near", "NEAR"),
        ("sandbox", "SAND"),
        ("sand", "SAND"),
        ("decentraland", "MANA"),
        ("mana", "MANA"),
        ("dogecoin", "DOGE"),
        ("doge", "DOGE"),
        ("litecoin", "LTC"),
        ("ltc", "LTC"),
        ("cronos", "CRO"),
        ("cro", "CRO"),
        ("shiba", "SHIB"),
        ("shib", "SHIB"),
        ("compound", "COMP"),
        ("comp", "COMP"),
        ("graph", "GRT"),
        ("grt", "GRT"),
        ("aave", "AAVE"),
        ("luna", "LUNA"),
        ("internet computer", "ICP"),
        ("icp", "ICP"),
        ("flow", "FLOW"),
        ("theta", "THETA"),
        ("enjin", "ENJ"),
        ("enj", "ENJ"),
        ("vechain", "VET"),
        ("vet", "VET"),
        ("hedera", "HBAR"),
        ("hbar", "HBAR"),
        ("wrapped bitcoin", "WBTC"),
        ("wbtc", "WBTC"),
        ("wrapped ethereum", "WETH"),
        ("weth", "WETH"),
        ("xai", "XAI"),
        ("euros", "EURS"),
        ("eurs", "EURS"),
        ("xavi", "XAVI"),
        ("pepe", "PEPE"),
        ("busd", "BUSD"),
        ("tokena", "TOKENA"),
        ("tokenb", "TOKENB"),
    ];

    pairs
        .iter()
        .map(|(alias, symbol)| (alias.to_string(), symbol.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_lookup() {
        let table = CurrencyTable::default();
        assert_eq!(table.alias("tether"), Some("USDT"));
        assert_eq!(table.alias("Ethereum"), Some("ETH"));
        assert_eq!(table.alias("zzz"), None);
    }

    #[test]
    fn test_stop_words() {
        let table = CurrencyTable::default();
        assert!(table.is_stop_word("SELL"));
        assert!(table.is_stop_word("protect"));
        assert!(!table.is_stop_word("usdc"));
    }
}
