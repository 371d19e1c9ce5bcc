//! Exemplar utterances used by the similarity fallback.
//!
//! Each exemplar is a real phrasing of a stop-order request with the slot
//! values a correct extraction would produce. Symbols are stored in
//! canonical uppercase form and thresholds without a percent sign.

use serde::{Deserialize, Serialize};

/// A labelled example utterance. `None` means the utterance does not
/// mention that slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exemplar {
    pub utterance: String,
    #[serde(default)]
    pub sell: Option<String>,
    #[serde(default)]
    pub buy: Option<String>,
    #[serde(default)]
    pub threshold: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

impl Exemplar {
    fn new(
        utterance: &str,
        sell: Option<&str>,
        buy: Option<&str>,
        threshold: Option<&str>,
        amount: Option<&str>,
    ) -> Self {
        Self {
            utterance: utterance.to_string(),
            sell: sell.map(|s| s.to_string()),
            buy: buy.map(|s| s.to_string()),
            threshold: threshold.map(|s| s.to_string()),
            amount: amount.map(|s| s.to_string()),
        }
    }
}

/// The exemplar collection, replaceable from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExemplarSet {
    #[serde(default = "default_exemplars")]
    pub exemplars: Vec<Exemplar>,
}

impl Default for ExemplarSet {
    fn default() -> Self {
        Self {
            exemplars: default_exemplars(),
        }
    }
}

fn default_exemplars() -> Vec<Exemplar> {
    vec![
        Exemplar::new(
            "Hi can you create a stop order to protect my tokenA for TokenB i want to sell 15 token A when stop-loss hits 15%",
            Some("TOKENA"),
            Some("TOKENB"),
            Some("15"),
            Some("15"),
        ),
        Exemplar::new(
            "protect my usdc and sell them for receiving usdt at 50% loss",
            Some("USDC"),
            Some("USDT"),
            Some("50"),
            None,
        ),
        Exemplar::new(
            "stop order create 200 usdc sell receive DAI 50 loss % 45",
            Some("USDC"),
            Some("DAI"),
            Some("45"),
            Some("200"),
        ),
        Exemplar::new(
            "lets create a stop order which protects my Xai for Aave when loss % drops to 12%",
            Some("XAI"),
            Some("AAVE"),
            Some("12"),
            None,
        ),
        Exemplar::new(
            "sell my eurs to at 40% loss",
            Some("EURS"),
            None,
            Some("40"),
            None,
        ),
        Exemplar::new(
            "stop order for xavi buy me Pepe instead",
            Some("XAVI"),
            Some("PEPE"),
            None,
            None,
        ),
        Exemplar::new(
            "lets create a stop order sell my usdt to get usdc when loss is 20%",
            Some("USDT"),
            Some("USDC"),
            Some("20"),
            None,
        ),
        Exemplar::new(
            "can you protect my tokens i want wbtc to be sold for a loss of 20% and buy weth",
            Some("WBTC"),
            Some("WETH"),
            Some("20"),
            None,
        ),
        Exemplar::new(
            "set up a stop loss for my ETH, sell 100 tokens for USDC when it drops 25%",
            Some("ETH"),
            Some("USDC"),
            Some("25"),
            Some("100"),
        ),
        Exemplar::new(
            "I need protection on my MATIC holdings, convert to DAI if loss reaches 30%",
            Some("MATIC"),
            Some("DAI"),
            Some("30"),
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_has_ten_exemplars() {
        let set = ExemplarSet::default();
        assert_eq!(set.exemplars.len(), 10);
    }

    #[test]
    fn test_symbols_are_canonical() {
        let set = ExemplarSet::default();
        for exemplar in &set.exemplars {
            for symbol in exemplar.sell.iter().chain(exemplar.buy.iter()) {
                assert_eq!(*symbol, symbol.to_uppercase(), "{}", exemplar.utterance);
            }
            if let Some(threshold) = &exemplar.threshold {
                assert!(!threshold.contains('%'), "{}", exemplar.utterance);
            }
        }
    }
}
