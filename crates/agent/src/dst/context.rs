//! One-turn context disambiguation.
//!
//! A bare "15" or "usdc" answer is meaningless on its own; the question we
//! just asked tells us which slot it belongs to.

use regex::Regex;

use super::normalize::CurrencyNormalizer;
use super::slots::SlotKey;

/// Resolves bare-number and bare-currency answers against the previously
/// asked slot question.
#[derive(Debug, Clone)]
pub struct ContextDisambiguator {
    bare_number: Regex,
    bare_currency: Regex,
}

impl Default for ContextDisambiguator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextDisambiguator {
    pub fn new() -> Self {
        Self {
            bare_number: Regex::new(r"(?i)^(?:about\s+)?(\d+(?:\.\d+)?)\s*%?$").unwrap(),
            bare_currency: Regex::new(r"^([A-Za-z]{3,})$").unwrap(),
        }
    }

    /// Returns the slot the answer resolves to, or `None` to let the
    /// cascade continue. The number branch is checked first: the amount
    /// question mentions both "how many" and "selling", and a numeric
    /// answer to it must land on amount, not sell.
    pub fn disambiguate(
        &self,
        utterance: &str,
        last_question: &str,
        normalizer: &CurrencyNormalizer,
    ) -> Option<(SlotKey, String)> {
        let question = last_question.to_lowercase();
        let trimmed = utterance.trim();

        if let Some(caps) = self.bare_number.captures(trimmed) {
            let value = caps[1].to_string();
            if question.contains("threshold") || question.contains("rate") {
                return Some((SlotKey::Threshold, value));
            }
            if question.contains("how many") || question.contains("amount") {
                return Some((SlotKey::Amount, value));
            }
        }

        if let Some(caps) = self.bare_currency.captures(trimmed) {
            let symbol = normalizer.normalize(&caps[1])?;
            if question.contains("selling") || question.contains("sell") {
                return Some((SlotKey::Sell, symbol));
            }
            if question.contains("buying") || question.contains("buy") {
                return Some((SlotKey::Buy, symbol));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapguard_config::CurrencyTable;

    fn fixtures() -> (ContextDisambiguator, CurrencyNormalizer) {
        (
            ContextDisambiguator::new(),
            CurrencyNormalizer::new(CurrencyTable::default()),
        )
    }

    #[test]
    fn test_number_after_amount_question_is_amount() {
        let (d, n) = fixtures();
        assert_eq!(
            d.disambiguate("100", "How many USDC are you selling?", &n),
            Some((SlotKey::Amount, "100".to_string()))
        );
    }

    #[test]
    fn test_number_after_rate_question_is_threshold() {
        let (d, n) = fixtures();
        assert_eq!(
            d.disambiguate("about 12.5%", "What's your target exchange rate?", &n),
            Some((SlotKey::Threshold, "12.5".to_string()))
        );
    }

    #[test]
    fn test_currency_after_buy_question_is_buy() {
        let (d, n) = fixtures();
        assert_eq!(
            d.disambiguate("usdt", "What currency do you want to buy with your ETH?", &n),
            Some((SlotKey::Buy, "USDT".to_string()))
        );
    }

    #[test]
    fn test_currency_after_sell_question_is_sell() {
        let (d, n) = fixtures();
        assert_eq!(
            d.disambiguate("Bitcoin", "Which currency are you selling?", &n),
            Some((SlotKey::Sell, "BTC".to_string()))
        );
    }

    #[test]
    fn test_unrelated_question_yields_nothing() {
        let (d, n) = fixtures();
        assert_eq!(d.disambiguate("100", "Anything else I can do?", &n), None);
        assert_eq!(d.disambiguate("sell 100 btc", "Which currency are you selling?", &n), None);
    }

    #[test]
    fn test_stop_word_answer_is_rejected() {
        let (d, n) = fixtures();
        assert_eq!(d.disambiguate("swap", "Which currency are you selling?", &n), None);
    }
}
