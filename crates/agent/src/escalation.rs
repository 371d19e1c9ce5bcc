//! Completion-model escalation.
//!
//! Invoked only when the local pipeline leaves slots unresolved. Two
//! evidence paths feed one ranked merge: a structured four-question query to
//! the completion backend, and mining our own previous reply for values it
//! implicitly committed to. Backend failure is always soft; the engine just
//! asks the user directly.

use std::sync::Arc;

use regex::Regex;
use swapguard_llm::CompletionClient;

use crate::dst::normalize::CurrencyNormalizer;
use crate::dst::slots::SlotKey;
use crate::dst::{valid_amount, valid_threshold, ChangeSource, Extraction};

pub struct Escalator {
    client: Arc<dyn CompletionClient>,
    answer_line: Regex,
    bracket_symbol: Regex,
    bracket_percent: Regex,
    bracket_number: Regex,
    assume_phrase: Regex,
    mentioned_percent: Regex,
}

impl Escalator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            answer_line: Regex::new(r"^\s*([1-4])[.)]\s*(.+?)\s*$").unwrap(),
            bracket_symbol: Regex::new(r"\(([A-Za-z]{3,5})\)").unwrap(),
            bracket_percent: Regex::new(r"\((\d+(?:\.\d+)?)%\)").unwrap(),
            bracket_number: Regex::new(r"\((\d+(?:\.\d+)?)\)").unwrap(),
            assume_phrase: Regex::new(r"(?i)assume\s+it'?s\s+([A-Za-z]{3,5}|\d+(?:\.\d+)?%?)")
                .unwrap(),
            mentioned_percent: Regex::new(r"(?i)you\s+mentioned\s+(\d+(?:\.\d+)?)%").unwrap(),
        }
    }

    /// Extract slots the local pipeline missed. `last_reply` is our own
    /// most recent free-text reply, mined as a secondary evidence source.
    pub async fn escalate(
        &self,
        utterance: &str,
        normalizer: &CurrencyNormalizer,
        last_reply: Option<&str>,
    ) -> Extraction {
        let mut extraction = Extraction::default();

        if self.client.is_available() {
            let prompt = build_prompt(utterance);
            match self.client.complete(&prompt).await {
                Ok(response) => self.parse_answers(&response, normalizer, &mut extraction),
                Err(error) => {
                    tracing::warn!(%error, "escalation backend failed, continuing without it");
                }
            }
        }

        if let Some(reply) = last_reply {
            self.mine_reply(reply, normalizer, &mut extraction);
        }

        extraction
    }

    /// Parse a four-line numbered response. Lines that do not parse as
    /// `<index>. <value>` are ignored; "null" means not provided. Every
    /// value revalidates before it may occupy a slot.
    fn parse_answers(
        &self,
        response: &str,
        normalizer: &CurrencyNormalizer,
        extraction: &mut Extraction,
    ) {
        for line in response.lines() {
            let Some(caps) = self.answer_line.captures(line) else {
                continue;
            };
            let value = caps[2].trim();
            if value.eq_ignore_ascii_case("null") {
                continue;
            }
            match &caps[1] {
                "1" => {
                    if let Some(symbol) = normalizer.normalize(value) {
                        extraction.offer(SlotKey::Sell, symbol, ChangeSource::EscalationAnswer);
                    }
                }
                "2" => {
                    if let Some(symbol) = normalizer.normalize(value) {
                        extraction.offer(SlotKey::Buy, symbol, ChangeSource::EscalationAnswer);
                    }
                }
                "3" => {
                    if valid_amount(value) {
                        extraction.offer(SlotKey::Amount, value, ChangeSource::EscalationAnswer);
                    }
                }
                "4" => {
                    let value = value.trim_end_matches('%');
                    if valid_threshold(value) {
                        extraction.offer(SlotKey::Threshold, value, ChangeSource::EscalationAnswer);
                    }
                }
                _ => {}
            }
        }
    }

    /// Mine a free-text assistant reply for values it committed to:
    /// bracketed `(SYMBOL)`, `(N%)`, `(N)` tokens and "assume it's X" /
    /// "you mentioned N%" phrasings. Fills only gaps the structured
    /// answers left open.
    fn mine_reply(
        &self,
        reply: &str,
        normalizer: &CurrencyNormalizer,
        extraction: &mut Extraction,
    ) {
        if let Some(caps) = self.bracket_percent.captures(reply) {
            if valid_threshold(&caps[1]) {
                extraction.offer(SlotKey::Threshold, &caps[1], ChangeSource::ReplyMining);
            }
        }
        if let Some(caps) = self.mentioned_percent.captures(reply) {
            if valid_threshold(&caps[1]) {
                extraction.offer(SlotKey::Threshold, &caps[1], ChangeSource::ReplyMining);
            }
        }
        if let Some(caps) = self.bracket_number.captures(reply) {
            if valid_amount(&caps[1]) {
                extraction.offer(SlotKey::Amount, &caps[1], ChangeSource::ReplyMining);
            }
        }

        let offer_currency = |symbol: String, extraction: &mut Extraction| {
            if extraction.sell.is_none() {
                extraction.offer(SlotKey::Sell, symbol, ChangeSource::ReplyMining);
            } else if extraction
                .sell
                .as_ref()
                .is_some_and(|f| f.value != symbol)
                && extraction.buy.is_none()
            {
                extraction.offer(SlotKey::Buy, symbol, ChangeSource::ReplyMining);
            }
        };

        for caps in self.bracket_symbol.captures_iter(reply) {
            if let Some(symbol) = normalizer.normalize(&caps[1]) {
                offer_currency(symbol, extraction);
            }
        }
        if let Some(caps) = self.assume_phrase.captures(reply) {
            let value = &caps[1];
            if value.chars().all(|c| c.is_ascii_alphabetic()) {
                if let Some(symbol) = normalizer.normalize(value) {
                    offer_currency(symbol, extraction);
                }
            } else {
                let value = value.trim_end_matches('%');
                if valid_threshold(value) {
                    extraction.offer(SlotKey::Threshold, value, ChangeSource::ReplyMining);
                }
            }
        }
    }
}

fn build_prompt(utterance: &str) -> String {
    format!(
        "You extract stop-order fields from a single chat message.\n\
         Answer the four questions about the message below. Reply with\n\
         exactly four lines, each `<number>. <value>`, writing `null`\n\
         when the message does not say.\n\n\
         1. Which currency is being sold? (ticker symbol)\n\
         2. Which currency should be bought? (ticker symbol)\n\
         3. How many units are being sold? (positive number)\n\
         4. At what loss percentage should the order trigger? (number in (0, 100])\n\n\
         Message: \"{utterance}\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapguard_config::CurrencyTable;
    use swapguard_llm::NoopCompletionClient;

    fn escalator() -> Escalator {
        Escalator::new(Arc::new(NoopCompletionClient))
    }

    fn normalizer() -> CurrencyNormalizer {
        CurrencyNormalizer::new(CurrencyTable::default())
    }

    #[test]
    fn test_numbered_answers_fill_validated_slots() {
        let e = escalator();
        let mut extraction = Extraction::default();
        e.parse_answers(
            "1. ethereum\n2. null\n3. 50\n4. 15%",
            &normalizer(),
            &mut extraction,
        );
        assert_eq!(extraction.get(SlotKey::Sell).unwrap().value, "ETH");
        assert!(extraction.get(SlotKey::Buy).is_none());
        assert_eq!(extraction.get(SlotKey::Amount).unwrap().value, "50");
        assert_eq!(extraction.get(SlotKey::Threshold).unwrap().value, "15");
    }

    #[test]
    fn test_malformed_lines_and_bad_values_are_ignored() {
        let e = escalator();
        let mut extraction = Extraction::default();
        e.parse_answers(
            "here you go\n1) sell\n3. -2\n4. 250",
            &normalizer(),
            &mut extraction,
        );
        // "sell" is a structural word, -2 is not positive, 250 is out of range
        assert!(extraction.is_empty());
    }

    #[test]
    fn test_reply_mining_finds_bracketed_values() {
        let e = escalator();
        let mut extraction = Extraction::default();
        e.mine_reply(
            "Sure, selling your Bitcoin (BTC) for Tether (USDT) at (12%) once (300) units move.",
            &normalizer(),
            &mut extraction,
        );
        assert_eq!(extraction.get(SlotKey::Sell).unwrap().value, "BTC");
        assert_eq!(extraction.get(SlotKey::Buy).unwrap().value, "USDT");
        assert_eq!(extraction.get(SlotKey::Threshold).unwrap().value, "12");
        assert_eq!(extraction.get(SlotKey::Amount).unwrap().value, "300");
    }

    #[test]
    fn test_structured_answers_outrank_reply_mining() {
        let e = escalator();
        let mut extraction = Extraction::default();
        e.parse_answers("4. 20", &normalizer(), &mut extraction);
        e.mine_reply("I'll assume it's 99%", &normalizer(), &mut extraction);
        assert_eq!(extraction.get(SlotKey::Threshold).unwrap().value, "20");
    }

    #[tokio::test]
    async fn test_unavailable_backend_degrades_to_reply_mining() {
        let e = escalator();
        let extraction = e
            .escalate("protect me", &normalizer(), Some("you mentioned 30% earlier"))
            .await;
        assert_eq!(extraction.get(SlotKey::Threshold).unwrap().value, "30");
        assert!(extraction.get(SlotKey::Sell).is_none());
    }
}
