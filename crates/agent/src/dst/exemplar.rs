//! Exemplar similarity fallback.

use swapguard_config::{Exemplar, ExemplarSet};

use super::slots::SlotKey;
use super::{ChangeSource, Extraction};

/// Matches an utterance against labelled reference utterances by bag-of-words
/// overlap. Cheap pre-seeding for phrasings the pattern cascade handles
/// poorly; the cascade outranks anything found here.
#[derive(Debug, Clone)]
pub struct ExemplarMatcher {
    exemplars: Vec<Exemplar>,
}

impl ExemplarMatcher {
    pub fn new(set: ExemplarSet) -> Self {
        Self {
            exemplars: set.exemplars,
        }
    }

    /// Fill gaps in `extraction` from the first exemplar (in table order)
    /// whose overlap ratio exceeds 0.5 and whose labelled currencies all
    /// literally appear in the utterance. The currency guard rejects
    /// topically similar requests about different coins.
    pub fn pre_seed(&self, utterance: &str, extraction: &mut Extraction) {
        let lower = utterance.to_lowercase();
        let input_words: Vec<&str> = lower.split_whitespace().collect();
        if input_words.is_empty() {
            return;
        }

        for exemplar in &self.exemplars {
            let reference = exemplar.utterance.to_lowercase();
            let reference_words: Vec<&str> = reference.split_whitespace().collect();
            let common = input_words
                .iter()
                .filter(|word| reference_words.contains(word))
                .count();
            let ratio = common as f64 / input_words.len().max(reference_words.len()) as f64;
            if ratio <= 0.5 {
                continue;
            }

            let currencies_present = exemplar
                .sell
                .iter()
                .chain(exemplar.buy.iter())
                .all(|symbol| lower.contains(&symbol.to_lowercase()));
            if !currencies_present {
                tracing::debug!(
                    reference = %exemplar.utterance,
                    ratio,
                    "exemplar skipped, labelled currencies absent from utterance"
                );
                continue;
            }

            tracing::debug!(reference = %exemplar.utterance, ratio, "exemplar matched");
            if let Some(sell) = &exemplar.sell {
                extraction.offer(SlotKey::Sell, sell.clone(), ChangeSource::Exemplar);
            }
            if let Some(buy) = &exemplar.buy {
                extraction.offer(SlotKey::Buy, buy.clone(), ChangeSource::Exemplar);
            }
            if let Some(threshold) = &exemplar.threshold {
                extraction.offer(SlotKey::Threshold, threshold.clone(), ChangeSource::Exemplar);
            }
            if let Some(amount) = &exemplar.amount {
                extraction.offer(SlotKey::Amount, amount.clone(), ChangeSource::Exemplar);
            }
            return;
        }
    }
}
