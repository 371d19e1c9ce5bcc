//! Dialogue state tracking: slot extraction and ranked evidence merging.
//!
//! Every value that reaches a slot carries the evidence source that produced
//! it. Within one turn sources are ranked; a stronger source may overwrite a
//! weaker one's finding, a weaker source only fills gaps. Across turns the
//! [`OrderTracker`] applies the merged findings to the conversation slots
//! and keeps a change ledger.

pub mod context;
pub mod exemplar;
pub mod extractor;
pub mod normalize;
pub mod slots;

use chrono::{DateTime, Utc};
use serde::Serialize;

use self::slots::{OrderSlots, SlotKey};

/// Where a slot value came from, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeSource {
    PatternCascade,
    Exemplar,
    ContextHint,
    EscalationAnswer,
    ReplyMining,
    /// State machine actions (confirmation, cancellation). Never produces
    /// findings, only ledger entries for slot wipes.
    Dialogue,
}

impl ChangeSource {
    fn rank(self) -> u8 {
        match self {
            ChangeSource::PatternCascade => 5,
            ChangeSource::Exemplar => 4,
            ChangeSource::ContextHint => 3,
            ChangeSource::EscalationAnswer => 2,
            ChangeSource::ReplyMining => 1,
            ChangeSource::Dialogue => 0,
        }
    }
}

/// A single extracted slot value with its provenance. Values are always
/// non-empty; emptiness is represented by the finding's absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub value: String,
    pub source: ChangeSource,
}

/// The partial slot set produced by one turn's extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub sell: Option<Finding>,
    pub buy: Option<Finding>,
    pub amount: Option<Finding>,
    pub threshold: Option<Finding>,
}

impl Extraction {
    pub fn get(&self, key: SlotKey) -> Option<&Finding> {
        self.slot(key).as_ref()
    }

    pub fn is_empty(&self) -> bool {
        SlotKey::ALL.into_iter().all(|key| self.get(key).is_none())
    }

    /// Offer a value for a slot. An empty value is discarded. An occupied
    /// slot is replaced only by a strictly stronger source; an equal or
    /// weaker source only fills gaps, which is what makes "first structural
    /// match wins" hold inside each cascade.
    pub fn offer(&mut self, key: SlotKey, value: impl Into<String>, source: ChangeSource) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        let slot = self.slot_mut(key);
        let replace = match slot {
            Some(existing) => source.rank() > existing.source.rank(),
            None => true,
        };
        if replace {
            tracing::debug!(slot = key.name(), %value, ?source, "slot finding");
            *slot = Some(Finding { value, source });
        }
    }

    /// Merge another extraction in, slot by slot, under the same ranking
    /// rules as [`offer`](Self::offer).
    pub fn absorb(&mut self, other: Extraction) {
        for key in SlotKey::ALL {
            if let Some(finding) = other.get(key) {
                self.offer(key, finding.value.clone(), finding.source);
            }
        }
    }

    fn slot(&self, key: SlotKey) -> &Option<Finding> {
        match key {
            SlotKey::Sell => &self.sell,
            SlotKey::Buy => &self.buy,
            SlotKey::Amount => &self.amount,
            SlotKey::Threshold => &self.threshold,
        }
    }

    fn slot_mut(&mut self, key: SlotKey) -> &mut Option<Finding> {
        match key {
            SlotKey::Sell => &mut self.sell,
            SlotKey::Buy => &mut self.buy,
            SlotKey::Amount => &mut self.amount,
            SlotKey::Threshold => &mut self.threshold,
        }
    }
}

/// Accepts positive decimal amounts.
pub(crate) fn valid_amount(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(|n| n > 0.0)
}

/// Accepts loss percentages in (0, 100].
pub(crate) fn valid_threshold(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(|n| n > 0.0 && n <= 100.0)
}

/// One recorded slot mutation.
#[derive(Debug, Clone, Serialize)]
pub struct StateChange {
    pub slot: &'static str,
    pub previous: String,
    pub current: String,
    pub source: ChangeSource,
    pub at: DateTime<Utc>,
}

/// Owns a conversation's slots and the ledger of how they changed.
#[derive(Debug, Clone, Default)]
pub struct OrderTracker {
    slots: OrderSlots,
    changes: Vec<StateChange>,
}

impl OrderTracker {
    pub fn new(slots: OrderSlots) -> Self {
        Self {
            slots,
            changes: Vec::new(),
        }
    }

    pub fn slots(&self) -> &OrderSlots {
        &self.slots
    }

    pub fn changes(&self) -> &[StateChange] {
        &self.changes
    }

    /// Apply one turn's merged extraction. A finding overwrites a filled
    /// slot (findings are never empty, so a filled slot is never cleared
    /// this way); changed keys are returned in question order.
    pub fn apply(&mut self, extraction: &Extraction) -> Vec<SlotKey> {
        let mut changed = Vec::new();
        for key in SlotKey::ALL {
            let Some(finding) = extraction.get(key) else {
                continue;
            };
            let previous = self.slots.get(key).to_string();
            if previous == finding.value {
                continue;
            }
            self.slots.set(key, finding.value.clone());
            self.changes.push(StateChange {
                slot: key.name(),
                previous,
                current: finding.value.clone(),
                source: finding.source,
                at: Utc::now(),
            });
            changed.push(key);
        }
        if !changed.is_empty() {
            tracing::debug!(?changed, slots = ?self.slots, "slots updated");
        }
        changed
    }

    /// Clear all slots, recording the wipe in the ledger.
    pub fn reset(&mut self, source: ChangeSource) {
        for key in SlotKey::ALL {
            let previous = self.slots.get(key).to_string();
            if previous.is_empty() {
                continue;
            }
            self.changes.push(StateChange {
                slot: key.name(),
                previous,
                current: String::new(),
                source,
                at: Utc::now(),
            });
        }
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_keeps_first_match_within_a_source() {
        let mut extraction = Extraction::default();
        extraction.offer(SlotKey::Sell, "BTC", ChangeSource::PatternCascade);
        extraction.offer(SlotKey::Sell, "ETH", ChangeSource::PatternCascade);
        assert_eq!(extraction.get(SlotKey::Sell).unwrap().value, "BTC");
    }

    #[test]
    fn test_stronger_source_overwrites_weaker() {
        let mut extraction = Extraction::default();
        extraction.offer(SlotKey::Buy, "DAI", ChangeSource::Exemplar);
        extraction.offer(SlotKey::Buy, "USDC", ChangeSource::PatternCascade);
        assert_eq!(extraction.get(SlotKey::Buy).unwrap().value, "USDC");
    }

    #[test]
    fn test_weaker_source_only_fills_gaps() {
        let mut extraction = Extraction::default();
        extraction.offer(SlotKey::Threshold, "15", ChangeSource::EscalationAnswer);
        extraction.offer(SlotKey::Threshold, "99", ChangeSource::ReplyMining);
        extraction.offer(SlotKey::Amount, "10", ChangeSource::ReplyMining);
        assert_eq!(extraction.get(SlotKey::Threshold).unwrap().value, "15");
        assert_eq!(extraction.get(SlotKey::Amount).unwrap().value, "10");
    }

    #[test]
    fn test_empty_values_are_discarded() {
        let mut extraction = Extraction::default();
        extraction.offer(SlotKey::Sell, "", ChangeSource::PatternCascade);
        assert!(extraction.is_empty());
    }

    #[test]
    fn test_tracker_never_clears_a_filled_slot() {
        let mut tracker = OrderTracker::default();
        let mut first = Extraction::default();
        first.offer(SlotKey::Sell, "BTC", ChangeSource::PatternCascade);
        tracker.apply(&first);

        // a later turn that found nothing for sell leaves it untouched
        let mut second = Extraction::default();
        second.offer(SlotKey::Buy, "", ChangeSource::PatternCascade);
        let changed = tracker.apply(&second);
        assert!(changed.is_empty());
        assert_eq!(tracker.slots().sell_currency, "BTC");
        assert_eq!(tracker.slots().buy_currency, "");
    }

    #[test]
    fn test_ledger_records_overwrites() {
        let mut tracker = OrderTracker::default();
        let mut first = Extraction::default();
        first.offer(SlotKey::Threshold, "10", ChangeSource::PatternCascade);
        tracker.apply(&first);
        let mut second = Extraction::default();
        second.offer(SlotKey::Threshold, "20", ChangeSource::PatternCascade);
        tracker.apply(&second);

        assert_eq!(tracker.changes().len(), 2);
        assert_eq!(tracker.changes()[1].previous, "10");
        assert_eq!(tracker.changes()[1].current, "20");
        assert_eq!(tracker.slots().threshold, "20");
    }
}
