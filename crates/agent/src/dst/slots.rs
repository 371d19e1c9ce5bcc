//! The four order slots and their persisted record form.

use serde::{Deserialize, Serialize};

/// The order slots, in the fixed question order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    Sell,
    Buy,
    Amount,
    Threshold,
}

impl SlotKey {
    /// Question order: sell, buy, amount, threshold.
    pub const ALL: [SlotKey; 4] = [
        SlotKey::Sell,
        SlotKey::Buy,
        SlotKey::Amount,
        SlotKey::Threshold,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SlotKey::Sell => "sell_currency",
            SlotKey::Buy => "buy_currency",
            SlotKey::Amount => "amount",
            SlotKey::Threshold => "threshold",
        }
    }
}

/// One conversation's order slots. An empty string means unset; this is
/// also the persisted JSON contract (four string keys, empty = unset).
///
/// A slot only ever holds a value that already passed normalization or
/// numeric validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSlots {
    #[serde(default)]
    pub sell_currency: String,
    #[serde(default)]
    pub buy_currency: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub threshold: String,
}

impl OrderSlots {
    pub fn get(&self, key: SlotKey) -> &str {
        match key {
            SlotKey::Sell => &self.sell_currency,
            SlotKey::Buy => &self.buy_currency,
            SlotKey::Amount => &self.amount,
            SlotKey::Threshold => &self.threshold,
        }
    }

    pub fn set(&mut self, key: SlotKey, value: String) {
        let slot = match key {
            SlotKey::Sell => &mut self.sell_currency,
            SlotKey::Buy => &mut self.buy_currency,
            SlotKey::Amount => &mut self.amount,
            SlotKey::Threshold => &mut self.threshold,
        };
        *slot = value;
    }

    pub fn is_set(&self, key: SlotKey) -> bool {
        !self.get(key).is_empty()
    }

    /// Missing slots in question order.
    pub fn missing(&self) -> Vec<SlotKey> {
        SlotKey::ALL
            .into_iter()
            .filter(|key| !self.is_set(*key))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        SlotKey::ALL.into_iter().all(|key| self.is_set(key))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_follows_question_order() {
        let mut slots = OrderSlots::default();
        slots.set(SlotKey::Buy, "USDC".to_string());
        assert_eq!(
            slots.missing(),
            vec![SlotKey::Sell, SlotKey::Amount, SlotKey::Threshold]
        );
    }

    #[test]
    fn test_record_round_trip_uses_empty_string_for_unset() {
        let mut slots = OrderSlots::default();
        slots.set(SlotKey::Sell, "BTC".to_string());
        let json = serde_json::to_value(&slots).unwrap();
        assert_eq!(json["sell_currency"], "BTC");
        assert_eq!(json["buy_currency"], "");
        assert_eq!(json["amount"], "");
        assert_eq!(json["threshold"], "");

        let restored: OrderSlots = serde_json::from_value(json).unwrap();
        assert_eq!(restored, slots);
    }

    #[test]
    fn test_complete_requires_all_four() {
        let mut slots = OrderSlots::default();
        for key in SlotKey::ALL {
            assert!(!slots.is_complete());
            slots.set(key, "x".to_string());
        }
        assert!(slots.is_complete());
    }
}
