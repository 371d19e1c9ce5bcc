//! Conversation sessions and slot persistence.
//!
//! The engine is pure with respect to conversation state: everything
//! per-chat lives in a [`ChatSession`] passed into each turn. Only the slot
//! record is durable; `last_question` is one-turn context and is never
//! persisted.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;

use crate::dialogue::Phase;
use crate::dst::slots::OrderSlots;
use crate::dst::OrderTracker;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage failed: {0}")]
    Storage(String),
}

/// Per-conversation state.
#[derive(Debug, Default)]
pub struct ChatSession {
    pub id: String,
    pub phase: Phase,
    pub tracker: OrderTracker,
    /// The slot question asked last turn, for one-turn disambiguation.
    pub last_question: Option<String>,
    /// Our most recent reply, mined by the escalation layer.
    pub last_reply: Option<String>,
}

impl ChatSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Resume a conversation from its persisted slot record.
    pub fn resume(id: impl Into<String>, slots: OrderSlots) -> Self {
        let phase = if !slots.missing().is_empty() && slots != OrderSlots::default() {
            Phase::Collecting
        } else if slots.is_complete() {
            Phase::Confirming
        } else {
            Phase::Idle
        };
        Self {
            id: id.into(),
            phase,
            tracker: OrderTracker::new(slots),
            last_question: None,
            last_reply: None,
        }
    }
}

/// Durable storage for the per-conversation slot record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: &str) -> Result<Option<OrderSlots>, SessionError>;
    async fn save(&self, id: &str, slots: &OrderSlots) -> Result<(), SessionError>;
    async fn remove(&self, id: &str) -> Result<(), SessionError>;
}

/// Process-local store. Writes replace the whole record under one lock
/// acquisition, so a concurrent reload of the same conversation never sees
/// a half-written record.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    records: RwLock<HashMap<String, OrderSlots>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &str) -> Result<Option<OrderSlots>, SessionError> {
        Ok(self.records.read().get(id).cloned())
    }

    async fn save(&self, id: &str, slots: &OrderSlots) -> Result<(), SessionError> {
        self.records.write().insert(id.to_string(), slots.clone());
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), SessionError> {
        self.records.write().remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dst::slots::SlotKey;

    #[tokio::test]
    async fn test_store_round_trip() {
        let store = InMemorySessionStore::new();
        let mut slots = OrderSlots::default();
        slots.set(SlotKey::Sell, "BTC".to_string());

        store.save("chat-1", &slots).await.unwrap();
        assert_eq!(store.load("chat-1").await.unwrap(), Some(slots));
        assert_eq!(store.load("chat-2").await.unwrap(), None);

        store.remove("chat-1").await.unwrap();
        assert_eq!(store.load("chat-1").await.unwrap(), None);
    }

    #[test]
    fn test_resume_infers_phase_from_slots() {
        assert_eq!(
            ChatSession::resume("a", OrderSlots::default()).phase,
            Phase::Idle
        );

        let mut partial = OrderSlots::default();
        partial.set(SlotKey::Sell, "ETH".to_string());
        assert_eq!(ChatSession::resume("b", partial).phase, Phase::Collecting);

        let mut full = OrderSlots::default();
        for key in SlotKey::ALL {
            full.set(key, "1".to_string());
        }
        assert_eq!(ChatSession::resume("c", full).phase, Phase::Confirming);
    }
}
