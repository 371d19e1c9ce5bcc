//! Slot-filling dialogue engine for conversational stop orders.
//!
//! Turns free-form chat into a four-field stop order (sell currency, buy
//! currency, amount, loss threshold). Extraction is rule-first: an ordered
//! pattern cascade, an exemplar similarity fallback, and one-turn context
//! disambiguation, with an optional completion-model escalation when the
//! local pipeline leaves slots unresolved. A small state machine drives the
//! collect / confirm conversation flow.

pub mod dialogue;
pub mod dst;
pub mod escalation;
pub mod session;

pub use dialogue::{DialogueEngine, Phase, TurnOutcome};
pub use dst::slots::{OrderSlots, SlotKey};
pub use dst::{ChangeSource, Extraction, Finding, OrderTracker, StateChange};
pub use session::{ChatSession, InMemorySessionStore, SessionError, SessionStore};
