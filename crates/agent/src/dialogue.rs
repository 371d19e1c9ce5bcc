//! The collect / confirm dialogue state machine.

use std::sync::Arc;

use swapguard_config::{DialogueConfig, Settings};
use swapguard_llm::CompletionClient;

use crate::dst::extractor::{ExtractionContext, PatternCascade};
use crate::dst::slots::{OrderSlots, SlotKey};
use crate::dst::ChangeSource;
use crate::escalation::Escalator;
use crate::session::ChatSession;

/// Where the conversation stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Collecting,
    Confirming,
}

/// The engine's reply for one turn. `order` carries the confirmed slot
/// snapshot on the turn the user accepts the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: String,
    pub order: Option<OrderSlots>,
}

pub struct DialogueEngine {
    cascade: PatternCascade,
    escalator: Escalator,
    client: Arc<dyn CompletionClient>,
    dialogue: DialogueConfig,
}

impl DialogueEngine {
    pub fn new(settings: &Settings, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            cascade: PatternCascade::new(
                settings.currencies.clone(),
                settings.exemplars.clone(),
            ),
            escalator: Escalator::new(Arc::clone(&client)),
            client,
            dialogue: settings.dialogue.clone(),
        }
    }

    /// Process one user utterance against one conversation. Runs to
    /// completion, including any escalation call, before the next turn for
    /// this session may begin; the `&mut` session enforces that.
    pub async fn handle_turn(&self, session: &mut ChatSession, utterance: &str) -> TurnOutcome {
        let utterance = utterance.trim();

        // "what was my order" while an order sits fully populated
        if session.phase != Phase::Collecting
            && session.tracker.slots().is_complete()
            && self.dialogue.is_order_query(utterance)
        {
            session.phase = Phase::Confirming;
            let reply = summarize(
                "Here are your current stop order details:",
                session.tracker.slots(),
            );
            return self.respond(session, reply, None);
        }

        if session.phase == Phase::Confirming && session.tracker.slots().is_complete() {
            if self.dialogue.is_confirm(utterance) {
                let order = session.tracker.slots().clone();
                session.tracker.reset(ChangeSource::Dialogue);
                session.phase = Phase::Idle;
                tracing::info!(session = %session.id, "order confirmed");
                let reply = self.dialogue.responses.order_confirmed.clone();
                return self.respond(session, reply, Some(order));
            }
            if self.dialogue.is_deny(utterance) {
                session.tracker.reset(ChangeSource::Dialogue);
                session.phase = Phase::Idle;
                let reply = self.dialogue.responses.order_cancelled.clone();
                return self.respond(session, reply, None);
            }
            // anything else is ordinary conversation; stay in Confirming
            let reply = self.converse(utterance).await;
            return self.respond(session, reply, None);
        }

        if session.phase != Phase::Collecting && self.dialogue.is_trigger(utterance) {
            tracing::debug!(session = %session.id, "trading trigger recognized");
            session.phase = Phase::Collecting;
            session.last_question = None;
            return self.collect(session, utterance).await;
        }

        if session.phase == Phase::Collecting {
            if self.dialogue.is_cancel(utterance) {
                session.tracker.reset(ChangeSource::Dialogue);
                session.phase = Phase::Idle;
                session.last_question = None;
                let reply = self.dialogue.responses.setup_cancelled.clone();
                return self.respond(session, reply, None);
            }
            return self.collect(session, utterance).await;
        }

        let reply = self.converse(utterance).await;
        self.respond(session, reply, None)
    }

    /// One collection turn: extract, escalate if gaps remain, merge, then
    /// either ask for the first missing slot or present the summary.
    async fn collect(&self, session: &mut ChatSession, utterance: &str) -> TurnOutcome {
        let mut extraction = self.cascade.extract(
            utterance,
            ExtractionContext {
                slots: session.tracker.slots(),
                last_question: session.last_question.as_deref(),
            },
        );

        let unresolved = SlotKey::ALL.into_iter().any(|key| {
            extraction.get(key).is_none() && !session.tracker.slots().is_set(key)
        });
        if unresolved {
            let escalated = self
                .escalator
                .escalate(
                    utterance,
                    self.cascade.normalizer(),
                    session.last_reply.as_deref(),
                )
                .await;
            extraction.absorb(escalated);
        }

        session.tracker.apply(&extraction);

        let missing = session.tracker.slots().missing();
        match missing.first() {
            Some(first) => {
                let question = self.question_for(*first, session.tracker.slots());
                session.last_question = Some(question.clone());
                self.respond(session, question, None)
            }
            None => {
                session.phase = Phase::Confirming;
                session.last_question = None;
                let reply = summarize(
                    "Perfect! Here's your stop order summary:",
                    session.tracker.slots(),
                );
                self.respond(session, reply, None)
            }
        }
    }

    fn question_for(&self, key: SlotKey, slots: &OrderSlots) -> String {
        let questions = &self.dialogue.questions;
        let sell = non_empty(slots.get(SlotKey::Sell));
        match key {
            SlotKey::Sell => questions.sell_question(),
            SlotKey::Buy => questions.buy_question(sell),
            SlotKey::Amount => questions.amount_question(sell),
            SlotKey::Threshold => {
                questions.threshold_question(sell, non_empty(slots.get(SlotKey::Buy)))
            }
        }
    }

    /// Ordinary conversation outside the order flow. Degrades to a fixed
    /// help line when no completion backend is configured, and to the
    /// generic trouble message when the backend fails.
    async fn converse(&self, utterance: &str) -> String {
        if !self.client.is_available() {
            return self.dialogue.responses.idle_help.clone();
        }
        let prompt = format!(
            "You are a friendly currency exchange assistant. You can set up\n\
             stop orders through a guided four-question flow when the user\n\
             asks for one. Keep the reply short and conversational.\n\n\
             User: {utterance}"
        );
        match self.client.complete(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => self.dialogue.responses.trouble_understanding.clone(),
            Err(error) => {
                tracing::warn!(%error, "conversational completion failed");
                self.dialogue.responses.trouble_understanding.clone()
            }
        }
    }

    fn respond(
        &self,
        session: &mut ChatSession,
        reply: String,
        order: Option<OrderSlots>,
    ) -> TurnOutcome {
        session.last_reply = Some(reply.clone());
        TurnOutcome { reply, order }
    }
}

fn summarize(heading: &str, slots: &OrderSlots) -> String {
    format!(
        "{heading}\n\n\
         Sell Currency: {sell}\n\
         Buy Currency: {buy}\n\
         Amount to Sell: {amount} {sell}\n\
         Threshold Rate: {threshold}%\n\n\
         Would you like to proceed with creating this stop order? \
         (Type \"yes\" to confirm or \"no\" to cancel)",
        sell = slots.sell_currency,
        buy = slots.buy_currency,
        amount = slots.amount,
        threshold = slots.threshold,
    )
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
