//! Dialogue phrase sets, question templates, and response texts.
//!
//! The trigger phrase set directly defines recall for order setup, so it is
//! kept configurable rather than baked into the state machine.

use serde::{Deserialize, Serialize};

/// Phrase sets driving the dialogue state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Case-insensitive substrings that switch the dialogue into collection.
    #[serde(default = "default_trigger_phrases")]
    pub trigger_phrases: Vec<String>,
    /// Exact tokens that cancel collection.
    #[serde(default = "default_cancel_words")]
    pub cancel_words: Vec<String>,
    /// Exact tokens accepted as confirmation.
    #[serde(default = "default_confirm_words")]
    pub confirm_words: Vec<String>,
    /// Exact tokens accepted as refusal.
    #[serde(default = "default_deny_words")]
    pub deny_words: Vec<String>,
    /// Substrings recognized as "what was my order" questions.
    #[serde(default = "default_order_query_phrases")]
    pub order_query_phrases: Vec<String>,
    #[serde(default)]
    pub questions: QuestionTemplates,
    #[serde(default)]
    pub responses: ResponseTemplates,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            trigger_phrases: default_trigger_phrases(),
            cancel_words: default_cancel_words(),
            confirm_words: default_confirm_words(),
            deny_words: default_deny_words(),
            order_query_phrases: default_order_query_phrases(),
            questions: QuestionTemplates::default(),
            responses: ResponseTemplates::default(),
        }
    }
}

impl DialogueConfig {
    /// Whether the utterance contains a trigger phrase.
    pub fn is_trigger(&self, utterance: &str) -> bool {
        let lower = utterance.to_lowercase();
        self.trigger_phrases.iter().any(|p| lower.contains(p.as_str()))
    }

    /// Whether the trimmed utterance is a cancellation token.
    pub fn is_cancel(&self, utterance: &str) -> bool {
        let lower = utterance.trim().to_lowercase();
        self.cancel_words.iter().any(|w| *w == lower)
    }

    /// Whether the trimmed utterance confirms the order.
    pub fn is_confirm(&self, utterance: &str) -> bool {
        let lower = utterance.trim().to_lowercase();
        self.confirm_words.iter().any(|w| *w == lower)
    }

    /// Whether the trimmed utterance refuses the order.
    pub fn is_deny(&self, utterance: &str) -> bool {
        let lower = utterance.trim().to_lowercase();
        self.deny_words.iter().any(|w| *w == lower)
    }

    /// Whether the utterance asks about the stored order.
    pub fn is_order_query(&self, utterance: &str) -> bool {
        let lower = utterance.to_lowercase();
        self.order_query_phrases
            .iter()
            .any(|p| lower.contains(p.as_str()))
    }
}

/// The four slot questions. Template text is an observable contract: the
/// context disambiguator keys off the words in the asked question, and UI
/// snapshot tests pin the exact phrasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionTemplates {
    #[serde(default = "default_sell_question")]
    pub sell: String,
    #[serde(default = "default_buy_question")]
    pub buy: String,
    /// Variant used when the sell currency is already known; `{sell}` is
    /// interpolated.
    #[serde(default = "default_buy_question_with_sell")]
    pub buy_with_sell: String,
    /// `{sell}` is interpolated; falls back to `amount_generic` when the
    /// sell currency is unknown.
    #[serde(default = "default_amount_question")]
    pub amount: String,
    #[serde(default = "default_amount_question_generic")]
    pub amount_generic: String,
    #[serde(default = "default_threshold_question")]
    pub threshold: String,
    /// Variant used when both currencies are known; `{sell}` and `{buy}`
    /// are interpolated.
    #[serde(default = "default_threshold_question_with_pair")]
    pub threshold_with_pair: String,
}

impl Default for QuestionTemplates {
    fn default() -> Self {
        Self {
            sell: default_sell_question(),
            buy: default_buy_question(),
            buy_with_sell: default_buy_question_with_sell(),
            amount: default_amount_question(),
            amount_generic: default_amount_question_generic(),
            threshold: default_threshold_question(),
            threshold_with_pair: default_threshold_question_with_pair(),
        }
    }
}

impl QuestionTemplates {
    pub fn sell_question(&self) -> String {
        self.sell.clone()
    }

    pub fn buy_question(&self, sell: Option<&str>) -> String {
        match sell {
            Some(sell) => self.buy_with_sell.replace("{sell}", sell),
            None => self.buy.clone(),
        }
    }

    pub fn amount_question(&self, sell: Option<&str>) -> String {
        match sell {
            Some(sell) => self.amount.replace("{sell}", sell),
            None => self.amount_generic.clone(),
        }
    }

    pub fn threshold_question(&self, sell: Option<&str>, buy: Option<&str>) -> String {
        match (sell, buy) {
            (Some(sell), Some(buy)) => self
                .threshold_with_pair
                .replace("{sell}", sell)
                .replace("{buy}", buy),
            _ => self.threshold.clone(),
        }
    }
}

/// Fixed response texts emitted by the state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTemplates {
    #[serde(default = "default_confirmed")]
    pub order_confirmed: String,
    #[serde(default = "default_cancelled")]
    pub order_cancelled: String,
    #[serde(default = "default_setup_cancelled")]
    pub setup_cancelled: String,
    #[serde(default = "default_trouble")]
    pub trouble_understanding: String,
    #[serde(default = "default_idle_help")]
    pub idle_help: String,
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        Self {
            order_confirmed: default_confirmed(),
            order_cancelled: default_cancelled(),
            setup_cancelled: default_setup_cancelled(),
            trouble_understanding: default_trouble(),
            idle_help: default_idle_help(),
        }
    }
}

fn default_trigger_phrases() -> Vec<String> {
    [
        "stop order",
        "stop orders",
        "stop loss",
        "protect my",
        "trigger sell",
        "auto sell",
        "sell order",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_cancel_words() -> Vec<String> {
    ["cancel", "stop", "quit", "exit"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_confirm_words() -> Vec<String> {
    ["yes", "y", "confirm"].iter().map(|s| s.to_string()).collect()
}

fn default_deny_words() -> Vec<String> {
    ["no", "n", "cancel"].iter().map(|s| s.to_string()).collect()
}

fn default_order_query_phrases() -> Vec<String> {
    [
        "what was my order",
        "what did i set",
        "what are my parameters",
        "my previous order",
        "what did i fill",
        "what things did i give",
        "my stop order",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_sell_question() -> String {
    "Which currency are you selling?".to_string()
}

fn default_buy_question() -> String {
    "What currency do you want to buy?".to_string()
}

fn default_buy_question_with_sell() -> String {
    "What currency do you want to buy with your {sell}?".to_string()
}

fn default_amount_question() -> String {
    "How many {sell} are you selling?".to_string()
}

fn default_amount_question_generic() -> String {
    "How many coins are you selling?".to_string()
}

fn default_threshold_question() -> String {
    "What's your target exchange rate?".to_string()
}

fn default_threshold_question_with_pair() -> String {
    "What's your target exchange rate for {sell} to {buy}?".to_string()
}

fn default_confirmed() -> String {
    "Stop order created successfully! The order will execute when your loss threshold is reached."
        .to_string()
}

fn default_cancelled() -> String {
    "Stop order cancelled. Feel free to set up a new one anytime by saying 'stop order'.".to_string()
}

fn default_setup_cancelled() -> String {
    "Stop order setup cancelled. Feel free to start over anytime by saying 'stop order'."
        .to_string()
}

fn default_trouble() -> String {
    "Sorry, I'm having trouble understanding right now.".to_string()
}

fn default_idle_help() -> String {
    "I can help you set up stop orders. Say 'stop order' and I'll walk you through it."
        .to_string()
}
