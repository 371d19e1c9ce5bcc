//! Configuration for the SwapGuard dialogue engine.
//!
//! Everything the engine treats as data rather than code lives here: the
//! currency alias table, trigger phrases, question templates, the exemplar
//! corpus, and the escalation service settings. All tables carry built-in
//! defaults so the engine runs without any configuration file; a TOML file
//! and `SWAPGUARD_*` environment variables can override any of it.

pub mod currencies;
pub mod dialogue;
pub mod exemplars;
pub mod settings;

pub use currencies::CurrencyTable;
pub use dialogue::{DialogueConfig, QuestionTemplates, ResponseTemplates};
pub use exemplars::{Exemplar, ExemplarSet};
pub use settings::{ConfigError, EscalationSettings, Settings};
