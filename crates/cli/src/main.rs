//! Interactive stop-order chat.
//!
//! Reads utterances from stdin, one per line, and drives a single
//! conversation through the dialogue engine. An optional TOML config path
//! may be passed as the first argument; escalation stays disabled unless an
//! endpoint is configured there or via `SWAPGUARD_ESCALATION_ENDPOINT`.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use swapguard_agent::{ChatSession, DialogueEngine, InMemorySessionStore, SessionStore};
use swapguard_config::Settings;
use swapguard_llm::{CompletionClient, HttpCompletionClient, NoopCompletionClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref()).context("loading settings")?;

    let client: Arc<dyn CompletionClient> = match &settings.escalation.endpoint {
        Some(endpoint) => {
            tracing::info!(%endpoint, "escalation enabled");
            Arc::new(HttpCompletionClient::new(
                endpoint.clone(),
                settings.escalation.max_tokens,
                Duration::from_secs(settings.escalation.timeout_secs),
            )?)
        }
        None => {
            tracing::info!("no escalation endpoint configured, running rule-only");
            Arc::new(NoopCompletionClient)
        }
    };

    let engine = DialogueEngine::new(&settings, client);
    let store = InMemorySessionStore::new();
    let mut session = ChatSession::new("local");

    println!("Welcome! I can set up stop orders for you. Say 'stop order' to begin.");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }

        let outcome = engine.handle_turn(&mut session, utterance).await;
        println!("{}", outcome.reply);

        if let Some(order) = &outcome.order {
            println!("{}", serde_json::to_string_pretty(order)?);
        }

        store
            .save(&session.id, session.tracker.slots())
            .await
            .context("persisting slots")?;
    }

    Ok(())
}
