//! Concierge binary - wires adapters to the relay and drives it.
//!
//! The console driver below stands in for a messaging-platform adapter:
//! each stdin line is one inbound message from a single local user, and
//! replies are printed back. Real transports plug into the same
//! [`Relay::handle_line`] surface.

use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

use concierge::adapters::{
    DeepSeekConfig, DeepSeekProvider, EdenClient, EdenConfig, HeuristicLocaleDetector,
    NotionConfig, NotionWorkspace,
};
use concierge::application::Relay;
use concierge::config::AppConfig;
use concierge::domain::{Provider, SessionStore, UserId};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };
    if let Err(err) = config.validate() {
        tracing::error!(error = %err, "invalid configuration");
        std::process::exit(1);
    }

    let relay = build_relay(&config);

    // Surface a broken workspace setup at startup instead of on the
    // first note save. The relay still starts; note saves will return
    // the same diagnostic.
    match relay
        .verify_workspace(&config.workspace.default_collection)
        .await
    {
        Ok(schema) => tracing::info!(
            collection = %schema.title,
            fields = schema.field_names.len(),
            "workspace collection verified"
        ),
        Err(err) => tracing::warn!(
            error = %err,
            "workspace collection could not be verified; note saves may fail"
        ),
    }

    run_console(&relay).await;
}

/// Builds the relay from validated configuration.
fn build_relay(config: &AppConfig) -> Relay {
    let deepseek = DeepSeekProvider::new(
        DeepSeekConfig::new(config.ai.deepseek_api_key().unwrap_or_default())
            .with_timeout(config.ai.timeout()),
    );
    let eden = Arc::new(EdenClient::new(
        EdenConfig::new(config.ai.eden_api_key().unwrap_or_default())
            .with_timeout(config.ai.timeout()),
    ));
    let workspace = Arc::new(NotionWorkspace::new(
        NotionConfig::new(
            config.workspace.token(),
            config.workspace.default_collection.clone(),
        )
        .with_timeout(config.workspace.timeout()),
    ));

    Relay::new(
        Arc::new(SessionStore::new()),
        eden.clone(),
        workspace,
        Arc::new(HeuristicLocaleDetector::new()),
    )
    .with_chat_provider(Provider::DeepSeek, Arc::new(deepseek))
    .with_chat_provider(Provider::Eden, eden)
}

/// Minimal line-oriented driver for local use.
async fn run_console(relay: &Relay) {
    let user = UserId::new(1);
    tracing::info!("concierge ready; type a message or /help, Ctrl-D to exit");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for reply in relay.handle_line(user, line).await {
            println!("{reply}");
        }
    }
}
