//! Relay - routes inbound traffic by per-user session state.
//!
//! The relay consults the session store, invokes at most one collaborator
//! per turn, and renders the outcome through the formatter. Session
//! mutations are the only persistent effect of a turn; a downstream
//! failure never corrupts session state.

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{PendingAction, Provider, SessionStore, UserId};
use crate::ports::{
    ChatContext, ChatProvider, CollectionSchema, Locale, LocaleDetector, SentimentAnalyzer,
    Workspace, WorkspaceError,
};

use super::commands::Command;
use super::format;

/// The dispatcher at the center of the relay.
///
/// Holds one shared [`SessionStore`] and a mapping from each selectable
/// [`Provider`] to its client, so normal dispatch is a map lookup rather
/// than an enum branch at the call site.
pub struct Relay {
    sessions: Arc<SessionStore>,
    providers: HashMap<Provider, Arc<dyn ChatProvider>>,
    sentiment: Arc<dyn SentimentAnalyzer>,
    workspace: Arc<dyn Workspace>,
    locale: Arc<dyn LocaleDetector>,
}

impl Relay {
    /// Creates a relay with no chat providers registered yet.
    pub fn new(
        sessions: Arc<SessionStore>,
        sentiment: Arc<dyn SentimentAnalyzer>,
        workspace: Arc<dyn Workspace>,
        locale: Arc<dyn LocaleDetector>,
    ) -> Self {
        Self {
            sessions,
            providers: HashMap::new(),
            sentiment,
            workspace,
            locale,
        }
    }

    /// Registers the client that serves `provider`.
    pub fn with_chat_provider(
        mut self,
        provider: Provider,
        client: Arc<dyn ChatProvider>,
    ) -> Self {
        self.providers.insert(provider, client);
        self
    }

    /// The session store this relay mutates. Exposed for the driving
    /// adapter and for tests.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Entry point for a raw inbound line: commands are parsed and
    /// executed, everything else flows through message dispatch.
    pub async fn handle_line(&self, uid: UserId, line: &str) -> Vec<String> {
        let locale = self.locale.detect(line);
        match Command::parse(line) {
            Some(Ok(command)) => self.handle_command(uid, command, locale).await,
            Some(Err(usage)) => {
                tracing::debug!(user_id = %uid, usage = usage.usage, "command missing argument");
                vec![format::usage(locale, &usage)]
            }
            None => self.handle_message(uid, line).await,
        }
    }

    /// Routes a free-text message through the fixed priority order:
    /// pending note, pending sentiment, dummy mode, disabled, normal
    /// dispatch. Exactly one rule fires per turn.
    pub async fn handle_message(&self, uid: UserId, text: &str) -> Vec<String> {
        let locale = self.locale.detect(text);
        let trace_id = Uuid::new_v4();
        tracing::debug!(
            user_id = %uid,
            trace_id = %trace_id,
            locale = locale.tag(),
            "message received"
        );

        // Pending one-shot intents outrank every other rule and are
        // consumed up front, so a failing or timed-out downstream call
        // cannot re-arm them.
        if let Some(action) = self.sessions.take_pending(uid) {
            let reply = match action {
                PendingAction::AwaitingNoteContent { title } => {
                    self.complete_note(uid, locale, &title, text).await
                }
                PendingAction::AwaitingSentimentTarget => {
                    self.complete_sentiment(uid, locale, text).await
                }
            };
            return vec![reply];
        }

        if self.sessions.is_dummy(uid) {
            return vec![format::dummy_banner(locale)];
        }

        let session = self.sessions.ensure(uid);
        if !session.is_enabled() {
            return vec![format::disabled_notice(locale).to_string()];
        }

        vec![
            self.dispatch_to_provider(uid, locale, session.active_provider(), text)
                .await,
        ]
    }

    /// Executes a discrete command. Each produces a single reply and at
    /// most one collaborator call; none of them read the message flow.
    pub async fn handle_command(
        &self,
        uid: UserId,
        command: Command,
        locale: Locale,
    ) -> Vec<String> {
        match command {
            Command::Start => {
                self.sessions.ensure(uid);
                vec![format::welcome(locale).to_string()]
            }
            Command::Help => vec![format::help(locale).to_string()],
            Command::ToggleAi => {
                if self.sessions.is_enabled(uid) {
                    self.sessions.disable(uid);
                    vec![format::ai_disabled(locale).to_string()]
                } else {
                    let provider = self.sessions.enable(uid, None);
                    vec![format::ai_enabled(locale, provider)]
                }
            }
            Command::SwitchProvider { name } => match Provider::from_keyword(&name) {
                Some(provider) => {
                    self.sessions.switch_provider(uid, provider);
                    vec![format::provider_switched(locale, provider)]
                }
                None => {
                    tracing::debug!(user_id = %uid, keyword = %name, "unknown provider keyword");
                    vec![format::unknown_provider(locale, &name)]
                }
            },
            Command::DummyMode => {
                self.sessions.switch_provider(uid, Provider::Disabled);
                vec![format::dummy_entered(locale)]
            }
            Command::ArmSentiment => {
                self.sessions
                    .arm_pending(uid, PendingAction::AwaitingSentimentTarget);
                vec![format::sentiment_armed(locale).to_string()]
            }
            Command::ArmNote { title } => {
                self.sessions.arm_pending(
                    uid,
                    PendingAction::AwaitingNoteContent {
                        title: title.clone(),
                    },
                );
                vec![format::note_armed(locale, &title)]
            }
            Command::ListWorkspace => match self.workspace.list_collections().await {
                Ok(collections) => vec![format::collections(locale, &collections)],
                Err(err) => {
                    tracing::error!(
                        user_id = %uid,
                        operation = "list_collections",
                        error = %err,
                        "workspace listing failed"
                    );
                    vec![format::workspace_error(locale, &err)]
                }
            },
            Command::SearchWorkspace { query } => match self.workspace.search(&query).await {
                Ok(entries) => vec![format::search_results(locale, &entries)],
                Err(err) => {
                    tracing::error!(
                        user_id = %uid,
                        operation = "search",
                        error = %err,
                        "workspace search failed"
                    );
                    vec![format::workspace_error(locale, &err)]
                }
            },
        }
    }

    /// Confirms the configured default collection is reachable.
    ///
    /// Called at bootstrap; an unknown id comes back as
    /// [`WorkspaceError::NotFound`] and is surfaced as a configuration
    /// diagnostic rather than an auth one.
    pub async fn verify_workspace(
        &self,
        collection_id: &str,
    ) -> Result<CollectionSchema, WorkspaceError> {
        self.workspace.collection_schema(collection_id).await
    }

    /// Completes an armed note save. The pending action was already
    /// consumed by the caller.
    async fn complete_note(
        &self,
        uid: UserId,
        locale: Locale,
        title: &str,
        body: &str,
    ) -> String {
        match self.workspace.create_entry(title, body).await {
            Ok(created) => {
                tracing::info!(
                    user_id = %uid,
                    note_id = %created.id,
                    truncated = created.truncated,
                    "note saved"
                );
                format::note_saved(locale, &created)
            }
            Err(err) => {
                tracing::error!(
                    user_id = %uid,
                    operation = "create_entry",
                    error = %err,
                    "note save failed"
                );
                format::workspace_error(locale, &err)
            }
        }
    }

    /// Completes an armed sentiment pass.
    async fn complete_sentiment(&self, uid: UserId, locale: Locale, text: &str) -> String {
        match self.sentiment.analyze(text).await {
            Ok(report) => format::sentiment_report(locale, &report),
            Err(err) if err.is_timeout() => {
                tracing::warn!(user_id = %uid, operation = "analyze", "sentiment timed out");
                format::timeout(locale).to_string()
            }
            Err(err) => {
                tracing::error!(
                    user_id = %uid,
                    operation = "analyze",
                    error = %err,
                    "sentiment analysis failed"
                );
                format::sentiment_retry(locale).to_string()
            }
        }
    }

    /// Normal dispatch: hands the text to the active provider's client.
    /// Session state is untouched by any failure here.
    async fn dispatch_to_provider(
        &self,
        uid: UserId,
        locale: Locale,
        provider: Provider,
        text: &str,
    ) -> String {
        let Some(client) = self.providers.get(&provider) else {
            tracing::error!(
                user_id = %uid,
                provider = %provider,
                "no client registered for provider"
            );
            return format::generic_error(locale).to_string();
        };

        let context = if client.supports_context() {
            self.assemble_context(uid, text).await
        } else {
            None
        };

        match client.generate(text, context.as_ref()).await {
            Ok(reply) => reply,
            Err(err) if err.is_timeout() => {
                tracing::warn!(
                    user_id = %uid,
                    provider = %provider,
                    error = %err,
                    "generation timed out"
                );
                format::timeout(locale).to_string()
            }
            Err(err) => {
                tracing::error!(
                    user_id = %uid,
                    provider = %provider,
                    error = %err,
                    "generation failed"
                );
                format::generic_error(locale).to_string()
            }
        }
    }

    /// Best-effort context assembly from workspace search. A failed or
    /// empty search degrades to no context.
    async fn assemble_context(&self, uid: UserId, text: &str) -> Option<ChatContext> {
        match self.workspace.search(text).await {
            Ok(entries) if !entries.is_empty() => {
                let mut context = ChatContext::new();
                for entry in &entries {
                    context = context.with_snippet(format!("{} ({})", entry.title, entry.url));
                }
                Some(context)
            }
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(user_id = %uid, error = %err, "context assembly skipped");
                None
            }
        }
    }
}
