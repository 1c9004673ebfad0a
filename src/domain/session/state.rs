//! Session state for a single user.

use serde::{Deserialize, Serialize};

use crate::domain::provider::Provider;

/// A one-shot intent that reclassifies the user's next message.
///
/// At most one is outstanding per session. Arming a new one replaces any
/// prior one (last write wins, never queued), and consumption clears it
/// before the downstream call runs, so a failed call cannot re-trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// The next message becomes the body of a note with this title.
    AwaitingNoteContent { title: String },
    /// The next message is sent for sentiment scoring.
    AwaitingSentimentTarget,
}

/// Mutable per-user record tracked by the relay.
///
/// # Invariants
///
/// - `active_provider == Disabled` implies `ai_enabled == false`; the
///   coupling is maintained by [`UserSession::switch_provider`], the only
///   way to enter dummy mode.
/// - At most one pending action is held at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    ai_enabled: bool,
    active_provider: Provider,
    pending_action: Option<PendingAction>,
}

impl UserSession {
    /// Fresh session: enabled, on the default provider, nothing pending.
    pub fn new() -> Self {
        Self {
            ai_enabled: true,
            active_provider: Provider::DEFAULT,
            pending_action: None,
        }
    }

    /// Whether inbound text is routed to a provider at all.
    pub fn is_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Provider invoked when enabled and nothing is pending.
    pub fn active_provider(&self) -> Provider {
        self.active_provider
    }

    /// True when the dummy sentinel is the active provider.
    pub fn is_dummy(&self) -> bool {
        self.active_provider.is_disabled()
    }

    /// Turns AI routing on and returns the resulting active provider.
    ///
    /// A provider, when given, becomes active. Without one the existing
    /// choice is kept, except that a session parked on the dummy sentinel
    /// falls back to the default provider so the coupling invariant holds.
    pub fn enable(&mut self, provider: Option<Provider>) -> Provider {
        self.ai_enabled = true;
        match provider {
            Some(provider) => self.active_provider = provider,
            None if self.active_provider.is_disabled() => {
                self.active_provider = Provider::DEFAULT;
            }
            None => {}
        }
        self.active_provider
    }

    /// Turns AI routing off. Provider and pending action are untouched.
    pub fn disable(&mut self) {
        self.ai_enabled = false;
    }

    /// Switches the active provider and applies the dummy-mode coupling:
    /// `Disabled` atomically turns AI off, anything else turns it back on.
    pub fn switch_provider(&mut self, provider: Provider) {
        self.active_provider = provider;
        self.ai_enabled = !provider.is_disabled();
    }

    /// Replaces any outstanding intent with `action`.
    pub fn arm_pending(&mut self, action: PendingAction) {
        self.pending_action = Some(action);
    }

    /// Removes and returns the outstanding intent, if any.
    pub fn take_pending(&mut self) -> Option<PendingAction> {
        self.pending_action.take()
    }

    /// Peeks at the outstanding intent without consuming it.
    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending_action.as_ref()
    }
}

impl Default for UserSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_enabled_on_default_provider() {
        let session = UserSession::new();
        assert!(session.is_enabled());
        assert_eq!(session.active_provider(), Provider::DEFAULT);
        assert!(session.pending().is_none());
    }

    #[test]
    fn switch_to_disabled_turns_ai_off() {
        let mut session = UserSession::new();
        session.switch_provider(Provider::Disabled);
        assert!(!session.is_enabled());
        assert!(session.is_dummy());
    }

    #[test]
    fn switch_to_real_provider_turns_ai_back_on() {
        let mut session = UserSession::new();
        session.switch_provider(Provider::Disabled);
        session.switch_provider(Provider::Eden);
        assert!(session.is_enabled());
        assert!(!session.is_dummy());
        assert_eq!(session.active_provider(), Provider::Eden);
    }

    #[test]
    fn enable_without_provider_keeps_existing_choice() {
        let mut session = UserSession::new();
        session.switch_provider(Provider::Eden);
        session.disable();
        let active = session.enable(None);
        assert_eq!(active, Provider::Eden);
        assert!(session.is_enabled());
    }

    #[test]
    fn enable_without_provider_leaves_dummy_mode() {
        let mut session = UserSession::new();
        session.switch_provider(Provider::Disabled);
        let active = session.enable(None);
        assert_eq!(active, Provider::DEFAULT);
        assert!(session.is_enabled());
        assert!(!session.is_dummy());
    }

    #[test]
    fn disable_keeps_provider_and_pending() {
        let mut session = UserSession::new();
        session.arm_pending(PendingAction::AwaitingSentimentTarget);
        session.disable();
        assert!(!session.is_enabled());
        assert_eq!(session.active_provider(), Provider::DEFAULT);
        assert!(session.pending().is_some());
    }

    #[test]
    fn arming_overwrites_instead_of_queueing() {
        let mut session = UserSession::new();
        session.arm_pending(PendingAction::AwaitingNoteContent {
            title: "first".to_string(),
        });
        session.arm_pending(PendingAction::AwaitingSentimentTarget);

        assert_eq!(
            session.take_pending(),
            Some(PendingAction::AwaitingSentimentTarget)
        );
        assert_eq!(session.take_pending(), None);
    }

    #[test]
    fn take_pending_consumes_exactly_once() {
        let mut session = UserSession::new();
        session.arm_pending(PendingAction::AwaitingNoteContent {
            title: "groceries".to_string(),
        });

        assert!(session.take_pending().is_some());
        assert!(session.take_pending().is_none());
    }
}
