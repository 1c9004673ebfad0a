//! Concurrent, user-keyed session storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::ids::UserId;
use crate::domain::provider::Provider;

use super::state::{PendingAction, UserSession};

/// Owns every [`UserSession`] in the process.
///
/// The outer map is guarded by a read/write lock held only long enough to
/// find or insert a slot; each session sits behind its own mutex, so
/// mutations for one user never serialize unrelated users. Every operation
/// here is synchronous and the locks are never held across await points,
/// which makes `take_pending` atomic with respect to concurrent arms and
/// takes for the same user.
///
/// Sessions are created lazily the first time a user interacts and live for
/// the lifetime of the process.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<UserId, Arc<Mutex<UserSession>>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the slot for `uid`, creating a fresh session if absent.
    fn slot(&self, uid: UserId) -> Arc<Mutex<UserSession>> {
        if let Some(slot) = self.sessions.read().unwrap().get(&uid) {
            return Arc::clone(slot);
        }
        let mut sessions = self.sessions.write().unwrap();
        Arc::clone(sessions.entry(uid).or_default())
    }

    /// Looks up the slot for `uid` without creating one.
    fn peek(&self, uid: UserId) -> Option<Arc<Mutex<UserSession>>> {
        self.sessions.read().unwrap().get(&uid).map(Arc::clone)
    }

    /// Returns the session for `uid`, creating a fresh one (enabled, on the
    /// default provider, nothing pending) if none exists. Idempotent.
    pub fn ensure(&self, uid: UserId) -> UserSession {
        self.slot(uid).lock().unwrap().clone()
    }

    /// Turns AI routing on for `uid` and returns the active provider.
    pub fn enable(&self, uid: UserId, provider: Option<Provider>) -> Provider {
        let active = self.slot(uid).lock().unwrap().enable(provider);
        tracing::info!(user_id = %uid, provider = %active, "AI enabled");
        active
    }

    /// Turns AI routing off for `uid`. Provider and pending action survive.
    pub fn disable(&self, uid: UserId) {
        self.slot(uid).lock().unwrap().disable();
        tracing::info!(user_id = %uid, "AI disabled");
    }

    /// Switches the active provider for `uid`, applying the dummy-mode
    /// coupling (see [`UserSession::switch_provider`]).
    pub fn switch_provider(&self, uid: UserId, provider: Provider) {
        self.slot(uid).lock().unwrap().switch_provider(provider);
        tracing::info!(user_id = %uid, provider = %provider, "provider switched");
    }

    /// Whether AI routing is on for `uid`. Absent sessions read as off.
    pub fn is_enabled(&self, uid: UserId) -> bool {
        self.peek(uid)
            .map(|slot| slot.lock().unwrap().is_enabled())
            .unwrap_or(false)
    }

    /// Active provider for `uid`, or `None` when no session exists yet.
    pub fn active_provider(&self, uid: UserId) -> Option<Provider> {
        self.peek(uid).map(|slot| slot.lock().unwrap().active_provider())
    }

    /// Whether `uid` is parked in dummy mode. Absent sessions are not.
    pub fn is_dummy(&self, uid: UserId) -> bool {
        matches!(self.active_provider(uid), Some(p) if p.is_disabled())
    }

    /// Arms a one-shot intent for `uid`, replacing any outstanding one.
    pub fn arm_pending(&self, uid: UserId, action: PendingAction) {
        self.slot(uid).lock().unwrap().arm_pending(action);
    }

    /// Atomically removes and returns the outstanding intent for `uid`.
    ///
    /// Read-and-clear happens under the per-user lock, so two racing calls
    /// can never both observe the same armed action.
    pub fn take_pending(&self, uid: UserId) -> Option<PendingAction> {
        self.slot(uid).lock().unwrap().take_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn uid(n: i64) -> UserId {
        UserId::new(n)
    }

    #[test]
    fn ensure_creates_enabled_default_session() {
        let store = SessionStore::new();
        let session = store.ensure(uid(1));

        assert!(session.is_enabled());
        assert_eq!(session.active_provider(), Provider::DEFAULT);
        assert!(store.is_enabled(uid(1)));
        assert_eq!(store.active_provider(uid(1)), Some(Provider::DEFAULT));
    }

    #[test]
    fn ensure_is_idempotent() {
        let store = SessionStore::new();
        store.switch_provider(uid(1), Provider::Eden);
        let session = store.ensure(uid(1));
        assert_eq!(session.active_provider(), Provider::Eden);
    }

    #[test]
    fn absent_session_reads_as_disabled_without_provider() {
        let store = SessionStore::new();
        assert!(!store.is_enabled(uid(9)));
        assert_eq!(store.active_provider(uid(9)), None);
        assert!(!store.is_dummy(uid(9)));
    }

    #[test]
    fn dummy_coupling_holds_both_ways() {
        let store = SessionStore::new();
        store.switch_provider(uid(1), Provider::Disabled);
        assert!(!store.is_enabled(uid(1)));
        assert!(store.is_dummy(uid(1)));

        store.switch_provider(uid(1), Provider::Eden);
        assert!(store.is_enabled(uid(1)));
        assert!(!store.is_dummy(uid(1)));
    }

    #[test]
    fn pending_overwrite_is_last_write_wins() {
        let store = SessionStore::new();
        store.arm_pending(
            uid(1),
            PendingAction::AwaitingNoteContent {
                title: "a".to_string(),
            },
        );
        store.arm_pending(uid(1), PendingAction::AwaitingSentimentTarget);

        assert_eq!(
            store.take_pending(uid(1)),
            Some(PendingAction::AwaitingSentimentTarget)
        );
        assert_eq!(store.take_pending(uid(1)), None);
    }

    #[test]
    fn pending_is_per_user() {
        let store = SessionStore::new();
        store.arm_pending(uid(1), PendingAction::AwaitingSentimentTarget);

        assert_eq!(store.take_pending(uid(2)), None);
        assert!(store.take_pending(uid(1)).is_some());
    }

    #[test]
    fn concurrent_takes_never_double_consume() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let store = Arc::new(SessionStore::new());

        for round in 0..100 {
            let user = uid(round);
            store.arm_pending(user, PendingAction::AwaitingSentimentTarget);

            let consumed = Arc::new(AtomicUsize::new(0));
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let store = Arc::clone(&store);
                    let consumed = Arc::clone(&consumed);
                    std::thread::spawn(move || {
                        if store.take_pending(user).is_some() {
                            consumed.fetch_add(1, Ordering::SeqCst);
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(consumed.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn concurrent_users_do_not_interfere() {
        let store = Arc::new(SessionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let user = uid(n);
                    store.ensure(user);
                    store.switch_provider(user, Provider::Eden);
                    store.arm_pending(
                        user,
                        PendingAction::AwaitingNoteContent {
                            title: format!("note-{n}"),
                        },
                    );
                    assert!(store.take_pending(user).is_some());
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    /// Operations reachable from the command surface.
    #[derive(Debug, Clone)]
    enum Op {
        Enable(Option<Provider>),
        Disable,
        Switch(Provider),
        ArmNote(String),
        ArmSentiment,
        Take,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Enable(None)),
            Just(Op::Enable(Some(Provider::DeepSeek))),
            Just(Op::Enable(Some(Provider::Eden))),
            Just(Op::Disable),
            Just(Op::Switch(Provider::Disabled)),
            Just(Op::Switch(Provider::DeepSeek)),
            Just(Op::Switch(Provider::Eden)),
            "[a-z]{1,8}".prop_map(Op::ArmNote),
            Just(Op::ArmSentiment),
            Just(Op::Take),
        ]
    }

    proptest! {
        /// Dummy mode always implies AI off, and at most one pending
        /// action survives any sequence of operations.
        #[test]
        fn invariants_hold_under_any_op_sequence(ops in prop::collection::vec(op_strategy(), 1..40)) {
            let store = SessionStore::new();
            let user = uid(1);
            let mut armed = false;

            for op in ops {
                match op {
                    Op::Enable(p) => { store.enable(user, p); }
                    Op::Disable => store.disable(user),
                    Op::Switch(p) => store.switch_provider(user, p),
                    Op::ArmNote(title) => {
                        store.arm_pending(user, PendingAction::AwaitingNoteContent { title });
                        armed = true;
                    }
                    Op::ArmSentiment => {
                        store.arm_pending(user, PendingAction::AwaitingSentimentTarget);
                        armed = true;
                    }
                    Op::Take => {
                        let taken = store.take_pending(user);
                        prop_assert_eq!(taken.is_some(), armed);
                        armed = false;
                    }
                }

                if store.is_dummy(user) {
                    prop_assert!(!store.is_enabled(user));
                }
            }
        }
    }
}
