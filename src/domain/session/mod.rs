//! Per-user session state machine.
//!
//! A session tracks, for one user, whether AI routing is on, which provider
//! answers, and whether the next message has been reclassified by a one-shot
//! pending action. The [`SessionStore`] owns every session and is the only
//! component allowed to mutate them.

mod state;
mod store;

pub use state::{PendingAction, UserSession};
pub use store::SessionStore;
