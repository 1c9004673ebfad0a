//! Domain layer containing the relay's state and rules.
//!
//! # Module Organization
//!
//! - `ids` - Strongly-typed identifiers
//! - `provider` - Catalog of AI backends and the disabled sentinel
//! - `session` - Per-user session state machine and its store
//!
//! The domain layer has no I/O. All mutation of user state happens here,
//! behind the [`session::SessionStore`].

pub mod ids;
pub mod provider;
pub mod session;

pub use ids::UserId;
pub use provider::Provider;
pub use session::{PendingAction, SessionStore, UserSession};
