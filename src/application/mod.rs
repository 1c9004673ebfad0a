//! Application layer - command surface and message dispatch.
//!
//! This layer orchestrates the domain and the ports: parsing the discrete
//! command surface, routing inbound messages by session state, and
//! rendering structured outcomes into user-facing text.

pub mod commands;
pub mod format;
pub mod relay;

pub use commands::{Command, UsageError};
pub use relay::Relay;
