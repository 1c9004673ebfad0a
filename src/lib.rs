//! Concierge - Conversational AI Relay
//!
//! This crate receives chat messages from a messaging platform, routes them
//! per user session state to one of several AI text-generation backends,
//! and saves/searches notes in an external document workspace.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
