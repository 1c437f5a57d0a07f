//! Shared types for the chess move relay.
//!
//! Holds the move-list model, the inter-context message protocol, move text
//! normalization, the error type, and CLI settings used by every other crate
//! in the workspace.

pub mod error;
pub mod messages;
pub mod models;
pub mod notation;
pub mod settings;
