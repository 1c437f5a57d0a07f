//! Runtime layer for the chess move relay.
//!
//! Runs the move observer, the state coordinator, and the readiness probe as
//! independent tokio tasks that talk only through channels.

pub mod backend;
pub mod coordinator;
pub mod host;
pub mod observer;
pub mod page;
pub mod probe;

pub use relay_core as core;
