//! Terminal popup for the chess move relay.
//!
//! Each activation of the [`reporter::Reporter`] pulls a fresh snapshot of
//! tab URL, backend readiness, and move list from the coordinator; the
//! [`popup::PopupView`] renders whatever has arrived so far with
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod move_table;
pub mod popup;
pub mod reporter;
pub mod site;
pub mod themes;

pub use relay_core as core;
