//! Flutter-facing bindings for InstAgenda core.

pub mod api;
pub mod config;
pub mod palette;
