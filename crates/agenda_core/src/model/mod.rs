//! Agenda domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by the calendar engine and
//!   services.
//! - Own the invariants every persisted record must satisfy.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID.
//! - Deletion is a hard delete; there is no archival state.

pub mod alarm;
pub mod event;
pub mod settings;
