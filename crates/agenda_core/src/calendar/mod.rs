//! Pure calendaring engine.
//!
//! # Responsibility
//! - Lay out month grids and week strips.
//! - Decide which events occur on a given day, including weekly recurrence.
//! - Partition events into home-screen buckets relative to "now".
//!
//! # Invariants
//! - Every function here is pure: no storage, no clock reads, no logging.
//! - Weeks start on Sunday.

pub mod bucket;
pub mod grid;
pub mod matcher;
