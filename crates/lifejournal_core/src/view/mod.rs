//! Display-ready projections of review snapshots.

pub mod layout;
pub mod projector;
