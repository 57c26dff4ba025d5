//! Journal domain model.
//!
//! # Responsibility
//! - Define the canonical review record and the closed section set.
//! - Keep display metadata for sections in one table shared by all layouts.
//!
//! # Invariants
//! - Every review is identified by a stable `ReviewId`.
//! - Every review belongs to exactly one `Section` variant.
//! - Deletion is a hard delete; there are no tombstones.

pub mod review;
pub mod section;
