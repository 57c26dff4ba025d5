//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define CRUD contracts over stored reviews.
//! - Isolate SQLite query details from the store and session layers.
//!
//! # Invariants
//! - Repository writes call `Review::validate()` or `validate_text()` before
//!   persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod review_repo;
