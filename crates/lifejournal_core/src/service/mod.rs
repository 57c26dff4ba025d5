//! Journal use-case services.
//!
//! # Responsibility
//! - Own the transient UI state machines (edit controller, composer).
//! - Bind them to a live store subscription through `JournalSession`.
//!
//! # Invariants
//! - Services never mutate the review list locally; every change goes
//!   through a store write.
//! - Writes are fire-and-forget: failures are logged, never retried.

pub mod clock;
pub mod composer;
pub mod edit_controller;
pub mod session;

use crate::store::{ReviewWriter, WriteOp};
use log::error;

fn dispatch_write<W: ReviewWriter + ?Sized>(writer: &mut W, ops: &[WriteOp]) {
    if let Err(err) = writer.write(ops) {
        for op in ops {
            error!(
                "event=write_dropped module=service status=error op={} review_id={} error={}",
                op.kind(),
                op.review_id(),
                err
            );
        }
    }
}
