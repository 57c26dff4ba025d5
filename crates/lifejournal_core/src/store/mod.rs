//! Reactive review store contracts.
//!
//! # Responsibility
//! - Define the live-query and write API consumed by the journal session.
//! - Deliver immutable, `created_at DESC` ordered snapshots to subscribers.
//!
//! # Invariants
//! - Subscribers receive the current state immediately on subscribe.
//! - Every successful write is followed by a fresh snapshot to every live
//!   subscriber.
//! - Snapshots are never mutated after delivery.

mod sqlite_store;

use crate::model::review::{Review, ReviewId};
use crate::model::section::Section;
use crate::repo::review_repo::RepoResult;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

pub use sqlite_store::SqliteReviewStore;

/// Immutable ordered list of reviews delivered by a subscription.
pub type Snapshot = Arc<[Review]>;

/// One mutation against an individual review record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Create(Review),
    /// Replaces exactly `title` and `content`.
    Update {
        id: ReviewId,
        title: String,
        content: String,
    },
    Delete(ReviewId),
}

impl WriteOp {
    /// Short operation name for log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Update { .. } => "update",
            Self::Delete(_) => "delete",
        }
    }

    /// Target review id.
    pub fn review_id(&self) -> ReviewId {
        match self {
            Self::Create(review) => review.id,
            Self::Update { id, .. } | Self::Delete(id) => *id,
        }
    }
}

/// Live query over the review collection.
///
/// Ordering is fixed to `created_at` descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    pub section: Option<Section>,
    pub limit: Option<u32>,
}

impl ReviewQuery {
    /// Query over every review in every section.
    pub fn all() -> Self {
        Self::default()
    }
}

/// Subscription failure reported before or instead of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to load reviews: {}", self.message)
    }
}

impl Error for LoadError {}

/// `(loading, error, snapshot)` triple observed by subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub loading: bool,
    pub error: Option<LoadError>,
    pub snapshot: Option<Snapshot>,
}

impl QueryState {
    /// State before the first delivery.
    pub fn loading() -> Self {
        Self {
            loading: true,
            error: None,
            snapshot: None,
        }
    }

    pub fn ready(snapshot: Snapshot) -> Self {
        Self {
            loading: false,
            error: None,
            snapshot: Some(snapshot),
        }
    }

    pub fn failed(error: LoadError) -> Self {
        Self {
            loading: false,
            error: Some(error),
            snapshot: None,
        }
    }
}

/// Receiving end of a live query.
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<QueryState>,
}

impl Subscription {
    /// Wraps the receiving half of a store notification channel.
    pub fn from_receiver(receiver: Receiver<QueryState>) -> Self {
        Self { receiver }
    }

    /// Drains pending notifications and returns the most recent one.
    ///
    /// Returns `None` when nothing arrived since the last call. A store that
    /// went away reports a terminal `LoadError` once its queue is empty.
    pub fn latest(&self) -> Option<QueryState> {
        let mut latest = None;
        loop {
            match self.receiver.try_recv() {
                Ok(state) => latest = Some(state),
                Err(TryRecvError::Empty) => return latest,
                Err(TryRecvError::Disconnected) => {
                    return latest.or_else(|| {
                        Some(QueryState::failed(LoadError::new("review store closed")))
                    });
                }
            }
        }
    }
}

/// Write side of the review store.
pub trait ReviewWriter {
    /// Applies all operations atomically.
    ///
    /// Callers in the session treat this as fire-and-forget; the result is
    /// only logged.
    fn write(&mut self, ops: &[WriteOp]) -> RepoResult<()>;

    /// Produces a fresh unique review identifier.
    fn generate_id(&mut self) -> ReviewId;
}

/// Reactive document store holding the review collection.
pub trait EntityStore: ReviewWriter {
    /// Opens a live query. The current state is queued immediately.
    fn subscribe(&mut self, query: ReviewQuery) -> Subscription;
}
