//! SQLite-backed reactive review store.
//!
//! # Invariants
//! - A batch of write operations commits in one transaction or not at all.
//! - Subscribers whose receiver was dropped are pruned on the next broadcast.

use super::{
    EntityStore, LoadError, QueryState, ReviewQuery, ReviewWriter, Snapshot, Subscription,
    WriteOp,
};
use crate::model::review::ReviewId;
use crate::repo::review_repo::{
    RepoResult, ReviewListQuery, ReviewRepository, SqliteReviewRepository,
};
use log::{debug, error, info};
use rusqlite::Connection;
use std::sync::mpsc::{channel, Sender};
use std::time::Instant;
use uuid::Uuid;

struct Subscriber {
    query: ReviewQuery,
    sender: Sender<QueryState>,
}

/// Review store over a migrated SQLite connection.
pub struct SqliteReviewStore {
    conn: Connection,
    subscribers: Vec<Subscriber>,
}

impl SqliteReviewStore {
    /// Wraps a connection returned by `open_db` or `open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            subscribers: Vec::new(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Gives read access to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn query_state(&self, query: &ReviewQuery) -> QueryState {
        let repo = SqliteReviewRepository::new(&self.conn);
        let list_query = ReviewListQuery {
            section: query.section,
            limit: query.limit,
        };
        match repo.list_reviews(&list_query) {
            Ok(reviews) => {
                let snapshot: Snapshot = reviews.into();
                QueryState::ready(snapshot)
            }
            Err(err) => {
                error!(
                    "event=store_query module=store status=error error_code=snapshot_load_failed error={err}"
                );
                QueryState::failed(LoadError::new(err.to_string()))
            }
        }
    }

    fn broadcast(&mut self) {
        let states: Vec<QueryState> = self
            .subscribers
            .iter()
            .map(|subscriber| self.query_state(&subscriber.query))
            .collect();

        let before = self.subscribers.len();
        let mut states = states.into_iter();
        self.subscribers.retain(|subscriber| match states.next() {
            Some(state) => subscriber.sender.send(state).is_ok(),
            None => false,
        });

        let pruned = before - self.subscribers.len();
        if pruned > 0 {
            debug!("event=store_broadcast module=store status=ok pruned_subscribers={pruned}");
        }
    }
}

impl ReviewWriter for SqliteReviewStore {
    fn write(&mut self, ops: &[WriteOp]) -> RepoResult<()> {
        if ops.is_empty() {
            return Ok(());
        }

        let started_at = Instant::now();
        let tx = self.conn.transaction()?;
        {
            let repo = SqliteReviewRepository::new(&tx);
            for op in ops {
                let applied = match op {
                    WriteOp::Create(review) => repo.create_review(review).map(|_| ()),
                    WriteOp::Update { id, title, content } => {
                        repo.update_review_text(*id, title, content)
                    }
                    WriteOp::Delete(id) => repo.delete_review(*id),
                };
                if let Err(err) = applied {
                    error!(
                        "event=store_write module=store status=error op={} review_id={} error={}",
                        op.kind(),
                        op.review_id(),
                        err
                    );
                    return Err(err);
                }
            }
        }
        tx.commit()?;

        info!(
            "event=store_write module=store status=ok op_count={} duration_ms={}",
            ops.len(),
            started_at.elapsed().as_millis()
        );
        self.broadcast();
        Ok(())
    }

    fn generate_id(&mut self) -> ReviewId {
        Uuid::new_v4()
    }
}

impl EntityStore for SqliteReviewStore {
    fn subscribe(&mut self, query: ReviewQuery) -> Subscription {
        let (sender, receiver) = channel();
        let state = self.query_state(&query);
        // The receiver is alive here, so the initial send cannot fail.
        let _ = sender.send(state);
        self.subscribers.push(Subscriber { query, sender });
        debug!(
            "event=store_subscribe module=store status=ok subscribers={}",
            self.subscribers.len()
        );
        Subscription::from_receiver(receiver)
    }
}
