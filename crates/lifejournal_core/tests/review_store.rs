use lifejournal_core::db::open_db_in_memory;
use lifejournal_core::{
    EntityStore, RepoError, Review, ReviewQuery, ReviewWriter, Section, SqliteReviewStore,
    WriteOp,
};

fn store() -> SqliteReviewStore {
    SqliteReviewStore::new(open_db_in_memory().unwrap())
}

fn review(store: &mut SqliteReviewStore, section: Section, created_at: i64) -> Review {
    let id = store.generate_id();
    Review::new(id, section, &format!("entry {created_at}"), "body", created_at)
}

#[test]
fn subscribe_delivers_current_snapshot_immediately() {
    let mut store = store();
    let subscription = store.subscribe(ReviewQuery::all());

    let state = subscription.latest().expect("initial state should be queued");
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.snapshot.unwrap().len(), 0);
    assert!(subscription.latest().is_none());
}

#[test]
fn writes_push_fresh_descending_snapshots() {
    let mut store = store();
    let subscription = store.subscribe(ReviewQuery::all());
    subscription.latest();

    let older = review(&mut store, Section::GrowingInstant, 100);
    let newer = review(&mut store, Section::GrowingInstant, 200);
    store.write(&[WriteOp::Create(older.clone())]).unwrap();
    store.write(&[WriteOp::Create(newer.clone())]).unwrap();

    let snapshot = subscription.latest().unwrap().snapshot.unwrap();
    assert_eq!(snapshot.to_vec(), vec![newer, older]);
}

#[test]
fn section_query_only_sees_its_section() {
    let mut store = store();
    let subscription = store.subscribe(ReviewQuery {
        section: Some(Section::BestShape),
        limit: None,
    });

    let gym = review(&mut store, Section::BestShape, 1);
    let cake = review(&mut store, Section::PlanningWedding, 2);
    store
        .write(&[WriteOp::Create(gym.clone()), WriteOp::Create(cake)])
        .unwrap();

    let snapshot = subscription.latest().unwrap().snapshot.unwrap();
    assert_eq!(snapshot.to_vec(), vec![gym]);
}

#[test]
fn failed_batch_rolls_back_and_skips_notification() {
    let mut store = store();
    let subscription = store.subscribe(ReviewQuery::all());
    subscription.latest();

    let valid = review(&mut store, Section::BestShape, 1);
    let missing = store.generate_id();
    let err = store
        .write(&[WriteOp::Create(valid), WriteOp::Delete(missing)])
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));

    assert!(subscription.latest().is_none());
    let count: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM reviews;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn dropped_subscriptions_are_pruned() {
    let mut store = store();
    let kept = store.subscribe(ReviewQuery::all());
    drop(store.subscribe(ReviewQuery::all()));
    assert_eq!(store.subscriber_count(), 2);

    let entry = review(&mut store, Section::BestShape, 1);
    store.write(&[WriteOp::Create(entry)]).unwrap();

    assert_eq!(store.subscriber_count(), 1);
    assert!(kept.latest().is_some());
}

#[test]
fn generated_ids_are_unique() {
    let mut store = store();
    let first = store.generate_id();
    let second = store.generate_id();
    assert_ne!(first, second);
}
