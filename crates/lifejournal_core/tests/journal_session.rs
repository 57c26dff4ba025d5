use lifejournal_core::db::open_db_in_memory;
use lifejournal_core::{
    CommitOutcome, ComposerStage, EditState, EntityStore, JournalSession, Layout, LoadError,
    ManualClock, QueryState, RepoResult, ReviewField, ReviewId, ReviewQuery, ReviewView,
    ReviewWriter, Section, SqliteReviewStore, Subscription, SubmitOutcome, ViewState, WriteOp,
};
use std::sync::mpsc::{channel, Sender};

type Session = JournalSession<SqliteReviewStore, ManualClock>;

fn session(layout: Layout) -> Session {
    let store = SqliteReviewStore::new(open_db_in_memory().unwrap());
    JournalSession::with_clock(store, ManualClock::starting_at(1_000), layout)
}

fn add(session: &mut Session, section: Section, title: &str, content: &str) -> ReviewId {
    session.composer_choose_section(section);
    session.composer_edit_field(ReviewField::Title, title);
    session.composer_edit_field(ReviewField::Content, content);
    match session.composer_submit() {
        SubmitOutcome::Submitted(id) => id,
        other => panic!("submit failed: {other:?}"),
    }
}

#[test]
fn composing_first_review_end_to_end() {
    let mut session = session(Layout::Reader);
    assert_eq!(session.view().unwrap(), ReviewView::Empty);

    session.composer_choose_section(Section::BestShape);
    session.composer_edit_field(ReviewField::Title, "Week 1");
    session.composer_edit_field(ReviewField::Content, "Felt strong");
    let outcome = session.composer_submit();

    assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
    assert_eq!(session.composer().stage(), &ComposerStage::SelectingSection);
    let reviews = session.snapshot();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].section, Section::BestShape);
    assert_eq!(reviews[0].title, "Week 1");
    assert_eq!(reviews[0].content, "Felt strong");
}

#[test]
fn whitespace_title_submit_writes_nothing() {
    let mut session = session(Layout::Reader);
    session.composer_choose_section(Section::GrowingInstant);
    session.composer_edit_field(ReviewField::Title, " ");
    session.composer_edit_field(ReviewField::Content, "anything");

    let outcome = session.composer_submit();

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert!(session.snapshot().is_empty());
    assert!(matches!(
        session.composer().stage(),
        ComposerStage::EnteringDetails { .. }
    ));
}

#[test]
fn dashboard_tab_shows_section_newest_first() {
    let store = SqliteReviewStore::new(open_db_in_memory().unwrap());
    let clock = ManualClock::starting_at(100);
    let mut session = JournalSession::with_clock(store, clock, Layout::Dashboard);

    let first = add(&mut session, Section::GrowingInstant, "first", "a");
    let second = add(&mut session, Section::GrowingInstant, "second", "b");
    add(&mut session, Section::BestShape, "gym", "c");
    session.select_section(Section::GrowingInstant);

    let ReviewView::Filtered { section, reviews } = session.view().unwrap() else {
        panic!("dashboard should project a filtered view");
    };
    assert_eq!(section, Section::GrowingInstant);
    let ids: Vec<ReviewId> = reviews.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second, first]);
    let stamps: Vec<i64> = reviews.iter().map(|r| r.created_at).collect();
    assert_eq!(stamps, vec![101, 100]);
}

#[test]
fn reader_layout_groups_non_empty_sections() {
    let mut session = session(Layout::Reader);
    add(&mut session, Section::GrowingInstant, "launch", "a");
    add(&mut session, Section::BestShape, "run", "b");

    let ReviewView::Grouped(groups) = session.view().unwrap() else {
        panic!("reader should project a grouped view");
    };
    let sections: Vec<Section> = groups.keys().copied().collect();
    assert_eq!(sections, vec![Section::GrowingInstant, Section::BestShape]);
}

#[test]
fn begin_edit_on_second_review_switches_editor() {
    let mut session = session(Layout::Reader);
    let x = add(&mut session, Section::BestShape, "x", "a");
    let y = add(&mut session, Section::BestShape, "y", "b");

    assert!(session.begin_edit(x));
    assert!(session.begin_edit(y));
    assert_eq!(session.edit_state().editing_id(), Some(y));
}

#[test]
fn commit_persists_edit_and_returns_to_idle() {
    let mut session = session(Layout::Reader);
    let id = add(&mut session, Section::PlanningWedding, "Venue", "shortlist");
    let created_at = session.find_review(id).unwrap().created_at;

    session.begin_edit(id);
    session.edit_field(id, ReviewField::Content, "booked the barn");
    assert_eq!(session.commit_edit(id), CommitOutcome::Committed(id));

    assert_eq!(session.edit_state(), &EditState::Idle);
    let updated = session.find_review(id).unwrap();
    assert_eq!(updated.content, "booked the barn");
    assert_eq!(updated.title, "Venue");
    assert_eq!(updated.created_at, created_at);
}

#[test]
fn invalid_commit_keeps_edit_open_and_store_unchanged() {
    let mut session = session(Layout::Reader);
    let id = add(&mut session, Section::PlanningWedding, "Venue", "shortlist");

    session.begin_edit(id);
    session.edit_field(id, ReviewField::Title, "   ");
    assert!(matches!(session.commit_edit(id), CommitOutcome::Rejected(_)));

    assert!(session.edit_state().is_editing(id));
    assert_eq!(session.find_review(id).unwrap().title, "Venue");
}

#[test]
fn cancel_edit_leaves_review_untouched() {
    let mut session = session(Layout::Reader);
    let id = add(&mut session, Section::BestShape, "Week 2", "sore");

    session.begin_edit(id);
    session.edit_field(id, ReviewField::Title, "changed");
    assert!(session.cancel_edit());

    assert_eq!(session.edit_state(), &EditState::Idle);
    assert_eq!(session.find_review(id).unwrap().title, "Week 2");
}

#[test]
fn deleting_edited_review_idles_and_removes_it() {
    let mut session = session(Layout::Reader);
    let id = add(&mut session, Section::BestShape, "Week 3", "rest day");

    session.begin_edit(id);
    session.delete_review(id);

    assert_eq!(session.edit_state(), &EditState::Idle);
    assert!(session.find_review(id).is_none());
    assert_eq!(session.view().unwrap(), ReviewView::Empty);
}

#[test]
fn begin_edit_of_unknown_review_is_ignored() {
    let mut session = session(Layout::Reader);
    add(&mut session, Section::BestShape, "Week 4", "tempo");

    let unknown = uuid::Uuid::new_v4();
    assert!(!session.begin_edit(unknown));
    assert_eq!(session.edit_state(), &EditState::Idle);
}

/// Store whose subscription fails before delivering a snapshot.
struct FailingStore {
    senders: Vec<Sender<QueryState>>,
}

impl ReviewWriter for FailingStore {
    fn write(&mut self, _ops: &[WriteOp]) -> RepoResult<()> {
        Ok(())
    }

    fn generate_id(&mut self) -> ReviewId {
        uuid::Uuid::new_v4()
    }
}

impl EntityStore for FailingStore {
    fn subscribe(&mut self, _query: ReviewQuery) -> Subscription {
        let (sender, receiver) = channel();
        sender
            .send(QueryState::failed(LoadError::new("offline")))
            .unwrap();
        self.senders.push(sender);
        Subscription::from_receiver(receiver)
    }
}

#[test]
fn load_error_is_surfaced_as_blocking_state() {
    let store = FailingStore {
        senders: Vec::new(),
    };
    let session = JournalSession::new(store, Layout::Reader);

    assert_eq!(session.load_error().map(LoadError::message), Some("offline"));
    assert!(matches!(session.view_state(), ViewState::Failed(_)));
    assert!(session.view().is_err());
}

#[test]
fn edit_buffer_is_not_refreshed_by_new_snapshots() {
    let mut session = session(Layout::Reader);
    let id = add(&mut session, Section::BestShape, "Week 5", "intervals");

    session.begin_edit(id);
    session.edit_field(id, ReviewField::Title, "Week 5 (draft)");
    add(&mut session, Section::BestShape, "Week 6", "long run");

    match session.edit_state() {
        EditState::Editing { id: editing, buffer } => {
            assert_eq!(*editing, id);
            assert_eq!(buffer.title, "Week 5 (draft)");
        }
        EditState::Idle => panic!("edit should survive unrelated snapshots"),
    }
}
