//! Inline edit state for a review list.
//!
//! # Responsibility
//! - Track which single review, if any, is being edited.
//! - Buffer edited title/content locally until commit or cancel.
//!
//! # Invariants
//! - At most one review is in edit state per controller.
//! - The buffer is seeded once from the persisted record on begin-edit and is
//!   never refreshed from later snapshots.
//! - Commit writes exactly `title` and `content`; invalid commits write
//!   nothing and keep the edit open.

use super::dispatch_write;
use crate::model::review::{validate_text, Review, ReviewField, ReviewId, ReviewValidationError};
use crate::store::{ReviewWriter, WriteOp};
use log::debug;

/// Locally buffered edit fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub title: String,
    pub content: String,
}

impl EditBuffer {
    fn set(&mut self, field: ReviewField, value: String) {
        match field {
            ReviewField::Title => self.title = value,
            ReviewField::Content => self.content = value,
        }
    }
}

/// Edit state of a review list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: ReviewId, buffer: EditBuffer },
}

impl EditState {
    pub fn editing_id(&self) -> Option<ReviewId> {
        match self {
            Self::Idle => None,
            Self::Editing { id, .. } => Some(*id),
        }
    }

    pub fn is_editing(&self, id: ReviewId) -> bool {
        self.editing_id() == Some(id)
    }
}

/// Result of a commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Update issued; controller is idle.
    Committed(ReviewId),
    /// Buffer failed validation; no write, still editing.
    Rejected(ReviewValidationError),
    /// The id is not the one being edited; nothing happened.
    NotEditing,
}

/// Single-editor state machine.
#[derive(Debug, Default)]
pub struct EditController {
    state: EditState,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Starts editing `review`, leaving any other edit first.
    ///
    /// Returns the id whose edit was abandoned, if any.
    pub fn begin_edit(&mut self, review: &Review) -> Option<ReviewId> {
        let previous = self.state.editing_id().filter(|id| *id != review.id);
        self.state = EditState::Editing {
            id: review.id,
            buffer: EditBuffer {
                title: review.title.clone(),
                content: review.content.clone(),
            },
        };
        debug!(
            "event=edit_begin module=edit status=ok review_id={} replaced={}",
            review.id,
            previous.is_some()
        );
        previous
    }

    /// Updates one buffered field of the review being edited.
    ///
    /// Returns `false` without changes when `id` is not being edited.
    pub fn edit_field(&mut self, id: ReviewId, field: ReviewField, value: impl Into<String>) -> bool {
        match &mut self.state {
            EditState::Editing {
                id: editing,
                buffer,
            } if *editing == id => {
                buffer.set(field, value.into());
                true
            }
            _ => false,
        }
    }

    /// Discards the buffer. Returns whether an edit was open.
    pub fn cancel(&mut self) -> bool {
        let was_editing = matches!(self.state, EditState::Editing { .. });
        self.state = EditState::Idle;
        was_editing
    }

    /// Validates the buffer and issues the update write.
    pub fn commit<W: ReviewWriter + ?Sized>(&mut self, id: ReviewId, writer: &mut W) -> CommitOutcome {
        let EditState::Editing {
            id: editing,
            buffer,
        } = &self.state
        else {
            return CommitOutcome::NotEditing;
        };
        if *editing != id {
            return CommitOutcome::NotEditing;
        }

        if let Err(err) = validate_text(&buffer.title, &buffer.content) {
            debug!("event=edit_commit module=edit status=rejected review_id={id} reason={err}");
            return CommitOutcome::Rejected(err);
        }

        let op = WriteOp::Update {
            id,
            title: buffer.title.trim().to_string(),
            content: buffer.content.trim().to_string(),
        };
        dispatch_write(writer, &[op]);
        self.state = EditState::Idle;
        CommitOutcome::Committed(id)
    }

    /// Issues a delete write and leaves edit state if `id` was being edited.
    ///
    /// Returns whether the edit state was reset.
    pub fn delete<W: ReviewWriter + ?Sized>(&mut self, id: ReviewId, writer: &mut W) -> bool {
        dispatch_write(writer, &[WriteOp::Delete(id)]);
        if self.state.is_editing(id) {
            self.state = EditState::Idle;
            return true;
        }
        false
    }

    /// Leaves edit state when the edited review vanished from `snapshot`.
    pub fn reconcile(&mut self, snapshot: &[Review]) -> bool {
        let Some(id) = self.state.editing_id() else {
            return false;
        };
        if snapshot.iter().any(|review| review.id == id) {
            return false;
        }
        debug!("event=edit_reconcile module=edit status=ok review_id={id} reason=removed");
        self.state = EditState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{CommitOutcome, EditController, EditState};
    use crate::model::review::{Review, ReviewField, ReviewValidationError};
    use crate::model::section::Section;
    use crate::service::test_support::RecordingWriter;
    use crate::store::WriteOp;
    use uuid::Uuid;

    fn review(title: &str) -> Review {
        Review::new(Uuid::new_v4(), Section::PlanningWedding, title, "venue notes", 10)
    }

    #[test]
    fn begin_edit_seeds_buffer_from_persisted_fields() {
        let target = review("Venue");
        let mut controller = EditController::new();
        controller.begin_edit(&target);

        match controller.state() {
            EditState::Editing { id, buffer } => {
                assert_eq!(*id, target.id);
                assert_eq!(buffer.title, "Venue");
                assert_eq!(buffer.content, "venue notes");
            }
            EditState::Idle => panic!("expected editing state"),
        }
    }

    #[test]
    fn second_begin_edit_replaces_first() {
        let first = review("first");
        let second = review("second");
        let mut controller = EditController::new();

        assert_eq!(controller.begin_edit(&first), None);
        assert_eq!(controller.begin_edit(&second), Some(first.id));
        assert_eq!(controller.state().editing_id(), Some(second.id));
    }

    #[test]
    fn edit_field_ignores_other_ids() {
        let target = review("Venue");
        let mut controller = EditController::new();
        controller.begin_edit(&target);

        assert!(!controller.edit_field(Uuid::new_v4(), ReviewField::Title, "x"));
        assert!(controller.edit_field(target.id, ReviewField::Title, "Caterer"));
        match controller.state() {
            EditState::Editing { buffer, .. } => assert_eq!(buffer.title, "Caterer"),
            EditState::Idle => panic!("expected editing state"),
        }
    }

    #[test]
    fn commit_writes_trimmed_title_and_content_then_idles() {
        let target = review("Venue");
        let mut controller = EditController::new();
        let mut writer = RecordingWriter::default();
        controller.begin_edit(&target);
        controller.edit_field(target.id, ReviewField::Content, "  booked  ");

        let outcome = controller.commit(target.id, &mut writer);

        assert_eq!(outcome, CommitOutcome::Committed(target.id));
        assert_eq!(controller.state(), &EditState::Idle);
        assert_eq!(
            writer.ops,
            vec![WriteOp::Update {
                id: target.id,
                title: "Venue".to_string(),
                content: "booked".to_string(),
            }]
        );
    }

    #[test]
    fn invalid_commit_writes_nothing_and_stays_editing() {
        let target = review("Venue");
        let mut controller = EditController::new();
        let mut writer = RecordingWriter::default();
        controller.begin_edit(&target);
        controller.edit_field(target.id, ReviewField::Title, "   ");

        let outcome = controller.commit(target.id, &mut writer);

        assert_eq!(
            outcome,
            CommitOutcome::Rejected(ReviewValidationError::EmptyTitle)
        );
        assert!(writer.ops.is_empty());
        assert!(controller.state().is_editing(target.id));
    }

    #[test]
    fn commit_for_other_id_is_ignored() {
        let target = review("Venue");
        let mut controller = EditController::new();
        let mut writer = RecordingWriter::default();
        controller.begin_edit(&target);

        assert_eq!(
            controller.commit(Uuid::new_v4(), &mut writer),
            CommitOutcome::NotEditing
        );
        assert!(writer.ops.is_empty());
        assert!(controller.state().is_editing(target.id));
    }

    #[test]
    fn cancel_discards_without_write() {
        let target = review("Venue");
        let mut controller = EditController::new();
        controller.begin_edit(&target);
        controller.edit_field(target.id, ReviewField::Title, "changed");

        assert!(controller.cancel());
        assert_eq!(controller.state(), &EditState::Idle);
        assert!(!controller.cancel());
    }

    #[test]
    fn deleting_edited_review_returns_to_idle() {
        let target = review("Venue");
        let mut controller = EditController::new();
        let mut writer = RecordingWriter::default();
        controller.begin_edit(&target);

        assert!(controller.delete(target.id, &mut writer));
        assert_eq!(controller.state(), &EditState::Idle);
        assert_eq!(writer.ops, vec![WriteOp::Delete(target.id)]);
    }

    #[test]
    fn deleting_other_review_keeps_edit_open() {
        let target = review("Venue");
        let other = review("Dress");
        let mut controller = EditController::new();
        let mut writer = RecordingWriter::default();
        controller.begin_edit(&target);

        assert!(!controller.delete(other.id, &mut writer));
        assert!(controller.state().is_editing(target.id));
        assert_eq!(writer.ops, vec![WriteOp::Delete(other.id)]);
    }

    #[test]
    fn reconcile_idles_when_edited_review_disappears() {
        let target = review("Venue");
        let other = review("Dress");
        let mut controller = EditController::new();
        controller.begin_edit(&target);

        assert!(!controller.reconcile(&[target.clone(), other.clone()]));
        assert!(controller.reconcile(&[other]));
        assert_eq!(controller.state(), &EditState::Idle);
    }
}
