//! Two-stage entry composer: pick a section, then fill title and content.
//!
//! # Invariants
//! - Fields only exist while a section is selected; going back drops them.
//! - Submit writes nothing unless both trimmed fields are non-empty.
//! - A successful submit resets the composer to `SelectingSection`.

use super::clock::Clock;
use super::dispatch_write;
use crate::model::review::{validate_text, Review, ReviewField, ReviewId, ReviewValidationError};
use crate::model::section::Section;
use crate::store::{ReviewWriter, WriteOp};
use log::debug;

/// Composer stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ComposerStage {
    #[default]
    SelectingSection,
    EnteringDetails {
        section: Section,
        title: String,
        content: String,
    },
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Create issued with the returned id; composer was reset.
    Submitted(ReviewId),
    /// Fields failed validation; nothing written.
    Rejected(ReviewValidationError),
    /// Still selecting a section; nothing written.
    NoSectionSelected,
}

/// Entry composer state machine. One per presentation instance.
#[derive(Debug, Default)]
pub struct Composer {
    stage: ComposerStage,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &ComposerStage {
        &self.stage
    }

    pub fn selected_section(&self) -> Option<Section> {
        match &self.stage {
            ComposerStage::SelectingSection => None,
            ComposerStage::EnteringDetails { section, .. } => Some(*section),
        }
    }

    /// Moves to `EnteringDetails` with empty fields.
    ///
    /// Returns `false` when a section is already selected.
    pub fn choose_section(&mut self, section: Section) -> bool {
        if !matches!(self.stage, ComposerStage::SelectingSection) {
            return false;
        }
        self.stage = ComposerStage::EnteringDetails {
            section,
            title: String::new(),
            content: String::new(),
        };
        true
    }

    /// Returns to section selection, dropping entered fields.
    pub fn back(&mut self) -> bool {
        let had_section = self.selected_section().is_some();
        self.stage = ComposerStage::SelectingSection;
        had_section
    }

    /// Sets one field. No-op while selecting a section.
    pub fn edit_field(&mut self, field: ReviewField, value: impl Into<String>) -> bool {
        match &mut self.stage {
            ComposerStage::SelectingSection => false,
            ComposerStage::EnteringDetails { title, content, .. } => {
                match field {
                    ReviewField::Title => *title = value.into(),
                    ReviewField::Content => *content = value.into(),
                }
                true
            }
        }
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        match &self.stage {
            ComposerStage::SelectingSection => false,
            ComposerStage::EnteringDetails { title, content, .. } => {
                validate_text(title, content).is_ok()
            }
        }
    }

    /// Issues a create write and resets the composer.
    pub fn submit<W, C>(&mut self, writer: &mut W, clock: &C) -> SubmitOutcome
    where
        W: ReviewWriter + ?Sized,
        C: Clock + ?Sized,
    {
        let ComposerStage::EnteringDetails {
            section,
            title,
            content,
        } = &self.stage
        else {
            return SubmitOutcome::NoSectionSelected;
        };

        if let Err(err) = validate_text(title, content) {
            debug!("event=composer_submit module=composer status=rejected reason={err}");
            return SubmitOutcome::Rejected(err);
        }

        let review = Review::new(
            writer.generate_id(),
            *section,
            title,
            content,
            clock.now_ms(),
        );
        let id = review.id;
        dispatch_write(writer, &[WriteOp::Create(review)]);
        self.stage = ComposerStage::SelectingSection;
        SubmitOutcome::Submitted(id)
    }
}
