//! Review domain model.
//!
//! # Responsibility
//! - Define the canonical dated journal entry.
//! - Provide validation and normalization shared by every write path.
//!
//! # Invariants
//! - `id` is stable and never reused for another review.
//! - `title` and `content` are never persisted empty or whitespace-only.
//! - `created_at` is set once at creation and never mutated.

use super::section::Section;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a review.
pub type ReviewId = Uuid;

/// Text field of a review that can be edited by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewField {
    Title,
    Content,
}

/// Dated journal entry filed under one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub title: String,
    pub content: String,
    pub section: Section,
    /// Unix epoch milliseconds. Sole sort key, descending.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Review {
    /// Builds a review with trimmed title and content.
    ///
    /// Does not validate; callers go through `validate()` before persistence.
    pub fn new(
        id: ReviewId,
        section: Section,
        title: &str,
        content: &str,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            section,
            created_at,
        }
    }

    /// Validates text invariants.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is empty after trimming.
    /// - `EmptyContent` when `content` is empty after trimming.
    pub fn validate(&self) -> Result<(), ReviewValidationError> {
        validate_text(&self.title, &self.content)
    }
}

/// Text invariant violation for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewValidationError {
    EmptyTitle,
    EmptyContent,
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "review title must not be blank"),
            Self::EmptyContent => write!(f, "review content must not be blank"),
        }
    }
}

impl Error for ReviewValidationError {}

/// Checks that both text fields are non-empty after trimming.
pub fn validate_text(title: &str, content: &str) -> Result<(), ReviewValidationError> {
    if title.trim().is_empty() {
        return Err(ReviewValidationError::EmptyTitle);
    }
    if content.trim().is_empty() {
        return Err(ReviewValidationError::EmptyContent);
    }
    Ok(())
}
