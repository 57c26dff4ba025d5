//! Review projection for grouped and tabbed layouts.
//!
//! # Responsibility
//! - Partition a snapshot by section, or filter it to one section.
//!
//! # Invariants
//! - Projection never reorders: relative order within every group or filter
//!   result equals the order of the input snapshot.
//! - Grouped output never contains a section with zero reviews.
//! - Empty input yields `ReviewView::Empty` in every mode.

use crate::model::review::Review;
use crate::model::section::{Section, SectionParseError};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Projection mode requested by a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Every non-empty section as its own group.
    Grouped,
    /// Only reviews filed under the given section.
    Filtered(Section),
}

/// Projected review list ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewView {
    /// The snapshot holds no reviews at all.
    Empty,
    /// Section → reviews, keyed in `Section::ALL` order.
    Grouped(BTreeMap<Section, Vec<Review>>),
    /// Reviews of one section; may be empty when other sections have entries.
    Filtered {
        section: Section,
        reviews: Vec<Review>,
    },
}

impl ReviewView {
    /// Total number of reviews in the projection.
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Grouped(groups) => groups.values().map(Vec::len).sum(),
            Self::Filtered { reviews, .. } => reviews.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Projection input error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    UnknownSection(String),
}

impl Display for ProjectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSection(slug) => write!(f, "section not found: `{slug}`"),
        }
    }
}

impl Error for ProjectionError {}

impl From<SectionParseError> for ProjectionError {
    fn from(value: SectionParseError) -> Self {
        Self::UnknownSection(value.0)
    }
}

/// Projects a snapshot according to `mode`.
pub fn project(reviews: &[Review], mode: ViewMode) -> ReviewView {
    if reviews.is_empty() {
        return ReviewView::Empty;
    }

    match mode {
        ViewMode::Grouped => ReviewView::Grouped(group_by_section(reviews)),
        ViewMode::Filtered(section) => ReviewView::Filtered {
            section,
            reviews: filter_by_section(reviews, section),
        },
    }
}

/// Projects a snapshot filtered to the section named by `slug`.
///
/// # Errors
/// - `UnknownSection` when `slug` is not one of the fixed section ids.
pub fn project_section_slug(reviews: &[Review], slug: &str) -> Result<ReviewView, ProjectionError> {
    let section = Section::from_slug(slug)?;
    Ok(project(reviews, ViewMode::Filtered(section)))
}

/// Partitions reviews by section, skipping sections without entries.
pub fn group_by_section(reviews: &[Review]) -> BTreeMap<Section, Vec<Review>> {
    let mut groups: BTreeMap<Section, Vec<Review>> = BTreeMap::new();
    for review in reviews {
        groups.entry(review.section).or_default().push(review.clone());
    }
    groups
}

/// Returns the reviews of one section in input order.
pub fn filter_by_section(reviews: &[Review], section: Section) -> Vec<Review> {
    reviews
        .iter()
        .filter(|review| review.section == section)
        .cloned()
        .collect()
}
