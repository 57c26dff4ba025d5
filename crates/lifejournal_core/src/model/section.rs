//! Closed set of life sections a review can be filed under.
//!
//! # Invariants
//! - The set is fixed at compile time; unknown slugs never parse.
//! - `Section::ALL` order is the canonical display order for every layout.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Life section a review is written under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// Growing the Instant product.
    GrowingInstant,
    /// Wedding planning.
    PlanningWedding,
    /// Fitness journey.
    BestShape,
}

/// Visual accent token consumed by presentation skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accent {
    Blue,
    Pink,
    Green,
}

impl Accent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Pink => "pink",
            Self::Green => "green",
        }
    }
}

impl Section {
    /// All sections in canonical display order.
    pub const ALL: [Section; 3] = [
        Section::GrowingInstant,
        Section::PlanningWedding,
        Section::BestShape,
    ];

    /// Stable identifier used in storage and on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Self::GrowingInstant => "growing-instant",
            Self::PlanningWedding => "planning-wedding",
            Self::BestShape => "best-shape",
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::GrowingInstant => "Growing Instant",
            Self::PlanningWedding => "Planning My Wedding",
            Self::BestShape => "Getting Into the Best Shape of My Life",
        }
    }

    pub fn accent(self) -> Accent {
        match self {
            Self::GrowingInstant => Accent::Blue,
            Self::PlanningWedding => Accent::Pink,
            Self::BestShape => Accent::Green,
        }
    }

    /// Looks up a section by slug.
    ///
    /// Input is trimmed and compared case-insensitively.
    pub fn from_slug(value: &str) -> Result<Self, SectionParseError> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|section| section.slug() == normalized)
            .ok_or_else(|| SectionParseError(value.trim().to_string()))
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Section {
    type Err = SectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s)
    }
}

/// Unknown section slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionParseError(pub String);

impl Display for SectionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown section `{}`; expected growing-instant|planning-wedding|best-shape",
            self.0
        )
    }
}

impl Error for SectionParseError {}
