//! Presentation layouts sharing one data model.

use super::projector::ViewMode;
use crate::model::section::Section;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Front-end skin over identical CRUD behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Single column; every non-empty section is shown as its own group.
    #[default]
    Reader,
    /// One tab per section with a side composer; shows the selected tab only.
    Dashboard,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Dashboard => "dashboard",
        }
    }

    /// Projection mode for this layout given the selected tab.
    pub fn view_mode(self, selected: Section) -> ViewMode {
        match self {
            Self::Reader => ViewMode::Grouped,
            Self::Dashboard => ViewMode::Filtered(selected),
        }
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown layout name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutParseError(pub String);

impl Display for LayoutParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown layout `{}`; expected reader|dashboard", self.0)
    }
}

impl Error for LayoutParseError {}

impl FromStr for Layout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reader" => Ok(Self::Reader),
            "dashboard" => Ok(Self::Dashboard),
            other => Err(LayoutParseError(other.to_string())),
        }
    }
}
