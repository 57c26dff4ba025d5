//! Core domain logic for the life journal.
//! This crate is the single source of truth for review invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, JournalConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::review::{validate_text, Review, ReviewField, ReviewId, ReviewValidationError};
pub use model::section::{Accent, Section, SectionParseError};
pub use repo::review_repo::{
    RepoError, RepoResult, ReviewListQuery, ReviewRepository, SqliteReviewRepository,
};
pub use service::clock::{Clock, ManualClock, SystemClock};
pub use service::composer::{Composer, ComposerStage, SubmitOutcome};
pub use service::edit_controller::{CommitOutcome, EditBuffer, EditController, EditState};
pub use service::session::{JournalSession, ViewState};
pub use store::{
    EntityStore, LoadError, QueryState, ReviewQuery, ReviewWriter, Snapshot, SqliteReviewStore,
    Subscription, WriteOp,
};
pub use view::layout::{Layout, LayoutParseError};
pub use view::projector::{
    filter_by_section, group_by_section, project, project_section_slug, ProjectionError,
    ReviewView, ViewMode,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
