//! Journal session: one live review list with its transient UI state.
//!
//! # Responsibility
//! - Hold the latest store `QueryState` and project it for the active layout.
//! - Route presentation actions to the edit controller and the composer.
//!
//! # Invariants
//! - The session keeps no entity cache beyond the last delivered snapshot.
//! - Each session owns its own controller and composer state.
//! - The projection is recomputed from the snapshot on every `view()` call.

use super::clock::{Clock, SystemClock};
use super::composer::{Composer, SubmitOutcome};
use super::edit_controller::{CommitOutcome, EditController, EditState};
use crate::model::review::{Review, ReviewField, ReviewId};
use crate::model::section::Section;
use crate::store::{EntityStore, LoadError, QueryState, ReviewQuery, Subscription};
use crate::view::layout::Layout;
use crate::view::projector::{project, ReviewView, ViewMode};
use log::{info, warn};

/// What the presentation should render for the review list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// No snapshot has been delivered yet.
    Loading,
    /// The subscription failed; blocking error.
    Failed(LoadError),
    Ready(ReviewView),
}

/// Review list bound to a store subscription.
pub struct JournalSession<S: EntityStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    subscription: Subscription,
    state: QueryState,
    layout: Layout,
    selected_section: Section,
    editor: EditController,
    composer: Composer,
}

impl<S: EntityStore> JournalSession<S, SystemClock> {
    /// Subscribes to every review and applies the initial delivery.
    pub fn new(store: S, layout: Layout) -> Self {
        Self::with_clock(store, SystemClock::new(), layout)
    }
}

impl<S: EntityStore, C: Clock> JournalSession<S, C> {
    pub fn with_clock(mut store: S, clock: C, layout: Layout) -> Self {
        let subscription = store.subscribe(ReviewQuery::all());
        let mut session = Self {
            store,
            clock,
            subscription,
            state: QueryState::loading(),
            layout,
            selected_section: Section::ALL[0],
            editor: EditController::new(),
            composer: Composer::new(),
        };
        session.sync();
        info!(
            "event=session_open module=session status=ok layout={} loading={}",
            layout,
            session.state.loading
        );
        session
    }

    /// Applies the most recent pending store notification.
    ///
    /// Returns `true` when a new state was received.
    pub fn sync(&mut self) -> bool {
        let Some(state) = self.subscription.latest() else {
            return false;
        };
        if let Some(err) = &state.error {
            warn!(
                "event=session_sync module=session status=error error={}",
                err.message()
            );
        }
        if let Some(snapshot) = &state.snapshot {
            self.editor.reconcile(snapshot);
        }
        self.state = state;
        true
    }

    pub fn view_state(&self) -> ViewState {
        if let Some(err) = &self.state.error {
            return ViewState::Failed(err.clone());
        }
        match &self.state.snapshot {
            Some(snapshot) => ViewState::Ready(project(snapshot, self.view_mode())),
            None => ViewState::Loading,
        }
    }

    /// Projected review list, or the load failure.
    ///
    /// While loading, an empty view is returned.
    pub fn view(&self) -> Result<ReviewView, LoadError> {
        match self.view_state() {
            ViewState::Ready(view) => Ok(view),
            ViewState::Loading => Ok(ReviewView::Empty),
            ViewState::Failed(err) => Err(err),
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.layout.view_mode(self.selected_section)
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.state.error.as_ref()
    }

    /// Reviews of the last delivered snapshot in store order.
    pub fn snapshot(&self) -> &[Review] {
        self.state.snapshot.as_deref().unwrap_or(&[])
    }

    pub fn find_review(&self, id: ReviewId) -> Option<&Review> {
        self.snapshot().iter().find(|review| review.id == id)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn selected_section(&self) -> Section {
        self.selected_section
    }

    pub fn edit_state(&self) -> &EditState {
        self.editor.state()
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Selects the dashboard tab.
    pub fn select_section(&mut self, section: Section) {
        self.selected_section = section;
    }

    /// Opens the inline editor for `id`, closing any other.
    ///
    /// Returns `false` when `id` is not in the current snapshot.
    pub fn begin_edit(&mut self, id: ReviewId) -> bool {
        let Some(review) = self.state.snapshot.as_deref().and_then(|reviews| {
            reviews.iter().find(|review| review.id == id)
        }) else {
            return false;
        };
        self.editor.begin_edit(review);
        true
    }

    pub fn edit_field(&mut self, id: ReviewId, field: ReviewField, value: impl Into<String>) -> bool {
        self.editor.edit_field(id, field, value)
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.editor.cancel()
    }

    pub fn commit_edit(&mut self, id: ReviewId) -> CommitOutcome {
        let outcome = self.editor.commit(id, &mut self.store);
        if matches!(outcome, CommitOutcome::Committed(_)) {
            self.sync();
        }
        outcome
    }

    pub fn delete_review(&mut self, id: ReviewId) {
        self.editor.delete(id, &mut self.store);
        self.sync();
    }

    pub fn composer_choose_section(&mut self, section: Section) -> bool {
        self.composer.choose_section(section)
    }

    pub fn composer_back(&mut self) -> bool {
        self.composer.back()
    }

    pub fn composer_edit_field(&mut self, field: ReviewField, value: impl Into<String>) -> bool {
        self.composer.edit_field(field, value)
    }

    pub fn composer_submit(&mut self) -> SubmitOutcome {
        let outcome = self.composer.submit(&mut self.store, &self.clock);
        if matches!(outcome, SubmitOutcome::Submitted(_)) {
            self.sync();
        }
        outcome
    }
}
