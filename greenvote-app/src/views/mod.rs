//! Page view-models
//!
//! Each view owns its page state (load state, forms, selection, busy flag) and
//! drives the collaborators it was built with. Views are used from a single UI
//! task: every operation takes `&mut self` and awaits its own requests.
//!
//! # Views
//!
//! - [`ProjectDetailsView`]: a project's comment thread and the add-comment form
//! - [`TasksView`]: the task list, tag vocabulary, create and edit forms
//!
//! Mutations never touch the loaded lists. Keeping those in sync after a write
//! is the job of whoever owns the store's cache, through `refresh()`.

use crate::error::{LoadError, MutationError};
use greenvote_shared::auth::IdentityProvider;
use greenvote_shared::db::RecordStore;
use greenvote_shared::notify::Notifier;
use std::sync::Arc;
use validator::ValidationErrors;

pub mod project_details;
pub mod tasks;

pub use project_details::ProjectDetailsView;
pub use tasks::{TaskBoard, TasksView};

/// External subsystems a view depends on
#[derive(Clone)]
pub struct Collaborators {
    /// Remote data store
    pub store: Arc<dyn RecordStore>,

    /// Authentication subsystem
    pub identity: Arc<dyn IdentityProvider>,

    /// Notification subsystem
    pub notifier: Arc<dyn Notifier>,
}

/// Observable state of a view's initial read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    /// Not loaded yet
    Loading,

    /// Terminal error; nothing else renders
    Failed(LoadError),

    /// Loaded, possibly empty
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Loaded content, if any
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(content) => Some(content),
            _ => None,
        }
    }

    /// Load failure, if any
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Outcome of submitting a form or issuing a mutation
///
/// Failures have already been reported through the notifier by the time this
/// is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The request succeeded
    Submitted,

    /// The request failed; the form was left as it was
    Failed(MutationError),

    /// The form did not pass input validation; nothing was sent
    Invalid(ValidationErrors),
}

impl Submission {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Submission::Submitted)
    }
}
