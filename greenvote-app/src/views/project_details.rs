//! Project detail view: comment thread and add-comment form
//!
//! # Lifecycle
//!
//! ```text
//! new() ── activate() ──> identity resolved once
//!                         comments: Loading → Ready(list) | Failed (terminal)
//! submit_comment() ──> create request ──> success toast + cleared form
//!                                     └─> failure toast, form kept
//! ```
//!
//! A visitor nobody has signed in as can still comment; their comment is
//! stored without an author.

use super::{Collaborators, LoadState, Submission};
use crate::error::{LoadError, MutationError};
use crate::forms::CommentForm;
use chrono::Utc;
use greenvote_shared::auth::IdentityProvider;
use greenvote_shared::db::{RecordStore, Table};
use greenvote_shared::models::{Comment, CreateComment, RecordId, UserId};
use greenvote_shared::notify::Notifier;
use std::sync::Arc;
use validator::Validate;

/// State of the project detail page
pub struct ProjectDetailsView {
    project_id: RecordId,
    store: Arc<dyn RecordStore>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    activated: bool,
    user_id: Option<UserId>,
    comments: LoadState<Vec<Comment>>,
    form: CommentForm,
}

impl ProjectDetailsView {
    /// Creates the view for one project; nothing is loaded until activation
    pub fn new(project_id: RecordId, collaborators: &Collaborators) -> Self {
        ProjectDetailsView {
            project_id,
            store: Arc::clone(&collaborators.store),
            identity: Arc::clone(&collaborators.identity),
            notifier: Arc::clone(&collaborators.notifier),
            activated: false,
            user_id: None,
            comments: LoadState::Loading,
            form: CommentForm::default(),
        }
    }

    /// Resolves the current user and loads the comment thread
    ///
    /// Runs once per view; later calls are no-ops. A failed identity lookup
    /// is not retried and leaves the visitor anonymous.
    pub async fn activate(&mut self) {
        if self.activated {
            tracing::debug!(project_id = %self.project_id, "Project view already active");
            return;
        }
        self.activated = true;

        self.user_id = match self.identity.current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Identity lookup failed; commenting anonymously");
                None
            }
        };

        self.load_comments().await;
    }

    /// Re-reads the comment thread
    ///
    /// For the owner of the store's cache invalidation; no handler in this
    /// view calls it.
    pub async fn refresh(&mut self) {
        self.load_comments().await;
    }

    async fn load_comments(&mut self) {
        self.comments = match Comment::list_for_project(&*self.store, &self.project_id).await {
            Ok(comments) => {
                tracing::debug!(project_id = %self.project_id, count = comments.len(), "Comments loaded");
                LoadState::Ready(comments)
            }
            Err(e) => {
                let err = LoadError::new(Table::Comments, e);
                tracing::warn!(project_id = %self.project_id, error = %err, "Comments failed to load");
                LoadState::Failed(err)
            }
        };
    }

    /// Project this view shows
    pub fn project_id(&self) -> &RecordId {
        &self.project_id
    }

    /// Author attached to new comments, `None` when anonymous
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Load state of the comment thread
    pub fn comments(&self) -> &LoadState<Vec<Comment>> {
        &self.comments
    }

    /// Current add-comment form
    pub fn form(&self) -> &CommentForm {
        &self.form
    }

    /// Add-comment form for input
    pub fn form_mut(&mut self) -> &mut CommentForm {
        &mut self.form
    }

    /// Posts the comment in the form
    ///
    /// The loaded thread is not updated; the new comment shows up on the next
    /// refresh.
    pub async fn submit_comment(&mut self) -> Submission {
        if let Err(errors) = self.form.validate() {
            return Submission::Invalid(errors);
        }

        let data = CreateComment {
            task_id: self.project_id.clone(),
            user_id: self.user_id.clone(),
            content: self.form.content.clone(),
            created_at: Utc::now(),
        };

        match Comment::create(&*self.store, &data).await {
            Ok(_) => {
                self.notifier.success("Comment added successfully!");
                self.form.reset();
                Submission::Submitted
            }
            Err(e) => {
                let err = MutationError::from(e);
                self.notifier
                    .failure(&format!("Failed to add comment: {}", err.message()));
                Submission::Failed(err)
            }
        }
    }
}
