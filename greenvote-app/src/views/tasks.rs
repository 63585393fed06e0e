//! Tasks view: task list, tag vocabulary, create and edit forms
//!
//! # Loading
//!
//! Tasks and tags load concurrently on activation. The view is ready only
//! when both succeed; if either fails the whole view shows the load error.
//!
//! # Creating
//!
//! ```text
//! create_task()
//!   ├─> insert task                      (fails → toast, form kept)
//!   ├─> insert tag #1 with new task_id   (fails → toast, form kept,
//!   ├─> insert tag #2 ...                 task and earlier tags stay)
//!   └─> success toast, form reset
//! ```
//!
//! Tags are inserted strictly one after another in selection order, so a
//! failure part-way leaves a known prefix attached.
//!
//! # Editing
//!
//! Selecting a task opens a pre-filled edit form. Submitting it sends a
//! full-field update with the busy flag raised for the duration; the
//! selection stays open afterwards.

use super::{Collaborators, LoadState, Submission};
use crate::error::{LoadError, MutationError};
use crate::forms::TaskForm;
use greenvote_shared::db::{RecordStore, StoreResult, Table};
use greenvote_shared::models::{CreateTag, RecordId, Tag, Task, TaskFields};
use greenvote_shared::notify::Notifier;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use validator::Validate;

/// Everything the tasks page renders once loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoard {
    pub tasks: Vec<Task>,
    pub tags: Vec<Tag>,
}

impl TaskBoard {
    /// Distinct tag names in load order
    pub fn tag_vocabulary(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tags
            .iter()
            .map(|tag| tag.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

/// Lowers the busy flag when dropped, whatever the outcome
struct BusyGuard<'a> {
    flag: &'a watch::Sender<bool>,
}

impl<'a> BusyGuard<'a> {
    fn raise(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        BusyGuard { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}

/// State of the tasks page
pub struct TasksView {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    board: LoadState<TaskBoard>,
    create_form: TaskForm,
    selected: Option<Task>,
    edit_form: TaskForm,
    busy: watch::Sender<bool>,
}

impl TasksView {
    /// Creates the view; nothing is loaded until activation
    pub fn new(collaborators: &Collaborators) -> Self {
        let (busy, _) = watch::channel(false);
        TasksView {
            store: Arc::clone(&collaborators.store),
            notifier: Arc::clone(&collaborators.notifier),
            board: LoadState::Loading,
            create_form: TaskForm::default(),
            selected: None,
            edit_form: TaskForm::default(),
            busy,
        }
    }

    /// Loads tasks and tags
    pub async fn activate(&mut self) {
        self.load().await;
    }

    /// Re-reads tasks and tags
    ///
    /// For the owner of the store's cache invalidation; no handler in this
    /// view calls it.
    pub async fn refresh(&mut self) {
        self.load().await;
    }

    async fn load(&mut self) {
        let store = &*self.store;
        let (tasks, tags) = futures::join!(Task::list(store), Tag::list(store));

        self.board = match Self::combine(tasks, tags) {
            Ok(board) => {
                tracing::debug!(tasks = board.tasks.len(), tags = board.tags.len(), "Task board loaded");
                LoadState::Ready(board)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Task board failed to load");
                LoadState::Failed(err)
            }
        };
    }

    fn combine(tasks: StoreResult<Vec<Task>>, tags: StoreResult<Vec<Tag>>) -> Result<TaskBoard, LoadError> {
        let tasks = tasks.map_err(|e| LoadError::new(Table::Tasks, e))?;
        let tags = tags.map_err(|e| LoadError::new(Table::Tags, e))?;
        Ok(TaskBoard { tasks, tags })
    }

    /// Load state of the page
    pub fn board(&self) -> &LoadState<TaskBoard> {
        &self.board
    }

    /// Tag names offered for selection; empty until loaded
    pub fn tag_vocabulary(&self) -> Vec<&str> {
        self.board
            .ready()
            .map(TaskBoard::tag_vocabulary)
            .unwrap_or_default()
    }

    /// Whether an update is in flight
    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    /// Receiver that observes every change of the busy flag
    pub fn busy_watch(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    /// Current create form
    pub fn create_form(&self) -> &TaskForm {
        &self.create_form
    }

    /// Create form for input
    pub fn create_form_mut(&mut self) -> &mut TaskForm {
        &mut self.create_form
    }

    /// Adds a loaded tag name to the create form's selection
    ///
    /// Returns false for names outside the vocabulary or already selected.
    pub fn select_tag(&mut self, name: &str) -> bool {
        let known = self
            .board
            .ready()
            .is_some_and(|board| board.tags.iter().any(|tag| tag.name == name));
        if !known {
            return false;
        }
        self.create_form.select_tag(name)
    }

    /// Removes a name from the create form's selection
    pub fn deselect_tag(&mut self, name: &str) -> bool {
        self.create_form.deselect_tag(name)
    }

    /// Creates the task in the create form, then attaches its selected tags
    ///
    /// The loaded task list is not updated.
    pub async fn create_task(&mut self) -> Submission {
        if let Err(errors) = self.create_form.validate() {
            return Submission::Invalid(errors);
        }

        let fields = self.create_form.fields();
        let tag_names = self.create_form.tags().to_vec();

        match self.insert_task_with_tags(&fields, &tag_names).await {
            Ok(task) => {
                tracing::info!(task_id = %task.task_id, tags = tag_names.len(), "Task and tags created");
                self.notifier.success("Task created successfully!");
                self.create_form.reset();
                Submission::Submitted
            }
            Err(e) => {
                let err = MutationError::from(e);
                self.notifier
                    .failure(&format!("Failed to create task: {}", err.message()));
                Submission::Failed(err)
            }
        }
    }

    async fn insert_task_with_tags(&self, fields: &TaskFields, tag_names: &[String]) -> StoreResult<Task> {
        let store = &*self.store;
        let task = Task::create(store, fields).await?;

        for name in tag_names {
            let data = CreateTag {
                task_id: task.task_id.clone(),
                name: name.clone(),
            };
            Tag::create(store, &data).await?;
        }

        Ok(task)
    }

    /// Opens the edit form for a loaded task
    ///
    /// Returns false if no loaded task has that key.
    pub fn select_task(&mut self, task_id: &RecordId) -> bool {
        let Some(task) = self
            .board
            .ready()
            .and_then(|board| board.tasks.iter().find(|t| &t.task_id == task_id))
        else {
            return false;
        };

        self.edit_form = TaskForm::from_task(task);
        self.selected = Some(task.clone());
        true
    }

    /// Closes the edit form
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.edit_form.reset();
    }

    /// Task being edited
    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.as_ref()
    }

    /// Current edit form
    pub fn edit_form(&self) -> &TaskForm {
        &self.edit_form
    }

    /// Edit form for input
    pub fn edit_form_mut(&mut self) -> &mut TaskForm {
        &mut self.edit_form
    }

    /// Submits the edit form as an update of the selected task
    ///
    /// Returns `None` when no task is selected.
    pub async fn submit_edit(&mut self) -> Option<Submission> {
        let task_id = self.selected.as_ref()?.task_id.clone();

        if let Err(errors) = self.edit_form.validate() {
            return Some(Submission::Invalid(errors));
        }

        let fields = self.edit_form.fields();
        Some(self.update_task(&task_id, &fields).await)
    }

    /// Overwrites every writable column of a task
    ///
    /// The busy flag is up from before the request until it settles.
    pub async fn update_task(&mut self, task_id: &RecordId, fields: &TaskFields) -> Submission {
        let _busy = BusyGuard::raise(&self.busy);

        match Task::update(&*self.store, task_id, fields).await {
            Ok(()) => {
                self.notifier.success("Task updated successfully!");
                Submission::Submitted
            }
            Err(e) => {
                let err = MutationError::from(e);
                self.notifier
                    .failure(&format!("Failed to update task: {}", err.message()));
                Submission::Failed(err)
            }
        }
    }

    /// Deletes a task, no questions asked
    pub async fn delete_task(&mut self, task_id: &RecordId) -> Submission {
        match Task::delete(&*self.store, task_id).await {
            Ok(()) => {
                self.notifier.success("Task deleted successfully!");
                Submission::Submitted
            }
            Err(e) => {
                let err = MutationError::from(e);
                self.notifier
                    .failure(&format!("Failed to delete task: {}", err.message()));
                Submission::Failed(err)
            }
        }
    }
}
