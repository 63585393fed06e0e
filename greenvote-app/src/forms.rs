//! Form state with input-level validation
//!
//! Forms hold exactly what the user typed. Every field is required and
//! validated before a request is built; values are otherwise passed through
//! verbatim (status and priority are free text, nothing is trimmed or
//! normalized).

use chrono::NaiveDate;
use greenvote_shared::models::{Task, TaskFields};
use validator::{Validate, ValidationError};

const CALENDAR_DATE: &str = "%Y-%m-%d";

/// The add-a-comment form
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "Comment is required"))]
    pub content: String,
}

impl CommentForm {
    /// Clears the form
    pub fn reset(&mut self) {
        *self = CommentForm::default();
    }
}

/// The add-a-task form, also used pre-filled for editing
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct TaskForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,

    #[validate(length(min = 1, message = "Priority is required"))]
    pub priority: String,

    /// `YYYY-MM-DD`, as a date input produces it
    #[validate(custom(function = "validate_calendar_date"))]
    pub due_date: String,

    #[validate(length(min = 1, message = "Project ID is required"))]
    pub project_id: String,

    /// Selected tag names, in selection order
    tags: Vec<String>,
}

impl TaskForm {
    /// Edit form pre-filled from an existing task
    ///
    /// The due date is reduced to its calendar date. A stored value that is
    /// not a date leaves the field empty, so it must be re-entered.
    pub fn from_task(task: &Task) -> Self {
        TaskForm {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.clone(),
            priority: task.priority.clone(),
            due_date: task
                .due_on()
                .map(|date| date.format(CALENDAR_DATE).to_string())
                .unwrap_or_default(),
            project_id: task.project_id.to_string(),
            tags: Vec::new(),
        }
    }

    /// Column values to send, exactly as entered
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            priority: self.priority.clone(),
            due_date: self.due_date.clone(),
            project_id: self.project_id.clone(),
        }
    }

    /// Selected tag names, in selection order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Adds a tag name unless already selected; returns whether it was added
    pub(crate) fn select_tag(&mut self, name: &str) -> bool {
        if self.tags.iter().any(|t| t == name) {
            return false;
        }
        self.tags.push(name.to_string());
        true
    }

    /// Removes a tag name; returns whether it was selected
    pub(crate) fn deselect_tag(&mut self, name: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != name);
        self.tags.len() != before
    }

    /// Clears every field and the tag selection
    pub fn reset(&mut self) {
        *self = TaskForm::default();
    }

    /// True when nothing has been entered
    pub fn is_empty(&self) -> bool {
        *self == TaskForm::default()
    }
}

fn validate_calendar_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut err = ValidationError::new("length");
        err.message = Some("Due date is required".into());
        return Err(err);
    }

    NaiveDate::parse_from_str(value, CALENDAR_DATE)
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("calendar_date");
            err.message = Some("Due date must be YYYY-MM-DD".into());
            err
        })
}
