//! Record models for greenvote
//!
//! Each model maps one backend table and carries its own store operations,
//! taking the store as `&dyn RecordStore`.
//!
//! # Models
//!
//! - `task`: volunteer tasks, free-form status and priority
//! - `tag`: names attached to tasks
//! - `comment`: project discussion
//! - `project`: read-only project catalogue
//! - `user`: opaque user identity
//!
//! # Example
//!
//! ```no_run
//! use greenvote_shared::db::MemoryStore;
//! use greenvote_shared::models::tag::{CreateTag, Tag};
//! use greenvote_shared::models::RecordId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//!
//! Tag::create(&store, &CreateTag {
//!     task_id: RecordId::new("17"),
//!     name: "volunteer".to_string(),
//! }).await?;
//!
//! let tags = Tag::list(&store).await?;
//! # Ok(())
//! # }
//! ```

pub mod comment;
pub mod id;
pub mod project;
pub mod tag;
pub mod task;
pub mod user;

pub use comment::{Comment, CreateComment};
pub use id::RecordId;
pub use project::Project;
pub use tag::{CreateTag, Tag};
pub use task::{Task, TaskFields};
pub use user::UserId;
