//! # Greenvote
//!
//! Page logic of the community project-voting app: the project detail page
//! with its comment thread, and the tasks page with tags.
//!
//! ## Modules
//!
//! - `app`: Builds the collaborators from configuration
//! - `config`: Configuration management
//! - `error`: Load and mutation errors
//! - `forms`: Form state and input validation
//! - `views`: Page view-models

pub mod app;
pub mod config;
pub mod error;
pub mod forms;
pub mod views;
