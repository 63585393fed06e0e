//! # greenvote shared library
//!
//! Records, collaborator seams and their implementations used by the
//! greenvote views.
//!
//! ## Module Organization
//!
//! - `models`: task, tag, comment and project records with their store operations
//! - `db`: the remote record store seam, its REST and in-memory implementations
//! - `auth`: current-user resolution from the session token
//! - `notify`: user-facing success/failure notifications

pub mod auth;
pub mod db;
pub mod models;
pub mod notify;

/// Current version of the greenvote shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
