//! # Greenvote
//!
//! Loads the project detail page and the tasks page against the configured
//! record store and logs what each one would render.
//!
//! ## Usage
//!
//! ```bash
//! GREENVOTE_STORE=memory GREENVOTE_PROJECT_ID=1 cargo run -p greenvote
//! ```

use greenvote::{
    app,
    config::Config,
    views::{LoadState, ProjectDetailsView, TasksView},
};
use greenvote_shared::models::Project;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenvote=debug,greenvote_shared=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Greenvote v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let collaborators = app::build_collaborators(&config)?;

    match Project::find(&*collaborators.store, &config.project_id).await {
        Ok(Some(project)) => tracing::info!(project_id = %project.project_id, title = %project.title, "Project found"),
        Ok(None) => tracing::warn!(project_id = %config.project_id, "Project not found"),
        Err(e) => tracing::warn!(error = %e, "Project lookup failed"),
    }

    let mut details = ProjectDetailsView::new(config.project_id.clone(), &collaborators);
    let mut tasks = TasksView::new(&collaborators);
    tokio::join!(details.activate(), tasks.activate());

    match details.comments() {
        LoadState::Ready(comments) => tracing::info!(
            count = comments.len(),
            signed_in = details.user_id().is_some(),
            "Comment thread ready"
        ),
        LoadState::Failed(e) => tracing::error!(error = %e, "Comment thread unavailable"),
        LoadState::Loading => {}
    }

    match tasks.board() {
        LoadState::Ready(board) => {
            for task in &board.tasks {
                tracing::info!(
                    task_id = %task.task_id,
                    title = %task.title,
                    status = %task.status,
                    priority = %task.priority,
                    "Task"
                );
            }
            tracing::info!(
                tasks = board.tasks.len(),
                tags = ?board.tag_vocabulary(),
                "Task board ready"
            );
        }
        LoadState::Failed(e) => tracing::error!(error = %e, "Task board unavailable"),
        LoadState::Loading => {}
    }

    Ok(())
}
