use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::state::AppState;
use guild_core::types::{QueueStatus, SessionStatus};

/// GET /api/overview — club name and entity counts.
pub async fn get_overview(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = guild_core::config::Config::load(&root)?;
        let members = guild_core::member::Member::list(&root)?;
        let projects = guild_core::project::GameProject::list(&root)?;
        let queue = guild_core::queue::list(&root)?;
        let sessions = guild_core::session::list(&root)?;

        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "club": config.club.name,
            "members": members.len(),
            "projects": projects.len(),
            "queued": queue.iter().filter(|e| e.status == QueueStatus::Queued).count(),
            "upcoming_sessions": sessions
                .iter()
                .filter(|s| s.status == SessionStatus::Scheduled)
                .count(),
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
