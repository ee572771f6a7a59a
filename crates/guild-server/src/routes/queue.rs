use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;

use crate::error::ApiError;
use crate::state::AppState;
use guild_core::queue;

/// GET /api/queue — the playtest queue, ranked by priority.
///
/// One `now` is taken per request, so every entry in the response is
/// scored as of the same instant.
pub async fn get_ranked_queue(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let ranked = queue::ranked(&root, Utc::now())?;
        Ok::<_, guild_core::GuildError>(serde_json::to_value(&ranked)?)
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct SubmitBody {
    pub project: String,
}

/// POST /api/queue — submit a project for playtesting.
pub async fn submit_to_queue(
    State(app): State<AppState>,
    Json(body): Json<SubmitBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let entry = queue::submit(&root, &body.project)?;
        Ok::<_, guild_core::GuildError>(serde_json::to_value(&entry)?)
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// DELETE /api/queue/:id — withdraw a queued submission.
pub async fn withdraw_from_queue(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        queue::withdraw(&root, &id)?;
        Ok::<_, guild_core::GuildError>(serde_json::json!({ "id": id, "withdrawn": true }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
