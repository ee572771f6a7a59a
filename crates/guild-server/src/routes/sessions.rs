use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::state::AppState;
use guild_core::session;

/// GET /api/sessions — list all sessions.
pub async fn list_sessions(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let sessions = session::list(&root)?;
        Ok::<_, guild_core::GuildError>(serde_json::to_value(&sessions)?)
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateSessionBody {
    pub project: String,
    pub scheduled_for: DateTime<Utc>,
    pub facilitator: String,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub max_players: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// POST /api/sessions — schedule a playtest (claims the queued entry).
pub async fn create_session(
    State(app): State<AppState>,
    Json(body): Json<CreateSessionBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let s = session::schedule(
            &root,
            &body.project,
            body.scheduled_for,
            &body.facilitator,
            body.venue,
            body.max_players,
            body.notes,
        )?;
        Ok::<_, guild_core::GuildError>(serde_json::to_value(&s)?)
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct RegisterBody {
    pub member: String,
}

/// POST /api/sessions/:id/register — sign a member up as a playtester.
pub async fn register_player(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let s = session::register(&root, &id, &body.member)?;
        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "id": s.id,
            "registered": s.registered,
            "max_players": s.max_players,
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/sessions/:id/complete — conclude a session and pay out points.
pub async fn complete_session(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let s = session::complete(&root, &id)?;
        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "id": s.id,
            "status": s.status,
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/sessions/:id/cancel — call off a session.
pub async fn cancel_session(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let s = session::cancel(&root, &id)?;
        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "id": s.id,
            "status": s.status,
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
