use axum::extract::{Query, State};
use axum::Json;

use crate::error::ApiError;
use crate::state::AppState;
use guild_core::feedback::{self, Comments, Ratings};

#[derive(serde::Deserialize)]
pub struct FeedbackFilter {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
}

/// GET /api/feedback — list feedback, optionally filtered by project or session.
pub async fn list_feedback(
    State(app): State<AppState>,
    Query(filter): Query<FeedbackFilter>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let entries = match (filter.project, filter.session) {
            (Some(p), _) => feedback::for_project(&root, &p)?,
            (None, Some(s)) => feedback::for_session(&root, &s)?,
            (None, None) => feedback::list(&root)?,
        };
        let averages = feedback::average_ratings(&entries);
        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "entries": entries,
            "rating_averages": averages,
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateFeedbackBody {
    pub session: String,
    pub player: String,
    pub ratings: Ratings,
    #[serde(default)]
    pub comments: Comments,
    pub would_play_again: bool,
    pub would_recommend: bool,
}

/// POST /api/feedback — file feedback for a session.
pub async fn create_feedback(
    State(app): State<AppState>,
    Json(body): Json<CreateFeedbackBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let fb = feedback::add(
            &root,
            &body.session,
            &body.player,
            body.ratings,
            body.comments,
            body.would_play_again,
            body.would_recommend,
        )?;
        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "id": fb.id,
            "project": fb.project,
            "player": fb.player,
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
