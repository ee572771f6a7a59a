use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::state::AppState;
use guild_core::points;

/// GET /api/leaderboard — members ordered by combined points.
pub async fn get_leaderboard(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let board = points::leaderboard(&root)?;
        Ok::<_, guild_core::GuildError>(serde_json::to_value(&board)?)
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
