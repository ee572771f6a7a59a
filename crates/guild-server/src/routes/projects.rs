use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::state::AppState;
use guild_core::project::{self, GameProject};
use guild_core::types::Stage;

/// GET /api/projects — list all projects.
pub async fn list_projects(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let projects = GameProject::list(&root)?;
        let list: Vec<serde_json::Value> = projects
            .iter()
            .map(|p| {
                serde_json::json!({
                    "slug": p.slug,
                    "title": p.title,
                    "designer": p.designer,
                    "stage": p.stage,
                    "current_version": p.current_version,
                    "retired": p.retired,
                    "updated_at": p.updated_at,
                })
            })
            .collect();
        Ok::<_, guild_core::GuildError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateProjectBody {
    pub slug: String,
    pub designer: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /api/projects — register a project.
pub async fn create_project(
    State(app): State<AppState>,
    Json(body): Json<CreateProjectBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut project = GameProject::create(&root, body.slug, &body.designer, body.title)?;
        if let Some(d) = body.description {
            project.set_description(d);
            project.save(&root)?;
        }

        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "slug": project.slug,
            "title": project.title,
            "stage": project.stage,
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/projects/:slug — full project detail, including feedback averages.
pub async fn get_project(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let p = GameProject::load(&root, &slug)?;
        let feedback = guild_core::feedback::for_project(&root, &slug)?;
        let averages = guild_core::feedback::average_ratings(&feedback);

        let mut value = serde_json::to_value(&p)?;
        if let serde_json::Value::Object(map) = &mut value {
            map.insert("feedback_count".to_string(), serde_json::json!(feedback.len()));
            map.insert("rating_averages".to_string(), serde_json::json!(averages));
        }
        Ok::<_, guild_core::GuildError>(value)
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct AdvanceBody {
    pub stage: String,
}

/// POST /api/projects/:slug/advance — advance the design stage.
pub async fn advance_project(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<AdvanceBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let target: Stage = body.stage.parse()?;
        let project = project::advance_stage(&root, &slug, target)?;

        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "slug": project.slug,
            "stage": project.stage,
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct IterateBody {
    pub version: String,
    pub changes: String,
    #[serde(default)]
    pub inspired_by: Vec<String>,
}

/// POST /api/projects/:slug/iterate — record a design revision.
pub async fn iterate_project(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<IterateBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut project = GameProject::load(&root, &slug)?;
        project.add_iteration(body.version, body.changes, body.inspired_by);
        project.save(&root)?;

        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "slug": project.slug,
            "current_version": project.current_version,
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
