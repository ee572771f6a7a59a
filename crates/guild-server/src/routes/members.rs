use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::state::AppState;
use guild_core::member::Member;
use guild_core::types::MembershipTier;

/// GET /api/members — list all members.
pub async fn list_members(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let members = Member::list(&root)?;
        let list: Vec<serde_json::Value> = members
            .iter()
            .map(|m| {
                serde_json::json!({
                    "slug": m.slug,
                    "display_name": m.display_name,
                    "tier": m.tier,
                    "status": m.status,
                    "testing_points": m.testing_points,
                    "contribution_points": m.contribution_points,
                    "join_date": m.join_date,
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
pub struct CreateMemberBody {
    pub slug: String,
    pub display_name: String,
    pub email: String,
    pub tier: String,
    pub membership_expiry: DateTime<Utc>,
}

/// POST /api/members — register a member.
pub async fn create_member(
    State(app): State<AppState>,
    Json(body): Json<CreateMemberBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let tier: MembershipTier = body.tier.parse()?;
        let member = Member::create(
            &root,
            body.slug,
            body.display_name,
            body.email,
            tier,
            body.membership_expiry,
        )?;

        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "slug": member.slug,
            "tier": member.tier,
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/members/:slug — full member detail.
pub async fn get_member(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let m = Member::load(&root, &slug)?;
        Ok::<_, guild_core::GuildError>(serde_json::to_value(&m)?)
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct SetTierBody {
    pub tier: String,
}

/// POST /api/members/:slug/tier — change a member's tier.
pub async fn set_member_tier(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<SetTierBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let tier: MembershipTier = body.tier.parse()?;
        let mut member = Member::load(&root, &slug)?;
        member.set_tier(tier);
        member.save(&root)?;

        Ok::<_, guild_core::GuildError>(serde_json::json!({
            "slug": slug,
            "tier": tier,
        }))
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/members/:slug/badges — badges held by a member.
pub async fn get_member_badges(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        Member::load(&root, &slug)?;
        let held = guild_core::badge::for_member(&root, &slug)?;
        Ok::<_, guild_core::GuildError>(serde_json::to_value(&held)?)
    })
    .await
    .map_err(|e| ApiError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
