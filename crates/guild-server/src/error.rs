use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guild_core::error::GuildError;

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<GuildError>() {
            match e {
                GuildError::NotInitialized => StatusCode::BAD_REQUEST,
                GuildError::MemberNotFound(_)
                | GuildError::ProjectNotFound(_)
                | GuildError::EntryNotFound(_)
                | GuildError::SessionNotFound(_)
                | GuildError::BadgeNotFound(_) => StatusCode::NOT_FOUND,
                GuildError::MemberExists(_)
                | GuildError::ProjectExists(_)
                | GuildError::AlreadyQueued(_)
                | GuildError::AlreadyRegistered { .. } => StatusCode::CONFLICT,
                GuildError::InvalidSlug(_)
                | GuildError::InvalidTier(_)
                | GuildError::InvalidPoints(_)
                | GuildError::InvalidStage(_)
                | GuildError::InvalidPointKind(_)
                | GuildError::InvalidRating { .. }
                | GuildError::InvalidComplexity(_)
                | GuildError::InvalidPlayerCount { .. } => StatusCode::BAD_REQUEST,
                GuildError::InvalidTransition { .. }
                | GuildError::SessionFull(_)
                | GuildError::ProjectRetired(_)
                | GuildError::NotRegistered { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                GuildError::Io(_) | GuildError::Yaml(_) | GuildError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_not_found_maps_to_404() {
        let err = ApiError(GuildError::MemberNotFound("sari".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn already_queued_maps_to_409() {
        let err = ApiError(GuildError::AlreadyQueued("spice-route".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_tier_maps_to_400() {
        let err = ApiError(GuildError::InvalidTier("platinum".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_points_maps_to_400() {
        let err = ApiError(GuildError::InvalidPoints(-5).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn session_full_maps_to_422() {
        let err = ApiError(GuildError::SessionFull("S1".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn invalid_transition_maps_to_422() {
        let err = ApiError(
            GuildError::InvalidTransition {
                from: "completed".into(),
                to: "scheduled".into(),
                reason: "entry must be queued".into(),
            }
            .into(),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn plain_anyhow_maps_to_500() {
        let err = ApiError(anyhow::anyhow!("boom"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
