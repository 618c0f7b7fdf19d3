use axum::extract::State;
use axum::http::StatusCode;

use super::dto::{SessionDto, SessionQuery};
use crate::interfaces::http::common::{ApiPath, ApiQuery, ApiResponse, ApiResult};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::ApiState;

#[utoipa::path(
    get,
    path = "/api/v1/user-sessions",
    tag = "Sessions",
    params(SessionQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sessions", body = ApiResponse<Vec<SessionDto>>),
        (status = 403, description = "Another user's sessions requested by a non-admin")
    )
)]
pub async fn list_sessions(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiQuery(query): ApiQuery<SessionQuery>,
) -> ApiResult<Vec<SessionDto>> {
    let sessions = state
        .auth
        .list_sessions(&caller, query.user_id, query.active.unwrap_or(true))
        .await?;
    Ok(ApiResponse::success(sessions.into_iter().map(SessionDto::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/user-sessions/{id}",
    tag = "Sessions",
    params(("id" = i32, Path, description = "Session id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session revoked"),
        (status = 403, description = "Session belongs to another user"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn revoke_session(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<()> {
    state.auth.revoke_session(&caller, id).await?;
    Ok(ApiResponse::empty(StatusCode::OK, "Session revoked"))
}
