//! Authentication API handlers

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};

use super::dto::{ChangePasswordRequest, LoginRequest, LoginResponse, PasswordChanged};
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::modules::users::UserDto;
use crate::interfaces::http::ApiState;

fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials or disabled account")
    )
)]
pub async fn login(
    State(state): State<ApiState>,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let result = state
        .auth
        .login(&request.email, &request.password, client_ip(&headers), user_agent)
        .await?;
    Ok(ApiResponse::success(result.into()).message("Login successful"))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session closed"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(State(state): State<ApiState>, Caller(caller): Caller) -> ApiResult<()> {
    state.auth.logout(&caller).await?;
    Ok(ApiResponse::empty(StatusCode::OK, "Logged out"))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<ApiState>,
    Caller(caller): Caller,
) -> ApiResult<UserDto> {
    let user = state.auth.me(&caller).await?;
    Ok(ApiResponse::success(user.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    request_body = ChangePasswordRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Password changed; all sessions closed", body = ApiResponse<PasswordChanged>),
        (status = 400, description = "Current password is wrong or new password too short")
    )
)]
pub async fn change_password(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<PasswordChanged> {
    let revoked_sessions = state
        .auth
        .change_password(&caller, &request.current_password, &request.new_password)
        .await?;
    Ok(ApiResponse::success(PasswordChanged { revoked_sessions })
        .message("Password changed, please log in again"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_forwarded_address_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.1, 10.0.0.2".parse().unwrap());
        assert_eq!(client_ip(&headers).as_deref(), Some("10.0.0.1"));
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }
}
