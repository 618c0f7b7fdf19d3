//! User API handlers

use axum::extract::State;
use axum::http::StatusCode;

use super::dto::{CreateUserRequest, UpdateUserRequest, UserDto, UserQuery};
use crate::interfaces::http::common::{
    ApiPath, ApiQuery, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::ApiState;
use crate::shared::PaginationParams;

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Role not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<UserDto> {
    let user = state.users.create_by(&caller, request.into()).await?;
    Ok(ApiResponse::created(user.into()).message("User created"))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(UserQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users page", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> ApiResult<PaginatedResponse<UserDto>> {
    let page = PaginationParams::new(query.page, query.limit);
    let result = state.users.list(&caller, query.filter(), page).await?;
    Ok(ApiResponse::success(PaginatedResponse::from_result(result, UserDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User", body = ApiResponse<UserDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<UserDto> {
    let user = state.users.get(&caller, id).await?;
    Ok(ApiResponse::success(user.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 403, description = "Not allowed to change this user"),
        (status = 404, description = "User or role not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_user(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    let user = state.users.update(&caller, id, request.into()).await?;
    Ok(ApiResponse::success(user.into()).message("User updated"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<()> {
    state.users.delete(&caller, id).await?;
    Ok(ApiResponse::empty(StatusCode::OK, "User deleted"))
}
