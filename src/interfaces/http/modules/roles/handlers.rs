//! Role API handlers

use axum::extract::State;
use axum::http::StatusCode;

use super::dto::{CreateRoleRequest, RoleDto, UpdateRoleRequest};
use crate::interfaces::http::common::{
    ApiPath, ApiQuery, ApiResponse, ApiResult, PageQuery, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::ApiState;

#[utoipa::path(
    post,
    path = "/api/v1/roles",
    tag = "Roles",
    request_body = CreateRoleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Role created", body = ApiResponse<RoleDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Role name taken")
    )
)]
pub async fn create_role(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ValidatedJson(request): ValidatedJson<CreateRoleRequest>,
) -> ApiResult<RoleDto> {
    let role = state
        .roles
        .create(&caller, &request.role_name, request.description)
        .await?;
    Ok(ApiResponse::created(role.into()).message("Role created"))
}

#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "Roles",
    params(PageQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Roles page", body = ApiResponse<PaginatedResponse<RoleDto>>))
)]
pub async fn list_roles(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<PaginatedResponse<RoleDto>> {
    let result = state.roles.list(query.search.clone(), query.params()).await?;
    Ok(ApiResponse::success(PaginatedResponse::from_result(result, RoleDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    params(("id" = i32, Path, description = "Role id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role", body = ApiResponse<RoleDto>),
        (status = 404, description = "Role not found")
    )
)]
pub async fn get_role(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<RoleDto> {
    Ok(ApiResponse::success(state.roles.get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    params(("id" = i32, Path, description = "Role id")),
    request_body = UpdateRoleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<RoleDto>),
        (status = 404, description = "Role not found"),
        (status = 409, description = "Role name taken")
    )
)]
pub async fn update_role(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<RoleDto> {
    let role = state.roles.update(&caller, id, request.into()).await?;
    Ok(ApiResponse::success(role.into()).message("Role updated"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    params(("id" = i32, Path, description = "Role id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role deleted"),
        (status = 404, description = "Role not found"),
        (status = 409, description = "Role still assigned to users")
    )
)]
pub async fn delete_role(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<()> {
    state.roles.delete(&caller, id).await?;
    Ok(ApiResponse::empty(StatusCode::OK, "Role deleted"))
}
