use axum::extract::State;
use axum::http::StatusCode;

use super::dto::{
    CreatePropertyCodeRequest, PropertyCodeDto, PropertyCodeQuery, UpdatePropertyCodeRequest,
};
use crate::interfaces::http::common::{
    ApiPath, ApiQuery, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::ApiState;
use crate::shared::PaginationParams;

#[utoipa::path(
    post,
    path = "/api/v1/property-codes",
    tag = "Property Codes",
    request_body = CreatePropertyCodeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Code created", body = ApiResponse<PropertyCodeDto>),
        (status = 404, description = "Property not found"),
        (status = 409, description = "Property already has a code of this type")
    )
)]
pub async fn create_property_code(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ValidatedJson(request): ValidatedJson<CreatePropertyCodeRequest>,
) -> ApiResult<PropertyCodeDto> {
    let code = state.property_codes.create(&caller, request.into()).await?;
    Ok(ApiResponse::created(code.into()).message("Property code created"))
}

#[utoipa::path(
    get,
    path = "/api/v1/property-codes",
    tag = "Property Codes",
    params(PropertyCodeQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Codes page", body = ApiResponse<PaginatedResponse<PropertyCodeDto>>),
        (status = 404, description = "Property filter names an unknown property")
    )
)]
pub async fn list_property_codes(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<PropertyCodeQuery>,
) -> ApiResult<PaginatedResponse<PropertyCodeDto>> {
    let page = PaginationParams::new(query.page, query.limit);
    let result = state.property_codes.list(query.property_id, page).await?;
    Ok(ApiResponse::success(PaginatedResponse::from_result(result, PropertyCodeDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/property-codes/{id}",
    tag = "Property Codes",
    params(("id" = i32, Path, description = "Code id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Code", body = ApiResponse<PropertyCodeDto>),
        (status = 404, description = "Code not found")
    )
)]
pub async fn get_property_code(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<PropertyCodeDto> {
    Ok(ApiResponse::success(state.property_codes.get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/property-codes/{id}",
    tag = "Property Codes",
    params(("id" = i32, Path, description = "Code id")),
    request_body = UpdatePropertyCodeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Code updated", body = ApiResponse<PropertyCodeDto>),
        (status = 404, description = "Code not found"),
        (status = 409, description = "Property already has a code of this type")
    )
)]
pub async fn update_property_code(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdatePropertyCodeRequest>,
) -> ApiResult<PropertyCodeDto> {
    let code = state.property_codes.update(&caller, id, request.into()).await?;
    Ok(ApiResponse::success(code.into()).message("Property code updated"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/property-codes/{id}",
    tag = "Property Codes",
    params(("id" = i32, Path, description = "Code id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Code deleted"),
        (status = 404, description = "Code not found")
    )
)]
pub async fn delete_property_code(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<()> {
    state.property_codes.delete(&caller, id).await?;
    Ok(ApiResponse::empty(StatusCode::OK, "Property code deleted"))
}
