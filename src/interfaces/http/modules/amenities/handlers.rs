use axum::extract::State;
use axum::http::StatusCode;

use super::dto::{AmenityDto, CreateAmenityRequest, UpdateAmenityRequest};
use crate::interfaces::http::common::{
    ApiPath, ApiQuery, ApiResponse, ApiResult, PageQuery, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::ApiState;

#[utoipa::path(
    post,
    path = "/api/v1/amenities",
    tag = "Amenities",
    request_body = CreateAmenityRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Amenity created", body = ApiResponse<AmenityDto>),
        (status = 409, description = "Amenity name taken")
    )
)]
pub async fn create_amenity(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ValidatedJson(request): ValidatedJson<CreateAmenityRequest>,
) -> ApiResult<AmenityDto> {
    let amenity = state.amenities.create(&caller, request.into()).await?;
    Ok(ApiResponse::created(amenity.into()).message("Amenity created"))
}

#[utoipa::path(
    get,
    path = "/api/v1/amenities",
    tag = "Amenities",
    params(PageQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Amenities page", body = ApiResponse<PaginatedResponse<AmenityDto>>))
)]
pub async fn list_amenities(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<PaginatedResponse<AmenityDto>> {
    let result = state.amenities.list(query.search.clone(), query.params()).await?;
    Ok(ApiResponse::success(PaginatedResponse::from_result(result, AmenityDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/amenities/{id}",
    tag = "Amenities",
    params(("id" = i32, Path, description = "Amenity id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Amenity", body = ApiResponse<AmenityDto>),
        (status = 404, description = "Amenity not found")
    )
)]
pub async fn get_amenity(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<AmenityDto> {
    Ok(ApiResponse::success(state.amenities.get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/amenities/{id}",
    tag = "Amenities",
    params(("id" = i32, Path, description = "Amenity id")),
    request_body = UpdateAmenityRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Amenity updated", body = ApiResponse<AmenityDto>),
        (status = 404, description = "Amenity not found"),
        (status = 409, description = "Amenity name taken")
    )
)]
pub async fn update_amenity(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateAmenityRequest>,
) -> ApiResult<AmenityDto> {
    let amenity = state.amenities.update(&caller, id, request.into()).await?;
    Ok(ApiResponse::success(amenity.into()).message("Amenity updated"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/amenities/{id}",
    tag = "Amenities",
    params(("id" = i32, Path, description = "Amenity id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Amenity deleted"),
        (status = 404, description = "Amenity not found")
    )
)]
pub async fn delete_amenity(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<()> {
    state.amenities.delete(&caller, id).await?;
    Ok(ApiResponse::empty(StatusCode::OK, "Amenity deleted"))
}
