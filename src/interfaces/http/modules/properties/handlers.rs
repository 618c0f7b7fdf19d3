//! Property API handlers

use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use super::dto::{
    CreatePropertyRequest, ImageUploadForm, PropertyDto, PropertyImageDto, PropertyQuery,
    SetAmenitiesRequest, UpdatePropertyRequest,
};
use crate::application::services::ImageUpload;
use crate::interfaces::http::common::{
    ApiError, ApiPath, ApiQuery, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::modules::amenities::AmenityDto;
use crate::interfaces::http::ApiState;
use crate::shared::PaginationParams;

#[utoipa::path(
    post,
    path = "/api/v1/properties",
    tag = "Properties",
    request_body = CreatePropertyRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Property created", body = ApiResponse<PropertyDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Property name taken")
    )
)]
pub async fn create_property(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ValidatedJson(request): ValidatedJson<CreatePropertyRequest>,
) -> ApiResult<PropertyDto> {
    let property = state.properties.create(&caller, request.into()).await?;
    Ok(ApiResponse::created(property.into()).message("Property created"))
}

#[utoipa::path(
    get,
    path = "/api/v1/properties",
    tag = "Properties",
    params(PropertyQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Properties page", body = ApiResponse<PaginatedResponse<PropertyDto>>))
)]
pub async fn list_properties(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<PropertyQuery>,
) -> ApiResult<PaginatedResponse<PropertyDto>> {
    let page = PaginationParams::new(query.page, query.limit);
    let result = state.properties.list(query.filter(), page).await?;
    Ok(ApiResponse::success(PaginatedResponse::from_result(result, PropertyDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Property", body = ApiResponse<PropertyDto>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<PropertyDto> {
    Ok(ApiResponse::success(state.properties.get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    request_body = UpdatePropertyRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Property updated", body = ApiResponse<PropertyDto>),
        (status = 404, description = "Property not found"),
        (status = 409, description = "Property name taken")
    )
)]
pub async fn update_property(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdatePropertyRequest>,
) -> ApiResult<PropertyDto> {
    let property = state.properties.update(&caller, id, request.into()).await?;
    Ok(ApiResponse::success(property.into()).message("Property updated"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Property and its images deleted"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn delete_property(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<()> {
    state.properties.delete(&caller, id).await?;
    Ok(ApiResponse::empty(StatusCode::OK, "Property deleted"))
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}/amenities",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Amenities of the property", body = ApiResponse<Vec<AmenityDto>>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn list_property_amenities(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Vec<AmenityDto>> {
    let amenities = state.properties.amenities(id).await?;
    Ok(ApiResponse::success(amenities.into_iter().map(AmenityDto::from).collect()))
}

#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}/amenities",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    request_body = SetAmenitiesRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Amenity set replaced", body = ApiResponse<Vec<AmenityDto>>),
        (status = 404, description = "Property or amenity not found")
    )
)]
pub async fn set_property_amenities(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<SetAmenitiesRequest>,
) -> ApiResult<Vec<AmenityDto>> {
    let ids: Vec<i32> = request.amenities.iter().map(|a| a.id).collect();
    let amenities = state.properties.set_amenities(&caller, id, &ids).await?;
    Ok(ApiResponse::success(amenities.into_iter().map(AmenityDto::from).collect())
        .message("Amenities updated"))
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}/images",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Images of the property", body = ApiResponse<Vec<PropertyImageDto>>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn list_property_images(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Vec<PropertyImageDto>> {
    let images = state.properties.images(id).await?;
    Ok(ApiResponse::success(images.into_iter().map(PropertyImageDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/properties/{id}/images",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Images stored", body = ApiResponse<Vec<PropertyImageDto>>),
        (status = 400, description = "Upload rejected by the upload policy"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn upload_property_images(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
    mut multipart: Multipart,
) -> ApiResult<Vec<PropertyImageDto>> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        // Non-file form fields are ignored
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        uploads.push(ImageUpload {
            original_name,
            bytes: bytes.to_vec(),
        });
    }

    let images = state.properties.upload_images(&caller, id, uploads).await?;
    Ok(ApiResponse::created(images.into_iter().map(PropertyImageDto::from).collect())
        .message("Images uploaded"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}/images/{image_id}",
    tag = "Properties",
    params(
        ("id" = i32, Path, description = "Property id"),
        ("image_id" = i32, Path, description = "Image id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Image deleted"),
        (status = 404, description = "Image not found for this property")
    )
)]
pub async fn delete_property_image(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath((id, image_id)): ApiPath<(i32, i32)>,
) -> ApiResult<()> {
    state.properties.delete_image(&caller, id, image_id).await?;
    Ok(ApiResponse::empty(StatusCode::OK, "Image deleted"))
}
