use axum::extract::State;
use axum::http::StatusCode;

use super::dto::{HolidayDto, HolidayQuery, HolidayRequest};
use crate::interfaces::http::common::{
    ApiPath, ApiQuery, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::ApiState;
use crate::shared::PaginationParams;

#[utoipa::path(
    post,
    path = "/api/v1/holidays",
    tag = "Holidays",
    request_body = HolidayRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Holiday created", body = ApiResponse<HolidayDto>),
        (status = 400, description = "Dates reversed or outside the year")
    )
)]
pub async fn create_holiday(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ValidatedJson(request): ValidatedJson<HolidayRequest>,
) -> ApiResult<HolidayDto> {
    let holiday = state.holidays.create(&caller, request.into()).await?;
    Ok(ApiResponse::created(holiday.into()).message("Holiday created"))
}

#[utoipa::path(
    get,
    path = "/api/v1/holidays",
    tag = "Holidays",
    params(HolidayQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Holidays page", body = ApiResponse<PaginatedResponse<HolidayDto>>))
)]
pub async fn list_holidays(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<HolidayQuery>,
) -> ApiResult<PaginatedResponse<HolidayDto>> {
    let page = PaginationParams::new(query.page, query.limit);
    let result = state.holidays.list(query.year, page).await?;
    Ok(ApiResponse::success(PaginatedResponse::from_result(result, HolidayDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/holidays/{id}",
    tag = "Holidays",
    params(("id" = i32, Path, description = "Holiday id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Holiday", body = ApiResponse<HolidayDto>),
        (status = 404, description = "Holiday not found")
    )
)]
pub async fn get_holiday(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<HolidayDto> {
    Ok(ApiResponse::success(state.holidays.get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/holidays/{id}",
    tag = "Holidays",
    params(("id" = i32, Path, description = "Holiday id")),
    request_body = HolidayRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Holiday updated", body = ApiResponse<HolidayDto>),
        (status = 400, description = "Dates reversed or outside the year"),
        (status = 404, description = "Holiday not found")
    )
)]
pub async fn update_holiday(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<HolidayRequest>,
) -> ApiResult<HolidayDto> {
    let holiday = state.holidays.update(&caller, id, request.into()).await?;
    Ok(ApiResponse::success(holiday.into()).message("Holiday updated"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/holidays/{id}",
    tag = "Holidays",
    params(("id" = i32, Path, description = "Holiday id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Holiday deleted"),
        (status = 404, description = "Holiday not found")
    )
)]
pub async fn delete_holiday(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<()> {
    state.holidays.delete(&caller, id).await?;
    Ok(ApiResponse::empty(StatusCode::OK, "Holiday deleted"))
}
