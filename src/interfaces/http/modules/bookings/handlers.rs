//! Booking API handlers

use axum::extract::State;

use super::dto::{BookingDto, BookingQuery, CreateBookingRequest, UpdateBookingRequest};
use crate::interfaces::http::common::{
    ApiPath, ApiQuery, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::ApiState;
use crate::shared::PaginationParams;

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Booking created with a fresh FX identifier", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid stay, party size or inactive property"),
        (status = 404, description = "Property or user not found"),
        (status = 409, description = "Dates overlap an existing booking")
    )
)]
pub async fn create_booking(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<BookingDto> {
    let booking = state.bookings.create(&caller, request.into()).await?;
    Ok(ApiResponse::created(booking.into()).message("Booking created"))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    params(BookingQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings page", body = ApiResponse<PaginatedResponse<BookingDto>>),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_bookings(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<BookingQuery>,
) -> ApiResult<PaginatedResponse<BookingDto>> {
    let filter = query.filter()?;
    let page = PaginationParams::new(query.page, query.limit);
    let result = state.bookings.list(filter, page).await?;
    Ok(ApiResponse::success(PaginatedResponse::from_result(result, BookingDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Numeric booking id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<BookingDto> {
    Ok(ApiResponse::success(state.bookings.get(id).await?.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/reference/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = String, Path, description = "Booking identifier, e.g. FX20240701")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking_by_reference(
    State(state): State<ApiState>,
    ApiPath(booking_id): ApiPath<String>,
) -> ApiResult<BookingDto> {
    let booking = state.bookings.get_by_reference(&booking_id).await?;
    Ok(ApiResponse::success(booking.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Numeric booking id")),
    request_body = UpdateBookingRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid stay or booking no longer confirmed"),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Dates overlap an existing booking")
    )
)]
pub async fn update_booking(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateBookingRequest>,
) -> ApiResult<BookingDto> {
    let booking = state.bookings.update(&caller, id, request.into()).await?;
    Ok(ApiResponse::success(booking.into()).message("Booking updated"))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Numeric booking id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingDto>),
        (status = 400, description = "Booking already cancelled or completed"),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<BookingDto> {
    let booking = state.bookings.cancel(&caller, id).await?;
    Ok(ApiResponse::success(booking.into()).message("Booking cancelled"))
}
