use axum::extract::State;

use super::dto::{SubscriptionDto, SubscriptionQuery, SubscriptionRequest};
use crate::interfaces::http::common::{
    ApiQuery, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::ApiState;
use crate::shared::PaginationParams;

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions/subscribe",
    tag = "Subscriptions",
    request_body = SubscriptionRequest,
    responses(
        (status = 200, description = "Subscribed (or already subscribed)", body = ApiResponse<SubscriptionDto>),
        (status = 400, description = "Invalid email")
    )
)]
pub async fn subscribe(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<SubscriptionRequest>,
) -> ApiResult<SubscriptionDto> {
    let subscription = state.subscriptions.subscribe(&request.email).await?;
    Ok(ApiResponse::success(subscription.into()).message("Subscribed"))
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions/unsubscribe",
    tag = "Subscriptions",
    request_body = SubscriptionRequest,
    responses(
        (status = 200, description = "Unsubscribed", body = ApiResponse<SubscriptionDto>),
        (status = 404, description = "Email is not subscribed")
    )
)]
pub async fn unsubscribe(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<SubscriptionRequest>,
) -> ApiResult<SubscriptionDto> {
    let subscription = state.subscriptions.unsubscribe(&request.email).await?;
    Ok(ApiResponse::success(subscription.into()).message("Unsubscribed"))
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions",
    tag = "Subscriptions",
    params(SubscriptionQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Subscriptions page", body = ApiResponse<PaginatedResponse<SubscriptionDto>>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_subscriptions(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiQuery(query): ApiQuery<SubscriptionQuery>,
) -> ApiResult<PaginatedResponse<SubscriptionDto>> {
    let page = PaginationParams::new(query.page, query.limit);
    let result = state.subscriptions.list(&caller, query.is_active, page).await?;
    Ok(ApiResponse::success(PaginatedResponse::from_result(result, SubscriptionDto::from)))
}
