use axum::extract::State;

use super::dto::{
    ContactUsRequest, MaintenanceTicketRequest, TicketDto, TicketQuery, UpdateTicketStatusRequest,
};
use crate::interfaces::http::common::{
    ApiPath, ApiQuery, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::ApiState;
use crate::shared::PaginationParams;

#[utoipa::path(
    post,
    path = "/api/v1/tickets/contact",
    tag = "Tickets",
    request_body = ContactUsRequest,
    responses(
        (status = 201, description = "Ticket opened; support is notified by e-mail", body = ApiResponse<TicketDto>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_contact_ticket(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<ContactUsRequest>,
) -> ApiResult<TicketDto> {
    let ticket = state.tickets.contact(request.into()).await?;
    Ok(ApiResponse::created(ticket.into()).message("Thank you, we will get back to you shortly"))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets/maintenance",
    tag = "Tickets",
    request_body = MaintenanceTicketRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Maintenance ticket opened", body = ApiResponse<TicketDto>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn create_maintenance_ticket(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ValidatedJson(request): ValidatedJson<MaintenanceTicketRequest>,
) -> ApiResult<TicketDto> {
    let ticket = state.tickets.maintenance(&caller, request.into()).await?;
    Ok(ApiResponse::created(ticket.into()).message("Maintenance request received"))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    tag = "Tickets",
    params(TicketQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tickets page", body = ApiResponse<PaginatedResponse<TicketDto>>),
        (status = 400, description = "Unknown category or status filter"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_tickets(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiQuery(query): ApiQuery<TicketQuery>,
) -> ApiResult<PaginatedResponse<TicketDto>> {
    let filter = query.filter()?;
    let page = PaginationParams::new(query.page, query.limit);
    let result = state.tickets.list(&caller, filter, page).await?;
    Ok(ApiResponse::success(PaginatedResponse::from_result(result, TicketDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}",
    tag = "Tickets",
    params(("id" = i32, Path, description = "Ticket id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ticket", body = ApiResponse<TicketDto>),
        (status = 403, description = "Ticket belongs to another user"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn get_ticket(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<TicketDto> {
    Ok(ApiResponse::success(state.tickets.get(&caller, id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/tickets/{id}/status",
    tag = "Tickets",
    params(("id" = i32, Path, description = "Ticket id")),
    request_body = UpdateTicketStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<TicketDto>),
        (status = 400, description = "Unknown status or transition not allowed"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn update_ticket_status(
    State(state): State<ApiState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateTicketStatusRequest>,
) -> ApiResult<TicketDto> {
    let status = request.status()?;
    let ticket = state.tickets.update_status(&caller, id, status).await?;
    Ok(ApiResponse::success(ticket.into()).message("Ticket updated"))
}
