//! Response envelope
//!
//! Every endpoint answers with
//! `{ "success": bool, "message": string, "data"?: T, "statusCode": u16 }`,
//! errors included.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::PaginatedResult;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Mirrors the HTTP status
    pub status_code: u16,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::with_status(StatusCode::OK, "Success", data)
    }

    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, "Created successfully", data)
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            success: status.is_success(),
            message: message.into(),
            data: Some(data),
            status_code: status.as_u16(),
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl ApiResponse<()> {
    /// Envelope without payload
    pub fn empty(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: status.is_success(),
            message: message.into(),
            data: None,
            status_code: status.as_u16(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// One page of a list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<U>(result: PaginatedResult<U>, f: impl FnMut(U) -> T) -> Self {
        let result = result.map(f);
        Self {
            items: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// Reference to another record: `{ "id": n }`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct IdRef {
    #[validate(range(min = 1, message = "id must be a positive integer"))]
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_uses_camel_case_status() {
        let body = serde_json::to_value(ApiResponse::created(7)).unwrap();
        assert_eq!(body["statusCode"], 201);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 7);
        assert!(body.get("status_code").is_none());
    }

    #[test]
    fn empty_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::empty(StatusCode::NOT_FOUND, "gone")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "gone");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn paginated_response_keeps_totals() {
        let page = PaginatedResponse::from_result(PaginatedResult::new(vec![1, 2], 5, 1, 2), |n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_pages, 3);
    }
}
