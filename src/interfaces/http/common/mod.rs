//! Shared HTTP building blocks

mod error;
mod extract;
mod pagination;
mod response;
mod validated_json;

pub use error::ApiError;
pub use extract::{ApiPath, ApiQuery};
pub use pagination::PageQuery;
pub use response::{ApiResponse, IdRef, PaginatedResponse};
pub use validated_json::ValidatedJson;

/// Result type returned by every handler
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;
