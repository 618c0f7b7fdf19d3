use serde::Deserialize;
use utoipa::IntoParams;

use crate::shared::PaginationParams;

/// `?page=&limit=` for plain list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (starting from 1)
    pub page: Option<u32>,
    /// Items per page (max 100)
    pub limit: Option<u32>,
    /// Case-insensitive name search
    pub search: Option<String>,
}

impl PageQuery {
    pub fn params(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }
}
