use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::role::{Role, RoleChanges};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    pub id: i32,
    pub role_name: String,
    pub description: Option<String>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Role> for RoleDto {
    fn from(r: Role) -> Self {
        Self {
            id: r.id,
            role_name: r.role_name,
            description: r.description,
            created_by: r.created_by,
            updated_by: r.updated_by,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 50, message = "role_name is required (max 50 characters)"))]
    pub role_name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 50))]
    pub role_name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

impl From<UpdateRoleRequest> for RoleChanges {
    fn from(r: UpdateRoleRequest) -> Self {
        Self {
            role_name: r.role_name,
            description: r.description,
            updated_by: None,
        }
    }
}
