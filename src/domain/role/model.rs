//! Role domain entity

use chrono::{DateTime, Utc};

/// Role granted full access to the back office
pub const ADMIN_ROLE: &str = "admin";
/// Role assigned to share owners
pub const OWNER_ROLE: &str = "owner";

#[derive(Debug, Clone)]
pub struct Role {
    pub id: i32,
    pub role_name: String,
    pub description: Option<String>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        self.role_name.eq_ignore_ascii_case(ADMIN_ROLE)
    }
}

#[derive(Debug, Clone)]
pub struct NewRole {
    pub role_name: String,
    pub description: Option<String>,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct RoleChanges {
    pub role_name: Option<String>,
    pub description: Option<String>,
    pub updated_by: Option<i32>,
}
