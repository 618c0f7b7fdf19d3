use chrono::{DateTime, Utc};

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role_id: i32,
    /// Name of the referenced role, resolved on load
    pub role_name: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role_name.eq_ignore_ascii_case(crate::domain::role::ADMIN_ROLE)
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role_id: i32,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role_id: Option<i32>,
    pub is_active: Option<bool>,
    pub updated_by: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Matches first name, last name or email
    pub search: Option<String>,
    pub role_id: Option<i32>,
    pub is_active: Option<bool>,
}
