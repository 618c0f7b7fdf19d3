use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::UserSession;

/// Session metadata; the token hash is not exposed.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionDto {
    pub id: i32,
    pub user_id: i32,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<UserSession> for SessionDto {
    fn from(s: UserSession) -> Self {
        let is_active = s.is_valid();
        Self {
            id: s.id,
            user_id: s.user_id,
            ip_address: s.ip_address,
            user_agent: s.user_agent,
            expires_at: s.expires_at,
            is_active,
            last_activity_at: s.last_activity_at,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionQuery {
    /// Another user's sessions (admin only)
    pub user_id: Option<i32>,
    /// Only sessions that are still usable (default true)
    pub active: Option<bool>,
}
