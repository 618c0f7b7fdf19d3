use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct UserSession {
    pub id: i32,
    /// Random key carried in the token's `sid` claim
    pub session_key: String,
    pub user_id: i32,
    pub token_hash: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserSession {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Active and not yet expired
    pub fn is_valid(&self) -> bool {
        self.is_active && !self.is_expired()
    }
}

#[derive(Debug, Clone)]
pub struct NewUserSession {
    pub session_key: String,
    pub user_id: i32,
    pub token_hash: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_in: Duration, active: bool) -> UserSession {
        UserSession {
            id: 1,
            session_key: "k".into(),
            user_id: 1,
            token_hash: "h".into(),
            ip_address: None,
            user_agent: None,
            expires_at: Utc::now() + expires_in,
            is_active: active,
            last_activity_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn validity_requires_active_and_unexpired() {
        assert!(session(Duration::hours(1), true).is_valid());
        assert!(!session(Duration::hours(1), false).is_valid());
        assert!(!session(Duration::hours(-1), true).is_valid());
    }
}
