use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: i32,
    /// Stored lower-case
    pub email: String,
    pub is_active: bool,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn unsubscribe(&mut self) {
        self.is_active = false;
        self.unsubscribed_at = Some(Utc::now());
    }

    pub fn resubscribe(&mut self) {
        self.is_active = true;
        self.subscribed_at = Utc::now();
        self.unsubscribed_at = None;
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
