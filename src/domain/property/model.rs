//! Property domain entity

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Property {
    pub id: i32,
    pub property_name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub zipcode: Option<String>,
    pub description: Option<String>,
    /// Number of ownership shares the property is split into
    pub total_shares: i32,
    /// Maximum guests per booking
    pub guest_capacity: i32,
    pub is_active: bool,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Whether a party of `guests` fits the property
    pub fn accepts_guests(&self, guests: i32) -> bool {
        guests >= 1 && guests <= self.guest_capacity
    }
}

#[derive(Debug, Clone)]
pub struct NewProperty {
    pub property_name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub zipcode: Option<String>,
    pub description: Option<String>,
    pub total_shares: i32,
    pub guest_capacity: i32,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyChanges {
    pub property_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zipcode: Option<String>,
    pub description: Option<String>,
    pub total_shares: Option<i32>,
    pub guest_capacity: Option<i32>,
    pub is_active: Option<bool>,
    pub updated_by: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    /// Matches name, address or city
    pub search: Option<String>,
    pub city: Option<String>,
    pub is_active: Option<bool>,
}

/// Image file stored on disk for a property
#[derive(Debug, Clone)]
pub struct PropertyImage {
    pub id: i32,
    pub property_id: i32,
    /// Name on disk, relative to the property's upload directory
    pub file_name: String,
    pub original_name: String,
    pub size_bytes: i64,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPropertyImage {
    pub property_id: i32,
    pub file_name: String,
    pub original_name: String,
    pub size_bytes: i64,
    pub created_by: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(capacity: i32) -> Property {
        Property {
            id: 1,
            property_name: "Lakeside Cabin".into(),
            address: "1 Shore Rd".into(),
            city: "Tahoe".into(),
            state: None,
            country: "US".into(),
            zipcode: None,
            description: None,
            total_shares: 8,
            guest_capacity: capacity,
            is_active: true,
            created_by: None,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn guest_capacity_bounds() {
        let p = property(4);
        assert!(p.accepts_guests(1));
        assert!(p.accepts_guests(4));
        assert!(!p.accepts_guests(0));
        assert!(!p.accepts_guests(5));
    }
}
