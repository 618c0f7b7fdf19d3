use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Amenity {
    pub id: i32,
    pub amenity_name: String,
    /// Free-form grouping, e.g. "Kitchen", "Outdoor"
    pub amenity_type: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAmenity {
    pub amenity_name: String,
    pub amenity_type: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct AmenityChanges {
    pub amenity_name: Option<String>,
    pub amenity_type: Option<String>,
    pub description: Option<String>,
    pub updated_by: Option<i32>,
}
