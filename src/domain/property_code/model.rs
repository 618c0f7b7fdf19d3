use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct PropertyCode {
    pub id: i32,
    pub property_id: i32,
    /// Unique per property, e.g. "door", "wifi"
    pub code_type: String,
    pub code: String,
    pub description: Option<String>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPropertyCode {
    pub property_id: i32,
    pub code_type: String,
    pub code: String,
    pub description: Option<String>,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyCodeChanges {
    pub code_type: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub updated_by: Option<i32>,
}

/// Code types are compared case-insensitively and stored lower-case.
pub fn normalize_code_type(code_type: &str) -> String {
    code_type.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_type_is_normalized() {
        assert_eq!(normalize_code_type("  Wi-Fi "), "wi-fi");
        assert_eq!(normalize_code_type("DOOR"), "door");
    }
}
