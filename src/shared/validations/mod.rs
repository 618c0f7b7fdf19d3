/// Clamp page (>= 1) and limit (1..=100, default 20).
pub fn validate_pagination(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    (page, limit)
}

/// Trimmed, non-empty string or a validation message naming the field.
pub fn require_non_empty(field: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{} must not be empty", field))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_is_clamped() {
        assert_eq!(validate_pagination(None, None), (1, 20));
        assert_eq!(validate_pagination(Some(0), Some(500)), (1, 100));
        assert_eq!(validate_pagination(Some(4), Some(0)), (4, 1));
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(require_non_empty("role_name", "   ").is_err());
        assert_eq!(require_non_empty("role_name", " Owner ").unwrap(), "Owner");
    }
}
