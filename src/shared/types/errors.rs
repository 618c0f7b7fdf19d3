use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} with {field}={value} not found")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Mail delivery failed: {0}")]
    Mail(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Whether this error is likely transient (e.g. a lost race on a unique
    /// constraint or a dropped DB connection) and the operation may succeed
    /// if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Conflict(_) | DomainError::Database(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        let msg = e.to_string();
        if msg.contains("UNIQUE") || msg.contains("duplicate") {
            DomainError::Conflict(format!("Unique constraint violated: {}", msg))
        } else {
            DomainError::Database(msg)
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mail transport error: {0}")]
    Mail(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err: DomainError =
            sea_orm::DbErr::Custom("UNIQUE constraint failed: roles.role_name".into()).into();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn other_db_errors_map_to_database() {
        let err: DomainError = sea_orm::DbErr::Custom("disk I/O error".into()).into();
        assert!(matches!(err, DomainError::Database(_)));
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = DomainError::not_found("Property", "id", 42);
        assert_eq!(err.to_string(), "Property with id=42 not found");
        assert!(!err.is_transient());
    }
}
