//! Error types for repository operations.
//! Defines the errors that can occur while reading or writing careplan records.
use thiserror::Error;

/// Represents errors that can occur within the careplan repositories.
///
/// Write paths translate foreign-key violations into `ForeignKeyViolation` so
/// callers can tell a dangling reference apart from an infrastructure failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Referenced record does not exist ({0})")]
    ForeignKeyViolation(String),

    #[error("Cannot order by '{field}'; expected one of: {allowed}")]
    InvalidSortColumn { field: String, allowed: String },

    #[error("Invalid {column} value stored: {value}")]
    InvalidStoredValue { column: String, value: String },

    #[error("Failed to encode {0}")]
    EncodingError(String),
}

impl RepositoryError {
    /// Maps an error raised by an INSERT or UPDATE.
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKeyViolation(
                    db_err.constraint().unwrap_or("foreign key").to_string(),
                );
            }
        }
        Self::DatabaseError(err)
    }

    pub fn invalid_stored_value(column: &str, value: impl Into<String>) -> Self {
        Self::InvalidStoredValue {
            column: column.to_string(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_write_keeps_non_database_errors() {
        let err = RepositoryError::from_write(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::DatabaseError(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_invalid_sort_column_message() {
        let err = RepositoryError::InvalidSortColumn {
            field: "Password".to_string(),
            allowed: "Name, CreatedAt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot order by 'Password'; expected one of: Name, CreatedAt"
        );
    }
}
