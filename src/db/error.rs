//! Typed errors raised at the repository boundary.
//!
//! Constraint violations reported by the database are classified here so
//! callers never see raw driver errors for bad input.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("No {table} record with id {id}")]
    NotFound { table: String, id: String },

    #[error("Duplicate key in {table}: {message}")]
    DuplicateKey { table: String, message: String },

    #[error("Invalid {table} data: {message}")]
    InvalidData { table: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl DataError {
    pub fn not_found(table: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        }
    }

    pub fn invalid(table: &str, message: impl Into<String>) -> Self {
        Self::InvalidData {
            table: table.to_string(),
            message: message.into(),
        }
    }

    /// Maps a write failure on `table` to a typed error.
    ///
    /// Unique violations become [`DataError::DuplicateKey`]; foreign key,
    /// NOT NULL and CHECK violations become [`DataError::InvalidData`].
    /// Anything else is an infrastructure failure.
    #[must_use]
    pub fn classify(table: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::DuplicateKey {
                table: table.to_string(),
                message,
            },
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => Self::invalid(table, message),
            _ if is_constraint_violation(&err) => Self::invalid(table, err.to_string()),
            _ => Self::Database(err),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn is_constraint_violation(err: &DbErr) -> bool {
    match err {
        DbErr::Exec(_) | DbErr::Query(_) => err
            .to_string()
            .to_ascii_lowercase()
            .contains("constraint failed"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn not_null_violation_is_invalid_data() {
        let err = DbErr::Exec(RuntimeErr::Internal(
            "NOT NULL constraint failed: users.email".to_string(),
        ));
        let classified = DataError::classify("users", err);
        assert!(matches!(classified, DataError::InvalidData { .. }));
    }

    #[test]
    fn connection_failure_stays_a_database_error() {
        let err = DbErr::Conn(RuntimeErr::Internal("pool timed out".to_string()));
        let classified = DataError::classify("users", err);
        assert!(matches!(classified, DataError::Database(_)));
    }

    #[test]
    fn not_found_message_names_table_and_id() {
        let err = DataError::not_found("countries", 7);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No countries record with id 7");
    }
}
