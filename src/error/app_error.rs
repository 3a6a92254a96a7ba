use std::fmt;

use crate::error::DatabaseErrorConverter;
use thiserror::Error;

/// Application-wide error type for the movie store.
///
/// Callers only need to tell two families apart: `Validation` means the
/// request was rejected before touching the database, `Store` means the
/// database (or the pool in front of it) refused or failed the call.
/// A missing row is never an error; lookups return `Option` instead.
#[derive(Error, Debug)]
pub enum AppError {
    /// Caller input rejected before any statement was issued
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Connection acquisition failed or the store rejected the statement
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Converts a Diesel error raised while running `operation`.
    pub fn database(operation: &str, error: diesel::result::Error) -> Self {
        AppError::Store(DatabaseErrorConverter::convert_diesel_error(error, operation))
    }

    /// Wraps a pool failure (build or checkout).
    pub fn connection_pool<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AppError::Store(StoreError::ConnectionPool {
            source: anyhow::Error::from(error),
        })
    }
}

/// Failures reported by the store or by the pool in front of it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No connection could be acquired
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// The statement violated a table constraint
    #[error("{kind} constraint violated on {entity}.{field}: {message}")]
    Constraint {
        kind: ConstraintKind,
        entity: String,
        field: String,
        message: String,
    },

    /// Any other rejection (syntax, type mismatch, broken connection)
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Kind of constraint a statement violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    NotNull,
    Unique,
    ForeignKey,
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::NotNull => "not-null",
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::Check => "check",
        };
        f.write_str(name)
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
