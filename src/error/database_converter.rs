use crate::error::{ConstraintKind, ConstraintParser, StoreError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting Diesel errors to `StoreError`.
///
/// Constraint violations keep the relation and column they refer to;
/// everything else is carried through as an opaque database failure.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to the matching `StoreError` variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> StoreError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            other => StoreError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> StoreError {
        let constraint = match kind {
            DatabaseErrorKind::NotNullViolation => ConstraintKind::NotNull,
            DatabaseErrorKind::UniqueViolation => ConstraintKind::Unique,
            DatabaseErrorKind::ForeignKeyViolation => ConstraintKind::ForeignKey,
            DatabaseErrorKind::CheckViolation => ConstraintKind::Check,
            _ => {
                return StoreError::Database {
                    operation: operation.to_string(),
                    source: anyhow::Error::msg(format!("Database error: {}", info.message())),
                };
            }
        };

        let (entity, field) = ConstraintParser::resolve(info.as_ref());
        StoreError::Constraint {
            kind: constraint,
            entity,
            field,
            message: info.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock database error information for testing
    struct MockDatabaseErrorInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(
        kind: DatabaseErrorKind,
        message: &str,
        constraint: Option<&str>,
    ) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: message.to_string(),
                constraint_name: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_convert_not_null_violation() {
        let error = database_error(
            DatabaseErrorKind::NotNullViolation,
            "null value in column \"name\" of relation \"movies\" violates not-null constraint",
            None,
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert movie") {
            StoreError::Constraint {
                kind,
                entity,
                field,
                message,
            } => {
                assert_eq!(kind, ConstraintKind::NotNull);
                assert_eq!(entity, "movies");
                assert_eq!(field, "name");
                assert!(message.contains("not-null"));
            }
            other => panic!("Expected Constraint error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_check_violation() {
        let error = database_error(
            DatabaseErrorKind::CheckViolation,
            "new row for relation \"movies\" violates check constraint \"movies_price_check\"",
            Some("movies_price_check"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "update movie") {
            StoreError::Constraint { kind, entity, field, .. } => {
                assert_eq!(kind, ConstraintKind::Check);
                assert_eq!(entity, "movies");
                assert_eq!(field, "price");
            }
            other => panic!("Expected Constraint error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_unknown_database_error() {
        let error = database_error(
            DatabaseErrorKind::ClosedConnection,
            "server closed the connection unexpectedly",
            None,
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "list movies") {
            StoreError::Database { operation, source } => {
                assert_eq!(operation, "list movies");
                assert!(source.to_string().contains("closed the connection"));
            }
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_non_database_error() {
        let error = DieselError::BrokenTransactionManager;

        match DatabaseErrorConverter::convert_diesel_error(error, "count movies") {
            StoreError::Database { operation, .. } => assert_eq!(operation, "count movies"),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }
}
