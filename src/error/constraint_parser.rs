use std::sync::OnceLock;

use diesel::result::DatabaseErrorInformation;
use regex::Regex;

/// Utility for pulling the offending relation and column out of PostgreSQL
/// constraint violation diagnostics.
///
/// Structured fields reported by the server are preferred; the message text
/// and the constraint name are only parsed when those are missing.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing, cached for performance
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    relation_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // Matches "Key (field)=(value)" in DETAIL lines
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key pattern"),
            column_name: Regex::new(r#"column "([^"]+)""#).expect("valid column pattern"),
            // PostgreSQL says either `relation "x"` or `table "x"` depending on the check
            relation_name: Regex::new(r#"(?:relation|table) "([^"]+)""#)
                .expect("valid relation pattern"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

/// Suffixes PostgreSQL appends to generated constraint names
const CONSTRAINT_SUFFIXES: &[&str] = &["_pkey", "_fkey", "_key", "_check", "_not_null", "_idx"];

const UNKNOWN: &str = "unknown";

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Resolves the `(entity, field)` pair a violation refers to.
    ///
    /// Falls back to `"unknown"` for whichever part cannot be recovered.
    pub fn resolve(info: &dyn DatabaseErrorInformation) -> (String, String) {
        let message = info.message();
        let from_constraint = info.constraint_name().and_then(Self::parse_constraint_name);

        let entity = info
            .table_name()
            .map(str::to_string)
            .or_else(|| Self::extract_relation_from_message(message))
            .or_else(|| from_constraint.as_ref().map(|(entity, _)| entity.clone()))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let field = info
            .column_name()
            .map(str::to_string)
            .or_else(|| Self::extract_column_from_message(message))
            .or_else(|| {
                info.details()
                    .and_then(Self::extract_key_value_from_message)
                    .map(|(field, _)| field)
            })
            .or_else(|| from_constraint.map(|(_, field)| field))
            .unwrap_or_else(|| UNKNOWN.to_string());

        (entity, field)
    }

    /// Splits a generated constraint name into `(entity, field)`.
    ///
    /// - "movies_name_key" -> ("movies", "name")
    /// - "movies_duration_check" -> ("movies", "duration")
    /// - "screenings_movie_id_fkey" -> ("screenings", "movie_id")
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (entity, field) = stem.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_relation_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .relation_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts `(field, value)` from "Key (field)=(value)" detail text.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Diagnostic {
        message: &'static str,
        details: Option<&'static str>,
        table: Option<&'static str>,
        column: Option<&'static str>,
        constraint: Option<&'static str>,
    }

    impl Diagnostic {
        fn message(message: &'static str) -> Self {
            Self {
                message,
                details: None,
                table: None,
                column: None,
                constraint: None,
            }
        }
    }

    impl DatabaseErrorInformation for Diagnostic {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            self.details
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            self.table
        }

        fn column_name(&self) -> Option<&str> {
            self.column
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_resolve_prefers_structured_fields() {
        let diagnostic = Diagnostic {
            table: Some("movies"),
            column: Some("price"),
            ..Diagnostic::message("null value in column \"name\" violates not-null constraint")
        };

        let (entity, field) = ConstraintParser::resolve(&diagnostic);
        assert_eq!(entity, "movies");
        assert_eq!(field, "price");
    }

    #[test]
    fn test_resolve_not_null_from_message() {
        let diagnostic = Diagnostic::message(
            "null value in column \"name\" of relation \"movies\" violates not-null constraint",
        );

        let (entity, field) = ConstraintParser::resolve(&diagnostic);
        assert_eq!(entity, "movies");
        assert_eq!(field, "name");
    }

    #[test]
    fn test_resolve_unique_from_details() {
        let diagnostic = Diagnostic {
            details: Some("Key (name)=(Inception) already exists."),
            ..Diagnostic::message("duplicate key value violates unique constraint \"uq_title\"")
        };

        let (entity, field) = ConstraintParser::resolve(&diagnostic);
        assert_eq!(entity, UNKNOWN);
        assert_eq!(field, "name");
    }

    #[test]
    fn test_resolve_check_from_constraint_name() {
        let diagnostic = Diagnostic {
            constraint: Some("movies_duration_check"),
            ..Diagnostic::message("violates check constraint")
        };

        let (entity, field) = ConstraintParser::resolve(&diagnostic);
        assert_eq!(entity, "movies");
        assert_eq!(field, "duration");
    }

    #[test]
    fn test_resolve_unknown() {
        let diagnostic = Diagnostic::message("completely unrelated error message");
        let (entity, field) = ConstraintParser::resolve(&diagnostic);
        assert_eq!(entity, UNKNOWN);
        assert_eq!(field, UNKNOWN);
    }

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("movies_name_key"),
            Some(("movies".to_string(), "name".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("screenings_movie_id_fkey"),
            Some(("screenings".to_string(), "movie_id".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("movies_key"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("invalid"), None);
    }

    #[test]
    fn test_extract_relation_from_message() {
        let message = "insert or update on table \"screenings\" violates foreign key constraint";
        assert_eq!(
            ConstraintParser::extract_relation_from_message(message),
            Some("screenings".to_string())
        );
        assert_eq!(
            ConstraintParser::extract_relation_from_message("no relation here"),
            None
        );
    }

    #[test]
    fn test_extract_key_value_from_message() {
        let details = "Key (movie_id)=(999) is not present in table \"movies\".";
        assert_eq!(
            ConstraintParser::extract_key_value_from_message(details),
            Some(("movie_id".to_string(), "999".to_string()))
        );
    }

    #[test]
    fn test_regex_patterns_caching() {
        let patterns1 = ConstraintParser::patterns();
        let patterns2 = ConstraintParser::patterns();
        assert!(std::ptr::eq(patterns1, patterns2));
    }
}
