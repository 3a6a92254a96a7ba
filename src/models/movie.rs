use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Movie model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Serialize, Deserialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::movies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Movie {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub price: BigDecimal,
}

/// NewMovie model for inserting new records
/// The id is assigned by the database, so it has no field here
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::movies)]
pub struct NewMovie {
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub price: BigDecimal,
}

impl NewMovie {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        duration: i32,
        price: BigDecimal,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            duration,
            price,
        }
    }
}

/// UpdateMovie model replacing every mutable column at once.
///
/// `description: None` writes NULL instead of leaving the column untouched.
#[derive(Debug, AsChangeset, Deserialize, Clone)]
#[diesel(table_name = crate::schema::movies)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateMovie {
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub price: BigDecimal,
}

impl UpdateMovie {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        duration: i32,
        price: BigDecimal,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            duration,
            price,
        }
    }
}

impl From<NewMovie> for UpdateMovie {
    fn from(movie: NewMovie) -> Self {
        Self {
            name: movie.name,
            description: movie.description,
            duration: movie.duration,
            price: movie.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn inception() -> Movie {
        Movie {
            id: 7,
            name: "Inception".to_string(),
            description: Some("A heist thriller".to_string()),
            duration: 148,
            price: BigDecimal::from_str("12.50").unwrap(),
        }
    }

    #[test]
    fn test_movie_serializes_all_columns() {
        let json = serde_json::to_value(inception()).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Inception");
        assert_eq!(json["description"], "A heist thriller");
        assert_eq!(json["duration"], 148);
        // bigdecimal serializes as a string to keep the exact scale
        assert_eq!(json["price"], "12.50");
    }

    #[test]
    fn test_movie_without_description_serializes_null() {
        let mut movie = inception();
        movie.description = None;

        let json = serde_json::to_value(movie).unwrap();
        assert!(json["description"].is_null());
    }

    #[test]
    fn test_new_movie_deserializes_without_id() {
        let movie: NewMovie = serde_json::from_str(
            r#"{"name":"Inception","description":null,"duration":148,"price":"14.00"}"#,
        )
        .unwrap();

        assert_eq!(movie.name, "Inception");
        assert!(movie.description.is_none());
        assert_eq!(movie.price, BigDecimal::from_str("14.00").unwrap());
    }

    #[test]
    fn test_update_from_new_movie_keeps_every_field() {
        let new_movie = NewMovie::new(
            "Inception",
            Some("A mind-bending heist thriller".to_string()),
            148,
            BigDecimal::from_str("14.00").unwrap(),
        );

        let update = UpdateMovie::from(new_movie.clone());
        assert_eq!(update.name, new_movie.name);
        assert_eq!(update.description, new_movie.description);
        assert_eq!(update.duration, new_movie.duration);
        assert_eq!(update.price, new_movie.price);
    }
}
