//! List request parsing for the movie repository.
//!
//! Raw caller input (`ListMoviesParams`) is turned into a typed
//! `MovieListQuery` before any connection is acquired. The sort column only
//! ever comes from the closed `MovieSortField` set, so caller text never
//! reaches the generated SQL.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Columns a movie listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieSortField {
    Id,
    Name,
    Description,
    Duration,
    Price,
}

impl MovieSortField {
    pub const ALL: [MovieSortField; 5] = [
        MovieSortField::Id,
        MovieSortField::Name,
        MovieSortField::Description,
        MovieSortField::Duration,
        MovieSortField::Price,
    ];

    /// Column name in the `movies` table
    pub fn column_name(&self) -> &'static str {
        match self {
            MovieSortField::Id => "id",
            MovieSortField::Name => "name",
            MovieSortField::Description => "description",
            MovieSortField::Duration => "duration",
            MovieSortField::Price => "price",
        }
    }
}

impl FromStr for MovieSortField {
    type Err = AppError;

    /// Matches column names exactly, the way a quoted identifier would.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.column_name() == s)
            .ok_or_else(|| {
                AppError::validation(
                    "sort",
                    format!(
                        "unknown column '{}', expected one of: id, name, description, duration, price",
                        s
                    ),
                )
            })
    }
}

impl fmt::Display for MovieSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(AppError::validation(
                "order",
                format!("unknown direction '{}', expected 'asc' or 'desc'", s),
            ))
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieSort {
    pub field: MovieSortField,
    pub order: SortOrder,
}

impl MovieSort {
    pub fn new(field: MovieSortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Parses a raw sort column and optional direction.
    pub fn parse(sort: &str, order: Option<&str>) -> AppResult<Self> {
        let field: MovieSortField = sort.parse()?;
        let order = order
            .map(SortOrder::from_str)
            .transpose()?
            .unwrap_or_default();
        Ok(Self { field, order })
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

/// Untrusted listing parameters as received from a caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListMoviesParams {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: u32,

    /// Number of movies per page
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, message = "Page size must be at least 1"))]
    pub per_page: u32,

    /// Column to order by
    #[serde(default)]
    pub sort: Option<String>,

    /// `asc` or `desc`
    #[serde(default)]
    pub order: Option<String>,
}

impl ListMoviesParams {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            sort: None,
            order: None,
        }
    }

    pub fn sorted_by(mut self, sort: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self.order = Some(order.into());
        self
    }
}

impl Default for ListMoviesParams {
    fn default() -> Self {
        Self::new(default_page(), default_per_page())
    }
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieListQuery {
    page: u32,
    per_page: u32,
    sort: Option<MovieSort>,
}

impl MovieListQuery {
    /// Builds a query, rejecting a zero page or page size.
    pub fn new(page: u32, per_page: u32, sort: Option<MovieSort>) -> AppResult<Self> {
        ListMoviesParams::new(page, per_page)
            .validate()
            .map_err(validation_error)?;
        Ok(Self {
            page,
            per_page,
            sort,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn sort(&self) -> Option<MovieSort> {
        self.sort
    }

    /// Rows to skip: `(page - 1) * per_page`
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl TryFrom<ListMoviesParams> for MovieListQuery {
    type Error = AppError;

    fn try_from(params: ListMoviesParams) -> Result<Self, Self::Error> {
        params.validate().map_err(validation_error)?;

        // A direction without a column is still checked, then ignored
        let order = params
            .order
            .as_deref()
            .map(SortOrder::from_str)
            .transpose()?
            .unwrap_or_default();
        let sort = params
            .sort
            .as_deref()
            .map(|sort| MovieSortField::from_str(sort).map(|field| MovieSort::new(field, order)))
            .transpose()?;

        Ok(Self {
            page: params.page,
            per_page: params.per_page,
            sort,
        })
    }
}

/// Reports the first failing field of a `validator` result.
fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    match fields.first().and_then(|(field, errs)| Some((field, errs.first()?))) {
        Some((field, error)) => AppError::validation(
            field.to_string(),
            error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string()),
        ),
        None => AppError::validation("params", errors.to_string()),
    }
}
