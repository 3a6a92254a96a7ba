//! Repository layer for data access operations.

mod movie_repo;
pub mod query;

pub use movie_repo::MovieRepository;
pub use query::{ListMoviesParams, MovieListQuery, MovieSort, MovieSortField, SortOrder};
