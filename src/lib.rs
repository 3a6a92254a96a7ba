//! Movie Store Library
//!
//! Async PostgreSQL data access for the `movies` table: create, lookup by id
//! or name, paginated and sorted listing, update, delete and count.
//!
//! ```ignore
//! let settings = ConfigLoader::new()?.load()?;
//! let pool = establish_async_connection_pool(&settings.database).await?;
//! let movies = MovieRepository::new(pool);
//! let page = movies
//!     .find_all(ListMoviesParams::new(1, 20).sorted_by("price", "desc"))
//!     .await?;
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;

pub use crate::config::{ConfigLoader, DatabaseConfig, Settings};
pub use db::{AsyncDbPool, establish_async_connection_pool, lazy_connection_pool};
pub use error::{AppError, AppResult, StoreError};
pub use models::{Movie, NewMovie, UpdateMovie};
pub use repositories::{ListMoviesParams, MovieListQuery, MovieRepository};
