//! Movie repository for async database operations.
//!
//! Provides CRUD, listing and counting for the movies table using
//! diesel_async. Every method checks out its own pooled connection; the
//! guard returns it to the pool on every exit path.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{AsyncDbPool, DbConnection};
use crate::error::{AppError, AppResult};
use crate::models::{Movie, NewMovie, UpdateMovie};
use crate::repositories::query::{ListMoviesParams, MovieListQuery, MovieSortField, SortOrder};
use crate::schema::movies;

/// Movie repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct MovieRepository {
    pool: AsyncDbPool,
}

impl MovieRepository {
    /// Creates a new MovieRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> AppResult<DbConnection<'_>> {
        self.pool.get().await.map_err(AppError::connection_pool)
    }

    /// Inserts a movie and returns the stored row, including its new id.
    ///
    /// # Errors
    /// `AppError::Store` if no connection is available or a constraint is violated
    pub async fn create(&self, new_movie: NewMovie) -> AppResult<Movie> {
        let mut conn = self.connection().await?;

        let movie = diesel::insert_into(movies::table)
            .values(&new_movie)
            .returning(Movie::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| AppError::database("insert movie", e))?;

        tracing::debug!(movie_id = movie.id, "Movie created");
        Ok(movie)
    }

    /// Finds a movie by its ID.
    ///
    /// # Returns
    /// `Some(Movie)` if found, `None` otherwise
    pub async fn find_by_id(&self, movie_id: i32) -> AppResult<Option<Movie>> {
        let mut conn = self.connection().await?;

        movies::table
            .find(movie_id)
            .select(Movie::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| AppError::database("find movie by id", e))
    }

    /// Finds a movie by exact name.
    ///
    /// Names are not unique. When several rows match, the one returned is
    /// whichever the database scans first; no ordering is applied.
    pub async fn find_by_name(&self, movie_name: &str) -> AppResult<Option<Movie>> {
        let mut conn = self.connection().await?;

        movies::table
            .filter(movies::name.eq(movie_name))
            .select(Movie::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| AppError::database("find movie by name", e))
    }

    /// Lists one page of movies from untrusted parameters.
    ///
    /// The parameters are validated before a connection is checked out, so
    /// a rejected `sort` or `order` never reaches the database.
    ///
    /// # Errors
    /// - `AppError::Validation` for an unknown sort column, direction or page bounds
    /// - `AppError::Store` if the query fails
    pub async fn find_all(&self, params: ListMoviesParams) -> AppResult<Vec<Movie>> {
        let query = MovieListQuery::try_from(params).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected movie list parameters");
        })?;
        self.list(&query).await
    }

    /// Lists one page of movies for an already validated query.
    ///
    /// Without a sort the rows come back in database order. With a sort,
    /// ties are broken by id so consecutive pages never overlap.
    pub async fn list(&self, query: &MovieListQuery) -> AppResult<Vec<Movie>> {
        let mut conn = self.connection().await?;

        let mut statement = movies::table.select(Movie::as_select()).into_boxed();

        if let Some(sort) = query.sort() {
            statement = match (sort.field, sort.order) {
                (MovieSortField::Id, SortOrder::Asc) => statement.order(movies::id.asc()),
                (MovieSortField::Id, SortOrder::Desc) => statement.order(movies::id.desc()),
                (MovieSortField::Name, SortOrder::Asc) => statement.order(movies::name.asc()),
                (MovieSortField::Name, SortOrder::Desc) => statement.order(movies::name.desc()),
                (MovieSortField::Description, SortOrder::Asc) => {
                    statement.order(movies::description.asc())
                }
                (MovieSortField::Description, SortOrder::Desc) => {
                    statement.order(movies::description.desc())
                }
                (MovieSortField::Duration, SortOrder::Asc) => {
                    statement.order(movies::duration.asc())
                }
                (MovieSortField::Duration, SortOrder::Desc) => {
                    statement.order(movies::duration.desc())
                }
                (MovieSortField::Price, SortOrder::Asc) => statement.order(movies::price.asc()),
                (MovieSortField::Price, SortOrder::Desc) => statement.order(movies::price.desc()),
            };

            if sort.field != MovieSortField::Id {
                statement = statement.then_order_by(movies::id.asc());
            }
        }

        statement
            .offset(query.offset())
            .limit(query.limit())
            .load(&mut conn)
            .await
            .map_err(|e| AppError::database("list movies", e))
    }

    /// Counts every movie, regardless of pagination.
    pub async fn count(&self) -> AppResult<i64> {
        let mut conn = self.connection().await?;

        movies::table
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(|e| AppError::database("count movies", e))
    }

    /// Replaces every mutable column of a movie in one statement.
    ///
    /// # Returns
    /// The updated row, or `None` if no movie has this id
    pub async fn update(&self, movie_id: i32, changes: UpdateMovie) -> AppResult<Option<Movie>> {
        let mut conn = self.connection().await?;

        let movie = diesel::update(movies::table.find(movie_id))
            .set(&changes)
            .returning(Movie::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| AppError::database("update movie", e))?;

        if movie.is_none() {
            tracing::debug!(movie_id, "No movie to update");
        }
        Ok(movie)
    }

    /// Deletes a movie.
    ///
    /// Deleting a missing id is not an error.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1)
    pub async fn delete(&self, movie_id: i32) -> AppResult<usize> {
        let mut conn = self.connection().await?;

        let deleted = diesel::delete(movies::table.find(movie_id))
            .execute(&mut conn)
            .await
            .map_err(|e| AppError::database("delete movie", e))?;

        tracing::debug!(movie_id, deleted, "Movie delete executed");
        Ok(deleted)
    }
}
