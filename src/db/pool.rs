//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async for PostgreSQL connections.

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap (just reference count increment).
/// Structures holding AsyncDbPool can derive Clone without additional Arc wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// A connection checked out of [`AsyncDbPool`].
///
/// Dropping the guard hands the connection back to the pool.
pub type DbConnection<'a> = PooledConnection<'a, AsyncPgConnection>;

/// Creates an async database connection pool and opens its idle connections.
///
/// # Errors
///
/// - `AppError::Configuration` - If the database configuration is invalid
/// - `AppError::Store` - If the initial connections cannot be established
///
/// # Example
///
/// ```ignore
/// let pool = establish_async_connection_pool(&settings.database).await?;
/// let repo = MovieRepository::new(pool);
/// ```
pub async fn establish_async_connection_pool(config: &DatabaseConfig) -> AppResult<AsyncDbPool> {
    validate(config)?;

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.connection_url());
    let pool = builder(config)
        .build(manager)
        .await
        .map_err(AppError::connection_pool)?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool initialized"
    );
    Ok(pool)
}

/// Creates a pool without opening any connection.
///
/// Connections are established on first checkout, so an unreachable database
/// only surfaces when an operation runs.
pub fn lazy_connection_pool(config: &DatabaseConfig) -> AppResult<AsyncDbPool> {
    validate(config)?;

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.connection_url());
    Ok(builder(config).build_unchecked(manager))
}

fn validate(config: &DatabaseConfig) -> AppResult<()> {
    config.validate().map_err(|e| AppError::Configuration {
        key: e.field().unwrap_or("database").to_string(),
        source: anyhow::Error::from(e),
    })
}

fn builder(config: &DatabaseConfig) -> bb8::Builder<AsyncDieselConnectionManager<AsyncPgConnection>> {
    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(config.connection_timeout())
}
