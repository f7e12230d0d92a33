//! PostgreSQL implementations of the careplan repositories.
//!
//! ## Database Tables
//!
//! - `asset_*`: one table per asset kind, sharing the base asset columns
//! - `user_selected_goals`: goals picked by users from a careplan
//! - `users`, `careplans`: foreign-key targets owned by other services
//!
//! All tables are soft-deleted through `deleted_at`.
mod assets_repository;
mod search;
mod user_selected_goals_repository;

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::errors::RepositoryError;

pub use assets_repository::PostgresAssetRepository;
pub use user_selected_goals_repository::PostgresUserSelectedGoalRepository;

/// Migrations embedded from `src/postgres/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("src/postgres/migrations");

/// Opens a connection pool.
///
/// # Arguments
///
/// * `url` - PostgreSQL connection URL
/// * `max_connections` - Upper bound of pooled connections
pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, RepositoryError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(url)
        .await?;
    Ok(pool)
}

/// Applies every pending embedded migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
