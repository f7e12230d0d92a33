//! Dependency initialization and wiring for the API.

use std::sync::Arc;
use std::time::Duration;

use careplan_repository::postgres::{connect, run_migrations};
use careplan_repository::{PostgresAssetRepository, PostgresUserSelectedGoalRepository};
use sqlx::PgPool;
use tokio::time::sleep;
use tracing::{info, warn};

use super::{ApiConfig, ConnectionMode};
use crate::server::state::AppState;
use crate::StartupError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared state handed to the router.
    pub state: AppState,
}

impl Dependencies {
    /// Connects to the database and builds the repositories and delegates.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(StartupError)` - If initialization fails (connection only in fail-fast mode)
    pub async fn new(config: &ApiConfig) -> Result<Self, StartupError> {
        info!(
            server_addr = %config.server_addr,
            max_connections = config.max_connections,
            connection_mode = ?config.connection_mode,
            retry_interval_secs = config.retry_interval.as_secs(),
            run_migrations = config.run_migrations,
            "Initializing dependencies"
        );

        let pool = Self::connect_to_database(
            &config.database_url,
            config.max_connections,
            config.connection_mode,
            config.retry_interval,
        )
        .await?;

        info!("Database connection established");

        if config.run_migrations {
            run_migrations(&pool).await?;
        }

        let state = AppState::new(
            Arc::new(PostgresAssetRepository::new(pool.clone())),
            Arc::new(PostgresUserSelectedGoalRepository::new(pool)),
        );

        Ok(Self { state })
    }

    /// Connect to PostgreSQL with retry logic based on connection mode.
    async fn connect_to_database(
        url: &str,
        max_connections: u32,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<PgPool, StartupError> {
        loop {
            match connect(url, max_connections).await {
                Ok(pool) => return Ok(pool),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(StartupError::config(format!(
                            "Failed to connect to PostgreSQL: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to PostgreSQL, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }
}
