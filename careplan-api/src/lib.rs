//! # Careplan API
//!
//! HTTP backend for careplan assets and the goals users select from careplans.
//!
//! ## Architecture
//!
//! Every request goes through the same pipeline:
//!
//! 1. **Validation**: Field rules are checked and all violations reported at once
//! 2. **Mapping**: The request body becomes a create or update model
//! 3. **Repository**: The model is persisted through a repository trait
//! 4. **DTO**: The stored record is mapped to the response shape
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`delegates`]: Request pipelines per entity
//! - [`validation`]: Field rules for request bodies and search queries
//! - [`models`]: Request bodies
//! - [`server`]: Router, handlers and response envelope
//! - [`errors`]: Error types returned to clients

pub mod config;
pub mod delegates;
pub mod errors;
pub mod models;
pub mod server;
pub mod validation;

pub use config::{ApiConfig, Dependencies};
pub use errors::ApiError;

use careplan_repository::RepositoryError;
use thiserror::Error;

/// Errors that can occur while starting the API.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Database connection or migration error.
    #[error("Database error: {0}")]
    DatabaseError(#[from] RepositoryError),

    /// Server bind or serve error.
    #[error("Server error: {0}")]
    ServerError(#[from] std::io::Error),
}

impl StartupError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
