//! # Careplan Repository
//! This crate provides traits and implementations for persisting careplan
//! assets and user-selected goals. It includes definitions for errors,
//! interfaces, and concrete implementations for PostgreSQL.
pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use errors::RepositoryError;
pub use interfaces::{AssetRepository, UserSelectedGoalRepository};
pub use postgres::{PostgresAssetRepository, PostgresUserSelectedGoalRepository};
