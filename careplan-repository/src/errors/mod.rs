//! Error types for the careplan repository.
mod repository;

pub use repository::RepositoryError;
