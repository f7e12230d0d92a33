//! This module defines the `AssetRepository` trait, which provides an interface
//! for interacting with the underlying data store for every asset kind.
use careplan_shared::{
    AssetCreateModel, AssetKind, AssetRecord, AssetSearchFilters, AssetUpdateModel, SearchResults,
};

use crate::errors::RepositoryError;

/// A trait that defines the interface for interacting with asset tables.
///
/// Each method takes the [`AssetKind`] it operates on; implementors route the
/// call to that kind's table. Soft-deleted rows are invisible to every method.
#[async_trait::async_trait]
pub trait AssetRepository: Send + Sync {
    /// Inserts a new asset and returns the stored row.
    ///
    /// # Returns
    ///
    /// * `Ok(AssetRecord)` - The created asset, read back from the store
    /// * `Err(RepositoryError::ForeignKeyViolation)` - The owner user does not exist
    async fn create(
        &self,
        kind: AssetKind,
        model: &AssetCreateModel,
    ) -> Result<AssetRecord, RepositoryError>;

    /// Retrieves an asset by id, or `None` if it does not exist or was deleted.
    async fn get_by_id(&self, kind: AssetKind, id: i64)
        -> Result<Option<AssetRecord>, RepositoryError>;

    async fn exists(&self, kind: AssetKind, id: i64) -> Result<bool, RepositoryError>;

    /// Returns one page of assets matching `filters`, with the total match count.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResults<AssetRecord>)` - The requested page (possibly empty)
    /// * `Err(RepositoryError::InvalidSortColumn)` - `order_by` names an unknown field
    async fn search(
        &self,
        kind: AssetKind,
        filters: &AssetSearchFilters,
    ) -> Result<SearchResults<AssetRecord>, RepositoryError>;

    /// Applies the fields set in `model` and returns the updated row.
    ///
    /// An empty model performs no write and returns the current row.
    /// Returns `Ok(None)` when the asset does not exist.
    async fn update(
        &self,
        kind: AssetKind,
        id: i64,
        model: &AssetUpdateModel,
    ) -> Result<Option<AssetRecord>, RepositoryError>;

    /// Soft-deletes an asset. Returns `true` if exactly one row was deleted.
    async fn delete(&self, kind: AssetKind, id: i64) -> Result<bool, RepositoryError>;
}
