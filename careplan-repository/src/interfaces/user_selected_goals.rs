use careplan_shared::{
    SearchResults, UserSelectedGoalCreateModel, UserSelectedGoalRecord,
    UserSelectedGoalSearchFilters, UserSelectedGoalUpdateModel,
};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// Trait for interacting with the user-selected goal store.
///
/// Mirrors [`AssetRepository`](crate::AssetRepository) for goals, which are keyed
/// by UUID and reference both a user and a careplan.
#[async_trait::async_trait]
pub trait UserSelectedGoalRepository: Send + Sync {
    async fn create(
        &self,
        model: &UserSelectedGoalCreateModel,
    ) -> Result<UserSelectedGoalRecord, RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<UserSelectedGoalRecord>, RepositoryError>;

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError>;

    async fn search(
        &self,
        filters: &UserSelectedGoalSearchFilters,
    ) -> Result<SearchResults<UserSelectedGoalRecord>, RepositoryError>;

    async fn update(
        &self,
        id: Uuid,
        model: &UserSelectedGoalUpdateModel,
    ) -> Result<Option<UserSelectedGoalRecord>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
