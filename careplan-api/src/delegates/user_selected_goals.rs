use std::sync::Arc;

use careplan_repository::UserSelectedGoalRepository;
use careplan_shared::{
    DeleteResult, ProgressStatus, SearchResults, UserSelectedGoalCreateModel, UserSelectedGoalDto,
    UserSelectedGoalSearchFilters, UserSelectedGoalUpdateModel,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::UserSelectedGoalRequest;
use crate::validation::user_selected_goals as validator;
use crate::validation::SearchQuery;

/// Runs user-selected goal requests.
#[derive(Clone)]
pub struct UserSelectedGoalsDelegate {
    repository: Arc<dyn UserSelectedGoalRepository>,
}

impl UserSelectedGoalsDelegate {
    pub fn new(repository: Arc<dyn UserSelectedGoalRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, body: UserSelectedGoalRequest) -> Result<UserSelectedGoalDto, ApiError> {
        validator::validate_create_request(&body)?;
        let model = create_model(body)?;
        let record = self.repository.create(&model).await?;
        info!(id = %record.id, careplan_id = record.careplan_id, "User selected goal created");
        Ok(record.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserSelectedGoalDto, ApiError> {
        self.repository
            .get_by_id(id)
            .await?
            .map(UserSelectedGoalDto::from)
            .ok_or_else(|| not_found(id))
    }

    pub async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResults<UserSelectedGoalDto>, ApiError> {
        validator::validate_search_request(query)?;
        let filters = search_filters(query)?;
        let results = self.repository.search(&filters).await?;
        Ok(results.map_items(UserSelectedGoalDto::from))
    }

    /// Updates a goal. The date range is checked against the stored dates
    /// when the request changes only one of them.
    pub async fn update(
        &self,
        id: Uuid,
        body: UserSelectedGoalRequest,
    ) -> Result<UserSelectedGoalDto, ApiError> {
        validator::validate_update_request(&body)?;
        let current = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        validator::validate_date_range(
            body.start_date.or(current.start_date),
            body.end_date.or(current.end_date),
        )?;

        let model = update_model(body)?;
        let record = self
            .repository
            .update(id, &model)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(%id, "User selected goal updated");
        Ok(record.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, ApiError> {
        if !self.repository.exists(id).await? {
            return Err(not_found(id));
        }
        let deleted = self.repository.delete(id).await?;
        info!(%id, deleted, "User selected goal deleted");
        Ok(DeleteResult { deleted })
    }
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::not_found(format!("User selected goal with id {} cannot be found!", id))
}

fn progress_status(value: Option<String>) -> Result<Option<ProgressStatus>, ApiError> {
    value
        .map(|v| {
            v.parse::<ProgressStatus>()
                .map_err(|e| ApiError::validation(format!("ProgressStatus: {}", e)))
        })
        .transpose()
}

fn create_model(body: UserSelectedGoalRequest) -> Result<UserSelectedGoalCreateModel, ApiError> {
    Ok(UserSelectedGoalCreateModel {
        name: body
            .name
            .ok_or_else(|| ApiError::validation("Name is required"))?,
        description: body.description,
        user_id: body
            .user_id
            .ok_or_else(|| ApiError::validation("UserId is required"))?,
        careplan_id: body
            .careplan_id
            .ok_or_else(|| ApiError::validation("CareplanId is required"))?,
        asset_id: body.asset_id,
        asset_type: body.asset_type,
        additional_details: body.additional_details,
        start_date: body.start_date,
        end_date: body.end_date,
        progress_status: progress_status(body.progress_status)?.unwrap_or_default(),
    })
}

fn update_model(body: UserSelectedGoalRequest) -> Result<UserSelectedGoalUpdateModel, ApiError> {
    Ok(UserSelectedGoalUpdateModel {
        name: body.name,
        description: body.description,
        user_id: body.user_id,
        careplan_id: body.careplan_id,
        asset_id: body.asset_id,
        asset_type: body.asset_type,
        additional_details: body.additional_details,
        start_date: body.start_date,
        end_date: body.end_date,
        progress_status: progress_status(body.progress_status)?,
    })
}

fn search_filters(query: &SearchQuery) -> Result<UserSelectedGoalSearchFilters, ApiError> {
    Ok(UserSelectedGoalSearchFilters {
        name: query.owned("name"),
        description: query.owned("description"),
        user_id: query.require_parsed("userId")?,
        careplan_id: query.require_parsed("careplanId")?,
        asset_id: query.require_parsed("assetId")?,
        asset_type: query.owned("assetType"),
        additional_details: query.owned("additionalDetails"),
        start_date: query.require_parsed("startDate")?,
        end_date: query.require_parsed("endDate")?,
        progress_status: query.require_parsed("progressStatus")?,
        options: query.options()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[test]
    fn test_create_model_defaults_to_pending() {
        let body = UserSelectedGoalRequest {
            name: Some("Drink water".to_string()),
            user_id: Some(Uuid::nil()),
            careplan_id: Some(8),
            ..Default::default()
        };
        let model = create_model(body).unwrap();
        assert_eq!(model.progress_status, ProgressStatus::Pending);
        assert_eq!(model.careplan_id, 8);
    }

    #[test]
    fn test_search_filters_from_query() {
        let query = SearchQuery::new(HashMap::from([
            ("careplanId".to_string(), "8".to_string()),
            ("endDate".to_string(), "2026-06-30".to_string()),
            ("progressStatus".to_string(), "Delayed".to_string()),
            ("itemsPerPage".to_string(), "5".to_string()),
        ]));
        let filters = search_filters(&query).unwrap();
        assert_eq!(filters.careplan_id, Some(8));
        assert_eq!(filters.end_date, NaiveDate::from_ymd_opt(2026, 6, 30));
        assert_eq!(filters.progress_status, Some(ProgressStatus::Delayed));
        assert_eq!(filters.options.limit(), 5);
    }
}
