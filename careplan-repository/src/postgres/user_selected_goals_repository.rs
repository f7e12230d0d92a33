//! PostgreSQL implementation of the user-selected goal repository.

use async_trait::async_trait;
use careplan_shared::{
    ProgressStatus, SearchResults, UserSelectedGoalCreateModel, UserSelectedGoalRecord,
    UserSelectedGoalSearchFilters, UserSelectedGoalUpdateModel,
};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::debug;
use uuid::Uuid;

use super::search::{count_query, page_query, resolve_sort_column, SearchFilters};
use crate::{RepositoryError, UserSelectedGoalRepository};

const TABLE: &str = "user_selected_goals";

const COLUMNS: &str = "id, name, description, user_id, careplan_id, asset_id, asset_type, \
     additional_details, start_date, end_date, progress_status, created_at, updated_at";

const SORTABLE: &[(&str, &str)] = &[
    ("id", "id"),
    ("Name", "name"),
    ("Description", "description"),
    ("UserId", "user_id"),
    ("CareplanId", "careplan_id"),
    ("AssetId", "asset_id"),
    ("AssetType", "asset_type"),
    ("AdditionalDetails", "additional_details"),
    ("StartDate", "start_date"),
    ("EndDate", "end_date"),
    ("ProgressStatus", "progress_status"),
    ("CreatedAt", "created_at"),
    ("UpdatedAt", "updated_at"),
];

fn goal_from_row(row: &PgRow) -> Result<UserSelectedGoalRecord, RepositoryError> {
    let raw_status: String = row.try_get("progress_status")?;
    let progress_status: ProgressStatus = raw_status
        .parse()
        .map_err(|_| RepositoryError::invalid_stored_value("progress_status", raw_status.clone()))?;

    Ok(UserSelectedGoalRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        user_id: row.try_get("user_id")?,
        careplan_id: row.try_get("careplan_id")?,
        asset_id: row.try_get("asset_id")?,
        asset_type: row.try_get("asset_type")?,
        additional_details: row.try_get("additional_details")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        progress_status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn search_filters(filters: &UserSelectedGoalSearchFilters) -> SearchFilters {
    SearchFilters::new()
        .like("name", filters.name.as_deref())
        .like("description", filters.description.as_deref())
        .uuid("user_id", filters.user_id)
        .big_int("careplan_id", filters.careplan_id)
        .big_int("asset_id", filters.asset_id)
        .text("asset_type", filters.asset_type.as_deref())
        .like("additional_details", filters.additional_details.as_deref())
        .date("start_date", filters.start_date)
        .date("end_date", filters.end_date)
        .text("progress_status", filters.progress_status.map(|s| s.as_str()))
}

fn insert_query(id: Uuid, model: &UserSelectedGoalCreateModel) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "INSERT INTO user_selected_goals (id, name, description, user_id, careplan_id, asset_id, \
         asset_type, additional_details, start_date, end_date, progress_status) VALUES (",
    );
    let mut values = builder.separated(", ");
    values
        .push_bind(id)
        .push_bind(model.name.clone())
        .push_bind(model.description.clone())
        .push_bind(model.user_id)
        .push_bind(model.careplan_id)
        .push_bind(model.asset_id)
        .push_bind(model.asset_type.clone())
        .push_bind(model.additional_details.clone())
        .push_bind(model.start_date)
        .push_bind(model.end_date)
        .push_bind(model.progress_status.as_str());
    values.push_unseparated(")");
    builder
}

fn update_query(id: Uuid, model: &UserSelectedGoalUpdateModel) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE user_selected_goals SET ");
    let mut set = builder.separated(", ");

    if let Some(name) = &model.name {
        set.push("name = ").push_bind_unseparated(name.clone());
    }
    if let Some(description) = &model.description {
        set.push("description = ").push_bind_unseparated(description.clone());
    }
    if let Some(user_id) = model.user_id {
        set.push("user_id = ").push_bind_unseparated(user_id);
    }
    if let Some(careplan_id) = model.careplan_id {
        set.push("careplan_id = ").push_bind_unseparated(careplan_id);
    }
    if let Some(asset_id) = model.asset_id {
        set.push("asset_id = ").push_bind_unseparated(asset_id);
    }
    if let Some(asset_type) = &model.asset_type {
        set.push("asset_type = ").push_bind_unseparated(asset_type.clone());
    }
    if let Some(details) = &model.additional_details {
        set.push("additional_details = ").push_bind_unseparated(details.clone());
    }
    if let Some(start_date) = model.start_date {
        set.push("start_date = ").push_bind_unseparated(start_date);
    }
    if let Some(end_date) = model.end_date {
        set.push("end_date = ").push_bind_unseparated(end_date);
    }
    if let Some(status) = model.progress_status {
        set.push("progress_status = ").push_bind_unseparated(status.as_str());
    }
    set.push("updated_at = now()");

    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND deleted_at IS NULL");
    builder
}

/// PostgreSQL implementation of the user-selected goal repository.
pub struct PostgresUserSelectedGoalRepository {
    pool: PgPool,
}

impl PostgresUserSelectedGoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserSelectedGoalRepository for PostgresUserSelectedGoalRepository {
    async fn create(
        &self,
        model: &UserSelectedGoalCreateModel,
    ) -> Result<UserSelectedGoalRecord, RepositoryError> {
        let id = Uuid::new_v4();
        insert_query(id, model)
            .build()
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from_write)?;

        debug!(%id, careplan_id = model.careplan_id, "User-selected goal created");

        self.get_by_id(id)
            .await?
            .ok_or(RepositoryError::DatabaseError(sqlx::Error::RowNotFound))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<UserSelectedGoalRecord>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND deleted_at IS NULL",
            COLUMNS, TABLE
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;

        row.as_ref().map(goal_from_row).transpose()
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_selected_goals WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn search(
        &self,
        filters: &UserSelectedGoalSearchFilters,
    ) -> Result<SearchResults<UserSelectedGoalRecord>, RepositoryError> {
        let options = &filters.options;
        let sort_column = resolve_sort_column(options.order_by(), SORTABLE)?;
        let predicates = search_filters(filters);

        let total_count = count_query(TABLE, &predicates)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let rows = page_query(TABLE, COLUMNS, &predicates, sort_column, options)
            .build()
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .iter()
            .map(goal_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchResults::new(options, total_count, items))
    }

    async fn update(
        &self,
        id: Uuid,
        model: &UserSelectedGoalUpdateModel,
    ) -> Result<Option<UserSelectedGoalRecord>, RepositoryError> {
        if model.is_empty() {
            return self.get_by_id(id).await;
        }

        let result = update_query(id, model)
            .build()
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from_write)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE user_selected_goals SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_update_query_sets_status_and_dates() {
        let model = UserSelectedGoalUpdateModel {
            end_date: NaiveDate::from_ymd_opt(2026, 3, 1),
            progress_status: Some(ProgressStatus::Completed),
            ..Default::default()
        };
        let builder = update_query(Uuid::nil(), &model);
        assert_eq!(
            builder.sql(),
            "UPDATE user_selected_goals SET end_date = $1, progress_status = $2, \
             updated_at = now() WHERE id = $3 AND deleted_at IS NULL"
        );
    }

    #[test]
    fn test_search_filters_mix_like_and_equality() {
        let filters = UserSelectedGoalSearchFilters {
            name: Some("walk".to_string()),
            careplan_id: Some(4),
            progress_status: Some(ProgressStatus::InProgress),
            ..Default::default()
        };
        let builder = count_query(TABLE, &search_filters(&filters));
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM user_selected_goals WHERE deleted_at IS NULL \
             AND name LIKE $1 AND careplan_id = $2 AND progress_status = $3"
        );
    }

    #[test]
    fn test_insert_query_binds_every_column() {
        let model = UserSelectedGoalCreateModel {
            name: "Walk daily".to_string(),
            description: None,
            user_id: Uuid::nil(),
            careplan_id: 1,
            asset_id: None,
            asset_type: None,
            additional_details: None,
            start_date: None,
            end_date: None,
            progress_status: ProgressStatus::default(),
        };
        let builder = insert_query(Uuid::nil(), &model);
        assert!(builder
            .sql()
            .ends_with("VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"));
    }
}
