//! PostgreSQL implementation of the asset repository.
//!
//! Every asset kind lives in its own table with the same base columns; the
//! kind-specific columns are appended from [`AssetKind::attributes`], so one
//! implementation serves all seven tables.
use std::str::FromStr;

use async_trait::async_trait;
use careplan_shared::{
    AssetAttribute, AssetAttributes, AssetCreateModel, AssetKind, AssetRecord,
    AssetSearchFilters, AssetUpdateModel, SearchResults,
};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::debug;

use super::search::{count_query, page_query, resolve_sort_column, SearchFilters};
use crate::{AssetRepository, RepositoryError};

const BASE_COLUMNS: &str =
    "id, asset_code, name, description, asset_category, owner_user_id, tags, version, created_at, updated_at";

const BASE_SORTABLE: &[(&str, &str)] = &[
    ("id", "id"),
    ("AssetCode", "asset_code"),
    ("Name", "name"),
    ("Description", "description"),
    ("AssetCategory", "asset_category"),
    ("OwnerUserId", "owner_user_id"),
    ("Version", "version"),
    ("CreatedAt", "created_at"),
    ("UpdatedAt", "updated_at"),
];

/// A kind-specific column value ready to be bound.
enum AttributeValue {
    Text(Option<String>),
    Int(Option<i32>),
}

fn attribute_value(attribute: AssetAttribute, attributes: &AssetAttributes) -> AttributeValue {
    match attribute {
        AssetAttribute::BiometricsType => {
            AttributeValue::Text(attributes.biometrics_type.map(|v| v.as_str().to_string()))
        }
        AssetAttribute::MeasurementUnit => AttributeValue::Text(attributes.measurement_unit.clone()),
        AssetAttribute::MeditationType => {
            AttributeValue::Text(attributes.meditation_type.map(|v| v.as_str().to_string()))
        }
        AssetAttribute::MessageType => {
            AttributeValue::Text(attributes.message_type.map(|v| v.as_str().to_string()))
        }
        AssetAttribute::RecommendedDurationMin => {
            AttributeValue::Int(attributes.recommended_duration_min)
        }
        AssetAttribute::Url => AttributeValue::Text(attributes.url.clone()),
    }
}

fn select_columns(kind: AssetKind) -> String {
    let mut columns = BASE_COLUMNS.to_string();
    for attribute in kind.attributes() {
        columns.push_str(", ");
        columns.push_str(attribute.column());
    }
    columns
}

fn sortable_fields(kind: AssetKind) -> Vec<(&'static str, &'static str)> {
    let mut sortable = BASE_SORTABLE.to_vec();
    sortable.extend(
        kind.attributes()
            .iter()
            .map(|attribute| (attribute.field_name(), attribute.column())),
    );
    sortable
}

fn encode_tags(tags: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(tags).map_err(|e| RepositoryError::EncodingError(format!("tags: {}", e)))
}

fn parse_stored<T: FromStr>(column: &str, raw: String) -> Result<T, RepositoryError> {
    raw.parse()
        .map_err(|_| RepositoryError::invalid_stored_value(column, raw))
}

/// Decodes a row selected with [`select_columns`].
fn asset_from_row(kind: AssetKind, row: &PgRow) -> Result<AssetRecord, RepositoryError> {
    let raw_tags: String = row.try_get("tags")?;
    let tags: Vec<String> = serde_json::from_str(&raw_tags)
        .map_err(|_| RepositoryError::invalid_stored_value("tags", raw_tags.clone()))?;

    let mut attributes = AssetAttributes::default();
    for attribute in kind.attributes() {
        let column = attribute.column();
        match attribute {
            AssetAttribute::BiometricsType => {
                attributes.biometrics_type = Some(parse_stored(column, row.try_get(column)?)?);
            }
            AssetAttribute::MeasurementUnit => {
                attributes.measurement_unit = row.try_get(column)?;
            }
            AssetAttribute::MeditationType => {
                attributes.meditation_type = Some(parse_stored(column, row.try_get(column)?)?);
            }
            AssetAttribute::MessageType => {
                attributes.message_type = Some(parse_stored(column, row.try_get(column)?)?);
            }
            AssetAttribute::RecommendedDurationMin => {
                attributes.recommended_duration_min = row.try_get(column)?;
            }
            AssetAttribute::Url => {
                attributes.url = row.try_get(column)?;
            }
        }
    }

    Ok(AssetRecord {
        id: row.try_get("id")?,
        kind,
        asset_code: row.try_get("asset_code")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        asset_category: row.try_get("asset_category")?,
        owner_user_id: row.try_get("owner_user_id")?,
        tags,
        version: row.try_get("version")?,
        attributes,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Translates asset filters into search predicates for `kind`'s table.
fn search_filters(kind: AssetKind, filters: &AssetSearchFilters) -> SearchFilters {
    let mut search = SearchFilters::new()
        .like("asset_code", filters.asset_code.as_deref())
        .like("name", filters.name.as_deref())
        .like("description", filters.description.as_deref())
        .like("asset_category", filters.asset_category.as_deref())
        .uuid("owner_user_id", filters.owner_user_id)
        .like("tags", filters.tags.as_deref())
        .like("version", filters.version.as_deref());

    let attributes = filters.attributes.clone().retain_for(kind);
    for attribute in kind.attributes() {
        let column = attribute.column();
        search = match attribute {
            AssetAttribute::BiometricsType => {
                search.text(column, attributes.biometrics_type.map(|v| v.as_str()))
            }
            AssetAttribute::MeditationType => {
                search.text(column, attributes.meditation_type.map(|v| v.as_str()))
            }
            AssetAttribute::MessageType => {
                search.text(column, attributes.message_type.map(|v| v.as_str()))
            }
            AssetAttribute::RecommendedDurationMin => {
                search.int(column, attributes.recommended_duration_min)
            }
            AssetAttribute::MeasurementUnit => {
                search.like(column, attributes.measurement_unit.as_deref())
            }
            AssetAttribute::Url => search.like(column, attributes.url.as_deref()),
        };
    }
    search
}

fn insert_query(
    kind: AssetKind,
    model: &AssetCreateModel,
) -> Result<QueryBuilder<'static, Postgres>, RepositoryError> {
    let attributes = model.attributes.clone().retain_for(kind).or_defaults(kind);

    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} (asset_code, name, description, asset_category, owner_user_id, tags, version",
        kind.table_name()
    ));
    for attribute in kind.attributes() {
        builder.push(", ").push(attribute.column());
    }
    builder.push(") VALUES (");

    let mut values = builder.separated(", ");
    values
        .push_bind(model.asset_code.clone())
        .push_bind(model.name.clone())
        .push_bind(model.description.clone())
        .push_bind(model.asset_category.clone())
        .push_bind(model.owner_user_id)
        .push_bind(encode_tags(&model.tags)?)
        .push_bind(model.version.clone());
    for attribute in kind.attributes() {
        match attribute_value(*attribute, &attributes) {
            AttributeValue::Text(value) => {
                values.push_bind(value);
            }
            AttributeValue::Int(value) => {
                values.push_bind(value);
            }
        }
    }
    values.push_unseparated(") RETURNING id");

    Ok(builder)
}

/// Builds the UPDATE for the fields set in `model`. `updated_at` is always bumped.
fn update_query(
    kind: AssetKind,
    id: i64,
    model: &AssetUpdateModel,
) -> Result<QueryBuilder<'static, Postgres>, RepositoryError> {
    let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", kind.table_name()));
    let mut set = builder.separated(", ");

    if let Some(asset_code) = &model.asset_code {
        set.push("asset_code = ").push_bind_unseparated(asset_code.clone());
    }
    if let Some(name) = &model.name {
        set.push("name = ").push_bind_unseparated(name.clone());
    }
    if let Some(description) = &model.description {
        set.push("description = ").push_bind_unseparated(description.clone());
    }
    if let Some(asset_category) = &model.asset_category {
        set.push("asset_category = ").push_bind_unseparated(asset_category.clone());
    }
    if let Some(tags) = &model.tags {
        set.push("tags = ").push_bind_unseparated(encode_tags(tags)?);
    }
    if let Some(version) = &model.version {
        set.push("version = ").push_bind_unseparated(version.clone());
    }

    let attributes = model.attributes.clone().retain_for(kind);
    for attribute in kind.attributes() {
        if !attributes.is_set(*attribute) {
            continue;
        }
        set.push(format!("{} = ", attribute.column()));
        match attribute_value(*attribute, &attributes) {
            AttributeValue::Text(value) => {
                set.push_bind_unseparated(value);
            }
            AttributeValue::Int(value) => {
                set.push_bind_unseparated(value);
            }
        }
    }
    set.push("updated_at = now()");

    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND deleted_at IS NULL");
    Ok(builder)
}

/// PostgreSQL implementation of the asset repository.
///
/// ## Features
///
/// - Connection pooling with `sqlx::PgPool`
/// - Dynamic inserts, updates and searches with `QueryBuilder`
/// - Soft deletes through the `deleted_at` column
pub struct PostgresAssetRepository {
    pool: PgPool,
}

impl PostgresAssetRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with required schema
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetRepository for PostgresAssetRepository {
    async fn create(
        &self,
        kind: AssetKind,
        model: &AssetCreateModel,
    ) -> Result<AssetRecord, RepositoryError> {
        let id = insert_query(kind, model)?
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_write)?;

        debug!(asset_kind = %kind, id, "Asset created");

        self.get_by_id(kind, id)
            .await?
            .ok_or(RepositoryError::DatabaseError(sqlx::Error::RowNotFound))
    }

    async fn get_by_id(
        &self,
        kind: AssetKind,
        id: i64,
    ) -> Result<Option<AssetRecord>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND deleted_at IS NULL",
            select_columns(kind),
            kind.table_name()
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;

        row.map(|row| asset_from_row(kind, &row)).transpose()
    }

    async fn exists(&self, kind: AssetKind, id: i64) -> Result<bool, RepositoryError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1 AND deleted_at IS NULL)",
            kind.table_name()
        );
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn search(
        &self,
        kind: AssetKind,
        filters: &AssetSearchFilters,
    ) -> Result<SearchResults<AssetRecord>, RepositoryError> {
        let options = &filters.options;
        let sort_column = resolve_sort_column(options.order_by(), &sortable_fields(kind))?;
        let predicates = search_filters(kind, filters);

        let total_count = count_query(kind.table_name(), &predicates)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let rows = page_query(
            kind.table_name(),
            &select_columns(kind),
            &predicates,
            sort_column,
            options,
        )
        .build()
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .iter()
            .map(|row| asset_from_row(kind, row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchResults::new(options, total_count, items))
    }

    async fn update(
        &self,
        kind: AssetKind,
        id: i64,
        model: &AssetUpdateModel,
    ) -> Result<Option<AssetRecord>, RepositoryError> {
        if model.is_empty() {
            return self.get_by_id(kind, id).await;
        }

        let result = update_query(kind, id, model)?
            .build()
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from_write)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(kind, id).await
    }

    async fn delete(&self, kind: AssetKind, id: i64) -> Result<bool, RepositoryError> {
        let sql = format!(
            "UPDATE {} SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
            kind.table_name()
        );
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() == 1)
    }
}
