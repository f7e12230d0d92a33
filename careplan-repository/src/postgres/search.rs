//! Dynamic search construction shared by every PostgreSQL repository.
//!
//! A search is a list of optional predicates joined with `AND`, a single
//! whitelisted sort column, and LIMIT/OFFSET paging. The count query and the
//! page query are built from the same predicate list so the total always
//! matches the filters of the page.
use careplan_shared::SearchOptions;
use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::errors::RepositoryError;

#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    /// Substring match (`LIKE '%value%'`).
    Like(String),
    Text(String),
    BigInt(i64),
    Int(i32),
    Uuid(Uuid),
    Date(NaiveDate),
}

/// Predicates of a search, in the order they were added.
#[derive(Debug, Clone, Default)]
pub(crate) struct SearchFilters {
    predicates: Vec<(&'static str, Predicate)>,
}

impl SearchFilters {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn like(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.predicates.push((column, Predicate::Like(value.to_string())));
        }
        self
    }

    pub(crate) fn text(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.predicates.push((column, Predicate::Text(value.to_string())));
        }
        self
    }

    pub(crate) fn big_int(mut self, column: &'static str, value: Option<i64>) -> Self {
        if let Some(value) = value {
            self.predicates.push((column, Predicate::BigInt(value)));
        }
        self
    }

    pub(crate) fn int(mut self, column: &'static str, value: Option<i32>) -> Self {
        if let Some(value) = value {
            self.predicates.push((column, Predicate::Int(value)));
        }
        self
    }

    pub(crate) fn uuid(mut self, column: &'static str, value: Option<Uuid>) -> Self {
        if let Some(value) = value {
            self.predicates.push((column, Predicate::Uuid(value)));
        }
        self
    }

    pub(crate) fn date(mut self, column: &'static str, value: Option<NaiveDate>) -> Self {
        if let Some(value) = value {
            self.predicates.push((column, Predicate::Date(value)));
        }
        self
    }

    fn push_where(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        builder.push(" WHERE deleted_at IS NULL");
        for (column, predicate) in &self.predicates {
            builder.push(" AND ").push(column);
            match predicate {
                Predicate::Like(value) => {
                    builder.push(" LIKE ").push_bind(format!("%{}%", value));
                }
                Predicate::Text(value) => {
                    builder.push(" = ").push_bind(value.clone());
                }
                Predicate::BigInt(value) => {
                    builder.push(" = ").push_bind(*value);
                }
                Predicate::Int(value) => {
                    builder.push(" = ").push_bind(*value);
                }
                Predicate::Uuid(value) => {
                    builder.push(" = ").push_bind(*value);
                }
                Predicate::Date(value) => {
                    builder.push(" = ").push_bind(*value);
                }
            }
        }
    }
}

/// Maps a DTO field name to its column, rejecting anything not in `sortable`.
pub(crate) fn resolve_sort_column(
    order_by: &str,
    sortable: &[(&'static str, &'static str)],
) -> Result<&'static str, RepositoryError> {
    sortable
        .iter()
        .find(|(field, _)| *field == order_by)
        .map(|(_, column)| *column)
        .ok_or_else(|| RepositoryError::InvalidSortColumn {
            field: order_by.to_string(),
            allowed: sortable
                .iter()
                .map(|(field, _)| *field)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

pub(crate) fn count_query(table: &str, filters: &SearchFilters) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", table));
    filters.push_where(&mut builder);
    builder
}

/// Builds the page query. Rows with equal sort keys are ordered by `id` so
/// consecutive pages never overlap.
pub(crate) fn page_query(
    table: &str,
    columns: &str,
    filters: &SearchFilters,
    sort_column: &str,
    options: &SearchOptions,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", columns, table));
    filters.push_where(&mut builder);

    builder
        .push(" ORDER BY ")
        .push(sort_column)
        .push(" ")
        .push(options.order.as_sql());
    if sort_column != "id" {
        builder.push(", id ASC");
    }

    builder
        .push(" LIMIT ")
        .push_bind(options.limit())
        .push(" OFFSET ")
        .push_bind(options.offset());
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use careplan_shared::SortOrder;

    const SORTABLE: &[(&str, &str)] = &[("id", "id"), ("Name", "name"), ("CreatedAt", "created_at")];

    #[test]
    fn test_count_query_without_filters_excludes_deleted_rows() {
        let builder = count_query("asset_reflections", &SearchFilters::new());
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM asset_reflections WHERE deleted_at IS NULL"
        );
    }

    #[test]
    fn test_absent_values_add_no_predicates() {
        let filters = SearchFilters::new()
            .like("name", None)
            .uuid("owner_user_id", None)
            .big_int("asset_id", None);
        let builder = count_query("asset_nutrition", &filters);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM asset_nutrition WHERE deleted_at IS NULL"
        );
    }

    #[test]
    fn test_predicates_are_joined_in_order() {
        let filters = SearchFilters::new()
            .like("name", Some("walk"))
            .uuid("owner_user_id", Some(Uuid::nil()))
            .text("biometrics_type", Some("Pulse"));
        let builder = count_query("asset_biometrics", &filters);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM asset_biometrics WHERE deleted_at IS NULL \
             AND name LIKE $1 AND owner_user_id = $2 AND biometrics_type = $3"
        );
    }

    #[test]
    fn test_page_query_sorts_and_paginates() {
        let filters = SearchFilters::new().like("name", Some("yoga"));
        let options = SearchOptions {
            order: SortOrder::Descending,
            page_index: Some(2),
            ..Default::default()
        };
        let builder = page_query("asset_meditation", "id, name", &filters, "created_at", &options);
        assert_eq!(
            builder.sql(),
            "SELECT id, name FROM asset_meditation WHERE deleted_at IS NULL AND name LIKE $1 \
             ORDER BY created_at DESC, id ASC LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_page_query_sorted_by_id_has_no_tie_breaker() {
        let builder = page_query(
            "asset_messages",
            "id",
            &SearchFilters::new(),
            "id",
            &SearchOptions::default(),
        );
        assert_eq!(
            builder.sql(),
            "SELECT id FROM asset_messages WHERE deleted_at IS NULL ORDER BY id ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_resolve_sort_column() {
        assert_eq!(resolve_sort_column("Name", SORTABLE).unwrap(), "name");
        assert_eq!(resolve_sort_column("CreatedAt", SORTABLE).unwrap(), "created_at");

        let err = resolve_sort_column("name; DROP TABLE users", SORTABLE).unwrap_err();
        match err {
            RepositoryError::InvalidSortColumn { allowed, .. } => {
                assert_eq!(allowed, "id, Name, CreatedAt");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
