//! Search option and result types shared by every list endpoint.
//!
//! All searches sort by a single column and page with a fixed page size
//! unless the caller asks otherwise.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not provide `itemsPerPage`.
pub const DEFAULT_ITEMS_PER_PAGE: i64 = 25;

/// Field searches are ordered by when the caller does not provide `orderBy`.
pub const DEFAULT_ORDER_BY: &str = "CreatedAt";

/// Sort direction of a search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Only the literal `descending` selects descending order; anything else
    /// (including unknown values) sorts ascending.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("descending") => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Sorting and paging options common to every search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// DTO field name to order by; defaults to `CreatedAt`.
    pub order_by: Option<String>,
    pub order: SortOrder,
    pub page_index: Option<i64>,
    pub items_per_page: Option<i64>,
}

impl SearchOptions {
    pub fn order_by(&self) -> &str {
        self.order_by.as_deref().unwrap_or(DEFAULT_ORDER_BY)
    }

    pub fn limit(&self) -> i64 {
        self.items_per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE)
    }

    /// Requested page, with negative values clamped to the first page.
    pub fn page_index(&self) -> i64 {
        self.page_index.unwrap_or(0).max(0)
    }

    pub fn offset(&self) -> i64 {
        self.page_index().saturating_mul(self.limit())
    }
}

/// One page of search results plus the paging metadata used to produce it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResults<T> {
    /// Number of rows matching the filters across all pages.
    pub total_count: i64,
    pub retrieved_count: usize,
    pub page_index: i64,
    pub items_per_page: i64,
    pub order: SortOrder,
    pub ordered_by: String,
    pub items: Vec<T>,
}

impl<T> SearchResults<T> {
    pub fn new(options: &SearchOptions, total_count: i64, items: Vec<T>) -> Self {
        Self {
            total_count,
            retrieved_count: items.len(),
            page_index: options.page_index(),
            items_per_page: options.limit(),
            order: options.order,
            ordered_by: options.order_by().to_string(),
            items,
        }
    }

    /// Converts the items while keeping the paging metadata.
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> SearchResults<U> {
        SearchResults {
            total_count: self.total_count,
            retrieved_count: self.retrieved_count,
            page_index: self.page_index,
            items_per_page: self.items_per_page,
            order: self.order,
            ordered_by: self.ordered_by,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Response body of every delete endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteResult {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.limit(), 25);
        assert_eq!(options.page_index(), 0);
        assert_eq!(options.offset(), 0);
        assert_eq!(options.order_by(), "CreatedAt");
        assert_eq!(options.order, SortOrder::Ascending);
    }

    #[test]
    fn test_offset_uses_page_size() {
        let options = SearchOptions {
            page_index: Some(3),
            items_per_page: Some(10),
            ..Default::default()
        };
        assert_eq!(options.offset(), 30);
    }

    #[test]
    fn test_negative_page_index_is_clamped() {
        let options = SearchOptions {
            page_index: Some(-2),
            ..Default::default()
        };
        assert_eq!(options.page_index(), 0);
        assert_eq!(options.offset(), 0);
    }

    #[test]
    fn test_sort_order_from_query() {
        assert_eq!(SortOrder::from_query(Some("descending")), SortOrder::Descending);
        assert_eq!(SortOrder::from_query(Some("ascending")), SortOrder::Ascending);
        assert_eq!(SortOrder::from_query(Some("DESC")), SortOrder::Ascending);
        assert_eq!(SortOrder::from_query(None), SortOrder::Ascending);
    }

    #[test]
    fn test_results_serialize_with_paging_metadata() {
        let options = SearchOptions {
            order_by: Some("Name".to_string()),
            order: SortOrder::Descending,
            page_index: Some(1),
            items_per_page: Some(2),
        };
        let results = SearchResults::new(&options, 5, vec![1, 2]).map_items(|n| n * 10);

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["TotalCount"], 5);
        assert_eq!(json["RetrievedCount"], 2);
        assert_eq!(json["PageIndex"], 1);
        assert_eq!(json["ItemsPerPage"], 2);
        assert_eq!(json["Order"], "descending");
        assert_eq!(json["OrderedBy"], "Name");
        assert_eq!(json["Items"], serde_json::json!([10, 20]));
    }
}
