//! Request validation.
//!
//! Validators collect every violation of a request and report them together
//! as a single [`ApiError::Validation`].
pub mod assets;
pub mod user_selected_goals;

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use careplan_shared::{SearchOptions, SortOrder};

use crate::errors::ApiError;

/// Maximum length of codes and names.
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum length of categories, versions, units and type labels.
pub const MAX_LABEL_LENGTH: usize = 128;

pub const MAX_URL_LENGTH: usize = 1024;

/// Accumulates rule violations for one request.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub(crate) fn required(&mut self, field: &str, present: bool) {
        if !present {
            self.add(format!("{} is required", field));
        }
    }

    /// Rejects blank values and values longer than `max_length` characters.
    pub(crate) fn text(&mut self, field: &str, value: Option<&str>, max_length: usize) {
        let Some(value) = value else { return };
        if value.trim().is_empty() {
            self.add(format!("{} must not be blank", field));
        } else if value.chars().count() > max_length {
            self.add(format!("{} must be at most {} characters", field, max_length));
        }
    }

    pub(crate) fn one_of<T>(&mut self, field: &str, value: Option<&str>)
    where
        T: FromStr,
        T::Err: Display,
    {
        if let Some(value) = value {
            if let Err(e) = value.parse::<T>() {
                self.add(format!("{}: {}", field, e));
            }
        }
    }

    pub(crate) fn non_negative(&mut self, field: &str, value: Option<i32>) {
        if matches!(value, Some(v) if v < 0) {
            self.add(format!("{} must not be negative", field));
        }
    }

    pub(crate) fn url(&mut self, field: &str, value: Option<&str>) {
        let Some(value) = value else { return };
        if value.chars().count() > MAX_URL_LENGTH {
            self.add(format!("{} must be at most {} characters", field, MAX_URL_LENGTH));
        } else if !(value.starts_with("http://") || value.starts_with("https://")) {
            self.add(format!("{} must start with http:// or https://", field));
        }
    }

    pub(crate) fn tags(&mut self, field: &str, value: Option<&[String]>) {
        if let Some(tags) = value {
            if tags.iter().any(|tag| tag.trim().is_empty()) {
                self.add(format!("{} must not contain blank entries", field));
            }
        }
    }

    /// Records the error of a query parameter that failed to parse.
    pub(crate) fn check<T>(&mut self, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(message);
                None
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), ApiError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(self.messages.join("; ")))
        }
    }
}

/// Query string of a search request. Empty values count as absent.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    params: HashMap<String, String>,
}

impl SearchQuery {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self {
            params: params
                .into_iter()
                .filter(|(_, value)| !value.trim().is_empty())
                .collect(),
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn owned(&self, key: &str) -> Option<String> {
        self.text(key).map(String::from)
    }

    /// Parses `key` if present.
    pub fn parsed<T>(&self, key: &str) -> Result<Option<T>, String>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.text(key)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|e| format!("Invalid value for {}: {} ({})", key, raw, e))
            })
            .transpose()
    }

    /// Like [`SearchQuery::parsed`], for use after validation.
    pub fn require_parsed<T>(&self, key: &str) -> Result<Option<T>, ApiError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.parsed(key).map_err(ApiError::bad_request)
    }

    /// Sorting and paging parameters shared by every search.
    pub fn options(&self) -> Result<SearchOptions, ApiError> {
        Ok(SearchOptions {
            order_by: self.owned("orderBy"),
            order: SortOrder::from_query(self.text("order")),
            page_index: self.require_parsed("pageIndex")?,
            items_per_page: self.require_parsed("itemsPerPage")?,
        })
    }
}

/// Checks the paging parameters common to every search.
pub(crate) fn validate_search_options(query: &SearchQuery, violations: &mut Violations) {
    violations.check(query.parsed::<i64>("pageIndex"));
    if let Some(Some(items)) = violations.check(query.parsed::<i64>("itemsPerPage")) {
        if items <= 0 {
            violations.add("itemsPerPage must be greater than zero");
        }
    }
}
