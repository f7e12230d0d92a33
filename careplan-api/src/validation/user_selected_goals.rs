use chrono::NaiveDate;
use careplan_shared::ProgressStatus;
use uuid::Uuid;

use super::{
    validate_search_options, SearchQuery, Violations, MAX_LABEL_LENGTH, MAX_NAME_LENGTH,
};
use crate::errors::ApiError;
use crate::models::UserSelectedGoalRequest;

pub fn validate_create_request(body: &UserSelectedGoalRequest) -> Result<(), ApiError> {
    let mut violations = Violations::new();
    violations.required("Name", body.name.is_some());
    violations.required("UserId", body.user_id.is_some());
    violations.required("CareplanId", body.careplan_id.is_some());
    validate_fields(body, &mut violations);
    check_date_range(body.start_date, body.end_date, &mut violations);
    violations.finish()
}

/// Field rules only; the date range is checked against the stored goal by
/// [`validate_date_range`].
pub fn validate_update_request(body: &UserSelectedGoalRequest) -> Result<(), ApiError> {
    let mut violations = Violations::new();
    validate_fields(body, &mut violations);
    violations.finish()
}

pub fn validate_date_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), ApiError> {
    let mut violations = Violations::new();
    check_date_range(start_date, end_date, &mut violations);
    violations.finish()
}

pub fn validate_search_request(query: &SearchQuery) -> Result<(), ApiError> {
    let mut violations = Violations::new();
    violations.check(query.parsed::<Uuid>("userId"));
    violations.check(query.parsed::<i64>("careplanId"));
    violations.check(query.parsed::<i64>("assetId"));
    violations.check(query.parsed::<NaiveDate>("startDate"));
    violations.check(query.parsed::<NaiveDate>("endDate"));
    violations.check(query.parsed::<ProgressStatus>("progressStatus"));
    validate_search_options(query, &mut violations);
    violations.finish()
}

fn validate_fields(body: &UserSelectedGoalRequest, violations: &mut Violations) {
    violations.text("Name", body.name.as_deref(), MAX_NAME_LENGTH);
    violations.text("AssetType", body.asset_type.as_deref(), MAX_LABEL_LENGTH);
    violations.one_of::<ProgressStatus>("ProgressStatus", body.progress_status.as_deref());
}

fn check_date_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    violations: &mut Violations,
) {
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            violations.add("EndDate must not be before StartDate");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_create_requires_name_user_and_careplan() {
        let err = validate_create_request(&UserSelectedGoalRequest::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Name is required; UserId is required; CareplanId is required"
        );
    }

    #[test]
    fn test_create_rejects_inverted_dates() {
        let body = UserSelectedGoalRequest {
            name: Some("Walk daily".to_string()),
            user_id: Some(Uuid::new_v4()),
            careplan_id: Some(2),
            start_date: date(2026, 5, 10),
            end_date: date(2026, 5, 1),
            ..Default::default()
        };
        let err = validate_create_request(&body).unwrap_err();
        assert_eq!(err.to_string(), "EndDate must not be before StartDate");
    }

    #[test]
    fn test_update_checks_status() {
        let body = UserSelectedGoalRequest {
            progress_status: Some("Done".to_string()),
            ..Default::default()
        };
        assert!(validate_update_request(&body).is_err());

        let body = UserSelectedGoalRequest {
            progress_status: Some("In-progress".to_string()),
            ..Default::default()
        };
        assert!(validate_update_request(&body).is_ok());
    }

    #[test]
    fn test_date_range_allows_open_ends() {
        assert!(validate_date_range(date(2026, 1, 1), None).is_ok());
        assert!(validate_date_range(date(2026, 1, 1), date(2026, 1, 1)).is_ok());
        assert!(validate_date_range(date(2026, 1, 2), date(2026, 1, 1)).is_err());
    }

    #[test]
    fn test_search_parses_identifiers_and_dates() {
        let query = SearchQuery::new(HashMap::from([
            ("careplanId".to_string(), "12".to_string()),
            ("startDate".to_string(), "2026-02-30".to_string()),
        ]));
        let err = validate_search_request(&query).unwrap_err();
        assert!(err.to_string().starts_with("Invalid value for startDate"));
    }
}
