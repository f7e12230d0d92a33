//! Goals a user has picked from a careplan, with their date range and progress.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::SearchOptions;

text_enum! {
    /// Progress of a user-selected goal.
    pub enum ProgressStatus {
        Pending => "Pending",
        InProgress => "In-progress",
        Completed => "Completed",
        Cancelled => "Cancelled",
        Delayed => "Delayed",
        Unknown => "Unknown",
    }
}

impl Default for ProgressStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSelectedGoalCreateModel {
    pub name: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub careplan_id: i64,
    pub asset_id: Option<i64>,
    pub asset_type: Option<String>,
    pub additional_details: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress_status: ProgressStatus,
}

/// Partial update of a goal; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserSelectedGoalUpdateModel {
    pub name: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<Uuid>,
    pub careplan_id: Option<i64>,
    pub asset_id: Option<i64>,
    pub asset_type: Option<String>,
    pub additional_details: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress_status: Option<ProgressStatus>,
}

impl UserSelectedGoalUpdateModel {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSelectedGoalRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub careplan_id: i64,
    pub asset_id: Option<i64>,
    pub asset_type: Option<String>,
    pub additional_details: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress_status: ProgressStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters of a goal search. `name`, `description` and `additional_details`
/// match by substring, the rest by equality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserSelectedGoalSearchFilters {
    pub name: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<Uuid>,
    pub careplan_id: Option<i64>,
    pub asset_id: Option<i64>,
    pub asset_type: Option<String>,
    pub additional_details: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress_status: Option<ProgressStatus>,
    pub options: SearchOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserSelectedGoalDto {
    #[serde(rename = "id")]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub careplan_id: i64,
    pub asset_id: Option<i64>,
    pub asset_type: Option<String>,
    pub additional_details: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress_status: ProgressStatus,
}

impl From<UserSelectedGoalRecord> for UserSelectedGoalDto {
    fn from(record: UserSelectedGoalRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            user_id: record.user_id,
            careplan_id: record.careplan_id,
            asset_id: record.asset_id,
            asset_type: record.asset_type,
            additional_details: record.additional_details,
            start_date: record.start_date,
            end_date: record.end_date,
            progress_status: record.progress_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_status_strings() {
        assert_eq!(ProgressStatus::InProgress.as_str(), "In-progress");
        assert_eq!(
            "Delayed".parse::<ProgressStatus>().unwrap(),
            ProgressStatus::Delayed
        );
        assert_eq!(ProgressStatus::default(), ProgressStatus::Pending);
    }

    #[test]
    fn test_dto_serializes_dates_as_iso() {
        let now = Utc::now();
        let dto = UserSelectedGoalDto::from(UserSelectedGoalRecord {
            id: Uuid::nil(),
            name: "Walk daily".to_string(),
            description: None,
            user_id: Uuid::nil(),
            careplan_id: 3,
            asset_id: Some(12),
            asset_type: Some("Exercise".to_string()),
            additional_details: None,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5),
            end_date: None,
            progress_status: ProgressStatus::InProgress,
            created_at: now,
            updated_at: now,
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["StartDate"], "2026-01-05");
        assert_eq!(json["EndDate"], serde_json::Value::Null);
        assert_eq!(json["ProgressStatus"], "In-progress");
        assert_eq!(json["CareplanId"], 3);
    }

    #[test]
    fn test_empty_update_model() {
        assert!(UserSelectedGoalUpdateModel::default().is_empty());
        let update = UserSelectedGoalUpdateModel {
            progress_status: Some(ProgressStatus::Completed),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
