// Request bodies accepted by the API
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

/// Body of asset create and update requests.
///
/// Enumerated fields stay strings here so that an unknown value is reported
/// together with every other violation instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetRequest {
    pub asset_code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub asset_category: Option<String>,
    pub owner_user_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
    pub version: Option<String>,
    pub biometrics_type: Option<String>,
    pub measurement_unit: Option<String>,
    pub meditation_type: Option<String>,
    pub message_type: Option<String>,
    pub recommended_duration_min: Option<i32>,
    pub url: Option<String>,
}

/// Body of user-selected goal create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserSelectedGoalRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<Uuid>,
    pub careplan_id: Option<i64>,
    pub asset_id: Option<i64>,
    pub asset_type: Option<String>,
    pub additional_details: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress_status: Option<String>,
}
