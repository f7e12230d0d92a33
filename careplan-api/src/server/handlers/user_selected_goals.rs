//! Handlers for `/api/v1/user-selected-goals`.
use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    Json,
};
use uuid::Uuid;

use super::{json_body, query_params};
use crate::errors::ApiError;
use crate::models::UserSelectedGoalRequest;
use crate::server::response::success;
use crate::server::state::AppState;
use crate::validation::SearchQuery;

const MODEL_NAME: &str = "UserSelectedGoal";

fn goal_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid id: {}", raw)))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<UserSelectedGoalRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let dto = state.user_selected_goals.create(json_body(body)?).await?;
    Ok(success(
        StatusCode::CREATED,
        "User selected goal record created successfully!",
        MODEL_NAME,
        dto,
    ))
}

pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let results = state
        .user_selected_goals
        .search(&SearchQuery::new(query_params(query)?))
        .await?;
    Ok(success(
        StatusCode::OK,
        format!(
            "Total {} user selected goal records retrieved successfully!",
            results.retrieved_count
        ),
        "UserSelectedGoalRecords",
        results,
    ))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let dto = state.user_selected_goals.get_by_id(goal_id(&id)?).await?;
    Ok(success(
        StatusCode::OK,
        "User selected goal record retrieved successfully!",
        MODEL_NAME,
        dto,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UserSelectedGoalRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = goal_id(&id)?;
    let dto = state
        .user_selected_goals
        .update(id, json_body(body)?)
        .await?;
    Ok(success(
        StatusCode::OK,
        "User selected goal record updated successfully!",
        MODEL_NAME,
        dto,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let result = state.user_selected_goals.delete(goal_id(&id)?).await?;
    Ok(success(
        StatusCode::OK,
        "User selected goal record deleted successfully!",
        "Deleted",
        result.deleted,
    ))
}
