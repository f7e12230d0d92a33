//! Handlers for `/api/v1/assets/{kind}`.
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
use careplan_shared::AssetKind;

use super::{json_body, query_params};
use crate::errors::ApiError;
use crate::models::AssetRequest;
use crate::server::response::success;
use crate::server::state::AppState;
use crate::validation::SearchQuery;

fn asset_kind(slug: &str) -> Result<AssetKind, ApiError> {
    slug.parse()
        .map_err(|_| ApiError::not_found(format!("Unknown asset type '{}'", slug)))
}

fn asset_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid id: {}", raw)))
}

pub async fn create(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Result<Json<AssetRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let kind = asset_kind(&kind)?;
    let dto = state.assets.create(kind, json_body(body)?).await?;
    Ok(success(
        StatusCode::CREATED,
        format!("{} record created successfully!", kind.display_name()),
        kind.model_name(),
        dto,
    ))
}

pub async fn search(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let kind = asset_kind(&kind)?;
    let query = SearchQuery::new(query_params(query)?);
    let results = state.assets.search(kind, &query).await?;
    Ok(success(
        StatusCode::OK,
        format!(
            "Total {} {} records retrieved successfully!",
            results.retrieved_count,
            kind.display_name()
        ),
        &format!("{}Records", kind.model_name()),
        results,
    ))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let kind = asset_kind(&kind)?;
    let dto = state.assets.get_by_id(kind, asset_id(&id)?).await?;
    Ok(success(
        StatusCode::OK,
        format!("{} record retrieved successfully!", kind.display_name()),
        kind.model_name(),
        dto,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    body: Result<Json<AssetRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let kind = asset_kind(&kind)?;
    let id = asset_id(&id)?;
    let dto = state.assets.update(kind, id, json_body(body)?).await?;
    Ok(success(
        StatusCode::OK,
        format!("{} record updated successfully!", kind.display_name()),
        kind.model_name(),
        dto,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let kind = asset_kind(&kind)?;
    let result = state.assets.delete(kind, asset_id(&id)?).await?;
    Ok(success(
        StatusCode::OK,
        format!("{} record deleted successfully!", kind.display_name()),
        "Deleted",
        result.deleted,
    ))
}
