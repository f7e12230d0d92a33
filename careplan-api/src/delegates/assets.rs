use std::sync::Arc;

use careplan_repository::AssetRepository;
use careplan_shared::{
    AssetAttribute, AssetAttributes, AssetCreateModel, AssetDto, AssetKind, AssetSearchFilters,
    AssetUpdateModel, BiometricsType, DeleteResult, MeditationType, MessageType, SearchResults,
    DEFAULT_ASSET_VERSION,
};
use tracing::info;

use crate::errors::ApiError;
use crate::models::AssetRequest;
use crate::validation::assets as validator;
use crate::validation::SearchQuery;

/// Runs asset requests for every [`AssetKind`].
#[derive(Clone)]
pub struct AssetsDelegate {
    repository: Arc<dyn AssetRepository>,
}

impl AssetsDelegate {
    pub fn new(repository: Arc<dyn AssetRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, kind: AssetKind, body: AssetRequest) -> Result<AssetDto, ApiError> {
        validator::validate_create_request(kind, &body)?;
        let model = create_model(kind, body)?;
        let record = self.repository.create(kind, &model).await?;
        info!(asset_kind = %kind, id = record.id, "Asset created");
        Ok(record.into())
    }

    pub async fn get_by_id(&self, kind: AssetKind, id: i64) -> Result<AssetDto, ApiError> {
        self.repository
            .get_by_id(kind, id)
            .await?
            .map(AssetDto::from)
            .ok_or_else(|| not_found(kind, id))
    }

    pub async fn search(
        &self,
        kind: AssetKind,
        query: &SearchQuery,
    ) -> Result<SearchResults<AssetDto>, ApiError> {
        validator::validate_search_request(kind, query)?;
        let filters = search_filters(kind, query)?;
        let results = self.repository.search(kind, &filters).await?;
        Ok(results.map_items(AssetDto::from))
    }

    pub async fn update(
        &self,
        kind: AssetKind,
        id: i64,
        body: AssetRequest,
    ) -> Result<AssetDto, ApiError> {
        validator::validate_update_request(kind, &body)?;
        if !self.repository.exists(kind, id).await? {
            return Err(not_found(kind, id));
        }
        let model = update_model(kind, body)?;
        let record = self
            .repository
            .update(kind, id, &model)
            .await?
            .ok_or_else(|| not_found(kind, id))?;
        info!(asset_kind = %kind, id, "Asset updated");
        Ok(record.into())
    }

    pub async fn delete(&self, kind: AssetKind, id: i64) -> Result<DeleteResult, ApiError> {
        if !self.repository.exists(kind, id).await? {
            return Err(not_found(kind, id));
        }
        let deleted = self.repository.delete(kind, id).await?;
        info!(asset_kind = %kind, id, deleted, "Asset deleted");
        Ok(DeleteResult { deleted })
    }
}

fn not_found(kind: AssetKind, id: i64) -> ApiError {
    ApiError::not_found(format!(
        "{} with id {} cannot be found!",
        kind.display_name(),
        id
    ))
}

fn parse_field<T>(field: &str, value: Option<String>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| ApiError::validation(format!("{}: {}", field, e)))
        })
        .transpose()
}

/// Kind-specific fields of `body`; fields of other kinds are dropped unread.
fn attributes(kind: AssetKind, body: &mut AssetRequest) -> Result<AssetAttributes, ApiError> {
    let mut attributes = AssetAttributes::default();
    for attribute in kind.attributes() {
        let field = attribute.field_name();
        match attribute {
            AssetAttribute::BiometricsType => {
                attributes.biometrics_type =
                    parse_field::<BiometricsType>(field, body.biometrics_type.take())?;
            }
            AssetAttribute::MeasurementUnit => {
                attributes.measurement_unit = body.measurement_unit.take();
            }
            AssetAttribute::MeditationType => {
                attributes.meditation_type =
                    parse_field::<MeditationType>(field, body.meditation_type.take())?;
            }
            AssetAttribute::MessageType => {
                attributes.message_type =
                    parse_field::<MessageType>(field, body.message_type.take())?;
            }
            AssetAttribute::RecommendedDurationMin => {
                attributes.recommended_duration_min = body.recommended_duration_min.take();
            }
            AssetAttribute::Url => {
                attributes.url = body.url.take();
            }
        }
    }
    Ok(attributes)
}

fn create_model(kind: AssetKind, mut body: AssetRequest) -> Result<AssetCreateModel, ApiError> {
    let attributes = attributes(kind, &mut body)?;
    Ok(AssetCreateModel {
        asset_code: body
            .asset_code
            .ok_or_else(|| ApiError::validation("AssetCode is required"))?,
        name: body
            .name
            .ok_or_else(|| ApiError::validation("Name is required"))?,
        description: body.description.unwrap_or_default(),
        asset_category: body
            .asset_category
            .unwrap_or_else(|| kind.default_category().to_string()),
        owner_user_id: body
            .owner_user_id
            .ok_or_else(|| ApiError::validation("OwnerUserId is required"))?,
        tags: body.tags.unwrap_or_default(),
        version: body
            .version
            .unwrap_or_else(|| DEFAULT_ASSET_VERSION.to_string()),
        attributes,
    })
}

fn update_model(kind: AssetKind, mut body: AssetRequest) -> Result<AssetUpdateModel, ApiError> {
    let attributes = attributes(kind, &mut body)?;
    Ok(AssetUpdateModel {
        asset_code: body.asset_code,
        name: body.name,
        description: body.description,
        asset_category: body.asset_category,
        tags: body.tags,
        version: body.version,
        attributes,
    })
}

fn search_filters(kind: AssetKind, query: &SearchQuery) -> Result<AssetSearchFilters, ApiError> {
    let mut attributes = AssetAttributes::default();
    for attribute in kind.attributes() {
        match attribute {
            AssetAttribute::BiometricsType => {
                attributes.biometrics_type = query.require_parsed("biometricsType")?;
            }
            AssetAttribute::MeasurementUnit => {
                attributes.measurement_unit = query.owned("measurementUnit");
            }
            AssetAttribute::MeditationType => {
                attributes.meditation_type = query.require_parsed("meditationType")?;
            }
            AssetAttribute::MessageType => {
                attributes.message_type = query.require_parsed("messageType")?;
            }
            AssetAttribute::RecommendedDurationMin => {
                attributes.recommended_duration_min =
                    query.require_parsed("recommendedDurationMin")?;
            }
            AssetAttribute::Url => {
                attributes.url = query.owned("url");
            }
        }
    }

    Ok(AssetSearchFilters {
        asset_code: query.owned("assetCode"),
        name: query.owned("name"),
        description: query.owned("description"),
        asset_category: query.owned("assetCategory"),
        owner_user_id: query.require_parsed("ownerUserId")?,
        tags: query.owned("tags"),
        version: query.owned("version"),
        attributes,
        options: query.options()?,
    })
}
