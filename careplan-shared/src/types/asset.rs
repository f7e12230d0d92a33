//! Asset models: what the API creates, updates, stores, searches and returns.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::types::{
    AssetAttribute, AssetKind, BiometricsType, MeditationType, MessageType, SearchOptions,
};

/// Default value of the `Version` column.
pub const DEFAULT_ASSET_VERSION: &str = "V1";

/// Values of the kind-specific asset columns.
///
/// Only the attributes listed by [`AssetKind::attributes`] are meaningful for a
/// given kind; the rest stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biometrics_type: Option<BiometricsType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meditation_type: Option<MeditationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_duration_min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AssetAttributes {
    /// Enumerated attributes of `kind` set to their column defaults.
    pub fn defaults_for(kind: AssetKind) -> Self {
        let mut attributes = Self::default();
        for attribute in kind.attributes() {
            match attribute {
                AssetAttribute::BiometricsType => {
                    attributes.biometrics_type = Some(BiometricsType::default())
                }
                AssetAttribute::MeditationType => {
                    attributes.meditation_type = Some(MeditationType::default())
                }
                AssetAttribute::MessageType => {
                    attributes.message_type = Some(MessageType::default())
                }
                AssetAttribute::MeasurementUnit
                | AssetAttribute::RecommendedDurationMin
                | AssetAttribute::Url => {}
            }
        }
        attributes
    }

    /// Fills unset enumerated attributes of `kind` with their column defaults.
    pub fn or_defaults(self, kind: AssetKind) -> Self {
        let defaults = Self::defaults_for(kind);
        Self {
            biometrics_type: self.biometrics_type.or(defaults.biometrics_type),
            meditation_type: self.meditation_type.or(defaults.meditation_type),
            message_type: self.message_type.or(defaults.message_type),
            ..self
        }
    }

    /// Drops every attribute that does not belong to `kind`.
    pub fn retain_for(mut self, kind: AssetKind) -> Self {
        if !kind.has_attribute(AssetAttribute::BiometricsType) {
            self.biometrics_type = None;
        }
        if !kind.has_attribute(AssetAttribute::MeasurementUnit) {
            self.measurement_unit = None;
        }
        if !kind.has_attribute(AssetAttribute::MeditationType) {
            self.meditation_type = None;
        }
        if !kind.has_attribute(AssetAttribute::MessageType) {
            self.message_type = None;
        }
        if !kind.has_attribute(AssetAttribute::RecommendedDurationMin) {
            self.recommended_duration_min = None;
        }
        if !kind.has_attribute(AssetAttribute::Url) {
            self.url = None;
        }
        self
    }

    /// Whether `attribute` holds a value.
    pub fn is_set(&self, attribute: AssetAttribute) -> bool {
        match attribute {
            AssetAttribute::BiometricsType => self.biometrics_type.is_some(),
            AssetAttribute::MeasurementUnit => self.measurement_unit.is_some(),
            AssetAttribute::MeditationType => self.meditation_type.is_some(),
            AssetAttribute::MessageType => self.message_type.is_some(),
            AssetAttribute::RecommendedDurationMin => self.recommended_duration_min.is_some(),
            AssetAttribute::Url => self.url.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fully resolved values for a new asset row.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetCreateModel {
    pub asset_code: String,
    pub name: String,
    pub description: String,
    pub asset_category: String,
    pub owner_user_id: Uuid,
    pub tags: Vec<String>,
    pub version: String,
    pub attributes: AssetAttributes,
}

/// Partial update of an asset; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetUpdateModel {
    pub asset_code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub asset_category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub version: Option<String>,
    pub attributes: AssetAttributes,
}

impl AssetUpdateModel {
    pub fn is_empty(&self) -> bool {
        self.asset_code.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.asset_category.is_none()
            && self.tags.is_none()
            && self.version.is_none()
            && self.attributes.is_empty()
    }
}

/// A stored, non-deleted asset row.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub id: i64,
    pub kind: AssetKind,
    pub asset_code: String,
    pub name: String,
    pub description: String,
    pub asset_category: String,
    pub owner_user_id: Uuid,
    pub tags: Vec<String>,
    pub version: String,
    pub attributes: AssetAttributes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters of an asset search. Text fields match by substring, the rest by equality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetSearchFilters {
    pub asset_code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub asset_category: Option<String>,
    pub owner_user_id: Option<Uuid>,
    pub tags: Option<String>,
    pub version: Option<String>,
    pub attributes: AssetAttributes,
    pub options: SearchOptions,
}

/// Asset representation returned to API clients.
///
/// Serializes every attribute of `kind`, as `null` when unset, and none of the
/// attributes of other kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDto {
    pub id: i64,
    pub kind: AssetKind,
    pub asset_code: String,
    pub name: String,
    pub description: String,
    pub asset_category: String,
    pub owner_user_id: Uuid,
    pub tags: Vec<String>,
    pub version: String,
    pub attributes: AssetAttributes,
}

impl Serialize for AssetDto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attributes = self.kind.attributes();
        let mut map = serializer.serialize_map(Some(8 + attributes.len()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("AssetCode", &self.asset_code)?;
        map.serialize_entry("Name", &self.name)?;
        map.serialize_entry("Description", &self.description)?;
        map.serialize_entry("AssetCategory", &self.asset_category)?;
        map.serialize_entry("OwnerUserId", &self.owner_user_id)?;
        map.serialize_entry("Tags", &self.tags)?;
        map.serialize_entry("Version", &self.version)?;

        for attribute in attributes {
            let key = attribute.field_name();
            match attribute {
                AssetAttribute::BiometricsType => {
                    map.serialize_entry(key, &self.attributes.biometrics_type)?
                }
                AssetAttribute::MeasurementUnit => {
                    map.serialize_entry(key, &self.attributes.measurement_unit)?
                }
                AssetAttribute::MeditationType => {
                    map.serialize_entry(key, &self.attributes.meditation_type)?
                }
                AssetAttribute::MessageType => {
                    map.serialize_entry(key, &self.attributes.message_type)?
                }
                AssetAttribute::RecommendedDurationMin => {
                    map.serialize_entry(key, &self.attributes.recommended_duration_min)?
                }
                AssetAttribute::Url => map.serialize_entry(key, &self.attributes.url)?,
            }
        }
        map.end()
    }
}

impl From<AssetRecord> for AssetDto {
    fn from(record: AssetRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind,
            asset_code: record.asset_code,
            name: record.name,
            description: record.description,
            asset_category: record.asset_category,
            owner_user_id: record.owner_user_id,
            tags: record.tags,
            version: record.version,
            attributes: record.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(kind: AssetKind) -> AssetRecord {
        AssetRecord {
            id: 7,
            kind,
            asset_code: "BIOM-7".to_string(),
            name: "Morning weight".to_string(),
            description: String::new(),
            asset_category: kind.default_category().to_string(),
            owner_user_id: Uuid::nil(),
            tags: vec!["weight".to_string()],
            version: DEFAULT_ASSET_VERSION.to_string(),
            attributes: AssetAttributes {
                biometrics_type: Some(BiometricsType::BodyWeight),
                measurement_unit: Some("kg".to_string()),
                ..Default::default()
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_defaults_for_enumerated_attributes() {
        let biometrics = AssetAttributes::defaults_for(AssetKind::Biometrics);
        assert_eq!(biometrics.biometrics_type, Some(BiometricsType::Other));
        assert!(biometrics.measurement_unit.is_none());

        let message = AssetAttributes::defaults_for(AssetKind::Message);
        assert_eq!(message.message_type, Some(MessageType::Unknown));

        assert!(AssetAttributes::defaults_for(AssetKind::Reflection).is_empty());
    }

    #[test]
    fn test_retain_for_drops_foreign_attributes() {
        let attributes = AssetAttributes {
            url: Some("https://example.org".to_string()),
            recommended_duration_min: Some(10),
            meditation_type: Some(MeditationType::Mantra),
            ..Default::default()
        };

        let physio = attributes.clone().retain_for(AssetKind::Physiotherapy);
        assert_eq!(physio.recommended_duration_min, Some(10));
        assert!(physio.url.is_none());
        assert!(physio.meditation_type.is_none());

        assert!(attributes.retain_for(AssetKind::Nutrition).is_empty());
    }

    #[test]
    fn test_update_model_is_empty() {
        assert!(AssetUpdateModel::default().is_empty());

        let update = AssetUpdateModel {
            attributes: AssetAttributes {
                url: Some("https://example.org".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_dto_flattens_kind_attributes() {
        let dto = AssetDto::from(sample_record(AssetKind::Biometrics));
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["AssetCode"], "BIOM-7");
        assert_eq!(json["AssetCategory"], "Biometrics");
        assert_eq!(json["BiometricsType"], "Body weight");
        assert_eq!(json["MeasurementUnit"], "kg");
        assert_eq!(json["Tags"], serde_json::json!(["weight"]));
        assert!(json.get("Url").is_none());
        assert!(json.get("MeditationType").is_none());
    }

    #[test]
    fn test_dto_keeps_unset_kind_attributes_as_null() {
        let mut record = sample_record(AssetKind::WebNewsfeed);
        record.attributes = AssetAttributes::default();
        let json = serde_json::to_value(AssetDto::from(record)).unwrap();

        assert_eq!(json.get("Url"), Some(&serde_json::Value::Null));
        assert!(json.get("BiometricsType").is_none());
        assert!(json.get("MeasurementUnit").is_none());

        let mut record = sample_record(AssetKind::Meditation);
        record.attributes = AssetAttributes::defaults_for(AssetKind::Meditation);
        let json = serde_json::to_value(AssetDto::from(record)).unwrap();

        assert_eq!(json["MeditationType"], "Mindfulness");
        assert_eq!(json.get("RecommendedDurationMin"), Some(&serde_json::Value::Null));
    }
}
