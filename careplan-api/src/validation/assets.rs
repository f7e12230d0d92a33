//! Field rules for asset requests.
//!
//! Kind-specific fields are only checked for the kinds that carry them; the
//! delegate ignores them for every other kind.
use careplan_shared::{AssetAttribute, AssetKind, BiometricsType, MeditationType, MessageType};
use uuid::Uuid;

use super::{
    validate_search_options, SearchQuery, Violations, MAX_LABEL_LENGTH, MAX_NAME_LENGTH,
};
use crate::errors::ApiError;
use crate::models::AssetRequest;

pub fn validate_create_request(kind: AssetKind, body: &AssetRequest) -> Result<(), ApiError> {
    let mut violations = Violations::new();
    violations.required("AssetCode", body.asset_code.is_some());
    violations.required("Name", body.name.is_some());
    violations.required("OwnerUserId", body.owner_user_id.is_some());
    validate_fields(kind, body, &mut violations);
    violations.finish()
}

/// Same rules as create, but every field is optional.
pub fn validate_update_request(kind: AssetKind, body: &AssetRequest) -> Result<(), ApiError> {
    let mut violations = Violations::new();
    validate_fields(kind, body, &mut violations);
    violations.finish()
}

pub fn validate_search_request(kind: AssetKind, query: &SearchQuery) -> Result<(), ApiError> {
    let mut violations = Violations::new();
    violations.check(query.parsed::<Uuid>("ownerUserId"));
    for attribute in kind.attributes() {
        match attribute {
            AssetAttribute::BiometricsType => {
                violations.check(query.parsed::<BiometricsType>("biometricsType"));
            }
            AssetAttribute::MeditationType => {
                violations.check(query.parsed::<MeditationType>("meditationType"));
            }
            AssetAttribute::MessageType => {
                violations.check(query.parsed::<MessageType>("messageType"));
            }
            AssetAttribute::RecommendedDurationMin => {
                violations.check(query.parsed::<i32>("recommendedDurationMin"));
            }
            AssetAttribute::MeasurementUnit | AssetAttribute::Url => {}
        }
    }
    validate_search_options(query, &mut violations);
    violations.finish()
}

fn validate_fields(kind: AssetKind, body: &AssetRequest, violations: &mut Violations) {
    violations.text("AssetCode", body.asset_code.as_deref(), MAX_NAME_LENGTH);
    violations.text("Name", body.name.as_deref(), MAX_NAME_LENGTH);
    violations.text("AssetCategory", body.asset_category.as_deref(), MAX_LABEL_LENGTH);
    violations.text("Version", body.version.as_deref(), MAX_LABEL_LENGTH);
    violations.tags("Tags", body.tags.as_deref());

    for attribute in kind.attributes() {
        let field = attribute.field_name();
        match attribute {
            AssetAttribute::BiometricsType => {
                violations.one_of::<BiometricsType>(field, body.biometrics_type.as_deref())
            }
            AssetAttribute::MeasurementUnit => {
                violations.text(field, body.measurement_unit.as_deref(), MAX_LABEL_LENGTH)
            }
            AssetAttribute::MeditationType => {
                violations.one_of::<MeditationType>(field, body.meditation_type.as_deref())
            }
            AssetAttribute::MessageType => {
                violations.one_of::<MessageType>(field, body.message_type.as_deref())
            }
            AssetAttribute::RecommendedDurationMin => {
                violations.non_negative(field, body.recommended_duration_min)
            }
            AssetAttribute::Url => violations.url(field, body.url.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid_body() -> AssetRequest {
        AssetRequest {
            asset_code: Some("MED-1".to_string()),
            name: Some("Body scan".to_string()),
            owner_user_id: Some(Uuid::new_v4()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_requires_code_name_and_owner() {
        let err = validate_create_request(AssetKind::Nutrition, &AssetRequest::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "AssetCode is required; Name is required; OwnerUserId is required"
        );
    }

    #[test]
    fn test_create_checks_kind_attributes() {
        let body = AssetRequest {
            meditation_type: Some("Napping".to_string()),
            recommended_duration_min: Some(-10),
            ..valid_body()
        };
        let err = validate_create_request(AssetKind::Meditation, &body).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("MeditationType"));
        assert!(message.contains("RecommendedDurationMin must not be negative"));
    }

    #[test]
    fn test_attributes_of_other_kinds_are_ignored() {
        let body = AssetRequest {
            url: Some("not a url".to_string()),
            biometrics_type: Some("Napping".to_string()),
            ..valid_body()
        };
        assert!(validate_create_request(AssetKind::Physiotherapy, &body).is_ok());
        assert!(validate_create_request(AssetKind::WebNewsfeed, &body).is_err());
    }

    #[test]
    fn test_update_rejects_blank_name_but_requires_nothing() {
        assert!(validate_update_request(AssetKind::Reflection, &AssetRequest::default()).is_ok());

        let body = AssetRequest {
            name: Some(" ".to_string()),
            tags: Some(vec!["mood".to_string(), "".to_string()]),
            ..Default::default()
        };
        let err = validate_update_request(AssetKind::Reflection, &body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Name must not be blank; Tags must not contain blank entries"
        );
    }

    #[test]
    fn test_search_rejects_unknown_enum_filter() {
        let params = HashMap::from([("biometricsType".to_string(), "Mood".to_string())]);
        let query = SearchQuery::new(params);
        assert!(validate_search_request(AssetKind::Biometrics, &query).is_err());
        // Not a nutrition column, so it is never read.
        assert!(validate_search_request(AssetKind::Nutrition, &query).is_ok());
    }
}
