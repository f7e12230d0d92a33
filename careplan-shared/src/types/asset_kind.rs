//! Asset kinds and the kind-specific attributes each one carries.
//!
//! Every asset kind is stored in its own table but shares the same base shape
//! (code, name, description, category, owner, tags, version). The handful of
//! columns that differ between kinds are described by [`AssetAttribute`].

use std::fmt;
use std::str::FromStr;

use crate::types::UnknownVariant;

/// The asset kinds managed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Biometrics,
    Nutrition,
    Meditation,
    Message,
    Physiotherapy,
    Reflection,
    WebNewsfeed,
}

/// A kind-specific asset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetAttribute {
    BiometricsType,
    MeasurementUnit,
    MeditationType,
    MessageType,
    RecommendedDurationMin,
    Url,
}

impl AssetKind {
    pub const ALL: [AssetKind; 7] = [
        AssetKind::Biometrics,
        AssetKind::Nutrition,
        AssetKind::Meditation,
        AssetKind::Message,
        AssetKind::Physiotherapy,
        AssetKind::Reflection,
        AssetKind::WebNewsfeed,
    ];

    /// Path segment used in the HTTP routes (`/api/v1/assets/{slug}`).
    pub fn slug(&self) -> &'static str {
        match self {
            AssetKind::Biometrics => "biometrics",
            AssetKind::Nutrition => "nutrition",
            AssetKind::Meditation => "meditation",
            AssetKind::Message => "message",
            AssetKind::Physiotherapy => "physiotherapy",
            AssetKind::Reflection => "reflection",
            AssetKind::WebNewsfeed => "web-newsfeed",
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            AssetKind::Biometrics => "asset_biometrics",
            AssetKind::Nutrition => "asset_nutrition",
            AssetKind::Meditation => "asset_meditation",
            AssetKind::Message => "asset_messages",
            AssetKind::Physiotherapy => "asset_physiotherapy",
            AssetKind::Reflection => "asset_reflections",
            AssetKind::WebNewsfeed => "asset_web_newsfeeds",
        }
    }

    /// Model name used as the key of response payloads (`{"Biometrics": {...}}`).
    pub fn model_name(&self) -> &'static str {
        match self {
            AssetKind::Biometrics => "Biometrics",
            AssetKind::Nutrition => "Nutrition",
            AssetKind::Meditation => "Meditation",
            AssetKind::Message => "Message",
            AssetKind::Physiotherapy => "Physiotherapy",
            AssetKind::Reflection => "Reflection",
            AssetKind::WebNewsfeed => "WebNewsfeed",
        }
    }

    /// Human readable name used in messages ("Meditation with id 4 cannot be found!").
    pub fn display_name(&self) -> &'static str {
        match self {
            AssetKind::WebNewsfeed => "Web newsfeed",
            other => other.model_name(),
        }
    }

    /// Value stored in `AssetCategory` when the request does not supply one.
    pub fn default_category(&self) -> &'static str {
        self.display_name()
    }

    /// Kind-specific columns, in table order.
    pub fn attributes(&self) -> &'static [AssetAttribute] {
        match self {
            AssetKind::Biometrics => &[
                AssetAttribute::BiometricsType,
                AssetAttribute::MeasurementUnit,
            ],
            AssetKind::Meditation => &[
                AssetAttribute::MeditationType,
                AssetAttribute::RecommendedDurationMin,
            ],
            AssetKind::Message => &[AssetAttribute::MessageType, AssetAttribute::Url],
            AssetKind::Physiotherapy => &[AssetAttribute::RecommendedDurationMin],
            AssetKind::WebNewsfeed => &[AssetAttribute::Url],
            AssetKind::Nutrition | AssetKind::Reflection => &[],
        }
    }

    pub fn has_attribute(&self, attribute: AssetAttribute) -> bool {
        self.attributes().contains(&attribute)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AssetKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| UnknownVariant {
                type_name: "AssetKind",
                value: s.to_string(),
                allowed: Self::ALL
                    .iter()
                    .map(|kind| kind.slug())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl AssetAttribute {
    pub fn column(&self) -> &'static str {
        match self {
            AssetAttribute::BiometricsType => "biometrics_type",
            AssetAttribute::MeasurementUnit => "measurement_unit",
            AssetAttribute::MeditationType => "meditation_type",
            AssetAttribute::MessageType => "message_type",
            AssetAttribute::RecommendedDurationMin => "recommended_duration_min",
            AssetAttribute::Url => "url",
        }
    }

    /// DTO field name, also accepted as an `orderBy` value.
    pub fn field_name(&self) -> &'static str {
        match self {
            AssetAttribute::BiometricsType => "BiometricsType",
            AssetAttribute::MeasurementUnit => "MeasurementUnit",
            AssetAttribute::MeditationType => "MeditationType",
            AssetAttribute::MessageType => "MessageType",
            AssetAttribute::RecommendedDurationMin => "RecommendedDurationMin",
            AssetAttribute::Url => "Url",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trips_for_every_kind() {
        for kind in AssetKind::ALL {
            assert_eq!(kind.slug().parse::<AssetKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_slug_is_rejected() {
        let err = "vitamins".parse::<AssetKind>().unwrap_err();
        assert!(err.allowed.contains("web-newsfeed"));
    }

    #[test]
    fn test_table_names_are_unique() {
        let mut tables: Vec<_> = AssetKind::ALL.iter().map(|k| k.table_name()).collect();
        tables.sort();
        tables.dedup();
        assert_eq!(tables.len(), AssetKind::ALL.len());
    }

    #[test]
    fn test_kind_specific_attributes() {
        assert!(AssetKind::Biometrics.has_attribute(AssetAttribute::MeasurementUnit));
        assert!(AssetKind::Message.has_attribute(AssetAttribute::Url));
        assert!(!AssetKind::Message.has_attribute(AssetAttribute::RecommendedDurationMin));
        assert!(AssetKind::Reflection.attributes().is_empty());
        assert!(AssetKind::Nutrition.attributes().is_empty());
    }

    #[test]
    fn test_default_category() {
        assert_eq!(AssetKind::Biometrics.default_category(), "Biometrics");
        assert_eq!(AssetKind::WebNewsfeed.default_category(), "Web newsfeed");
    }
}
