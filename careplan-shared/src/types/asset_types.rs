//! Enumerated column values used by individual asset kinds.

text_enum! {
    /// Kind of measurement a biometrics asset records.
    pub enum BiometricsType {
        BloodPressure => "Blood pressure",
        BloodGlucose => "Blood glucose",
        BloodOxygenSaturation => "Blood oxygen saturation",
        BodyHeight => "Body height",
        BodyWeight => "Body weight",
        BodyTemperature => "Body temperature",
        Pulse => "Pulse",
        Other => "Other",
    }
}

impl Default for BiometricsType {
    fn default() -> Self {
        Self::Other
    }
}

text_enum! {
    /// Style of a meditation program.
    pub enum MeditationType {
        Mindfulness => "Mindfulness",
        Spiritual => "Spiritual",
        Focused => "Focused",
        Mantra => "Mantra",
        ProgressiveRelaxation => "Progressive relaxation",
        Transcendental => "Transcendental",
        Visualization => "Visualization",
    }
}

impl Default for MeditationType {
    fn default() -> Self {
        Self::Mindfulness
    }
}

text_enum! {
    /// Purpose of a message asset.
    pub enum MessageType {
        Educational => "Educational",
        Status => "Status",
        Unknown => "Unknown",
    }
}

impl Default for MessageType {
    fn default() -> Self {
        Self::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biometrics_type_parses_display_strings() {
        assert_eq!(
            "Blood oxygen saturation".parse::<BiometricsType>().unwrap(),
            BiometricsType::BloodOxygenSaturation
        );
        assert_eq!(BiometricsType::BodyWeight.to_string(), "Body weight");
        assert_eq!(BiometricsType::default(), BiometricsType::Other);
    }

    #[test]
    fn test_unknown_value_lists_allowed_values() {
        let err = "Levitation".parse::<MeditationType>().unwrap_err();
        assert_eq!(err.type_name, "MeditationType");
        assert!(err.allowed.contains("Progressive relaxation"));
        assert!(err.to_string().contains("Levitation"));
    }

    #[test]
    fn test_parsing_is_case_sensitive() {
        assert!("status".parse::<MessageType>().is_err());
        assert_eq!("Status".parse::<MessageType>().unwrap(), MessageType::Status);
    }

    #[test]
    fn test_serde_uses_display_strings() {
        let json = serde_json::to_string(&MeditationType::ProgressiveRelaxation).unwrap();
        assert_eq!(json, "\"Progressive relaxation\"");

        let parsed: BiometricsType = serde_json::from_str("\"Pulse\"").unwrap();
        assert_eq!(parsed, BiometricsType::Pulse);

        assert!(serde_json::from_str::<MessageType>("\"Promotional\"").is_err());
    }
}
