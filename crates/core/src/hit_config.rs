//! HIT configuration file loading.
//!
//! A HIT is defined by a JSON file whose keys mirror the CreateHIT API
//! parameter names. Every field is required; a missing or ill-typed key
//! fails before any network call is made.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CoreError;

/// AMT charges a 20% surcharge on HITs with more assignments than this.
pub const FREE_TIER_MAX_ASSIGNMENTS: i32 = 9;

/// One qualification requirement, as accepted by CreateHIT.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct QualificationRequirementConfig {
    pub qualification_type_id: String,
    pub comparator: String,
    #[serde(default)]
    pub integer_values: Option<Vec<i32>>,
    #[serde(default)]
    pub locale_values: Option<Vec<LocaleConfig>>,
    #[serde(default)]
    pub actions_guarded: Option<String>,
}

/// A locale value inside a qualification requirement.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct LocaleConfig {
    pub country: String,
    #[serde(default)]
    pub subdivision: Option<String>,
}

/// Parsed HIT configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HitConfig {
    /// URL rendered inside the ExternalQuestion iframe.
    pub question_url: String,
    pub max_assignments: i32,
    pub lifetime_in_seconds: i64,
    pub assignment_duration_in_seconds: i64,
    /// Dollar amount as a string, e.g. `"0.50"`.
    pub reward: String,
    pub title: String,
    pub keywords: Vec<String>,
    pub description: String,
    pub qualification_requirements: Vec<QualificationRequirementConfig>,
}

impl HitConfig {
    /// Load and validate a configuration file.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            CoreError::Config(format!("invalid HIT config {}: {e}", path.display()))
        })
    }

    /// Keywords joined the way the CreateHIT `Keywords` parameter expects.
    pub fn keywords_param(&self) -> String {
        self.keywords.join(", ")
    }

    /// Whether `n_assignments` exceeds the free fee tier.
    pub fn exceeds_free_tier(n_assignments: i32) -> bool {
        n_assignments > FREE_TIER_MAX_ASSIGNMENTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const FULL_CONFIG: &str = r#"{
        "QuestionUrl": "https://example.com/task",
        "MaxAssignments": 5,
        "LifetimeInSeconds": 86400,
        "AssignmentDurationInSeconds": 1800,
        "Reward": "0.50",
        "Title": "Rate image similarity",
        "Keywords": ["image", "similarity", "rating"],
        "Description": "Judge which of two images is more similar.",
        "QualificationRequirements": [
            {
                "QualificationTypeId": "00000000000000000071",
                "Comparator": "EqualTo",
                "LocaleValues": [{"Country": "US"}]
            },
            {
                "QualificationTypeId": "000000000000000000L0",
                "Comparator": "GreaterThanOrEqualTo",
                "IntegerValues": [95]
            }
        ]
    }"#;

    #[test]
    fn full_config_parses() {
        let cfg: HitConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        assert_eq!(cfg.max_assignments, 5);
        assert_eq!(cfg.reward, "0.50");
        assert_eq!(cfg.keywords_param(), "image, similarity, rating");
        assert_eq!(cfg.qualification_requirements.len(), 2);
        assert_eq!(
            cfg.qualification_requirements[0]
                .locale_values
                .as_ref()
                .unwrap()[0]
                .country,
            "US"
        );
        assert_eq!(
            cfg.qualification_requirements[1].integer_values,
            Some(vec![95])
        );
    }

    #[test]
    fn each_required_key_is_enforced() {
        let full: serde_json::Value = serde_json::from_str(FULL_CONFIG).unwrap();
        for key in [
            "QuestionUrl",
            "MaxAssignments",
            "LifetimeInSeconds",
            "AssignmentDurationInSeconds",
            "Reward",
            "Title",
            "Keywords",
            "Description",
            "QualificationRequirements",
        ] {
            let mut trimmed = full.clone();
            trimmed.as_object_mut().unwrap().remove(key);
            let result: Result<HitConfig, _> = serde_json::from_value(trimmed);
            assert!(result.is_err(), "missing {key} should fail");
        }
    }

    #[test]
    fn missing_file_is_a_config_error() {
        assert_matches!(
            HitConfig::from_path(Path::new("/nonexistent/hit_config.json")),
            Err(CoreError::Config(_))
        );
    }

    #[test]
    fn free_tier_threshold() {
        assert!(!HitConfig::exceeds_free_tier(9));
        assert!(HitConfig::exceeds_free_tier(10));
    }
}
