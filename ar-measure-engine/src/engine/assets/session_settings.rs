use bevy::prelude::*;
use constants::session::{DOM_OVERLAY_ROOT, OPTIONAL_FEATURES, REQUIRED_FEATURES};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::session::dimensions::BoxDimensions;

/// Session configuration loaded from `ar_settings.json`.
///
/// Also kept as a resource so the host can query it before requesting a session.
#[derive(Asset, Resource, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Features the session cannot run without (surface hit-testing).
    pub required_features: Vec<String>,
    /// Features requested when available (DOM overlay).
    pub optional_features: Vec<String>,
    /// CSS selector of the element used as the DOM overlay root.
    pub dom_overlay_root: String,
    #[serde(default)]
    pub default_dimensions_cm: BoxDimensions,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            required_features: REQUIRED_FEATURES.iter().map(|f| f.to_string()).collect(),
            optional_features: OPTIONAL_FEATURES.iter().map(|f| f.to_string()).collect(),
            dom_overlay_root: DOM_OVERLAY_ROOT.to_string(),
            default_dimensions_cm: BoxDimensions::default(),
        }
    }
}

impl SessionSettings {
    /// Session init options in the shape `navigator.xr.requestSession` expects.
    pub fn session_init(&self) -> Value {
        json!({
            "requiredFeatures": self.required_features,
            "optionalFeatures": self.optional_features,
            "domOverlay": { "root": self.dom_overlay_root },
        })
    }

    /// Replace an unusable configured box size with the built-in default.
    pub fn sanitized(mut self) -> Self {
        let BoxDimensions {
            width,
            height,
            depth,
        } = self.default_dimensions_cm;
        if let Err(error) = BoxDimensions::try_new(width, height, depth) {
            warn!("Ignoring configured default box size: {error}");
            self.default_dimensions_cm = BoxDimensions::default();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requires_hit_test_and_offers_dom_overlay() {
        let settings = SessionSettings::default();
        assert_eq!(settings.required_features, vec!["hit-test".to_string()]);
        assert_eq!(settings.optional_features, vec!["dom-overlay".to_string()]);
        assert_eq!(settings.dom_overlay_root, "body");
    }

    #[test]
    fn parses_settings_file() {
        let raw = r##"{
            "required_features": ["hit-test"],
            "optional_features": ["dom-overlay", "light-estimation"],
            "dom_overlay_root": "#overlay",
            "default_dimensions_cm": { "width": 25.0, "height": 30.0, "depth": 15.0 }
        }"##;

        let settings: SessionSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.optional_features.len(), 2);
        assert_eq!(settings.dom_overlay_root, "#overlay");
        assert_eq!(
            settings.default_dimensions_cm,
            BoxDimensions::new(25.0, 30.0, 15.0)
        );
    }

    #[test]
    fn missing_dimensions_fall_back_to_default() {
        let raw = r#"{
            "required_features": ["hit-test"],
            "optional_features": [],
            "dom_overlay_root": "body"
        }"#;
        let settings: SessionSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.default_dimensions_cm, BoxDimensions::default());
    }

    #[test]
    fn invalid_default_size_falls_back_to_built_in() {
        let raw = r#"{
            "required_features": ["hit-test"],
            "optional_features": [],
            "dom_overlay_root": "body",
            "default_dimensions_cm": { "width": -10.0, "height": 0.0, "depth": 30.0 }
        }"#;
        let settings = serde_json::from_str::<SessionSettings>(raw)
            .unwrap()
            .sanitized();
        assert_eq!(settings.default_dimensions_cm, BoxDimensions::default());
        assert_eq!(settings.required_features, vec!["hit-test".to_string()]);
    }

    #[test]
    fn valid_default_size_survives_sanitizing() {
        let settings = SessionSettings {
            default_dimensions_cm: BoxDimensions::new(12.5, 30.0, 1.0),
            ..default()
        }
        .sanitized();
        assert_eq!(
            settings.default_dimensions_cm,
            BoxDimensions::new(12.5, 30.0, 1.0)
        );
    }

    #[test]
    fn session_init_uses_webxr_field_names() {
        let init = SessionSettings::default().session_init();
        assert_eq!(init["requiredFeatures"], json!(["hit-test"]));
        assert_eq!(init["optionalFeatures"], json!(["dom-overlay"]));
        assert_eq!(init["domOverlay"]["root"], json!("body"));
    }
}
