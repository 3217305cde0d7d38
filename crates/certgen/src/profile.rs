//! JSON render profiles
//!
//! A profile is a partial document: any field can be omitted and the
//! engine keeps its defaults for it. Applied once, before the run.

use crate::Result;
use overlay::{BackCoordsUpdate, FrontCoordsUpdate, OverlayEngine, Role, StyleUpdate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-role style overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    pub name: Option<StyleUpdate>,
    pub identifier: Option<StyleUpdate>,
    pub module_text: Option<StyleUpdate>,
    pub total_hours: Option<StyleUpdate>,
    pub average: Option<StyleUpdate>,
}

/// Style and coordinate overrides for one batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderProfile {
    pub styles: StyleOverrides,
    pub front_coordinates: Option<FrontCoordsUpdate>,
    pub back_coordinates: Option<BackCoordsUpdate>,
}

impl RenderProfile {
    /// Parse a profile from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Merge every supplied override into the engine
    pub fn apply(&self, engine: &mut OverlayEngine) {
        let per_role = [
            (Role::Name, &self.styles.name),
            (Role::Identifier, &self.styles.identifier),
            (Role::ModuleText, &self.styles.module_text),
            (Role::TotalHours, &self.styles.total_hours),
            (Role::Average, &self.styles.average),
        ];
        for (role, update) in per_role {
            if let Some(update) = update {
                engine.set_style(role, update.clone());
            }
        }

        if let Some(update) = self.front_coordinates {
            engine.set_front_coordinates(update);
        }
        if let Some(update) = self.back_coordinates {
            engine.set_back_coordinates(update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_profile_is_noop() {
        let mut engine = OverlayEngine::new();
        RenderProfile::default().apply(&mut engine);
        assert_eq!(engine.styles().get(Role::Name).size, 95.0);
        assert_eq!(engine.back_coords().module_base_x, 870);
    }

    #[test]
    fn test_partial_profile_json() {
        let profile: RenderProfile = serde_json::from_str(
            r#"{
                "styles": { "name": { "size": 72.0 } },
                "back_coordinates": { "row_step_y": 100 }
            }"#,
        )
        .unwrap();

        let mut engine = OverlayEngine::new();
        profile.apply(&mut engine);

        let name = engine.styles().get(Role::Name);
        assert_eq!(name.size, 72.0);
        // Untouched fields keep their defaults
        assert_eq!(name.color, Color::new(10, 98, 126));
        assert_eq!(engine.back_coords().row_step_y, 100);
        assert_eq!(engine.back_coords().module_base_x, 870);
        assert_eq!(engine.front_coords().name_x, None);
    }

    #[test]
    fn test_full_profile_round_trip() {
        let profile = RenderProfile {
            styles: StyleOverrides {
                average: Some(StyleUpdate {
                    size: Some(22.0),
                    color: Some(Color::new(0, 0, 128)),
                    font_name: Some("DejaVuSans.ttf".to_string()),
                }),
                ..Default::default()
            },
            front_coordinates: Some(FrontCoordsUpdate {
                name_y: Some(400),
                ..Default::default()
            }),
            back_coordinates: None,
        };

        let json = serde_json::to_string(&profile).unwrap();
        let parsed: RenderProfile = serde_json::from_str(&json).unwrap();

        let mut engine = OverlayEngine::new();
        parsed.apply(&mut engine);
        assert_eq!(engine.styles().get(Role::Average).size, 22.0);
        assert_eq!(engine.front_coords().name_y, Some(400));
    }

    #[test]
    fn test_profile_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{ "styles": { "identifier": { "size": 30.0 } } }"#).unwrap();

        let profile = RenderProfile::from_path(&path).unwrap();
        let mut engine = OverlayEngine::new();
        profile.apply(&mut engine);
        assert_eq!(engine.styles().get(Role::Identifier).size, 30.0);
    }

    #[test]
    fn test_profile_rejects_malformed_json() {
        let result: std::result::Result<RenderProfile, _> = serde_json::from_str("{ nope");
        assert!(result.is_err());
    }
}
