//! Per-role text styles

use crate::font::{FontHandle, FontResolver};
use crate::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// RGB color, three 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Current style for one text role
#[derive(Debug, Clone, PartialEq)]
pub struct StyleEntry {
    /// Point size
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font file name, resolved through [`FontResolver`]
    pub font_name: String,
}

/// Partial style update: only supplied fields overwrite the current entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleUpdate {
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub font_name: Option<String>,
}

/// Holds size, color and font per role, plus the resolved font handles
///
/// Mutable at any time between renders; a change affects all subsequent
/// draws for that role and never output already written. Setting a style
/// re-resolves the role's font handle immediately so the next draw picks
/// up the new face and size.
#[derive(Debug)]
pub struct StyleRegistry {
    resolver: FontResolver,
    entries: HashMap<Role, StyleEntry>,
    fonts: HashMap<Role, FontHandle>,
}

impl StyleRegistry {
    /// Registry with the original generator's defaults, fonts resolved eagerly
    pub fn new(resolver: FontResolver) -> Self {
        let entries: HashMap<Role, StyleEntry> = [
            (
                Role::Name,
                StyleEntry {
                    size: 95.0,
                    color: Color::new(10, 98, 126),
                    font_name: "MeaCulpa-Regular.ttf".to_string(),
                },
            ),
            (
                Role::Identifier,
                StyleEntry {
                    size: 24.0,
                    color: Color::new(150, 150, 150),
                    font_name: "Poppins-Regular.ttf".to_string(),
                },
            ),
            (
                Role::ModuleText,
                StyleEntry {
                    size: 18.0,
                    color: Color::new(64, 64, 64),
                    font_name: "Poppins-Regular.ttf".to_string(),
                },
            ),
            (
                Role::TotalHours,
                StyleEntry {
                    size: 18.0,
                    color: Color::black(),
                    font_name: "Poppins-Regular.ttf".to_string(),
                },
            ),
            (
                Role::Average,
                StyleEntry {
                    size: 18.0,
                    color: Color::black(),
                    font_name: "Poppins-Regular.ttf".to_string(),
                },
            ),
        ]
        .into_iter()
        .collect();

        let fonts = entries
            .iter()
            .map(|(role, entry)| (*role, resolver.resolve(&entry.font_name, entry.size)))
            .collect();

        Self {
            resolver,
            entries,
            fonts,
        }
    }

    /// Merge a partial update into a role's style and re-resolve its font
    pub fn set(&mut self, role: Role, update: StyleUpdate) {
        let entry = self
            .entries
            .get_mut(&role)
            .expect("every role has a default entry");

        if let Some(size) = update.size {
            entry.size = size;
        }
        if let Some(color) = update.color {
            entry.color = color;
        }
        if let Some(font_name) = update.font_name {
            entry.font_name = font_name;
        }

        let handle = self.resolver.resolve(&entry.font_name, entry.size);
        self.fonts.insert(role, handle);
    }

    /// Current style for a role
    pub fn get(&self, role: Role) -> &StyleEntry {
        &self.entries[&role]
    }

    /// Resolved font handle for a role
    pub fn font(&self, role: Role) -> &FontHandle {
        &self.fonts[&role]
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new(FontResolver::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_entries() {
        let registry = StyleRegistry::default();
        assert_eq!(registry.get(Role::Name).size, 95.0);
        assert_eq!(registry.get(Role::Name).color, Color::new(10, 98, 126));
        assert_eq!(registry.get(Role::Identifier).size, 24.0);
        assert_eq!(registry.get(Role::TotalHours).color, Color::black());
        assert_eq!(registry.get(Role::Average).font_name, "Poppins-Regular.ttf");
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut registry = StyleRegistry::default();
        registry.set(
            Role::Name,
            StyleUpdate {
                size: Some(72.0),
                ..Default::default()
            },
        );

        let entry = registry.get(Role::Name);
        assert_eq!(entry.size, 72.0);
        // Color and font untouched
        assert_eq!(entry.color, Color::new(10, 98, 126));
        assert_eq!(entry.font_name, "MeaCulpa-Regular.ttf");
    }

    #[test]
    fn test_update_does_not_affect_other_roles() {
        let mut registry = StyleRegistry::default();
        registry.set(
            Role::ModuleText,
            StyleUpdate {
                color: Some(Color::new(255, 0, 0)),
                ..Default::default()
            },
        );
        assert_eq!(registry.get(Role::ModuleText).color, Color::new(255, 0, 0));
        assert_eq!(registry.get(Role::TotalHours).color, Color::black());
    }

    #[test]
    fn test_set_reresolves_font_handle() {
        let mut registry = StyleRegistry::default();
        registry.set(
            Role::Identifier,
            StyleUpdate {
                size: Some(40.0),
                ..Default::default()
            },
        );
        assert_eq!(registry.font(Role::Identifier).size(), 40.0);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut registry = StyleRegistry::default();
        let before = registry.get(Role::Average).clone();
        registry.set(Role::Average, StyleUpdate::default());
        assert_eq!(*registry.get(Role::Average), before);
    }

    #[test]
    fn test_style_update_deserializes_partial_json() {
        let update: StyleUpdate =
            serde_json::from_str(r#"{ "size": 30.0, "color": { "r": 1, "g": 2, "b": 3 } }"#)
                .unwrap();
        assert_eq!(update.size, Some(30.0));
        assert_eq!(update.color, Some(Color::new(1, 2, 3)));
        assert_eq!(update.font_name, None);
    }
}
