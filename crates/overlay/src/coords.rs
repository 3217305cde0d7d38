//! Per-anchor coordinates for front and back templates

use serde::{Deserialize, Serialize};

/// Anchors on the front template
///
/// `None` means "derive from the template's own dimensions at draw time":
/// x centers on the template, y is a fixed offset from the vertical
/// midpoint. Two templates of different sizes each center on their own
/// geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontCoords {
    pub name_x: Option<i64>,
    pub name_y: Option<i64>,
    pub id_x: Option<i64>,
    pub id_y: Option<i64>,
}

/// Vertical offset of the name anchor from the template midpoint
const NAME_Y_OFFSET: i64 = 295;
/// Vertical offset of the identifier anchor from the template midpoint
const ID_Y_OFFSET: i64 = 150;

impl FrontCoords {
    /// Resolve the name anchor against a template's dimensions
    pub fn name_anchor(&self, width: u32, height: u32) -> (i64, i64) {
        (
            self.name_x.unwrap_or(width as i64 / 2),
            self.name_y.unwrap_or(height as i64 / 2 - NAME_Y_OFFSET),
        )
    }

    /// Resolve the identifier anchor against a template's dimensions
    pub fn id_anchor(&self, width: u32, height: u32) -> (i64, i64) {
        (
            self.id_x.unwrap_or(width as i64 / 2),
            self.id_y.unwrap_or(height as i64 / 2 - ID_Y_OFFSET),
        )
    }

    /// Merge a partial update; unsupplied fields keep prior values
    pub fn apply(&mut self, update: FrontCoordsUpdate) {
        if let Some(v) = update.name_x {
            self.name_x = Some(v);
        }
        if let Some(v) = update.name_y {
            self.name_y = Some(v);
        }
        if let Some(v) = update.id_x {
            self.id_x = Some(v);
        }
        if let Some(v) = update.id_y {
            self.id_y = Some(v);
        }
    }
}

/// Partial update for [`FrontCoords`]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FrontCoordsUpdate {
    #[serde(default)]
    pub name_x: Option<i64>,
    #[serde(default)]
    pub name_y: Option<i64>,
    #[serde(default)]
    pub id_x: Option<i64>,
    #[serde(default)]
    pub id_y: Option<i64>,
}

/// Anchors on the back template
///
/// All coordinates have concrete defaults; module rows are laid out by
/// stepping `row_step_y` down from the two base anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackCoords {
    pub module_base_x: i64,
    pub module_base_y: i64,
    pub score_base_x: i64,
    pub score_base_y: i64,
    pub row_step_y: i64,
    pub total_x: i64,
    pub total_y: i64,
    pub average_x: i64,
    pub average_y: i64,
}

impl Default for BackCoords {
    fn default() -> Self {
        Self {
            module_base_x: 870,
            module_base_y: 450,
            score_base_x: 1100,
            score_base_y: 450,
            row_step_y: 120,
            total_x: 870,
            total_y: 930,
            average_x: 1030,
            average_y: 930,
        }
    }
}

impl BackCoords {
    /// Hour-label anchor for a module row (0-based index)
    pub fn module_anchor(&self, row: usize) -> (i64, i64) {
        (
            self.module_base_x,
            self.module_base_y + self.row_step_y * row as i64,
        )
    }

    /// Score anchor for a module row (0-based index)
    pub fn score_anchor(&self, row: usize) -> (i64, i64) {
        (
            self.score_base_x,
            self.score_base_y + self.row_step_y * row as i64,
        )
    }

    /// Merge a partial update; unsupplied fields keep prior values
    pub fn apply(&mut self, update: BackCoordsUpdate) {
        if let Some(v) = update.module_base_x {
            self.module_base_x = v;
        }
        if let Some(v) = update.module_base_y {
            self.module_base_y = v;
        }
        if let Some(v) = update.score_base_x {
            self.score_base_x = v;
        }
        if let Some(v) = update.score_base_y {
            self.score_base_y = v;
        }
        if let Some(v) = update.row_step_y {
            self.row_step_y = v;
        }
        if let Some(v) = update.total_x {
            self.total_x = v;
        }
        if let Some(v) = update.total_y {
            self.total_y = v;
        }
        if let Some(v) = update.average_x {
            self.average_x = v;
        }
        if let Some(v) = update.average_y {
            self.average_y = v;
        }
    }
}

/// Partial update for [`BackCoords`]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BackCoordsUpdate {
    #[serde(default)]
    pub module_base_x: Option<i64>,
    #[serde(default)]
    pub module_base_y: Option<i64>,
    #[serde(default)]
    pub score_base_x: Option<i64>,
    #[serde(default)]
    pub score_base_y: Option<i64>,
    #[serde(default)]
    pub row_step_y: Option<i64>,
    #[serde(default)]
    pub total_x: Option<i64>,
    #[serde(default)]
    pub total_y: Option<i64>,
    #[serde(default)]
    pub average_x: Option<i64>,
    #[serde(default)]
    pub average_y: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_front_anchors_derive_from_geometry() {
        let coords = FrontCoords::default();
        assert_eq!(coords.name_anchor(2000, 1400), (1000, 700 - 295));
        assert_eq!(coords.id_anchor(2000, 1400), (1000, 700 - 150));
    }

    #[test]
    fn test_front_anchors_independent_per_template() {
        // Two templates of different sizes both center on their own geometry
        let coords = FrontCoords::default();
        assert_eq!(coords.name_anchor(800, 1200).0, 400);
        assert_eq!(coords.name_anchor(3000, 900).0, 1500);
    }

    #[test]
    fn test_front_explicit_coordinate_wins() {
        let mut coords = FrontCoords::default();
        coords.apply(FrontCoordsUpdate {
            name_x: Some(333),
            ..Default::default()
        });
        assert_eq!(coords.name_anchor(2000, 1400), (333, 700 - 295));
        // Identifier still derived
        assert_eq!(coords.id_anchor(2000, 1400).0, 1000);
    }

    #[test]
    fn test_back_defaults() {
        let coords = BackCoords::default();
        assert_eq!(coords.module_anchor(0), (870, 450));
        assert_eq!(coords.score_anchor(0), (1100, 450));
        assert_eq!((coords.total_x, coords.total_y), (870, 930));
        assert_eq!((coords.average_x, coords.average_y), (1030, 930));
    }

    #[test]
    fn test_back_row_step() {
        let coords = BackCoords::default();
        assert_eq!(coords.module_anchor(3), (870, 450 + 120 * 3));
        assert_eq!(coords.score_anchor(2), (1100, 450 + 120 * 2));
    }

    #[test]
    fn test_back_partial_update() {
        let mut coords = BackCoords::default();
        coords.apply(BackCoordsUpdate {
            row_step_y: Some(100),
            total_y: Some(1000),
            ..Default::default()
        });
        assert_eq!(coords.row_step_y, 100);
        assert_eq!(coords.total_y, 1000);
        // Unsupplied fields keep prior values
        assert_eq!(coords.module_base_x, 870);
        assert_eq!(coords.average_x, 1030);
    }

    #[test]
    fn test_update_deserializes_partial_json() {
        let update: BackCoordsUpdate =
            serde_json::from_str(r#"{ "module_base_x": 900 }"#).unwrap();
        assert_eq!(update.module_base_x, Some(900));
        assert_eq!(update.row_step_y, None);
    }
}
