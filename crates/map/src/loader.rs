//! Optional JSON override for the floorplan.
//!
//! The viewer ships with a built-in plan; `config/floorplan.json` can replace
//! it. The lenient loader falls back to the sample plan on any error, the
//! strict variant surfaces errors for tests and validation.

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

use crate::{DestMarker, Floorplan, RoomLabel, Route, Wall};

/// Serialized floorplan definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorplanDef {
    /// Side length of the square floor.
    pub extent: f32,
    /// Wall boxes as `{ center, size }` triples.
    pub walls: Vec<WallDef>,
    /// Room labels as `{ name, position }`.
    pub labels: Vec<LabelDef>,
    /// Route control points.
    pub route: Vec<[f32; 3]>,
    /// Destination marker base position.
    pub marker: [f32; 3],
}

/// Serialized wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallDef {
    /// Box center.
    pub center: [f32; 3],
    /// Full box extents.
    pub size: [f32; 3],
}

/// Serialized room label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelDef {
    /// Display text.
    pub name: String,
    /// Anchor position.
    pub position: [f32; 3],
}

impl TryFrom<FloorplanDef> for Floorplan {
    type Error = crate::FloorplanError;

    fn try_from(def: FloorplanDef) -> Result<Self, Self::Error> {
        let plan = Floorplan {
            extent: def.extent,
            walls: def
                .walls
                .into_iter()
                .map(|w| Wall {
                    center: Vec3::from_array(w.center),
                    size: Vec3::from_array(w.size),
                })
                .collect(),
            labels: def
                .labels
                .into_iter()
                .map(|l| RoomLabel {
                    name: l.name,
                    position: Vec3::from_array(l.position),
                })
                .collect(),
            route: Route::new(def.route.into_iter().map(Vec3::from_array).collect()),
            marker: DestMarker {
                position: Vec3::from_array(def.marker),
            },
        };
        plan.validate()?;
        Ok(plan)
    }
}

/// Load a floorplan from `path`, falling back to the built-in plan on any
/// error. A missing file is the normal case and logs at debug only.
pub fn load_floorplan(path: &Path) -> Floorplan {
    match load_floorplan_strict(path) {
        Ok(plan) => plan,
        Err(err) => {
            if path.exists() {
                warn!("Failed to load floorplan {}: {err:#}. Using built-in plan", path.display());
            } else {
                tracing::debug!("No floorplan override at {}. Using built-in plan", path.display());
            }
            Floorplan::sample()
        }
    }
}

/// Load a floorplan from `path`, returning errors to the caller.
pub fn load_floorplan_strict(path: &Path) -> Result<Floorplan> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read floorplan {}", path.display()))?;
    let def: FloorplanDef = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse floorplan {}", path.display()))?;
    Floorplan::try_from(def)
        .with_context(|| format!("invalid floorplan {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("voxelnav_{name}_{timestamp}.json"))
    }

    #[test]
    fn valid_override_replaces_the_sample_plan() {
        let path = temp_path("plan_ok");
        fs::write(
            &path,
            r#"{
                "extent": 10.0,
                "walls": [{"center": [0.0, 1.0, 4.0], "size": [8.0, 2.0, 0.2]}],
                "labels": [{"name": "Atrium", "position": [0.0, 0.1, 0.0]}],
                "route": [[-4.0, 0.0, 0.0], [4.0, 0.0, 0.0]],
                "marker": [4.0, 0.0, 0.0]
            }"#,
        )
        .expect("write plan");

        let plan = load_floorplan_strict(&path).expect("plan loads");
        assert_eq!(plan.extent, 10.0);
        assert_eq!(plan.walls.len(), 1);
        assert_eq!(plan.labels[0].name, "Atrium");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn invalid_override_falls_back_to_sample() {
        let path = temp_path("plan_bad");
        fs::write(&path, "{ not json").expect("write plan");
        let plan = load_floorplan(&path);
        assert_eq!(plan.labels.len(), Floorplan::sample().labels.len());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn strict_loader_rejects_out_of_bounds_plans() {
        let path = temp_path("plan_oob");
        fs::write(
            &path,
            r#"{
                "extent": 10.0,
                "walls": [],
                "labels": [{"name": "Far", "position": [50.0, 0.1, 0.0]}],
                "route": [[-4.0, 0.0, 0.0], [4.0, 0.0, 0.0]],
                "marker": [4.0, 0.0, 0.0]
            }"#,
        )
        .expect("write plan");
        assert!(load_floorplan_strict(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_uses_sample() {
        let plan = load_floorplan(Path::new("/nonexistent/floorplan.json"));
        assert_eq!(plan.extent, 20.0);
    }
}
