use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_VIEWER_PATH: &str = "config/viewer.toml";

/// Default floorplan override path. When absent the built-in sample plan is
/// used.
pub const DEFAULT_FLOORPLAN_PATH: &str = "config/floorplan.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Radians of orbit per pixel of mouse drag.
    pub orbit_sensitivity: f32,
    /// Zoom steps per scroll line.
    pub zoom_sensitivity: f32,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub vsync: bool,
    /// Show the frame-stats overlay on startup.
    pub show_fps: bool,
    /// Milliseconds between automatic step advances.
    pub step_interval_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            // ~0.29° of orbit per pixel of drag.
            orbit_sensitivity: 0.005,
            zoom_sensitivity: 1.0,
            fov_degrees: 60.0,
            vsync: true,
            show_fps: false,
            step_interval_ms: 5000,
        }
    }
}

impl ViewerConfig {
    /// Load viewer configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_VIEWER_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ViewerConfig>(&contents) {
                Ok(cfg) => cfg.sanitized(),
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ViewerConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_VIEWER_PATH) {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Viewer config not found at {}. Using defaults",
                        path.display()
                    );
                }
                ViewerConfig::default()
            }
        }
    }

    /// Save viewer configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to_path(Path::new(DEFAULT_VIEWER_PATH))
    }

    /// Save viewer configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Clamp loaded values into usable ranges. A zero step interval would
    /// advance the whole route in a single frame.
    fn sanitized(mut self) -> Self {
        self.orbit_sensitivity = self.orbit_sensitivity.clamp(0.0005, 0.05);
        self.zoom_sensitivity = self.zoom_sensitivity.clamp(0.1, 10.0);
        self.fov_degrees = self.fov_degrees.clamp(20.0, 120.0);
        self.step_interval_ms = self.step_interval_ms.max(100);
        self
    }
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
        std::env::temp_dir().join(format!("voxelnav_{name}_{timestamp}.toml"))
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let cfg = ViewerConfig::load_from_path(Path::new("/nonexistent/viewer.toml"));
        assert_eq!(cfg.step_interval_ms, 5000);
        assert!(cfg.vsync);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let path = temp_path("malformed");
        fs::write(&path, "step_interval_ms = \"soon\"").unwrap();
        let cfg = ViewerConfig::load_from_path(&path);
        assert_eq!(cfg.step_interval_ms, 5000);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn config_round_trips_through_disk() {
        let path = temp_path("roundtrip");
        let mut cfg = ViewerConfig::default();
        cfg.show_fps = true;
        cfg.step_interval_ms = 1200;
        cfg.save_to_path(&path).unwrap();
        let loaded = ViewerConfig::load_from_path(&path);
        assert!(loaded.show_fps);
        assert_eq!(loaded.step_interval_ms, 1200);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let path = temp_path("clamped");
        fs::write(&path, "step_interval_ms = 0\nfov_degrees = 500.0").unwrap();
        let cfg = ViewerConfig::load_from_path(&path);
        assert_eq!(cfg.step_interval_ms, 100);
        assert_eq!(cfg.fov_degrees, 120.0);
        let _ = fs::remove_file(&path);
    }
}
