//! Mapper configuration: palette, viewport policy, accepted columns and messages.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GeofenceError, Result};
use crate::input::ParserConfig;

/// Geometry headers every configuration must accept.
pub const LEGACY_GEOMETRY_COLUMNS: &[&str] = &["polygon", "geometry", "wkt", "wktshape"];

/// Layer color used when no palette is configured (Leaflet's default path color).
pub const FALLBACK_COLOR: &str = "#3388ff";

/// Top-level configuration for a mapping session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Layer colors, cycled by geofence position.
    pub palette: Vec<String>,
    /// Fractional padding applied to a fitted bounding box on every side.
    pub bounds_padding: f64,
    /// Stroke and fill for every geofence layer.
    pub style: LayerStyle,
    /// Camera options for flying to a single geofence.
    pub fly_to: FlyToOptions,
    /// Initial map view.
    pub map: MapView,
    /// Accepted column names.
    pub columns: ColumnConfig,
    /// User-visible strings.
    pub messages: Messages,
    /// Tabular reader settings.
    #[serde(skip)]
    pub parser: ParserConfig,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            palette: [
                "#ef4444", // red
                "#3b82f6", // blue
                "#10b981", // green
                "#f59e0b", // amber
                "#8b5cf6", // violet
                "#ec4899", // pink
                "#14b8a6", // teal
                "#f97316", // orange
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            bounds_padding: 0.1,
            style: LayerStyle::default(),
            fly_to: FlyToOptions::default(),
            map: MapView::default(),
            columns: ColumnConfig::default(),
            messages: Messages::default(),
            parser: ParserConfig::default(),
        }
    }
}

impl MapperConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| GeofenceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: MapperConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the controller relies on.
    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(GeofenceError::Config("palette must not be empty".to_string()));
        }
        if !self.bounds_padding.is_finite() || self.bounds_padding < 0.0 {
            return Err(GeofenceError::Config(format!(
                "bounds_padding must be a non-negative number, got {}",
                self.bounds_padding
            )));
        }
        for required in LEGACY_GEOMETRY_COLUMNS {
            let present = self
                .columns
                .geometry
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(required));
            if !present {
                return Err(GeofenceError::Config(format!(
                    "geometry columns must include '{}'",
                    required
                )));
            }
        }
        Ok(())
    }

    /// Color for a palette slot. An empty palette yields [`FALLBACK_COLOR`].
    pub fn color(&self, color_index: usize) -> &str {
        if self.palette.is_empty() {
            return FALLBACK_COLOR;
        }
        &self.palette[color_index % self.palette.len()]
    }
}

/// Visual style of a geofence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStyle {
    pub stroke_weight: u32,
    pub fill_opacity: f64,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            stroke_weight: 2,
            fill_opacity: 0.2,
        }
    }
}

/// Camera animation for the single-geofence "fly to".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyToOptions {
    /// Pixel padding around the target bounds.
    pub padding_px: u32,
    pub max_zoom: u8,
    pub duration_secs: f64,
}

impl Default for FlyToOptions {
    fn default() -> Self {
        Self {
            padding_px: 40,
            max_zoom: 15,
            duration_secs: 1.2,
        }
    }
}

/// Initial map view (Abu Dhabi).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapView {
    /// (latitude, longitude)
    pub center: (f64, f64),
    pub zoom: u8,
    pub max_zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: (24.4539, 54.3773),
            zoom: 11,
            max_zoom: 19,
        }
    }
}

/// Ordered candidate header names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub name: Vec<String>,
    /// Tried in order; earlier entries take precedence.
    pub geometry: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            name: vec!["name".to_string()],
            geometry: LEGACY_GEOMETRY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Strings shown on the error surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub no_file: String,
    pub no_data: String,
    /// Followed by the accepted header names.
    pub missing_columns: String,
    pub no_valid_geofences: String,
    /// Followed by the decoder's message.
    pub read_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            no_file: "No file chosen".to_string(),
            no_data: "No data found in the spreadsheet".to_string(),
            missing_columns: "Spreadsheet must contain a geometry column: ".to_string(),
            no_valid_geofences: "No valid geofences found in the spreadsheet".to_string(),
            read_error: "Error reading spreadsheet: ".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = MapperConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.palette.len(), 8);
        assert_eq!(config.bounds_padding, 0.1);
    }

    #[test]
    fn test_color_cycles() {
        let config = MapperConfig::default();
        assert_eq!(config.color(0), "#ef4444");
        assert_eq!(config.color(8), "#ef4444");
        assert_eq!(config.color(9), "#3b82f6");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let config = MapperConfig {
            palette: Vec::new(),
            ..MapperConfig::default()
        };
        assert_eq!(config.color(0), FALLBACK_COLOR);
        assert_eq!(config.color(5), FALLBACK_COLOR);
    }

    #[test]
    fn test_rejects_missing_legacy_column() {
        let mut config = MapperConfig::default();
        config.columns.geometry = vec!["wkt".to_string()];
        assert!(matches!(config.validate(), Err(GeofenceError::Config(_))));
    }

    #[test]
    fn test_rejects_negative_padding() {
        let config = MapperConfig {
            bounds_padding: -0.5,
            ..MapperConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"bounds_padding": 0.25, "fly_to": {"max_zoom": 12}}"#)
            .unwrap();

        let config = MapperConfig::load(file.path()).unwrap();
        assert_eq!(config.bounds_padding, 0.25);
        assert_eq!(config.fly_to.max_zoom, 12);
        assert_eq!(config.fly_to.padding_px, 40);
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn test_load_rejects_empty_palette() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"palette": []}"#).unwrap();
        assert!(MapperConfig::load(file.path()).is_err());
    }
}
