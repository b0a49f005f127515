#![forbid(unsafe_code)]

//! Engine tuning as data.
//!
//! [`EngineConfig::default()`] reproduces the built-in constants exactly, so
//! hosts only need a config when they want different grips, sampling, or
//! timing.
//!
//! # Loading
//!
//! ```toml
//! # framedrag.toml
//! edge_buffer = 8.0
//! hover_window_ms = 30
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_file("framedrag.toml")?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::anchor::PROBE_EXTENT;
use crate::direction::EDGE_BUFFER;
use crate::overlay::{MIN_OVERLAY_GRID_PITCH, OVERLAY_GRID_PITCH};
use crate::resize::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};

/// Tunable parameters for the engine and binding layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct EngineConfig {
    /// Half-width of each resize grip zone.
    pub edge_buffer: f64,
    /// Spacing of the overlay discovery grid.
    pub overlay_grid_pitch: f64,
    /// Coalescing window for resize hover classification.
    pub hover_window_ms: u64,
    /// Coalescing window for drag moves.
    pub move_window_ms: u64,
    /// Extent forced on an element while probing its anchor mode.
    pub probe_extent: f64,
    /// Minimum width when none is declared.
    pub min_width_fallback: f64,
    /// Minimum height when none is declared.
    pub min_height_fallback: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            edge_buffer: EDGE_BUFFER,
            overlay_grid_pitch: OVERLAY_GRID_PITCH,
            hover_window_ms: 50,
            move_window_ms: 0,
            probe_extent: PROBE_EXTENT,
            min_width_fallback: DEFAULT_MIN_WIDTH,
            min_height_fallback: DEFAULT_MIN_HEIGHT,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn hover_window(&self) -> Duration {
        Duration::from_millis(self.hover_window_ms)
    }

    #[must_use]
    pub fn move_window(&self) -> Duration {
        Duration::from_millis(self.move_window_ms)
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(s)
            .map_err(ConfigError::Toml)?
            .validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(s)
            .map_err(ConfigError::Json)?
            .validated()
    }

    /// Check that every parameter is usable.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut positive = |name: &str, v: f64| {
            if !(v.is_finite() && v > 0.0) {
                errors.push(format!("{name} must be a positive number, got {v}"));
            }
        };
        positive("edge_buffer", self.edge_buffer);
        positive("overlay_grid_pitch", self.overlay_grid_pitch);
        positive("probe_extent", self.probe_extent);
        positive("min_width_fallback", self.min_width_fallback);
        positive("min_height_fallback", self.min_height_fallback);
        let pitch = self.overlay_grid_pitch;
        if pitch.is_finite() && pitch > 0.0 && pitch < MIN_OVERLAY_GRID_PITCH {
            errors.push(format!(
                "overlay_grid_pitch must be at least {MIN_OVERLAY_GRID_PITCH}, got {pitch}"
            ));
        }
        errors
    }

    /// `self` if valid, otherwise [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors from loading an [`EngineConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "framedrag config I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "framedrag config TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "framedrag config JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "invalid framedrag config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_builtin_constants() {
        let c = EngineConfig::default();
        assert_eq!(c.edge_buffer, 5.0);
        assert_eq!(c.overlay_grid_pitch, 50.0);
        assert_eq!(c.hover_window(), Duration::from_millis(50));
        assert_eq!(c.move_window(), Duration::ZERO);
        assert_eq!(c.probe_extent, 1.0);
        assert_eq!((c.min_width_fallback, c.min_height_fallback), (34.0, 20.0));
        assert!(c.validate().is_empty());
    }

    #[test]
    fn validation_collects_every_problem() {
        let c = EngineConfig {
            edge_buffer: 0.0,
            overlay_grid_pitch: f64::NAN,
            ..EngineConfig::default()
        };
        let errors = c.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("edge_buffer"));

        let err = EngineConfig {
            probe_extent: -1.0,
            ..EngineConfig::default()
        }
        .validated()
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid framedrag config:"));
    }

    #[test]
    fn sub_pixel_grid_pitch_is_rejected() {
        let errors = EngineConfig {
            overlay_grid_pitch: 1e-9,
            ..EngineConfig::default()
        }
        .validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at least"));
    }

    #[test]
    fn io_error_names_the_config() {
        let err = ConfigError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "framedrag config I/O error: gone");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_overrides_only_named_fields() {
        let c = EngineConfig::from_toml_str("edge_buffer = 8.0\nhover_window_ms = 30\n")
            .expect("valid toml");
        assert_eq!(c.edge_buffer, 8.0);
        assert_eq!(c.hover_window_ms, 30);
        assert_eq!(c.overlay_grid_pitch, 50.0);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_validation_failure_is_reported() {
        let err = EngineConfig::from_json_str(r#"{"overlay_grid_pitch": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("edge_buffer = [").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
