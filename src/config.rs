//! Engine configuration
//!
//! Loaded from JSON (what the JS host hands over) or from a YAML file.
//! Every field has a default, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SetlistError};
use crate::transposition::DEFAULT_NO_CHORD_MARKERS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Measured monospace character width, for chord drags
    pub char_width_px: f64,

    /// Lyric rows per slide in text export
    pub lines_per_slide: usize,

    /// Symbols that mean "no chord" and never transpose
    pub no_chord_markers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            char_width_px: 8.0,
            lines_per_slide: 2,
            no_chord_markers: DEFAULT_NO_CHORD_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| SetlistError::InvalidConfig(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)
            .map_err(|e| SetlistError::InvalidConfig(format!("Failed to parse config YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` is read as JSON, anything else as YAML
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SetlistError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.char_width_px.is_finite() || self.char_width_px <= 0.0 {
            return Err(SetlistError::InvalidConfig(format!(
                "charWidthPx must be a positive number, got {}",
                self.char_width_px
            )));
        }
        if self.lines_per_slide == 0 {
            return Err(SetlistError::InvalidConfig(
                "linesPerSlide must be at least 1".to_string(),
            ));
        }
        if self.no_chord_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(SetlistError::InvalidConfig(
                "noChordMarkers cannot contain empty symbols".to_string(),
            ));
        }
        Ok(())
    }
}
