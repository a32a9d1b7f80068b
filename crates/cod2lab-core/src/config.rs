//! Conversion settings. Every field has a default, so a config file only
//! needs to name what it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::loader::{DataLoadError, deserialize_file};

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Key of the `version` object in the output.
    pub source_name: String,
    pub layout: IconLayoutConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source_name: "Captain of Industry".to_string(),
            layout: IconLayoutConfig::default(),
        }
    }
}

/// Sprite sheet geometry, in pixels.
///
/// Icon `n` (in id order) sits at offset `n * pitch`, wrapped into rows of
/// `sheet_width` pixels that are `row_height` pixels apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconLayoutConfig {
    pub sheet_width: u32,
    pub pitch: u32,
    pub row_height: u32,
    /// Placeholder color written for every icon.
    pub color: String,
}

impl Default for IconLayoutConfig {
    fn default() -> Self {
        Self {
            sheet_width: 1216,
            pitch: 40,
            row_height: 64,
            color: "#000000".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Load a config file (RON, TOML or JSON, by extension).
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let config: Self = deserialize_file(path)?;
        if config.layout.sheet_width == 0 {
            return Err(DataLoadError::Parse {
                file: path.to_path_buf(),
                detail: "layout.sheet_width must be greater than zero".to_string(),
            });
        }
        Ok(config)
    }
}
