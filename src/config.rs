//! Export configuration.
//!
//! [`ExportConfig`] describes a single export run: the output directory,
//! the canvas size, which design to draw, the two output file names and
//! rasterization options. Every field has a default, so a
//! partial JSON document (or `{}`) is a valid configuration.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "outDir": "assets/icon",
//!   "size": 1024,
//!   "design": "lightning-bolt",
//!   "iconFile": "app_icon.png",
//!   "foregroundFile": "app_icon_foreground.png",
//!   "antiAlias": false
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::composition::Variant;
use crate::compositor::RenderOptions;
use crate::designs::{Design, DEFAULT_SIZE, MAX_SIZE};
use crate::error::{ComposeError, Result};

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

fn default_icon_file() -> String {
    "app_icon.png".to_string()
}

fn default_foreground_file() -> String {
    "app_icon_foreground.png".to_string()
}

/// Where and how icons are exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Directory the PNG files are written to. Created if missing.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Canvas size in pixels for built-in designs.
    #[serde(default = "default_size")]
    pub size: u32,

    /// Built-in design to render.
    #[serde(default)]
    pub design: Design,

    /// File name of the opaque icon.
    #[serde(default = "default_icon_file")]
    pub icon_file: String,

    /// File name of the transparent foreground icon.
    #[serde(default = "default_foreground_file")]
    pub foreground_file: String,

    /// Smooth shape edges.
    #[serde(default)]
    pub anti_alias: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            size: default_size(),
            design: Design::default(),
            icon_file: default_icon_file(),
            foreground_file: default_foreground_file(),
            anti_alias: false,
        }
    }
}

impl ExportConfig {
    /// Output path for `variant`.
    pub fn path_for(&self, variant: Variant) -> PathBuf {
        match variant {
            Variant::Full => self.out_dir.join(&self.icon_file),
            Variant::Foreground => self.out_dir.join(&self.foreground_file),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            anti_alias: self.anti_alias,
        }
    }

    /// Rejects an out-of-range size and empty or clashing file names.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(ComposeError::config(format!(
                "canvas size must be between 1 and {MAX_SIZE}, got {}",
                self.size
            )));
        }
        if self.icon_file.is_empty() || self.foreground_file.is_empty() {
            return Err(ComposeError::config("output file names must not be empty"));
        }
        if self.icon_file == self.foreground_file {
            return Err(ComposeError::config(format!(
                "icon and foreground both write to {:?}",
                self.icon_file
            )));
        }
        Ok(())
    }

    /// Serializes the configuration to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ComposeError::io(path, e))?;
        Self::from_json(&json)
    }
}

// ============================================================================
// Tests
// ============================================================================
