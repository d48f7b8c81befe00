//! Editor configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::autosave::AutosaveConfig;
use crate::error::{EditorError, Result};

/// Static editor settings. Every field has a default, so partial
/// configurations deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Hint shown by the text surface while it is empty.
    pub placeholder_hint: SmolStr,
    /// CSS height of the editor when not fullscreen.
    pub display_height: SmolStr,
    pub read_only: bool,
    pub autosave_enabled: bool,
    pub autosave_interval_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder_hint: SmolStr::new_static("Start writing your note..."),
            display_height: SmolStr::new_static("400px"),
            read_only: false,
            autosave_enabled: true,
            autosave_interval_ms: 30_000,
        }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.autosave_interval_ms == 0 {
            return Err(EditorError::InvalidConfig(
                "autosave_interval_ms must be greater than zero".into(),
            ));
        }
        if self.display_height.trim().is_empty() {
            return Err(EditorError::InvalidConfig(
                "display_height must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn autosave(&self) -> AutosaveConfig {
        AutosaveConfig {
            enabled: self.autosave_enabled,
            interval: Duration::from_millis(self.autosave_interval_ms),
        }
    }
}
