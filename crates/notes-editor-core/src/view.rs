//! Preview/fullscreen view state and the layout it implies.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Height of the toolbar strip, subtracted from the container height.
pub const TOOLBAR_HEIGHT_PX: u32 = 56;

/// Stacking order of the fullscreen overlay.
pub const FULLSCREEN_Z_INDEX: i32 = 9999;

/// Two independent flags. Not persisted; every mount starts from `default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewMode {
    pub preview_visible: bool,
    pub fullscreen: bool,
}

impl Default for ViewMode {
    fn default() -> Self {
        Self {
            preview_visible: true,
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    /// Inline in the page flow.
    Relative,
    /// Overlay covering the viewport.
    Fixed,
}

/// Sizing and placement derived from `ViewMode` and the caller's height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// CSS height of the whole editor.
    pub container_height: SmolStr,
    /// CSS height of the editor/preview row below the toolbar.
    pub content_height: SmolStr,
    pub position: Position,
    pub z_index: Option<i32>,
    pub bordered: bool,
    pub rounded: bool,
    /// Flex grow of the editor pane.
    pub editor_flex: u8,
    /// Flex grow of the preview pane, `None` when hidden.
    pub preview_flex: Option<u8>,
}

impl ViewMode {
    pub fn toggle_preview(&mut self) {
        self.preview_visible = !self.preview_visible;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Compute the layout for a container of CSS height `display_height`.
    pub fn layout(&self, display_height: &str) -> Layout {
        let container_height = if self.fullscreen {
            SmolStr::new_static("100vh")
        } else {
            SmolStr::new(display_height)
        };
        let content_height = SmolStr::new(format!(
            "calc({container_height} - {TOOLBAR_HEIGHT_PX}px)"
        ));
        Layout {
            container_height,
            content_height,
            position: if self.fullscreen {
                Position::Fixed
            } else {
                Position::Relative
            },
            z_index: self.fullscreen.then_some(FULLSCREEN_Z_INDEX),
            bordered: !self.fullscreen,
            rounded: !self.fullscreen,
            editor_flex: if self.preview_visible { 1 } else { 2 },
            preview_flex: self.preview_visible.then_some(1),
        }
    }

    pub fn preview_tooltip(&self) -> &'static str {
        "Toggle Preview"
    }

    pub fn fullscreen_tooltip(&self) -> &'static str {
        if self.fullscreen {
            "Exit Fullscreen"
        } else {
            "Fullscreen"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let mode = ViewMode::default();
        assert!(mode.preview_visible);
        assert!(!mode.fullscreen);
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut mode = ViewMode::default();
        mode.toggle_fullscreen();
        assert_eq!(
            mode,
            ViewMode {
                preview_visible: true,
                fullscreen: true
            }
        );
        mode.toggle_preview();
        mode.toggle_preview();
        mode.toggle_fullscreen();
        assert_eq!(mode, ViewMode::default());
    }

    #[test]
    fn test_inline_layout() {
        let layout = ViewMode::default().layout("400px");
        assert_eq!(layout.container_height, "400px");
        assert_eq!(layout.content_height, "calc(400px - 56px)");
        assert_eq!(layout.position, Position::Relative);
        assert_eq!(layout.z_index, None);
        assert!(layout.bordered && layout.rounded);
        assert_eq!(layout.editor_flex, 1);
        assert_eq!(layout.preview_flex, Some(1));
    }

    #[test]
    fn test_fullscreen_without_preview() {
        let mode = ViewMode {
            preview_visible: false,
            fullscreen: true,
        };
        let layout = mode.layout("400px");
        assert_eq!(layout.container_height, "100vh");
        assert_eq!(layout.content_height, "calc(100vh - 56px)");
        assert_eq!(layout.position, Position::Fixed);
        assert_eq!(layout.z_index, Some(9999));
        assert!(!layout.bordered && !layout.rounded);
        assert_eq!(layout.editor_flex, 2);
        assert_eq!(layout.preview_flex, None);
    }

    #[test]
    fn test_tooltips() {
        let mut mode = ViewMode::default();
        assert_eq!(mode.preview_tooltip(), "Toggle Preview");
        assert_eq!(mode.fullscreen_tooltip(), "Fullscreen");
        mode.toggle_fullscreen();
        assert_eq!(mode.fullscreen_tooltip(), "Exit Fullscreen");
    }
}
