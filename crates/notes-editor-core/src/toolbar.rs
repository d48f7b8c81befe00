//! Formatting toolbar table.

use crate::actions::{EditorAction, FormatAction};

/// One toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarEntry {
    /// Icon identifier; the host maps it to an actual glyph.
    pub icon: &'static str,
    /// Tooltip text.
    pub label: &'static str,
    pub action: EditorAction,
}

impl ToolbarEntry {
    pub const fn format(icon: &'static str, label: &'static str, action: FormatAction) -> Self {
        Self {
            icon,
            label,
            action: EditorAction::Format(action),
        }
    }
}

/// Toolbar passed to the editor. Immutable and injected, never global.
pub type Toolbar = &'static [ToolbarEntry];

/// The standard formatting buttons, in display order.
pub static DEFAULT_TOOLBAR: [ToolbarEntry; 8] = [
    ToolbarEntry::format("format-bold", "Bold (Ctrl+B)", FormatAction::Bold),
    ToolbarEntry::format("format-italic", "Italic (Ctrl+I)", FormatAction::Italic),
    ToolbarEntry::format("code", "Code", FormatAction::Code),
    ToolbarEntry::format("format-list-bulleted", "Bullet List", FormatAction::BulletList),
    ToolbarEntry::format("format-list-numbered", "Numbered List", FormatAction::NumberedList),
    ToolbarEntry::format("format-quote", "Quote", FormatAction::Quote),
    ToolbarEntry::format("link", "Link", FormatAction::Link),
    ToolbarEntry::format("image", "Image", FormatAction::Image),
];

/// `DEFAULT_TOOLBAR` as a `Toolbar`.
pub fn default_toolbar() -> Toolbar {
    &DEFAULT_TOOLBAR
}
