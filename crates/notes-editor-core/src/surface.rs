//! The text surface contract and an in-memory reference implementation.
//!
//! The editor core never reaches into a global editor instance. Everything
//! it needs from the raw editing widget goes through `TextSurface`, which a
//! host implements over its own widget (a browser textarea, a code editor
//! component, a native text view). Undo, history and cursor movement belong
//! to that widget. `RopeSurface` is a minimal in-memory implementation over
//! a ropey buffer, for headless hosts and tests.

use std::ops::Range;

use ropey::Rope;

use crate::error::{EditorError, Result};
use crate::types::Selection;

/// Operations the editor core requires from a raw text-editing widget.
///
/// Offsets are chars (Unicode scalar values).
pub trait TextSurface {
    /// Whether the surface is mounted and can accept edits.
    fn is_ready(&self) -> bool {
        true
    }

    /// Current full text.
    fn text(&self) -> String;

    /// Current selection or caret.
    fn selection(&self) -> Selection;

    /// Text covered by `range`, or `None` when the range is out of bounds.
    fn text_in_range(&self, range: Range<usize>) -> Option<String>;

    /// Replace `range` with `text` and move the selection to `selection`.
    fn replace(&mut self, range: Range<usize>, text: &str, selection: Selection) -> Result<()>;

    /// Give keyboard focus back to the surface.
    fn focus(&mut self);

    /// Open the surface's native find UI.
    fn find(&mut self);

    /// Whether the surface rejects edits.
    fn is_read_only(&self) -> bool;
}

/// Ropey-backed `TextSurface`.
#[derive(Debug, Clone)]
pub struct RopeSurface {
    rope: Rope,
    selection: Selection,
    read_only: bool,
    focused: bool,
    find_open: bool,
}

impl Default for RopeSurface {
    fn default() -> Self {
        Self::new("")
    }
}

impl RopeSurface {
    /// Create a surface holding `text` with the caret at the start.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::caret(0),
            read_only: false,
            focused: false,
            find_open: false,
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Move the selection, clamped to the document.
    pub fn set_selection(&mut self, selection: Selection) {
        let len = self.rope.len_chars();
        self.selection = Selection::new(selection.anchor.min(len), selection.head.min(len));
    }

    /// Select `range` (convenience for tests and simple hosts).
    pub fn select(&mut self, range: Range<usize>) {
        self.set_selection(Selection::from(range));
    }

    /// Type `text` at the selection, as a user keystroke would.
    ///
    /// Returns the new full text so the host can deliver the change notification.
    pub fn type_text(&mut self, text: &str) -> Result<String> {
        if self.read_only {
            return Err(EditorError::ReadOnly);
        }
        let range = self.selection.to_range();
        let caret = range.start + text.chars().count();
        self.replace(range, text, Selection::caret(caret))?;
        Ok(self.text())
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the find UI has been opened.
    pub fn is_find_open(&self) -> bool {
        self.find_open
    }
}

impl TextSurface for RopeSurface {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn text_in_range(&self, range: Range<usize>) -> Option<String> {
        if range.start > range.end || range.end > self.rope.len_chars() {
            return None;
        }
        Some(self.rope.slice(range).to_string())
    }

    fn replace(&mut self, range: Range<usize>, text: &str, selection: Selection) -> Result<()> {
        if self.read_only {
            return Err(EditorError::ReadOnly);
        }
        let len = self.rope.len_chars();
        if range.start > range.end || range.end > len {
            return Err(EditorError::InvalidRange {
                start: range.start,
                end: range.end,
                len,
            });
        }
        self.rope.remove(range.clone());
        self.rope.insert(range.start, text);
        self.set_selection(selection);
        Ok(())
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn find(&mut self) {
        self.find_open = true;
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}
