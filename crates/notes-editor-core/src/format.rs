//! Formatting command engine.
//!
//! A `Directive` is a prefix/suffix/placeholder template. Applying one to a
//! selection wraps the selected text; applying it to a caret inserts the
//! placeholder and selects it so typing overwrites it immediately.

use std::ops::Range;

use crate::error::{EditorError, Result};
use crate::surface::TextSurface;
use crate::types::Selection;

/// Template for one markdown formatting construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Directive {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub placeholder: &'static str,
}

impl Directive {
    pub const BOLD: Self = Self::new("**", "**", "Bold text");
    pub const ITALIC: Self = Self::new("*", "*", "Italic text");
    pub const CODE: Self = Self::new("`", "`", "Code");
    pub const BULLET_LIST: Self = Self::new("- ", "", "List item");
    pub const NUMBERED_LIST: Self = Self::new("1. ", "", "List item");
    pub const QUOTE: Self = Self::new("> ", "", "Quote");
    pub const LINK: Self = Self::new("[", "](url)", "Link text");
    pub const IMAGE: Self = Self::new("![", "](image-url)", "Alt text");

    pub const fn new(prefix: &'static str, suffix: &'static str, placeholder: &'static str) -> Self {
        Self {
            prefix,
            suffix,
            placeholder,
        }
    }

    /// Compute the edit for `selection`, whose text is `selected_text`.
    ///
    /// Lengths are counted in chars, so the returned selection lines up with
    /// char-addressed surfaces even for non-ASCII placeholders.
    pub fn apply(&self, selection: Selection, selected_text: &str) -> FormatEdit {
        let range = selection.to_range();
        let start = range.start;
        let prefix_len = self.prefix.chars().count();

        if selected_text.is_empty() {
            let replacement = format!("{}{}{}", self.prefix, self.placeholder, self.suffix);
            let placeholder_start = start + prefix_len;
            let placeholder_end = placeholder_start + self.placeholder.chars().count();
            FormatEdit {
                range,
                replacement,
                selection: Selection::new(placeholder_start, placeholder_end),
            }
        } else {
            let replacement = format!("{}{}{}", self.prefix, selected_text, self.suffix);
            let end = start + replacement.chars().count();
            FormatEdit {
                range,
                replacement,
                selection: Selection::new(start, end),
            }
        }
    }
}

/// A computed formatting edit, ready to hand to a text surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEdit {
    /// Char range being replaced (empty for a caret).
    pub range: Range<usize>,
    /// Text that replaces `range`.
    pub replacement: String,
    /// Selection to leave behind, in document offsets.
    pub selection: Selection,
}

impl FormatEdit {
    /// The new selection relative to the start of the replacement.
    pub fn relative_selection(&self) -> Range<usize> {
        let base = self.range.start;
        self.selection.start() - base..self.selection.end() - base
    }
}

/// Apply `directive` to the surface's current selection.
///
/// Reads the selection and its text from the surface, replaces it, moves the
/// selection and gives focus back to the surface.
pub fn apply_to_surface<S: TextSurface + ?Sized>(
    surface: &mut S,
    directive: &Directive,
) -> Result<FormatEdit> {
    if !surface.is_ready() {
        return Err(EditorError::SurfaceNotReady);
    }
    if surface.is_read_only() {
        return Err(EditorError::ReadOnly);
    }

    let selection = surface.selection();
    let range = selection.to_range();
    let selected_text = surface
        .text_in_range(range.clone())
        .ok_or_else(|| EditorError::InvalidRange {
            start: range.start,
            end: range.end,
            len: surface.text().chars().count(),
        })?;

    let edit = directive.apply(selection, &selected_text);
    tracing::debug!(
        target: "notes::format",
        range = ?edit.range,
        prefix = directive.prefix,
        selection = ?edit.selection,
        "applying directive"
    );
    surface.replace(edit.range.clone(), &edit.replacement, edit.selection)?;
    surface.focus();
    Ok(edit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::FormatAction;
    use crate::surface::RopeSurface;

    const ALL: [Directive; 8] = [
        Directive::BOLD,
        Directive::ITALIC,
        Directive::CODE,
        Directive::BULLET_LIST,
        Directive::NUMBERED_LIST,
        Directive::QUOTE,
        Directive::LINK,
        Directive::IMAGE,
    ];

    #[test]
    fn test_bold_wraps_selection() {
        let edit = Directive::BOLD.apply(Selection::new(0, 5), "hello");
        assert_eq!(edit.replacement, "**hello**");
        assert_eq!(edit.selection, Selection::new(0, 9));
        assert_eq!(edit.relative_selection(), 0..9);
    }

    #[test]
    fn test_link_on_caret_selects_placeholder() {
        let edit = Directive::LINK.apply(Selection::caret(0), "");
        assert_eq!(edit.replacement, "[Link text](url)");
        assert_eq!(edit.relative_selection(), 1..10);
        assert_eq!(edit.range, 0..0);
    }

    #[test]
    fn test_every_directive_wraps_non_empty_selection() {
        for d in ALL {
            let edit = d.apply(Selection::new(3, 6), "abc");
            assert_eq!(edit.replacement, format!("{}abc{}", d.prefix, d.suffix));
            assert_eq!(edit.range, 3..6);
            assert_eq!(
                edit.selection,
                Selection::new(3, 3 + edit.replacement.chars().count())
            );
        }
    }

    #[test]
    fn test_every_directive_selects_placeholder_on_caret() {
        for d in ALL {
            let edit = d.apply(Selection::caret(7), "");
            assert_eq!(
                edit.replacement,
                format!("{}{}{}", d.prefix, d.placeholder, d.suffix)
            );
            let start = d.prefix.len();
            assert_eq!(
                edit.relative_selection(),
                start..start + d.placeholder.len()
            );
        }
    }

    #[test]
    fn test_whitespace_selection_is_wrapped() {
        let edit = Directive::ITALIC.apply(Selection::new(0, 1), " ");
        assert_eq!(edit.replacement, "* *");
    }

    #[test]
    fn test_list_and_quote_have_no_suffix() {
        for action in [FormatAction::BulletList, FormatAction::NumberedList, FormatAction::Quote] {
            assert!(action.directive().suffix.is_empty());
        }
        assert_eq!(FormatAction::Image.directive().suffix, "](image-url)");
    }

    #[test]
    fn test_apply_to_surface_wraps_and_focuses() {
        let mut surface = RopeSurface::new("say hello there");
        surface.select(4..9);

        let edit = apply_to_surface(&mut surface, &Directive::BOLD).unwrap();
        assert_eq!(edit.replacement, "**hello**");
        assert_eq!(surface.text(), "say **hello** there");
        assert_eq!(surface.selection(), Selection::new(4, 13));
        assert!(surface.is_focused());
    }

    #[test]
    fn test_apply_to_surface_at_document_end() {
        let mut surface = RopeSurface::new("intro ");
        surface.set_selection(Selection::caret(6));

        apply_to_surface(&mut surface, &Directive::IMAGE).unwrap();
        assert_eq!(surface.text(), "intro ![Alt text](image-url)");
        let sel = surface.selection();
        assert_eq!(surface.text_in_range(sel.to_range()).as_deref(), Some("Alt text"));
    }

    #[test]
    fn test_apply_to_read_only_surface_is_rejected() {
        let mut surface = RopeSurface::new("text").with_read_only(true);
        assert_eq!(
            apply_to_surface(&mut surface, &Directive::QUOTE),
            Err(EditorError::ReadOnly)
        );
        assert_eq!(surface.text(), "text");
    }
}
