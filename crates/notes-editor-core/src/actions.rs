//! Editor actions and keyboard input types.
//!
//! Platform-agnostic definitions for the operations a host can trigger on
//! the editor. `EditorAction` is the semantic operation, decoupled from how
//! it was triggered (toolbar click, keyboard shortcut, menu, voice...).
//! `Key`/`KeyCombo` describe keyboard input once the host has translated its
//! native key events.

use smol_str::SmolStr;

use crate::format::Directive;

/// Markdown constructs the formatting engine knows how to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatAction {
    Bold,
    Italic,
    Code,
    BulletList,
    NumberedList,
    Quote,
    Link,
    Image,
}

impl FormatAction {
    /// Every format action, in toolbar order.
    pub const ALL: [FormatAction; 8] = [
        Self::Bold,
        Self::Italic,
        Self::Code,
        Self::BulletList,
        Self::NumberedList,
        Self::Quote,
        Self::Link,
        Self::Image,
    ];

    /// The prefix/suffix/placeholder template for this action.
    pub const fn directive(self) -> Directive {
        match self {
            Self::Bold => Directive::BOLD,
            Self::Italic => Directive::ITALIC,
            Self::Code => Directive::CODE,
            Self::BulletList => Directive::BULLET_LIST,
            Self::NumberedList => Directive::NUMBERED_LIST,
            Self::Quote => Directive::QUOTE,
            Self::Link => Directive::LINK,
            Self::Image => Directive::IMAGE,
        }
    }
}

/// All possible editor actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    /// Apply a formatting directive to the current selection.
    Format(FormatAction),

    /// Invoke the save callback directly, bypassing the autosave timer.
    Save,

    /// Open the text surface's native find UI.
    Find,

    /// Show or hide the live preview.
    TogglePreview,

    /// Enter or leave the full-viewport overlay.
    ToggleFullscreen,
}

impl EditorAction {
    /// Whether a read-only editor declines this action. Only the view
    /// toggles stay available.
    pub fn is_blocked_when_read_only(&self) -> bool {
        matches!(self, Self::Format(_) | Self::Save | Self::Find)
    }
}

impl From<FormatAction> for EditorAction {
    fn from(action: FormatAction) -> Self {
        Self::Format(action)
    }
}

/// Key values for keyboard input.
///
/// Platform-specific code converts from native key events to this enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key.
    Character(SmolStr),

    /// Any other key (Enter, Tab, function keys...). Never bound.
    Other,

    // === Navigation ===
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,

    // === Modifiers ===
    Alt,
    Control,
    Meta,
    Shift,
    CapsLock,
}

impl Key {
    /// Create a character key.
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ArrowLeft
                | Self::ArrowRight
                | Self::ArrowUp
                | Self::ArrowDown
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Self::Alt | Self::Control | Self::Meta | Self::Shift | Self::CapsLock
        )
    }

    /// Lowercase character keys so `Ctrl+B` and `Ctrl+Shift+b` look the same to lookup.
    pub fn normalized(&self) -> Self {
        match self {
            Self::Character(s) if s.chars().any(|c| c.is_uppercase()) => {
                Self::Character(SmolStr::new(s.to_lowercase()))
            }
            other => other.clone(),
        }
    }
}

/// Modifier key state for a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const META: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: true,
    };

    /// Get the primary modifier for the platform (Cmd on Mac, Ctrl elsewhere).
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }
}

/// A key combination for triggering an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::CTRL,
        }
    }

    pub fn meta(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::META,
        }
    }

    pub fn primary(key: Key, is_mac: bool) -> Self {
        Self {
            key,
            modifiers: Modifiers::primary(is_mac),
        }
    }
}

/// Result of handling a keydown event.
#[derive(Debug, Clone, PartialEq)]
pub enum KeydownResult {
    /// Event was handled, prevent default.
    Handled,
    /// Event was not a keybinding, let platform handle it.
    NotHandled,
    /// Event should be passed through (navigation, etc.).
    PassThrough,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_modifier() {
        assert_eq!(Modifiers::primary(true), Modifiers::META);
        assert_eq!(Modifiers::primary(false), Modifiers::CTRL);
    }

    #[test]
    fn test_key_classes() {
        assert!(Key::PageDown.is_navigation());
        assert!(Key::CapsLock.is_modifier());
        assert!(!Key::Other.is_navigation() && !Key::Other.is_modifier());
        assert!(!Key::character("a").is_modifier());
    }

    #[test]
    fn test_normalized_key() {
        assert_eq!(Key::character("B").normalized(), Key::character("b"));
        assert_eq!(Key::character("1").normalized(), Key::character("1"));
        assert_eq!(Key::Home.normalized(), Key::Home);
    }

    #[test]
    fn test_read_only_blocks_all_but_view_toggles() {
        assert!(EditorAction::Format(FormatAction::Quote).is_blocked_when_read_only());
        assert!(EditorAction::Save.is_blocked_when_read_only());
        assert!(EditorAction::Find.is_blocked_when_read_only());
        assert!(!EditorAction::TogglePreview.is_blocked_when_read_only());
        assert!(!EditorAction::ToggleFullscreen.is_blocked_when_read_only());
    }
}
