//! notes-editor-core: Markdown note editing without framework dependencies.
//!
//! This crate provides:
//! - `TextSurface` trait for the host's text widget, and `RopeSurface`, a
//!   ropey-backed implementation
//! - Formatting directives (bold, italic, code, lists, quote, link, image)
//! - Live word/char metrics and a timer-host driven autosave scheduler
//! - Live preview: markdown to a document tree, syntect-highlighted code
//! - `MarkdownEditor` tying it together with toolbar and keyboard dispatch

pub mod actions;
pub mod autosave;
pub mod config;
pub mod editor;
pub mod error;
pub mod format;
pub mod highlight;
pub mod keys;
pub mod metrics;
pub mod preview;
pub mod surface;
pub mod toolbar;
pub mod types;
pub mod view;

pub use actions::{EditorAction, FormatAction, Key, KeyCombo, KeydownResult, Modifiers};
pub use autosave::{
    AutosaveConfig, AutosaveScheduler, AutosaveState, ManualTimers, SaveFn, TickOutcome,
    TimerHost, TimerId,
};
pub use config::EditorConfig;
pub use editor::{ChangeFn, MarkdownEditor};
pub use error::{EditorError, Result};
pub use format::{Directive, FormatEdit, apply_to_surface};
pub use highlight::{HighlightedLine, Highlighter, Token};
pub use keys::Keymap;
pub use metrics::Metrics;
pub use preview::{
    DocumentView, ElementKind, Node, NodeKind, NodeRenderer, PLACEHOLDER_TEXT, PreviewRenderer,
    PreviewView, RendererRegistry,
};
pub use smol_str::SmolStr;
pub use surface::{RopeSurface, TextSurface};
pub use toolbar::{DEFAULT_TOOLBAR, Toolbar, ToolbarEntry, default_toolbar};
pub use types::Selection;
pub use view::{Layout, Position, ViewMode};
