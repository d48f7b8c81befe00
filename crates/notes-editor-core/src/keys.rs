//! Keyboard shortcut bindings.

use std::collections::HashMap;

use crate::actions::{EditorAction, FormatAction, Key, KeyCombo, KeydownResult, Modifiers};

/// Maps key combinations to editor actions.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeyCombo, EditorAction>,
}

impl Keymap {
    /// An empty keymap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Save, bold, italic and find on the platform's primary modifier
    /// (Cmd on macOS, Ctrl elsewhere).
    pub fn default_for_platform(is_mac: bool) -> Self {
        let mut keymap = Self::new();
        let primary = |c: &str| KeyCombo::primary(Key::character(c), is_mac);
        keymap.bind(primary("s"), EditorAction::Save);
        keymap.bind(primary("b"), FormatAction::Bold.into());
        keymap.bind(primary("i"), FormatAction::Italic.into());
        keymap.bind(primary("f"), EditorAction::Find);
        keymap
    }

    /// Bind `combo`, returning the action it previously triggered.
    pub fn bind(&mut self, combo: KeyCombo, action: EditorAction) -> Option<EditorAction> {
        self.bindings.insert(normalize(&combo), action)
    }

    pub fn unbind(&mut self, combo: &KeyCombo) -> Option<EditorAction> {
        self.bindings.remove(&normalize(combo))
    }

    /// Action bound to `combo`. Character keys match case-insensitively.
    pub fn lookup(&self, combo: &KeyCombo) -> Option<EditorAction> {
        self.bindings.get(&normalize(combo)).copied()
    }

    /// The combo bound to `action`, for tooltips.
    pub fn combo_for(&self, action: EditorAction) -> Option<&KeyCombo> {
        self.bindings
            .iter()
            .find(|(_, bound)| **bound == action)
            .map(|(combo, _)| combo)
    }

    /// Classify a keydown the way a platform handler needs.
    ///
    /// `dispatch` runs the bound action; its return value says whether the
    /// action was actually carried out (read-only editors decline edits but
    /// still swallow the shortcut so the browser default does not fire).
    pub fn handle_key(
        &self,
        combo: &KeyCombo,
        mut dispatch: impl FnMut(EditorAction) -> bool,
    ) -> KeydownResult {
        if let Some(action) = self.lookup(combo) {
            let applied = dispatch(action);
            tracing::trace!(target: "notes::keys", ?action, applied, "shortcut");
            return KeydownResult::Handled;
        }
        if combo.key.is_navigation() || combo.key.is_modifier() {
            return KeydownResult::PassThrough;
        }
        KeydownResult::NotHandled
    }
}

fn normalize(combo: &KeyCombo) -> KeyCombo {
    let mut modifiers = combo.modifiers;
    // Shift only changes the case of a letter here
    if matches!(&combo.key, Key::Character(s) if s.chars().all(char::is_alphabetic)) {
        modifiers = Modifiers {
            shift: false,
            ..modifiers
        };
    }
    KeyCombo::with_modifiers(combo.key.normalized(), modifiers)
}
