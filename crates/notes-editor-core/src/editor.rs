//! The markdown editor component.
//!
//! `MarkdownEditor` ties a host text surface to the formatting engine,
//! metrics, autosave and preview. Hosts forward surface change events to
//! `handle_text_changed`, timer firings to `tick`, and key/toolbar input to
//! `handle_key`/`run_toolbar`.

use std::rc::Rc;

use crate::actions::{EditorAction, KeyCombo, KeydownResult};
use crate::autosave::{AutosaveConfig, AutosaveScheduler, SaveFn, TickOutcome, TimerHost, TimerId};
use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::format;
use crate::keys::Keymap;
use crate::metrics::Metrics;
use crate::preview::{PreviewRenderer, PreviewView};
use crate::surface::TextSurface;
use crate::toolbar::{Toolbar, ToolbarEntry};
use crate::view::{Layout, ViewMode};

/// Change callback, invoked with the complete new text after every edit.
pub type ChangeFn = Rc<dyn Fn(&str)>;

pub struct MarkdownEditor<S: TextSurface, T: TimerHost> {
    surface: S,
    config: EditorConfig,
    on_change: ChangeFn,
    toolbar: Toolbar,
    keymap: Keymap,
    view: ViewMode,
    metrics: Metrics,
    /// Last text observed from the surface.
    text: String,
    renderer: PreviewRenderer,
    /// `None` while the preview is hidden.
    preview: Option<PreviewView>,
    autosave: AutosaveScheduler<T>,
}

impl<S: TextSurface, T: TimerHost> MarkdownEditor<S, T> {
    /// Mount an editor over `surface`.
    ///
    /// Reads the initial text from the surface, computes metrics, renders the
    /// preview and arms autosave when enabled with a save callback.
    pub fn new(
        surface: S,
        config: EditorConfig,
        on_change: ChangeFn,
        on_save: Option<SaveFn>,
        timers: T,
        toolbar: Toolbar,
    ) -> Result<Self> {
        config.validate()?;
        let text = surface.text();
        let metrics = Metrics::from_text(&text);
        let renderer = PreviewRenderer::default();
        let view = ViewMode::default();
        let preview = view.preview_visible.then(|| renderer.render(&text));
        let autosave = AutosaveScheduler::new(timers, config.autosave(), on_save);

        tracing::debug!(
            target: "notes::editor",
            chars = metrics.char_count,
            read_only = config.read_only,
            autosave = autosave.is_armed(),
            "editor mounted"
        );

        Ok(Self {
            surface,
            config,
            on_change,
            toolbar,
            keymap: Keymap::default_for_platform(cfg!(target_os = "macos")),
            view,
            metrics,
            text,
            renderer,
            preview,
            autosave,
        })
    }

    /// Replace the keymap (e.g. with `Keymap::default_for_platform(true)` on a
    /// browser running on macOS).
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replace the preview renderer and re-render.
    pub fn with_renderer(mut self, renderer: PreviewRenderer) -> Self {
        self.renderer = renderer;
        self.refresh_preview();
        self
    }

    /// Change notification from the surface.
    ///
    /// Order: metrics, current text, `on_change`, then the preview when
    /// visible. New text also restarts the autosave period. Text equal to the
    /// last observed text is ignored.
    pub fn handle_text_changed(&mut self, text: &str) {
        if text == self.text {
            return;
        }
        self.metrics = Metrics::from_text(text);
        self.text.clear();
        self.text.push_str(text);
        self.autosave.text_changed();
        (self.on_change)(text);
        self.refresh_preview();
    }

    fn refresh_preview(&mut self) {
        self.preview = self
            .view
            .preview_visible
            .then(|| self.renderer.render(&self.text));
    }

    fn sync_from_surface(&mut self) {
        let text = self.surface.text();
        self.handle_text_changed(&text);
    }

    /// Run the toolbar entry at `index`. Returns whether anything happened.
    pub fn run_toolbar(&mut self, index: usize) -> bool {
        match self.toolbar.get(index) {
            Some(entry) => self.apply_action(entry.action),
            None => {
                tracing::debug!(target: "notes::editor", index, "no toolbar entry");
                false
            }
        }
    }

    /// Perform `action`. Returns `false` when it was a no-op.
    pub fn apply_action(&mut self, action: EditorAction) -> bool {
        if action.is_blocked_when_read_only() && self.is_read_only() {
            tracing::debug!(target: "notes::editor", ?action, "ignored in read-only mode");
            return false;
        }

        match action {
            EditorAction::Format(format_action) => {
                match format::apply_to_surface(&mut self.surface, &format_action.directive()) {
                    Ok(_) => {
                        self.sync_from_surface();
                        true
                    }
                    Err(e) => {
                        tracing::debug!(target: "notes::editor", ?format_action, "format skipped: {e}");
                        false
                    }
                }
            }
            EditorAction::Save => match self.autosave.on_save() {
                Some(save) => {
                    tracing::debug!(target: "notes::editor", "manual save");
                    save();
                    true
                }
                None => false,
            },
            EditorAction::Find => {
                self.surface.find();
                true
            }
            EditorAction::TogglePreview => {
                self.toggle_preview();
                true
            }
            EditorAction::ToggleFullscreen => {
                self.toggle_fullscreen();
                true
            }
        }
    }

    /// Keydown from the surface.
    pub fn handle_key(&mut self, combo: &KeyCombo) -> KeydownResult {
        let keymap = std::mem::take(&mut self.keymap);
        let result = keymap.handle_key(combo, |action| self.apply_action(action));
        self.keymap = keymap;
        result
    }

    pub fn toggle_preview(&mut self) {
        self.view.toggle_preview();
        self.refresh_preview();
    }

    pub fn toggle_fullscreen(&mut self) {
        self.view.toggle_fullscreen();
    }

    /// Timer firing delivered by the host.
    pub fn tick(&mut self, id: TimerId) -> TickOutcome {
        self.autosave.tick(id, &self.text)
    }

    /// Reconfigure autosave. The interval must be at least one millisecond.
    pub fn set_autosave(&mut self, config: AutosaveConfig) -> Result<()> {
        let interval_ms = u64::try_from(config.interval.as_millis())
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| {
                EditorError::InvalidConfig(format!(
                    "autosave interval {:?} out of range",
                    config.interval
                ))
            })?;
        self.config.autosave_enabled = config.enabled;
        self.config.autosave_interval_ms = interval_ms;
        self.autosave.set_config(config);
        Ok(())
    }

    pub fn set_on_save(&mut self, on_save: Option<SaveFn>) {
        self.autosave.set_on_save(on_save);
    }

    pub fn set_on_change(&mut self, on_change: ChangeFn) {
        self.on_change = on_change;
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// The rendered preview, `None` while hidden.
    pub fn preview(&self) -> Option<&PreviewView> {
        self.preview.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn layout(&self) -> Layout {
        self.view.layout(&self.config.display_height)
    }

    pub fn placeholder_hint(&self) -> &str {
        &self.config.placeholder_hint
    }

    pub fn is_read_only(&self) -> bool {
        self.config.read_only || self.surface.is_read_only()
    }

    pub fn toolbar(&self) -> &'static [ToolbarEntry] {
        self.toolbar
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Last text observed from the surface.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn autosave(&self) -> &AutosaveScheduler<T> {
        &self.autosave
    }

    pub fn timers_mut(&mut self) -> &mut T {
        self.autosave.timers_mut()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for host-driven edits. Call
    /// `handle_text_changed` afterwards, as the surface's own change event would.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
