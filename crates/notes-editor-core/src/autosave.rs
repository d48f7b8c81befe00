//! Periodic autosave.
//!
//! The scheduler owns at most one recurring timer. Timers come from a
//! `TimerHost` so the same state machine runs over browser intervals, an
//! async runtime, or a test clock. The timer is replaced whenever the
//! settings, the save callback or the observed text change. Every tick
//! carries the id of the timer that produced it; ticks from a timer that
//! has since been cancelled are dropped, so a late interval can never call a
//! replaced save callback.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::Instant;

/// Save callback. Fire-and-forget: the scheduler never observes the outcome.
pub type SaveFn = Rc<dyn Fn()>;

/// Identifier of an armed recurring timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Source of recurring timers.
///
/// `arm` starts a timer that fires every `every` until cancelled. The host
/// delivers each firing by calling `AutosaveScheduler::tick` (usually via
/// `MarkdownEditor::tick`) with the returned id.
pub trait TimerHost {
    fn arm(&mut self, every: Duration) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

/// Deterministic timer host driven by explicit `advance` calls.
#[derive(Debug, Default)]
pub struct ManualTimers {
    next_id: u64,
    now: Duration,
    // id -> (period, next deadline)
    armed: BTreeMap<TimerId, (Duration, Duration)>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of all currently armed timers.
    pub fn armed(&self) -> Vec<TimerId> {
        self.armed.keys().copied().collect()
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Period of an armed timer.
    pub fn period(&self, id: TimerId) -> Option<Duration> {
        self.armed.get(&id).map(|(period, _)| *period)
    }

    /// Move the clock forward and return every firing that fell due, in order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        let target = self.now + by;
        let mut fired = Vec::new();
        loop {
            let next = self
                .armed
                .iter()
                .filter(|(_, (_, deadline))| *deadline <= target)
                .min_by_key(|(id, (_, deadline))| (*deadline, **id))
                .map(|(id, (_, deadline))| (*id, *deadline));
            let Some((id, deadline)) = next else {
                break;
            };
            if let Some(entry) = self.armed.get_mut(&id) {
                entry.1 = deadline + entry.0;
            }
            fired.push(id);
        }
        self.now = target;
        fired
    }
}

impl TimerHost for ManualTimers {
    fn arm(&mut self, every: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        // a zero period would fire forever within one advance
        let every = every.max(Duration::from_millis(1));
        self.armed.insert(id, (every, self.now + every));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.armed.remove(&id);
    }
}

/// Autosave settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutosaveConfig {
    pub enabled: bool,
    pub interval: Duration,
}

impl AutosaveConfig {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(30_000);
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveState {
    Idle,
    Armed(TimerId),
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The save callback was invoked.
    Saved,
    /// Text was empty or whitespace-only.
    SkippedEmpty,
    /// The tick came from a timer that is no longer armed.
    Stale,
}

/// Recurring save trigger with explicit re-arming.
pub struct AutosaveScheduler<T: TimerHost> {
    timers: T,
    config: AutosaveConfig,
    on_save: Option<SaveFn>,
    state: AutosaveState,
    last_tick_saved: Option<Instant>,
}

impl<T: TimerHost> AutosaveScheduler<T> {
    /// Create a scheduler and arm it if the configuration allows.
    pub fn new(timers: T, config: AutosaveConfig, on_save: Option<SaveFn>) -> Self {
        let mut scheduler = Self {
            timers,
            config,
            on_save,
            state: AutosaveState::Idle,
            last_tick_saved: None,
        };
        scheduler.rearm();
        scheduler
    }

    pub fn state(&self) -> AutosaveState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, AutosaveState::Armed(_))
    }

    pub fn config(&self) -> AutosaveConfig {
        self.config
    }

    /// When a tick last invoked the save callback.
    pub fn last_tick_saved(&self) -> Option<Instant> {
        self.last_tick_saved
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    /// Apply new settings. Re-arms only when something actually changed.
    pub fn set_config(&mut self, config: AutosaveConfig) {
        if config == self.config {
            return;
        }
        self.config = config;
        self.rearm();
    }

    /// Replace the save callback. A different callback identity re-arms.
    pub fn set_on_save(&mut self, on_save: Option<SaveFn>) {
        let same = match (&self.on_save, &on_save) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.on_save = on_save;
        if !same {
            self.rearm();
        }
    }

    /// The observed text changed: replace the timer so the next save comes a
    /// full period after this edit.
    pub fn text_changed(&mut self) {
        if self.is_armed() {
            tracing::trace!(target: "notes::autosave", "text changed, restarting period");
            self.rearm();
        }
    }

    /// The current save callback, for direct (shortcut) saves.
    pub fn on_save(&self) -> Option<&SaveFn> {
        self.on_save.as_ref()
    }

    /// Handle a firing of timer `id` against the current text.
    pub fn tick(&mut self, id: TimerId, text: &str) -> TickOutcome {
        if self.state != AutosaveState::Armed(id) {
            tracing::trace!(target: "notes::autosave", ?id, "ignoring stale tick");
            return TickOutcome::Stale;
        }
        if text.trim().is_empty() {
            tracing::trace!(target: "notes::autosave", "skipping empty document");
            return TickOutcome::SkippedEmpty;
        }
        match &self.on_save {
            Some(save) => {
                tracing::debug!(target: "notes::autosave", bytes = text.len(), "autosaving");
                save();
                self.last_tick_saved = Some(Instant::now());
                TickOutcome::Saved
            }
            // armed implies a callback; treat a mismatch as stale
            None => TickOutcome::Stale,
        }
    }

    /// Cancel any armed timer and return to Idle.
    pub fn stop(&mut self) {
        if let AutosaveState::Armed(id) = self.state {
            self.timers.cancel(id);
            tracing::debug!(target: "notes::autosave", ?id, "autosave timer cancelled");
        }
        self.state = AutosaveState::Idle;
    }

    fn rearm(&mut self) {
        self.stop();
        if self.config.enabled && self.on_save.is_some() && !self.config.interval.is_zero() {
            let id = self.timers.arm(self.config.interval);
            tracing::debug!(
                target: "notes::autosave",
                ?id,
                interval = ?self.config.interval,
                "autosave timer armed"
            );
            self.state = AutosaveState::Armed(id);
        }
    }
}

impl<T: TimerHost> Drop for AutosaveScheduler<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
