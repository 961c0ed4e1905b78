//! Task timer state.
//!
//! [`TaskTimer`] owns everything the timer screen shows: the title input, the
//! idle/running state machine, the completed task log and the gradient
//! selection. Side effects (ticking, storage, sound, confetti) go through
//! injected collaborators so the state machine itself stays synchronous.

mod clock;
mod format;
mod input;
mod palette;
mod task;

pub use clock::{ManualTicker, TickError, TickHandle, Ticker};
pub use format::{format_elapsed, Numerals};
pub use input::{validate_title, TitleError, TitleInput, MIN_TITLE_LEN};
pub use palette::{parse_hex, ColorAssigner, ColorPair, Palette, PaletteSize, RandomSource, RngSource};
pub use task::{TaskLog, TaskLogError, TaskRecord, TASKS_KEY};

#[cfg(test)]
pub use clock::MockTicker;
#[cfg(test)]
pub use palette::MockRandomSource;

use std::time::Duration;

use crate::effects::{Burst, ParticleEffect, SoundEffect, COMPLETION_SOUND};
use crate::store::KeyValueStore;

/// Whether a task is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running { elapsed: u64 },
}

/// Timing and effect parameters of the timer.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSettings {
    /// Interval between ticks; each tick adds one second.
    pub tick_period: Duration,
    /// Delay between completing a task and drawing the next idle gradient.
    pub color_advance_delay: Duration,
    /// How long confetti may fly before it is cleared.
    pub confetti_duration: Duration,
    pub burst: Burst,
    pub sound_resource: String,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            color_advance_delay: Duration::from_millis(600),
            confetti_duration: Duration::from_millis(2000),
            burst: Burst::default(),
            sound_resource: COMPLETION_SOUND.to_string(),
        }
    }
}

/// Work scheduled by [`TaskTimer::stop`] to run later.
///
/// Each action remembers the completion it belongs to. When another task
/// completes first, the older action is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    AdvanceColor { generation: u64 },
    ResetConfetti { generation: u64 },
}

/// A [`DeferredAction`] and how long to wait before running it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub delay: Duration,
    pub action: DeferredAction,
}

/// Outcome of stopping a running task.
#[derive(Debug, Clone, PartialEq)]
pub struct StopReport {
    pub record: TaskRecord,
    pub deferred: Vec<Deferred>,
}

/// The task timer component.
pub struct TaskTimer {
    input: TitleInput,
    state: TimerState,
    log: TaskLog,
    colors: ColorAssigner,
    store: Option<Box<dyn KeyValueStore>>,
    ticker: Box<dyn Ticker>,
    tick: Option<TickHandle>,
    sound: Box<dyn SoundEffect>,
    particles: Box<dyn ParticleEffect>,
    settings: TimerSettings,
    /// Id of the most recent run, tagged onto its ticks
    run: u64,
    /// Number of completed tasks this session
    generation: u64,
}

impl TaskTimer {
    /// Create an idle timer with an empty, unpersisted log.
    pub fn new(
        colors: ColorAssigner,
        ticker: Box<dyn Ticker>,
        sound: Box<dyn SoundEffect>,
        particles: Box<dyn ParticleEffect>,
    ) -> Self {
        Self {
            input: TitleInput::new(),
            state: TimerState::Idle,
            log: TaskLog::new(),
            colors,
            store: None,
            ticker,
            tick: None,
            sound,
            particles,
            settings: TimerSettings::default(),
            run: 0,
            generation: 0,
        }
    }

    /// Persist the log to `store`, loading whatever it already holds.
    pub fn with_store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.log = TaskLog::load(store.as_ref());
        self.store = Some(store);
        self
    }

    pub fn with_settings(mut self, settings: TimerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Seconds elapsed in the current run, zero when idle.
    pub fn elapsed(&self) -> u64 {
        match self.state {
            TimerState::Idle => 0,
            TimerState::Running { elapsed } => elapsed,
        }
    }

    pub fn input(&self) -> &TitleInput {
        &self.input
    }

    pub fn log(&self) -> &TaskLog {
        &self.log
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Gradient shown while idle, and stamped onto the next completed task.
    pub fn idle_gradient(&self) -> &ColorPair {
        self.colors.current_idle_gradient()
    }

    pub fn idle_color_name(&self) -> &str {
        self.colors.current_key()
    }

    pub fn tick_handle(&self) -> Option<&TickHandle> {
        self.tick.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Append a character to the title. Ignored while running.
    pub fn push_char(&mut self, c: char) -> bool {
        self.edit(|input| input.push(c))
    }

    /// Remove the last character of the title. Ignored while running.
    pub fn pop_char(&mut self) -> bool {
        self.edit(|input| {
            input.pop();
        })
    }

    /// Replace the title. Ignored while running.
    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        self.edit(|input| input.set(title))
    }

    fn edit(&mut self, f: impl FnOnce(&mut TitleInput)) -> bool {
        if self.is_running() {
            return false;
        }
        f(&mut self.input);
        true
    }

    /// Start timing the task named by the current input.
    ///
    /// Returns `false`, changing nothing, when the title is invalid or a task
    /// is already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            tracing::debug!("start ignored: already running");
            return false;
        }
        if let Err(e) = self.input.validate() {
            tracing::debug!(error = %e, "start ignored: invalid title");
            return false;
        }

        self.run += 1;
        self.tick = match self.ticker.start(self.run, self.settings.tick_period) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "timer started without a tick source");
                None
            }
        };
        self.state = TimerState::Running { elapsed: 0 };
        tracing::info!(run = self.run, title = self.input.value(), "task started");
        true
    }

    /// Add one second to the running task.
    pub fn tick(&mut self) {
        if let TimerState::Running { elapsed } = &mut self.state {
            *elapsed = elapsed.saturating_add(1);
        }
    }

    /// Tick on behalf of run `run`. Ticks from earlier runs are dropped.
    pub fn tick_run(&mut self, run: u64) -> bool {
        if !self.is_running() || run != self.run {
            tracing::trace!(run, current = self.run, "dropping stale tick");
            return false;
        }
        self.tick();
        true
    }

    /// Finish the running task.
    ///
    /// Records the task, fires the completion effects and returns the record
    /// with the work to schedule afterwards. Does nothing when idle.
    pub fn stop(&mut self) -> Option<StopReport> {
        let TimerState::Running { elapsed } = self.state else {
            return None;
        };

        if let Some(handle) = self.tick.take() {
            handle.cancel();
        }

        let record = match TaskRecord::new(
            self.input.value(),
            elapsed,
            self.colors.current_idle_gradient().clone(),
        ) {
            Ok(record) => record.completed_at(chrono::Utc::now()),
            Err(e) => {
                // Not reachable while the input stays locked during a run.
                tracing::error!(error = %e, "cannot record task");
                self.reset();
                return None;
            }
        };

        self.log.append(record.clone());
        if let Some(store) = self.store.as_deref_mut() {
            if let Err(e) = self.log.save(store) {
                tracing::warn!(error = %e, "failed to persist task log");
            }
        }

        self.input.clear();
        self.sound.play(&self.settings.sound_resource);
        self.particles.burst(self.settings.burst);
        self.reset();

        self.generation += 1;
        tracing::info!(
            title = record.title(),
            seconds = record.time_taken(),
            color = self.colors.current_key(),
            "task completed"
        );

        Some(StopReport {
            record,
            deferred: vec![
                Deferred {
                    delay: self.settings.color_advance_delay,
                    action: DeferredAction::AdvanceColor {
                        generation: self.generation,
                    },
                },
                Deferred {
                    delay: self.settings.confetti_duration,
                    action: DeferredAction::ResetConfetti {
                        generation: self.generation,
                    },
                },
            ],
        })
    }

    fn reset(&mut self) {
        self.state = TimerState::Idle;
    }

    /// Run an action scheduled by [`TaskTimer::stop`]. Returns `false` when
    /// the action is stale.
    pub fn run_deferred(&mut self, action: DeferredAction) -> bool {
        match action {
            DeferredAction::AdvanceColor { generation } if generation == self.generation => {
                let key = self.colors.advance();
                tracing::debug!(color = key, "idle color advanced");
                true
            }
            DeferredAction::ResetConfetti { generation } if generation == self.generation => {
                self.particles.reset();
                true
            }
            stale => {
                tracing::debug!(?stale, current = self.generation, "ignoring stale deferred action");
                false
            }
        }
    }
}
