//! Application state and logic.
//!
//! This module wires the task timer to its collaborators (tick source,
//! storage, sound, confetti) and runs the event loop that feeds it.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::effects::{ParticleEffect, SharedConfetti, Silent, SoundEffect, SystemSound, COMPLETION_SOUND};
use crate::event::{Event, EventHandler, EventSender, IntervalTicker};
use crate::state::{ColorAssigner, Numerals, Palette, PaletteSize, RngSource, TaskTimer, TimerSettings};
use crate::store::FileStore;
use crate::ui::{Ui, UpdateKind};

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// UI frame interval
    pub tick_rate_ms: u64,
    /// Timer tick interval; each tick counts one second
    pub timer_period_ms: u64,
    pub color_advance_delay_ms: u64,
    pub confetti_duration_ms: u64,
    /// Save the task log between sessions
    pub persist: bool,
    pub data_dir: PathBuf,
    pub numerals: Numerals,
    pub palette: PaletteSize,
    pub sound_enabled: bool,
    pub sound_resource: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            timer_period_ms: 1000,
            color_advance_delay_ms: 600,
            confetti_duration_ms: 2000,
            persist: true,
            data_dir: FileStore::default_dir(),
            numerals: Numerals::EasternArabic,
            palette: PaletteSize::Extended,
            sound_enabled: true,
            sound_resource: COMPLETION_SOUND.to_string(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Timer settings derived from this configuration.
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            tick_period: Duration::from_millis(self.timer_period_ms),
            color_advance_delay: Duration::from_millis(self.color_advance_delay_ms),
            confetti_duration: Duration::from_millis(self.confetti_duration_ms),
            sound_resource: self.sound_resource.clone(),
            ..TimerSettings::default()
        }
    }
}

/// Main application.
pub struct App {
    /// The task timer
    timer: TaskTimer,
    /// Confetti field, shared with the timer
    confetti: SharedConfetti,
    /// Current view controller
    ui: Ui,
    /// Handle for posting timer ticks and deferred actions
    events: EventSender,
    /// Time of the last UI frame, for the confetti simulation
    last_frame: Instant,
    /// Should the application exit?
    should_quit: bool,
}

impl App {
    /// Creates a new application instance posting its timer events to `events`.
    pub fn new(config: &AppConfig, events: EventSender) -> Self {
        let confetti = SharedConfetti::default();
        let sound: Box<dyn SoundEffect> = if config.sound_enabled {
            let search_dirs = std::iter::once(config.data_dir.clone())
                .chain(SystemSound::executable_dir())
                .collect();
            Box::new(SystemSound::with_search_dirs(search_dirs))
        } else {
            Box::new(Silent)
        };
        let particles: Box<dyn ParticleEffect> = Box::new(confetti.clone());

        let timer = TaskTimer::new(
            ColorAssigner::new(
                Palette::of_size(config.palette),
                Box::new(RngSource::from_entropy()),
            ),
            Box::new(IntervalTicker::new(events.clone())),
            sound,
            particles,
        )
        .with_settings(config.timer_settings());

        let timer = if config.persist {
            tracing::info!(dir = %config.data_dir.display(), "persisting task log");
            timer.with_store(Box::new(FileStore::new(&config.data_dir)))
        } else {
            timer
        };

        Self::with_timer(timer, confetti, Ui::new(config.numerals), events)
    }

    /// Creates an application around an already built timer.
    pub fn with_timer(timer: TaskTimer, confetti: SharedConfetti, ui: Ui, events: EventSender) -> Self {
        Self {
            timer,
            confetti,
            ui,
            events,
            last_frame: Instant::now(),
            should_quit: false,
        }
    }

    pub fn timer(&self) -> &TaskTimer {
        &self.timer
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Runs the application main loop.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        event_handler: &mut EventHandler,
    ) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.ui.render(frame, &self.timer, &self.confetti))?;

            match event_handler.next().await {
                Some(event) => self.handle_event(event),
                None => self.quit(),
            }
        }

        Ok(())
    }

    /// Handles input and other events.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            // The next loop iteration redraws at the new size.
            Event::Resize(..) => {}
            Event::Tick => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;
                self.confetti.step(dt);
                if self.timer.is_running() {
                    self.ui.update_animations();
                }
            }
            Event::TimerTick(run) => {
                self.timer.tick_run(run);
            }
            Event::Deferred(action) => {
                self.timer.run_deferred(action);
            }
        }
    }

    /// Handles keyboard input.
    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.ui.handle_key_event(key, &self.timer) {
            UpdateKind::Quit => self.quit(),
            UpdateKind::ToggleHelp => self.ui.toggle_help(),
            UpdateKind::Input(c) => {
                self.timer.push_char(c);
            }
            UpdateKind::Backspace => {
                self.timer.pop_char();
            }
            UpdateKind::Submit => self.submit(),
            UpdateKind::Other => {}
        }
    }

    /// Start the task, or finish it when one is running.
    fn submit(&mut self) {
        if self.timer.is_running() {
            self.finish();
        } else {
            self.timer.start();
        }
    }

    fn finish(&mut self) {
        if let Some(report) = self.timer.stop() {
            self.ui.reset_touched();
            for deferred in report.deferred {
                self.events.schedule(deferred.delay, Event::Deferred(deferred.action));
            }
        }
    }

    /// Quit, recording the running task first.
    fn quit(&mut self) {
        if self.timer.is_running() {
            self.finish();
        }
        self.should_quit = true;
    }
}
