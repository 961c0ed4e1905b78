//! Event handling for the task timer.
//!
//! Terminal input, UI frame ticks, timer ticks and deferred callbacks all end
//! up on one channel, so the application loop handles them one at a time.

pub mod handler;
pub mod ticker;

pub use handler::{EventHandler, EventSender};
pub use ticker::IntervalTicker;

use std::time::Duration;
use eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::state::DeferredAction;

/// Default event polling interval.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(50);

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Regular tick event for animations
    Tick,
    /// One second of the given timer run has passed
    TimerTick(u64),
    /// A deferred action came due
    Deferred(DeferredAction),
}

/// Event dispatcher that collects terminal events.
pub struct EventDispatcher {
    /// Polling interval
    tick_rate: Duration,
}

impl EventDispatcher {
    /// Create a new event dispatcher with the default tick rate.
    pub fn new() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
        }
    }

    /// Set a custom tick rate.
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Wait for and return the next event.
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Windows reports key releases too.
                CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Ok(Event::Key(key)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
