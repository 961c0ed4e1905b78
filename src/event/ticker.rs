//! Interval tick source for running timers.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use super::{Event, EventSender};
use crate::state::{TickError, TickHandle, Ticker};

/// Posts [`Event::TimerTick`] once per period until cancelled.
pub struct IntervalTicker {
    events: EventSender,
}

impl IntervalTicker {
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self, run: u64, period: Duration) -> Result<TickHandle, TickError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| TickError::NoRuntime)?;

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let events = self.events.clone();

        runtime.spawn(async move {
            // First tick one full period after start, not immediately.
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            let mut ticks = IntervalStream::new(interval);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    Some(_) = ticks.next() => {
                        if !events.send(Event::TimerTick(run)) {
                            break;
                        }
                    }
                }
            }
            tracing::trace!(run, "tick source stopped");
        });

        Ok(TickHandle::new(run, token))
    }
}
