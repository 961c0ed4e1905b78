//! Event channel feeding the application loop.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;

use super::{Event, EventDispatcher};

/// Cloneable handle for posting events into the loop.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Event>,
}

impl EventSender {
    /// Post an event. Returns `false` once the loop has gone away.
    pub fn send(&self, event: Event) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Post `event` after `delay`.
    pub fn schedule(&self, delay: Duration, event: Event) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(?event, "no runtime to schedule deferred event, dropping it");
            return;
        };
        let tx = self.tx.clone();
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // The loop may have exited meanwhile.
            let _ = tx.send(event);
        });
    }

    /// Whether the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving end of the event channel.
pub struct EventHandler {
    sender: EventSender,
    /// Add a channel receiver for events
    event_rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a handler that also forwards terminal events polled every
    /// `tick_rate`.
    pub fn new(tick_rate: Duration) -> Self {
        let handler = Self::detached();
        let tx = handler.sender.clone();

        // Polling crossterm blocks, so keep it off the async workers.
        tokio::task::spawn_blocking(move || {
            let dispatcher = EventDispatcher::new().with_tick_rate(tick_rate);
            loop {
                match dispatcher.next() {
                    Ok(event) => {
                        if !tx.send(event) {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal event poll failed");
                        std::thread::sleep(Duration::from_millis(10));
                        if tx.is_closed() {
                            break;
                        }
                    }
                }
            }
        });

        handler
    }

    /// Create a handler with no terminal reader attached.
    pub fn detached() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            sender: EventSender { tx },
            event_rx: rx,
        }
    }

    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    fn poll_event(&mut self, cx: &mut Context<'_>) -> Poll<Option<Event>> {
        Pin::new(&mut self.event_rx).poll_recv(cx)
    }
}

// Stream for EventHandler
impl Stream for EventHandler {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.poll_event(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DeferredAction;
    use futures::StreamExt;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn sent_events_arrive_in_order() {
        let mut handler = EventHandler::detached();
        let sender = handler.sender();

        assert!(sender.send(Event::TimerTick(1)));
        assert!(sender.send(Event::Tick));

        assert_eq!(handler.next().await, Some(Event::TimerTick(1)));
        assert_eq!(handler.next().await, Some(Event::Tick));
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_event_waits_for_delay() {
        let mut handler = EventHandler::detached();
        let action = DeferredAction::AdvanceColor { generation: 1 };
        handler
            .sender()
            .schedule(Duration::from_millis(600), Event::Deferred(action));

        let started = tokio::time::Instant::now();
        assert_eq!(handler.next().await, Some(Event::Deferred(action)));
        assert!(started.elapsed() >= Duration::from_millis(600));
    }

    #[tokio::test]
    async fn send_fails_after_handler_dropped() {
        let handler = EventHandler::detached();
        let sender = handler.sender();
        drop(handler);

        assert!(!sender.send(Event::Tick));
        assert!(sender.is_closed());
    }
}
