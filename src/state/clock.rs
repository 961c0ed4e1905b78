//! Periodic tick registration for a running timer.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors registering a tick source.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("no async runtime available to drive the timer")]
    NoRuntime,
}

/// Registration of a periodic tick for one timer run.
///
/// Dropping the handle does not stop delivery; call [`TickHandle::cancel`].
#[derive(Debug, Clone)]
pub struct TickHandle {
    run: u64,
    token: CancellationToken,
}

impl TickHandle {
    pub fn new(run: u64, token: CancellationToken) -> Self {
        Self { run, token }
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    /// Stop delivering ticks. Safe to call more than once.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Something able to deliver one tick per `period` tagged with `run`.
#[cfg_attr(test, mockall::automock)]
pub trait Ticker {
    fn start(&mut self, run: u64, period: Duration) -> Result<TickHandle, TickError>;
}

/// Ticker that registers nothing; ticks are driven by hand.
///
/// Clones share the list of handed out handles, so a caller can keep one
/// clone and inspect cancellation after giving the other away.
#[derive(Debug, Default, Clone)]
pub struct ManualTicker {
    handles: Rc<RefCell<Vec<TickHandle>>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handles(&self) -> Vec<TickHandle> {
        self.handles.borrow().clone()
    }

    pub fn last(&self) -> Option<TickHandle> {
        self.handles.borrow().last().cloned()
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, run: u64, _period: Duration) -> Result<TickHandle, TickError> {
        let handle = TickHandle::new(run, CancellationToken::new());
        self.handles.borrow_mut().push(handle.clone());
        Ok(handle)
    }
}
