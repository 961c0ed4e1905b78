//! Custom widgets for the task timer.
//!
//! Both widgets paint straight into the buffer:
//! - a vertical gradient fill for the idle/running color pair
//! - an overlay drawing confetti particles on top of the finished frame

pub mod confetti;
pub mod gradient;

pub use confetti::ConfettiOverlay;
pub use gradient::{contrast_fg, Gradient};
