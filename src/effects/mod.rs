//! Fire-and-forget celebration effects played when a task completes.
//!
//! Effects never report failure back to the timer. Implementations log and
//! carry on, so a missing sound player or a dead terminal bell cannot keep a
//! task from being recorded.

pub mod confetti;
pub mod sound;

pub use confetti::{Confetti, SharedConfetti};
pub use sound::{Silent, SystemSound};

/// Sound file played on completion, relative to the working directory, the
/// data directory or the executable. Not shipped with the binary; without it
/// the terminal bell rings.
pub const COMPLETION_SOUND: &str = "assets/goodresult.oga";

/// Parameters of one confetti burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    /// Number of particles launched
    pub particle_count: usize,
    /// Angular spread in degrees, centered straight up
    pub spread: f32,
    /// Launch point as fractions of the drawing area
    pub origin: Origin,
}

/// Point inside the drawing area, each axis in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

impl Default for Burst {
    fn default() -> Self {
        Self {
            particle_count: 125,
            spread: 250.0,
            origin: Origin { x: 0.5, y: 0.5 },
        }
    }
}

/// Audio cue.
#[cfg_attr(test, mockall::automock)]
pub trait SoundEffect {
    fn play(&mut self, resource: &str);
}

/// Transient particle celebration.
#[cfg_attr(test, mockall::automock)]
pub trait ParticleEffect {
    fn burst(&mut self, burst: Burst);

    /// Clear any particles still in flight.
    fn reset(&mut self);
}
