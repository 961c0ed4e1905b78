//! Confetti particle field drawn over the terminal.
//!
//! Positions live in a unit square so the field does not care about the
//! terminal size; the widget in `ui::widgets::confetti` maps them to cells.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Burst, ParticleEffect};

/// Downward acceleration, in area heights per second squared.
const GRAVITY: f32 = 1.2;

/// Fraction of velocity kept per second.
const DRAG: f32 = 0.35;

/// Seconds a particle lives before fading out.
const LIFETIME: f32 = 2.5;

/// Glyphs particles cycle through.
pub const GLYPHS: &[char] = &['*', '+', 'o', '•', '✦', '▪'];

/// A single confetti piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub age: f32,
    pub glyph: char,
    pub color: (u8, u8, u8),
}

/// Particle field advanced once per UI frame.
pub struct Confetti {
    particles: Vec<Particle>,
    rng: StdRng,
    colors: Vec<(u8, u8, u8)>,
}

impl Default for Confetti {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl Confetti {
    pub fn new(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            rng,
            colors: vec![
                (0x26, 0xCC, 0xFF),
                (0xA2, 0x5A, 0xFD),
                (0xFF, 0x5E, 0x7E),
                (0x88, 0xFF, 0x5A),
                (0xFC, 0xFF, 0x42),
                (0xFF, 0xA6, 0x2D),
                (0xFF, 0x36, 0xFF),
            ],
        }
    }

    /// Launch a burst of particles.
    pub fn launch(&mut self, burst: Burst) {
        let half_spread = burst.spread.to_radians() / 2.0;
        let up = std::f32::consts::FRAC_PI_2;

        self.particles.reserve(burst.particle_count);
        for _ in 0..burst.particle_count {
            let angle = up + self.rng.gen_range(-half_spread..=half_spread);
            let speed = self.rng.gen_range(0.4_f32..1.1_f32);
            let glyph = GLYPHS[self.rng.gen_range(0..GLYPHS.len())];
            let color = self.colors[self.rng.gen_range(0..self.colors.len())];

            self.particles.push(Particle {
                x: burst.origin.x,
                y: burst.origin.y,
                vx: angle.cos() * speed,
                // Screen y grows downward.
                vy: -angle.sin() * speed,
                age: 0.0,
                glyph,
                color,
            });
        }
    }

    /// Advance the simulation by `dt` seconds and drop dead particles.
    pub fn step(&mut self, dt: f32) {
        if self.particles.is_empty() {
            return;
        }

        let keep = DRAG.powf(dt);
        for p in &mut self.particles {
            p.vy += GRAVITY * dt;
            p.vx *= keep;
            p.vy *= keep;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.age += dt;
        }

        self.particles
            .retain(|p| p.age < LIFETIME && p.y <= 1.0 && (0.0..=1.0).contains(&p.x));
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }
}

/// Confetti field shared between the timer, which launches bursts, and the
/// UI, which advances and draws it.
#[derive(Clone, Default)]
pub struct SharedConfetti(Rc<RefCell<Confetti>>);

impl SharedConfetti {
    pub fn new(confetti: Confetti) -> Self {
        Self(Rc::new(RefCell::new(confetti)))
    }

    pub fn step(&self, dt: f32) {
        self.0.borrow_mut().step(dt);
    }

    pub fn with<T>(&self, f: impl FnOnce(&Confetti) -> T) -> T {
        f(&self.0.borrow())
    }
}

impl ParticleEffect for SharedConfetti {
    fn burst(&mut self, burst: Burst) {
        tracing::debug!(particles = burst.particle_count, "confetti burst");
        self.0.borrow_mut().launch(burst);
    }

    fn reset(&mut self) {
        self.0.borrow_mut().clear();
    }
}
