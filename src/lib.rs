//! Season Flap - a seasonal Flappy Bird clone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, progression)
//! - `persistence`: Best-score storage behind a small key-value trait
//! - `platform`: Browser/native glue (input decoding)
//! - `tuning`: Data-driven per-tier game balance
//! - `settings`: Player preferences

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::BestScores;
pub use persistence::{BestScoreStore, MemoryStore, StoreError};
pub use settings::Settings;
pub use sim::difficulty::{Tier, TierParams};
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per display refresh)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const CANVAS_WIDTH: f32 = 431.0;
    pub const CANVAS_HEIGHT: f32 = 768.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Agent defaults
    pub const AGENT_X: f32 = 183.0;
    pub const AGENT_RADIUS: f32 = 15.0;
    pub const HITBOX_WIDTH: f32 = 40.0;
    pub const HITBOX_HEIGHT: f32 = 36.0;
    pub const MAX_LIVES: u8 = 3;

    /// Physics, per tick
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_VELOCITY: f32 = -8.0;

    /// Knockback applied on damage
    pub const KNOCKBACK_NUDGE: f32 = 10.0;
    pub const KNOCKBACK_UP_MIN: f32 = 6.0;
    pub const KNOCKBACK_UP_DAMPING: f32 = 0.3;
    pub const KNOCKBACK_DOWN: f32 = 2.0;
    pub const CEILING_BOUNCE: f32 = 1.0;

    /// Invulnerability window after damage (1 second) and blink period (100 ms)
    pub const INVULNERABILITY_TICKS: u64 = 60;
    pub const BLINK_PERIOD_TICKS: u64 = 6;

    /// Obstacles
    pub const PIPE_WIDTH: f32 = 78.0;
    pub const PIPE_DISTANCE: f32 = 250.0;
    pub const PIPE_SPEED: f32 = 2.0;
    pub const MIN_OBSTACLES: usize = 3;
    /// Hard tier speed ramp: factor = 1 + cleared / SPEED_RAMP_DIVISOR
    pub const SPEED_RAMP_DIVISOR: f32 = 20.0;

    /// Collision tolerances (pixels)
    pub const HORIZONTAL_TOLERANCE: f32 = 5.0;
    pub const VERTICAL_TOLERANCE: f32 = 10.0;

    /// Pickups
    pub const PICKUP_SIZE: f32 = 20.0;
    pub const PICKUP_CHANCE: f64 = 0.25;
    pub const PICKUP_MARGIN: f32 = 30.0;

    /// Seasons
    pub const STAGE_COUNT: u32 = 4;
    pub const STAGE_TRANSITION_TICKS: u64 = 40;
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test (touching edges do not overlap)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
