//! Difficulty policy
//!
//! Maps a tier to the numeric parameters the rest of the simulation reads:
//! gap size, starting lives, damage policy, obstacle motion, speed ramp and
//! milestone cadences.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Tier {
    /// Menu order
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Tier::Easy),
            "medium" | "med" => Some(Tier::Medium),
            "hard" => Some(Tier::Hard),
            _ => None,
        }
    }

    /// Next tier down the menu (wraps)
    pub fn next(self) -> Self {
        match self {
            Tier::Easy => Tier::Medium,
            Tier::Medium => Tier::Hard,
            Tier::Hard => Tier::Easy,
        }
    }

    /// Previous tier up the menu (wraps)
    pub fn prev(self) -> Self {
        match self {
            Tier::Easy => Tier::Hard,
            Tier::Medium => Tier::Easy,
            Tier::Hard => Tier::Medium,
        }
    }
}

/// Per-tier balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    /// Vertical gap between top and bottom barrier
    pub gap: f32,
    /// Lives at the start of a run
    pub starting_lives: u8,
    /// Contacts cost a life instead of ending the run while lives remain
    pub forgiving: bool,
    /// Gap anchor oscillation speed (pixels/tick, 0 = static)
    pub oscillation_speed: f32,
    /// Scroll speed grows with obstacles cleared
    pub speed_ramp: bool,
    /// Life pickups may spawn
    pub pickups_enabled: bool,
    /// Pickup spawn is attempted every N obstacles cleared
    pub pickup_interval: u32,
    /// A stage (season) transition begins every N obstacles cleared
    pub stage_interval: u32,
}

impl TierParams {
    /// Built-in parameters for a tier
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Easy => Self {
                gap: 170.0,
                starting_lives: MAX_LIVES,
                forgiving: true,
                oscillation_speed: 0.0,
                speed_ramp: false,
                pickups_enabled: true,
                pickup_interval: 3,
                stage_interval: 5,
            },
            Tier::Medium => Self {
                gap: 150.0,
                starting_lives: 1,
                forgiving: false,
                oscillation_speed: 0.0,
                speed_ramp: false,
                pickups_enabled: false,
                pickup_interval: 3,
                stage_interval: 5,
            },
            Tier::Hard => Self {
                gap: 135.0,
                starting_lives: 1,
                forgiving: false,
                oscillation_speed: 1.0,
                speed_ramp: true,
                pickups_enabled: false,
                pickup_interval: 3,
                stage_interval: 5,
            },
        }
    }

    /// Scroll speed multiplier after `cleared` obstacles
    pub fn speed_factor(&self, cleared: u32) -> f32 {
        if self.speed_ramp {
            1.0 + cleared as f32 / SPEED_RAMP_DIVISOR
        } else {
            1.0
        }
    }

    /// Clamp values into ranges the simulation relies on
    pub fn sanitized(mut self) -> Self {
        self.starting_lives = self.starting_lives.clamp(1, MAX_LIVES);
        self.gap = self.gap.max(HITBOX_HEIGHT);
        self.oscillation_speed = self.oscillation_speed.max(0.0);
        self.pickup_interval = self.pickup_interval.max(1);
        self.stage_interval = self.stage_interval.max(1);
        self
    }
}
