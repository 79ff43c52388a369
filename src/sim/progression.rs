//! Scoring, milestones and stage (season) progression

use serde::{Deserialize, Serialize};

use super::difficulty::TierParams;
use crate::consts::*;

/// Seasons cycled through by stage transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn from_index(index: u32) -> Self {
        match index % STAGE_COUNT {
            0 => Season::Spring,
            1 => Season::Summer,
            2 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

/// A stage transition in flight; collisions are suspended while it lasts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageTransition {
    pub start_tick: u64,
    pub duration: u64,
}

impl StageTransition {
    /// Fade amount: 0 → 1 until the midpoint, back to 0 at the end
    pub fn alpha(&self, now: u64) -> f32 {
        if self.duration == 0 {
            return 0.0;
        }
        let t = (now.saturating_sub(self.start_tick) as f32 / self.duration as f32).clamp(0.0, 1.0);
        if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 }
    }

    pub fn midpoint_tick(&self) -> u64 {
        self.start_tick + self.duration / 2
    }

    pub fn end_tick(&self) -> u64 {
        self.start_tick + self.duration
    }
}

/// What clearing one obstacle unlocked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Milestone {
    /// Roll for a life pickup
    pub pickup_roll: bool,
    /// Begin a stage transition
    pub stage_due: bool,
}

/// Per-run scoring state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progression {
    /// Obstacles cleared this run
    pub score: u32,
    /// Obstacles cleared, drives pickup and stage cadences
    pub milestone_counter: u32,
    pub stage_index: u32,
    pub transition: Option<StageTransition>,
    /// This run beat the stored best for its tier
    pub new_best: bool,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn season(&self) -> Season {
        Season::from_index(self.stage_index)
    }

    /// Count one cleared obstacle
    pub fn record_cleared(&mut self, params: &TierParams) -> Milestone {
        self.score += 1;
        self.milestone_counter += 1;
        Milestone {
            pickup_roll: self.milestone_counter % params.pickup_interval.max(1) == 0,
            stage_due: self.milestone_counter % params.stage_interval.max(1) == 0,
        }
    }

    pub fn in_transition(&self) -> bool {
        self.transition.is_some()
    }

    /// Start a transition unless one is already running
    pub fn begin_transition(&mut self, now: u64) -> Option<StageTransition> {
        if self.transition.is_some() {
            return None;
        }
        let transition = StageTransition {
            start_tick: now,
            duration: STAGE_TRANSITION_TICKS,
        };
        self.transition = Some(transition);
        Some(transition)
    }

    /// Midpoint: swap to the next season
    pub fn advance_stage(&mut self) {
        self.stage_index = (self.stage_index + 1) % STAGE_COUNT;
    }

    pub fn end_transition(&mut self) {
        self.transition = None;
    }

    pub fn transition_alpha(&self, now: u64) -> f32 {
        self.transition.map(|t| t.alpha(now)).unwrap_or(0.0)
    }
}
