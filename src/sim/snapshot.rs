//! Read-only view of a completed tick for rendering

use serde::{Deserialize, Serialize};

use super::difficulty::Tier;
use super::session::SessionPhase;
use crate::Rect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub hitbox: Rect,
    pub visible: bool,
    pub invulnerable: bool,
    pub lives: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub gap_top: f32,
    pub gap: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub collected: bool,
}

/// Everything a renderer needs, captured between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub tier: Tier,
    /// Tier under the menu cursor
    pub highlighted_tier: Tier,
    pub agent: AgentView,
    pub obstacles: Vec<ObstacleView>,
    pub pickups: Vec<PickupView>,
    pub score: u32,
    pub best_score: u32,
    pub game_over: bool,
    pub new_best: bool,
    pub stage_index: u32,
    pub stage_transition_alpha: f32,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
