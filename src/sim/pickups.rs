//! Life pickups
//!
//! Transient collectibles that restore one life. They spawn on milestones
//! with a fixed probability, scroll with the obstacles and disappear once
//! collected or off-screen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::TierParams;
use crate::Rect;
use crate::consts::*;

/// A life-restoring pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub size: f32,
    pub collected: bool,
}

impl Pickup {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickupField {
    pickups: Vec<Pickup>,
}

impl PickupField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn clear(&mut self) {
        self.pickups.clear();
    }

    /// Roll for a spawn. Nothing happens on tiers without pickups or at full lives.
    /// Returns true if a pickup was spawned.
    pub fn maybe_spawn<R: Rng + ?Sized>(&mut self, params: &TierParams, lives: u8, rng: &mut R) -> bool {
        if !params.pickups_enabled || lives >= MAX_LIVES {
            return false;
        }
        if !rng.random_bool(PICKUP_CHANCE) {
            return false;
        }
        let lo = PICKUP_MARGIN;
        let hi = CANVAS_HEIGHT - GROUND_HEIGHT - PICKUP_MARGIN;
        let y = rng.random_range(lo..hi);
        self.spawn_at(Vec2::new(CANVAS_WIDTH, y));
        true
    }

    pub fn spawn_at(&mut self, pos: Vec2) {
        self.pickups.push(Pickup {
            pos,
            size: PICKUP_SIZE,
            collected: false,
        });
    }

    /// Scroll left and drop pickups that are gone
    pub fn advance(&mut self) {
        for pickup in &mut self.pickups {
            pickup.pos.x -= PIPE_SPEED;
        }
        self.pickups
            .retain(|p| !p.collected && p.pos.x + p.size > 0.0);
    }

    /// Collect every pickup overlapping the hitbox.
    /// Returns the number of lives to restore.
    pub fn resolve_collection(&mut self, hitbox: &Rect) -> u8 {
        let mut restored = 0u8;
        for pickup in &mut self.pickups {
            if !pickup.collected && pickup.rect().overlaps(hitbox) {
                pickup.collected = true;
                restored = restored.saturating_add(1);
            }
        }
        restored
    }
}
