//! The controlled agent
//!
//! Position, vertical velocity, lives and the invulnerability/blink flags.
//! Timing of the invulnerability window is owned by the session scheduler;
//! the agent only exposes the state transitions.

use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::*;

/// Which boundary the agent struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Underside of a top barrier
    TopEdge,
    /// Upper edge of a bottom barrier
    BottomEdge,
    Ceiling,
    Ground,
}

impl Contact {
    /// Ground contact costs a life but never opens an invulnerability window
    pub fn grants_invulnerability(&self) -> bool {
        !matches!(self, Contact::Ground)
    }
}

/// The player-controlled agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Fixed horizontal position
    pub x: f32,
    pub y: f32,
    /// Vertical velocity (negative is up)
    pub velocity: f32,
    /// Collision disk radius, used for floor and ceiling only
    pub radius: f32,
    /// Rectangle used for obstacle and pickup contact
    pub hitbox: Rect,
    pub lives: u8,
    pub invulnerable: bool,
    /// Toggled while invulnerable to blink
    pub visible: bool,
    /// Physics stays frozen until the first impulse
    pub started: bool,
}

impl Agent {
    pub fn new(starting_lives: u8) -> Self {
        let y = CANVAS_HEIGHT / 2.0;
        Self {
            x: AGENT_X,
            y,
            velocity: 0.0,
            radius: AGENT_RADIUS,
            hitbox: Rect::new(AGENT_X, y, HITBOX_WIDTH, HITBOX_HEIGHT),
            lives: starting_lives.min(MAX_LIVES),
            invulnerable: false,
            visible: true,
            started: false,
        }
    }

    /// Upward impulse; starts physics on first call
    pub fn apply_impulse(&mut self) {
        self.started = true;
        self.velocity = JUMP_VELOCITY;
    }

    /// Advance physics by `dt` ticks
    pub fn integrate(&mut self, dt: f32) {
        if !self.started {
            return;
        }
        self.velocity += GRAVITY * dt;
        self.y += self.velocity * dt;
        self.sync_hitbox();
    }

    fn sync_hitbox(&mut self) {
        self.hitbox.pos.x = self.x;
        self.hitbox.pos.y = self.y;
    }

    pub fn touches_ceiling(&self) -> bool {
        self.y - self.radius <= 0.0
    }

    pub fn touches_ground(&self) -> bool {
        self.y + self.radius >= CANVAS_HEIGHT - GROUND_HEIGHT
    }

    /// Lose a life and get knocked back away from the struck boundary.
    ///
    /// Returns true when a new invulnerability window was opened; the caller
    /// is responsible for scheduling its end and the blink toggles.
    pub fn apply_damage(&mut self, contact: Contact) -> bool {
        self.lives = self.lives.saturating_sub(1);

        match contact {
            Contact::TopEdge => {
                self.velocity = KNOCKBACK_DOWN;
                self.y += KNOCKBACK_NUDGE;
            }
            Contact::BottomEdge | Contact::Ground => {
                self.velocity = -(self.velocity.abs() * KNOCKBACK_UP_DAMPING).max(KNOCKBACK_UP_MIN);
                self.y -= KNOCKBACK_NUDGE;
            }
            Contact::Ceiling => {
                self.velocity = CEILING_BOUNCE;
                self.y += KNOCKBACK_NUDGE;
            }
        }
        self.sync_hitbox();

        if contact.grants_invulnerability() && !self.invulnerable {
            self.invulnerable = true;
            self.visible = true;
            return true;
        }
        false
    }

    /// Blink step; no-op once the window has closed
    pub fn toggle_blink(&mut self) -> bool {
        if !self.invulnerable {
            return false;
        }
        self.visible = !self.visible;
        true
    }

    /// Close the invulnerability window
    pub fn end_invulnerability(&mut self) {
        self.invulnerable = false;
        self.visible = true;
    }

    /// Restore one life, capped at the maximum
    pub fn restore_life(&mut self) {
        self.lives = (self.lives + 1).min(MAX_LIVES);
    }

    /// Fatal contact: no lives remain
    pub fn eliminate(&mut self) {
        self.lives = 0;
    }

    pub fn is_eliminated(&self) -> bool {
        self.lives == 0
    }
}
