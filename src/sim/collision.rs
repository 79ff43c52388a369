//! Collision detection and outcome policy
//!
//! Obstacle contact uses the agent's rectangular hitbox with inward
//! tolerances so grazing an edge is forgiven. Floor and ceiling use the
//! collision disk. The outcome depends on the tier's damage policy and on
//! the agent's remaining lives and invulnerability.

use serde::{Deserialize, Serialize};

use super::agent::{Agent, Contact};
use super::difficulty::TierParams;
use super::obstacles::Obstacle;
use crate::Rect;
use crate::consts::*;

/// What a collision check decided for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// No contact
    Clear,
    /// Contact absorbed by a life
    Damage(Contact),
    /// Contact ends the run
    Fatal(Contact),
}

/// Raw contact flags for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactReport {
    pub top: bool,
    pub bottom: bool,
    pub ceiling: bool,
    pub ground: bool,
}

impl ContactReport {
    /// Most relevant contact; obstacle edges first, ground last
    pub fn primary(&self) -> Option<Contact> {
        if self.top {
            Some(Contact::TopEdge)
        } else if self.bottom {
            Some(Contact::BottomEdge)
        } else if self.ceiling {
            Some(Contact::Ceiling)
        } else if self.ground {
            Some(Contact::Ground)
        } else {
            None
        }
    }
}

/// Check a hitbox against one obstacle's barriers
pub fn obstacle_contact(hitbox: &Rect, obstacle: &Obstacle) -> Option<Contact> {
    // Grazing the leading or trailing edge is forgiven
    let within_x = hitbox.right() - HORIZONTAL_TOLERANCE > obstacle.x
        && hitbox.left() + HORIZONTAL_TOLERANCE < obstacle.right();
    if !within_x {
        return None;
    }

    if hitbox.top() + VERTICAL_TOLERANCE < obstacle.gap_top {
        Some(Contact::TopEdge)
    } else if hitbox.bottom() - VERTICAL_TOLERANCE > obstacle.gap_bottom() {
        Some(Contact::BottomEdge)
    } else {
        None
    }
}

/// Gather every contact the agent currently has
pub fn detect(agent: &Agent, obstacles: &[Obstacle]) -> ContactReport {
    let mut report = ContactReport {
        ceiling: agent.touches_ceiling(),
        ground: agent.touches_ground(),
        ..Default::default()
    };
    for obstacle in obstacles {
        match obstacle_contact(&agent.hitbox, obstacle) {
            Some(Contact::TopEdge) => report.top = true,
            Some(Contact::BottomEdge) => report.bottom = true,
            _ => {}
        }
    }
    report
}

/// Classify this tick's contact.
///
/// While invulnerable only the ground is checked: obstacles and the ceiling
/// are ignored but the ground still costs a life or ends the run.
pub fn resolve(agent: &Agent, obstacles: &[Obstacle], params: &TierParams) -> CollisionOutcome {
    let contact = if agent.invulnerable {
        // Only the ground can hurt during the window
        agent.touches_ground().then_some(Contact::Ground)
    } else {
        detect(agent, obstacles).primary()
    };

    match contact {
        None => CollisionOutcome::Clear,
        // Forgiving tiers absorb the hit while a spare life remains
        Some(contact) if params.forgiving && agent.lives > 1 => CollisionOutcome::Damage(contact),
        // Last life, or a tier where any contact ends the run
        Some(contact) => CollisionOutcome::Fatal(contact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Tier;

    fn obstacle_at(x: f32, gap_top: f32, gap: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            gap_top,
            gap,
            width: PIPE_WIDTH,
            direction: 1.0,
            speed: 0.0,
            passed: false,
        }
    }

    fn agent_at(y: f32, lives: u8) -> Agent {
        let mut agent = Agent::new(lives);
        agent.started = true;
        agent.y = y;
        agent.hitbox.pos.y = y;
        agent
    }

    #[test]
    fn test_inside_gap_is_clear() {
        let agent = agent_at(300.0, 1);
        let obstacles = [obstacle_at(AGENT_X, 280.0, 150.0)];
        let params = TierParams::for_tier(Tier::Medium);
        assert_eq!(resolve(&agent, &obstacles, &params), CollisionOutcome::Clear);
    }

    #[test]
    fn test_top_and_bottom_edges() {
        let hitbox = Rect::new(AGENT_X, 200.0, HITBOX_WIDTH, HITBOX_HEIGHT);
        // Gap starts well below the hitbox top
        let high = obstacle_at(AGENT_X, 260.0, 150.0);
        assert_eq!(obstacle_contact(&hitbox, &high), Some(Contact::TopEdge));
        // Gap ends well above the hitbox bottom
        let low = obstacle_at(AGENT_X, 20.0, 150.0);
        assert_eq!(obstacle_contact(&hitbox, &low), Some(Contact::BottomEdge));
    }

    #[test]
    fn test_vertical_tolerance_forgives_grazing() {
        let hitbox = Rect::new(AGENT_X, 200.0, HITBOX_WIDTH, HITBOX_HEIGHT);
        let grazing_top = obstacle_at(AGENT_X, 205.0, 150.0);
        assert_eq!(obstacle_contact(&hitbox, &grazing_top), None);
        // Gap bottom 9px above the hitbox bottom, tolerance 10
        let grazing_bottom = obstacle_at(AGENT_X, 100.0, 236.0 - 100.0 - 9.0);
        assert_eq!(obstacle_contact(&hitbox, &grazing_bottom), None);
    }

    #[test]
    fn test_horizontal_tolerance() {
        let hitbox = Rect::new(AGENT_X, 200.0, HITBOX_WIDTH, HITBOX_HEIGHT);
        // Obstacle starts 4px before the hitbox right edge: inside tolerance
        let ahead = obstacle_at(AGENT_X + HITBOX_WIDTH - 4.0, 400.0, 150.0);
        assert_eq!(obstacle_contact(&hitbox, &ahead), None);
        // 6px of overlap is a hit
        let ahead = obstacle_at(AGENT_X + HITBOX_WIDTH - 6.0, 400.0, 150.0);
        assert_eq!(obstacle_contact(&hitbox, &ahead), Some(Contact::TopEdge));
        // Obstacle ending 4px into the hitbox left edge: inside tolerance
        let behind = obstacle_at(AGENT_X - PIPE_WIDTH + 4.0, 400.0, 150.0);
        assert_eq!(obstacle_contact(&hitbox, &behind), None);
    }

    #[test]
    fn test_medium_any_contact_is_fatal() {
        let params = TierParams::for_tier(Tier::Medium);
        let agent = agent_at(200.0, 1);
        let obstacles = [obstacle_at(AGENT_X, 300.0, 150.0)];
        assert_eq!(
            resolve(&agent, &obstacles, &params),
            CollisionOutcome::Fatal(Contact::TopEdge)
        );

        let ceiling = agent_at(AGENT_RADIUS - 1.0, 1);
        assert_eq!(
            resolve(&ceiling, &[], &params),
            CollisionOutcome::Fatal(Contact::Ceiling)
        );

        let ground = agent_at(CANVAS_HEIGHT - GROUND_HEIGHT - AGENT_RADIUS, 1);
        assert_eq!(
            resolve(&ground, &[], &params),
            CollisionOutcome::Fatal(Contact::Ground)
        );
    }

    #[test]
    fn test_easy_contact_damages_while_lives_remain() {
        let params = TierParams::for_tier(Tier::Easy);
        let obstacles = [obstacle_at(AGENT_X, 300.0, 170.0)];

        let agent = agent_at(200.0, 3);
        assert_eq!(
            resolve(&agent, &obstacles, &params),
            CollisionOutcome::Damage(Contact::TopEdge)
        );

        let last_life = agent_at(200.0, 1);
        assert_eq!(
            resolve(&last_life, &obstacles, &params),
            CollisionOutcome::Fatal(Contact::TopEdge)
        );
    }

    #[test]
    fn test_invulnerable_ignores_obstacles_and_ceiling_but_not_ground() {
        let params = TierParams::for_tier(Tier::Easy);
        let obstacles = [obstacle_at(AGENT_X, 300.0, 170.0)];

        let mut agent = agent_at(200.0, 2);
        agent.invulnerable = true;
        assert_eq!(resolve(&agent, &obstacles, &params), CollisionOutcome::Clear);

        let mut ceiling = agent_at(0.0, 2);
        ceiling.invulnerable = true;
        assert_eq!(resolve(&ceiling, &[], &params), CollisionOutcome::Clear);

        let mut ground = agent_at(CANVAS_HEIGHT - GROUND_HEIGHT, 2);
        ground.invulnerable = true;
        assert_eq!(
            resolve(&ground, &[], &params),
            CollisionOutcome::Damage(Contact::Ground)
        );

        ground.lives = 1;
        assert_eq!(
            resolve(&ground, &[], &params),
            CollisionOutcome::Fatal(Contact::Ground)
        );
    }

    #[test]
    fn test_obstacle_contact_takes_precedence_over_ground() {
        let report = ContactReport {
            bottom: true,
            ground: true,
            ..Default::default()
        };
        assert_eq!(report.primary(), Some(Contact::BottomEdge));
        assert_eq!(ContactReport::default().primary(), None);
    }

    #[test]
    fn test_hard_contact_is_fatal_with_spare_lives() {
        let agent = agent_at(300.0, 3);
        let obstacles = [obstacle_at(AGENT_X, 400.0, 135.0)];
        let params = TierParams::for_tier(Tier::Hard);
        assert_eq!(
            resolve(&agent, &obstacles, &params),
            CollisionOutcome::Fatal(Contact::TopEdge)
        );
    }
}
