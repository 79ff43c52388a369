//! Obstacle field
//!
//! Rolling window of barrier pairs scrolling toward the agent. Obstacles are
//! spawned ahead of the visible field, recycled once they leave it, and on
//! oscillating tiers their gap drifts vertically between fixed bounds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::TierParams;
use crate::consts::*;

/// A pair of vertically opposed barriers sharing one gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Top edge of the gap
    pub gap_top: f32,
    pub gap: f32,
    pub width: f32,
    /// Oscillation direction (+1 down, -1 up)
    pub direction: f32,
    /// Oscillation speed (0 = static)
    pub speed: f32,
    /// Agent has cleared this obstacle and it was scored
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap
    }

    /// Mark as passed. Returns false if it already was.
    pub fn mark_passed(&mut self) -> bool {
        if self.passed {
            return false;
        }
        self.passed = true;
        true
    }

    /// Drift the gap, reflecting at the band edges
    fn oscillate(&mut self, speed_factor: f32) {
        if self.speed == 0.0 {
            return;
        }
        let (lo, hi) = gap_band(self.gap);
        self.gap_top += self.direction * self.speed * speed_factor;
        if self.gap_top <= lo {
            self.gap_top = lo;
            self.direction = 1.0;
        } else if self.gap_top >= hi {
            self.gap_top = hi;
            self.direction = -1.0;
        }
    }
}

/// Valid range for a gap's top edge
pub fn gap_band(gap: f32) -> (f32, f32) {
    let lo = PIPE_WIDTH;
    let hi = CANVAS_HEIGHT - GROUND_HEIGHT - gap - PIPE_WIDTH;
    (lo, hi.max(lo))
}

/// All live obstacles, ordered left to right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    gap: f32,
    oscillation_speed: f32,
    next_id: u32,
}

impl ObstacleField {
    /// Fresh field with the initial layout for a tier
    pub fn new<R: Rng + ?Sized>(params: &TierParams, rng: &mut R) -> Self {
        let mut field = Self {
            obstacles: Vec::with_capacity(MIN_OBSTACLES + 1),
            gap: params.gap,
            oscillation_speed: params.oscillation_speed,
            next_id: 1,
        };
        for i in 0..MIN_OBSTACLES {
            let x = CANVAS_WIDTH + i as f32 * field.spacing();
            field.spawn(x, rng);
        }
        field
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Distance between consecutive obstacles in the initial layout
    pub fn spacing(&self) -> f32 {
        self.gap + PIPE_WIDTH + PIPE_DISTANCE / 2.0
    }

    /// Scroll left and drift gaps
    pub fn advance(&mut self, speed_factor: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= PIPE_SPEED * speed_factor;
            obstacle.oscillate(speed_factor);
        }
    }

    /// Drop obstacles that left the field and spawn replacements ahead
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.obstacles.retain(|o| o.right() > 0.0);

        loop {
            let (threshold_crossed, spawn_x) = match self.obstacles.last() {
                Some(last) => (
                    last.x <= CANVAS_WIDTH - self.gap,
                    (CANVAS_WIDTH + PIPE_DISTANCE).max(last.x + self.spacing()),
                ),
                None => (true, CANVAS_WIDTH + PIPE_DISTANCE),
            };

            if threshold_crossed {
                self.spawn(CANVAS_WIDTH + PIPE_DISTANCE, rng);
            } else if self.obstacles.len() < MIN_OBSTACLES {
                self.spawn(spawn_x, rng);
            } else {
                break;
            }
        }
    }

    /// Mark every obstacle fully behind `agent_x` as passed.
    /// Returns how many were newly passed.
    pub fn take_cleared(&mut self, agent_x: f32) -> u32 {
        let mut cleared = 0;
        for obstacle in &mut self.obstacles {
            if obstacle.right() < agent_x && obstacle.mark_passed() {
                cleared += 1;
            }
        }
        cleared
    }

    fn spawn<R: Rng + ?Sized>(&mut self, x: f32, rng: &mut R) {
        let (lo, hi) = gap_band(self.gap);
        let gap_top = if hi > lo { rng.random_range(lo..=hi) } else { lo };
        let direction = if self.oscillation_speed > 0.0 && rng.random_bool(0.5) {
            -1.0
        } else {
            1.0
        };

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x,
            gap_top,
            gap: self.gap,
            width: PIPE_WIDTH,
            direction,
            speed: self.oscillation_speed,
            passed: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Tier;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field(tier: Tier) -> (ObstacleField, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = ObstacleField::new(&TierParams::for_tier(tier), &mut rng);
        (field, rng)
    }

    #[test]
    fn test_initial_layout() {
        let (field, _) = field(Tier::Medium);
        assert_eq!(field.len(), MIN_OBSTACLES);
        assert_eq!(field.obstacles()[0].x, CANVAS_WIDTH);
        let spacing = field.spacing();
        assert!((field.obstacles()[1].x - (CANVAS_WIDTH + spacing)).abs() < 1e-3);
        for o in field.obstacles() {
            let (lo, hi) = gap_band(o.gap);
            assert!(o.gap_top >= lo && o.gap_top <= hi);
            assert_eq!(o.gap, 150.0);
            assert_eq!(o.speed, 0.0);
        }
    }

    #[test]
    fn test_field_never_drops_below_minimum() {
        let (mut field, mut rng) = field(Tier::Medium);
        for _ in 0..5000 {
            field.advance(1.0);
            field.recycle(&mut rng);
            assert!(field.len() >= MIN_OBSTACLES);
        }
    }

    #[test]
    fn test_field_stays_ordered_and_spaced() {
        let (mut field, mut rng) = field(Tier::Easy);
        for _ in 0..3000 {
            field.advance(1.0);
            field.recycle(&mut rng);
            for pair in field.obstacles().windows(2) {
                assert!(pair[1].x - pair[0].x >= PIPE_WIDTH);
            }
        }
    }

    #[test]
    fn test_recycle_drops_offscreen() {
        let (mut field, mut rng) = field(Tier::Medium);
        field.obstacles_mut()[0].x = -PIPE_WIDTH - 1.0;
        let first_id = field.obstacles()[0].id;
        field.recycle(&mut rng);
        assert!(field.obstacles().iter().all(|o| o.id != first_id));
        assert!(field.len() >= MIN_OBSTACLES);
    }

    #[test]
    fn test_recycle_refills_empty_field() {
        let (mut field, mut rng) = field(Tier::Medium);
        for o in field.obstacles_mut() {
            o.x = -500.0;
        }
        field.recycle(&mut rng);
        assert_eq!(field.len(), MIN_OBSTACLES);
    }

    #[test]
    fn test_oscillation_stays_in_band() {
        let (mut field, mut rng) = field(Tier::Hard);
        for o in field.obstacles() {
            assert!(o.speed > 0.0);
        }
        for step in 0..4000 {
            field.advance(1.0 + step as f32 / 400.0);
            field.recycle(&mut rng);
            for o in field.obstacles() {
                let (lo, hi) = gap_band(o.gap);
                assert!(o.gap_top >= lo && o.gap_top <= hi);
                assert!(o.direction == 1.0 || o.direction == -1.0);
            }
        }
    }

    #[test]
    fn test_oscillation_reflects_at_bound() {
        let (mut field, _) = field(Tier::Hard);
        let (lo, _) = gap_band(135.0);
        let o = &mut field.obstacles_mut()[0];
        o.gap_top = lo + 0.5;
        o.direction = -1.0;
        field.advance(1.0);
        let o = &field.obstacles()[0];
        assert_eq!(o.gap_top, lo);
        assert_eq!(o.direction, 1.0);
    }

    #[test]
    fn test_passed_set_once() {
        let (mut field, _) = field(Tier::Medium);
        field.obstacles_mut()[0].x = AGENT_X - PIPE_WIDTH - 1.0;
        assert_eq!(field.take_cleared(AGENT_X), 1);
        assert_eq!(field.take_cleared(AGENT_X), 0);
        assert!(field.obstacles()[0].passed);
    }
}
