//! Session controller
//!
//! Top-level state machine (Menu → Running → GameOver → Menu) that owns every
//! simulation component and advances them once per fixed tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, Contact};
use super::collision::{self, CollisionOutcome};
use super::difficulty::{Tier, TierParams};
use super::obstacles::ObstacleField;
use super::pickups::PickupField;
use super::progression::Progression;
use super::schedule::{Scheduler, TimedEvent};
use super::snapshot::{AgentView, ObstacleView, PickupView, Snapshot};
use crate::consts::*;
use crate::highscores::BestScores;
use crate::persistence::BestScoreStore;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Tier selection, nothing simulated
    Menu,
    /// Active run (stage transitions are a sub-state tracked by progression)
    Running,
    /// Run ended, waiting for input
    GameOver,
}

/// Semantic input, already decoded from raw devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Impulse,
    MenuUp,
    MenuDown,
    Confirm,
}

/// One game session: simulation state plus its collaborators
pub struct Session {
    tuning: Tuning,
    settings: Settings,
    tier: Tier,
    highlighted: Tier,
    phase: SessionPhase,
    /// Ticks simulated while running, monotonic for the session's lifetime
    time_ticks: u64,
    rng: Pcg32,
    agent: Agent,
    obstacles: ObstacleField,
    pickups: PickupField,
    progression: Progression,
    best: BestScores,
    scheduler: Scheduler,
    store: Box<dyn BestScoreStore>,
    accumulator: f32,
}

impl Session {
    /// Create a session in the menu. Best scores for every tier are loaded
    /// from the store; unreadable entries count as 0.
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, store: Box<dyn BestScoreStore>) -> Self {
        let mut best = BestScores::new();
        for tier in Tier::ALL {
            match store.load_best_score(tier) {
                Ok(score) => {
                    best.record(tier, score);
                }
                Err(e) => log::warn!("Could not load best score for {}: {}", tier.as_str(), e),
            }
        }

        let tier = settings.last_tier;
        let mut rng = Pcg32::seed_from_u64(seed);
        let params = tuning.params(tier).clone();
        let obstacles = ObstacleField::new(&params, &mut rng);

        log::info!("Session created (seed {}, tier {})", seed, tier.as_str());

        Self {
            tuning,
            settings,
            tier,
            highlighted: tier,
            phase: SessionPhase::Menu,
            time_ticks: 0,
            rng,
            agent: Agent::new(params.starting_lives),
            obstacles,
            pickups: PickupField::new(),
            progression: Progression::new(),
            best,
            scheduler: Scheduler::new(),
            store,
            accumulator: 0.0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn highlighted_tier(&self) -> Tier {
        self.highlighted
    }

    pub fn params(&self) -> &TierParams {
        self.tuning.params(self.tier)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn pickups(&self) -> &PickupField {
        &self.pickups
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn best_score(&self, tier: Tier) -> u32 {
        self.best.get(tier)
    }

    pub fn into_store(self) -> Box<dyn BestScoreStore> {
        self.store
    }

    /// Select a tier and start a fresh run on it
    pub fn set_tier(&mut self, tier: Tier) {
        self.tier = tier;
        self.highlighted = tier;
        self.settings.last_tier = tier;
        log::info!("Tier set to {}", tier.as_str());
        self.start_run();
    }

    /// Select a tier by name. Unknown names keep the current tier.
    pub fn set_tier_by_name(&mut self, name: &str) -> bool {
        match Tier::from_str(name) {
            Some(tier) => {
                self.set_tier(tier);
                true
            }
            None => {
                log::warn!("Unknown tier '{}', keeping {}", name, self.tier.as_str());
                false
            }
        }
    }

    /// Feed one decoded input event
    pub fn handle_input(&mut self, event: InputEvent) {
        match (self.phase, event) {
            (SessionPhase::Menu | SessionPhase::GameOver, InputEvent::MenuUp) => {
                self.highlighted = self.highlighted.prev();
            }
            (SessionPhase::Menu | SessionPhase::GameOver, InputEvent::MenuDown) => {
                self.highlighted = self.highlighted.next();
            }
            (SessionPhase::Menu, InputEvent::Confirm | InputEvent::Impulse) => {
                self.set_tier(self.highlighted);
            }
            (SessionPhase::Running, InputEvent::Impulse) => {
                self.agent.apply_impulse();
            }
            (SessionPhase::Running, _) => {}
            (SessionPhase::GameOver, InputEvent::Impulse) if self.settings.instant_restart => {
                self.set_tier(self.highlighted);
            }
            (SessionPhase::GameOver, InputEvent::Confirm | InputEvent::Impulse) => {
                self.phase = SessionPhase::Menu;
            }
        }
    }

    /// Reset every component for a new run on the current tier
    fn start_run(&mut self) {
        let params = self.tuning.params(self.tier).clone();
        self.scheduler.reset();
        self.agent = Agent::new(params.starting_lives);
        self.obstacles = ObstacleField::new(&params, &mut self.rng);
        self.pickups.clear();
        self.progression.reset();
        self.accumulator = 0.0;
        self.phase = SessionPhase::Running;
        log::info!(
            "Run started on {} (gap {}, lives {})",
            self.tier.as_str(),
            params.gap,
            params.starting_lives
        );
    }

    /// Accumulate real time and run as many fixed ticks as it covers.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        // A NaN would poison the accumulator for good
        if !elapsed_secs.is_finite() {
            return 0;
        }
        self.accumulator += elapsed_secs.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.tick();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Advance the simulation by one fixed step
    pub fn tick(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }

        // Deferred effects fire before anything moves
        self.time_ticks += 1;
        let now = self.time_ticks;
        self.run_scheduled(now);

        // The world holds still until the first impulse
        if !self.agent.started {
            return;
        }

        let params = self.tuning.params(self.tier).clone();

        // Physics
        self.agent.integrate(1.0);

        // Scroll the world; hard tier speeds up with every clear
        let speed_factor = params.speed_factor(self.progression.milestone_counter);
        self.obstacles.advance(speed_factor);
        self.obstacles.recycle(&mut self.rng);
        self.pickups.advance();

        // Collisions (skipped entirely while the season fades)
        if !self.progression.in_transition() {
            match collision::resolve(&self.agent, self.obstacles.obstacles(), &params) {
                CollisionOutcome::Clear => {}
                CollisionOutcome::Damage(contact) => self.damage(contact, now),
                CollisionOutcome::Fatal(contact) => {
                    log::debug!("Fatal contact: {:?}", contact);
                    self.agent.eliminate();
                    self.finalize_run();
                    return;
                }
            }
        }

        // Scoring happens after collision so a fatal hit never scores
        let cleared = self.obstacles.take_cleared(self.agent.x);
        for _ in 0..cleared {
            self.obstacle_cleared(&params, now);
        }

        // Pickups
        let restored = self.pickups.resolve_collection(&self.agent.hitbox);
        for _ in 0..restored {
            self.agent.restore_life();
            log::debug!("Pickup collected, lives now {}", self.agent.lives);
        }
    }

    fn run_scheduled(&mut self, now: u64) {
        for event in self.scheduler.drain_due(now) {
            match event {
                TimedEvent::EndInvulnerability => {
                    self.agent.end_invulnerability();
                    self.scheduler.cancel(TimedEvent::ToggleBlink);
                }
                TimedEvent::ToggleBlink => {
                    if self.agent.toggle_blink() {
                        self.scheduler
                            .schedule(now + BLINK_PERIOD_TICKS, TimedEvent::ToggleBlink);
                    }
                }
                TimedEvent::StageMidpoint => {
                    self.progression.advance_stage();
                    log::debug!("Season changed to {:?}", self.progression.season());
                }
                TimedEvent::StageEnd => self.progression.end_transition(),
            }
        }
    }

    fn damage(&mut self, contact: Contact, now: u64) {
        let window_opened = self.agent.apply_damage(contact);
        log::debug!(
            "Damage from {:?}, lives left {}",
            contact,
            self.agent.lives
        );
        if window_opened {
            self.scheduler
                .schedule(now + INVULNERABILITY_TICKS, TimedEvent::EndInvulnerability);
            self.scheduler
                .schedule(now + BLINK_PERIOD_TICKS, TimedEvent::ToggleBlink);
        }
    }

    fn obstacle_cleared(&mut self, params: &TierParams, now: u64) {
        let milestone = self.progression.record_cleared(params);

        if milestone.pickup_roll
            && self.pickups.maybe_spawn(params, self.agent.lives, &mut self.rng)
        {
            log::debug!("Pickup spawned");
        }

        if milestone.stage_due {
            if let Some(transition) = self.progression.begin_transition(now) {
                self.scheduler
                    .schedule(transition.midpoint_tick(), TimedEvent::StageMidpoint);
                self.scheduler
                    .schedule(transition.end_tick(), TimedEvent::StageEnd);
            }
        }
    }

    /// End the run: update and persist the tier's best score
    fn finalize_run(&mut self) {
        // Another session may have raised the stored best since we loaded it
        match self.store.load_best_score(self.tier) {
            Ok(stored) => {
                self.best.record(self.tier, stored);
            }
            Err(e) => log::warn!("Could not reload best score: {}", e),
        }

        let score = self.progression.score;
        let new_best = self.best.record(self.tier, score);
        self.progression.new_best = new_best;

        if new_best {
            if let Err(e) = self.store.save_best_score(self.tier, score) {
                log::warn!("Could not save best score: {}", e);
            }
        }

        // Pending effects belong to the finished run
        self.scheduler.reset();
        self.phase = SessionPhase::GameOver;
        log::info!(
            "Run over on {}: score {} (best {}{})",
            self.tier.as_str(),
            score,
            self.best.get(self.tier),
            if new_best { ", new best" } else { "" }
        );
    }

    /// Capture the state a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            tier: self.tier,
            highlighted_tier: self.highlighted,
            agent: AgentView {
                x: self.agent.x,
                y: self.agent.y,
                radius: self.agent.radius,
                hitbox: self.agent.hitbox,
                visible: self.agent.visible,
                invulnerable: self.agent.invulnerable,
                lives: self.agent.lives,
            },
            obstacles: self
                .obstacles
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    gap_top: o.gap_top,
                    gap: o.gap,
                    width: o.width,
                })
                .collect(),
            pickups: self
                .pickups
                .pickups()
                .iter()
                .map(|p| PickupView {
                    x: p.pos.x,
                    y: p.pos.y,
                    size: p.size,
                    collected: p.collected,
                })
                .collect(),
            score: self.progression.score,
            best_score: self.best.get(self.tier),
            game_over: self.phase == SessionPhase::GameOver,
            new_best: self.progression.new_best,
            stage_index: self.progression.stage_index,
            stage_transition_alpha: self.progression.transition_alpha(self.time_ticks),
        }
    }
}
