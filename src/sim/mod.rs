//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Deferred effects through the tick-keyed scheduler, never wall-clock timers
//! - No rendering or platform dependencies

pub mod agent;
pub mod collision;
pub mod difficulty;
pub mod obstacles;
pub mod pickups;
pub mod progression;
pub mod schedule;
pub mod session;
pub mod snapshot;

pub use agent::{Agent, Contact};
pub use collision::{CollisionOutcome, ContactReport};
pub use difficulty::{Tier, TierParams};
pub use obstacles::{Obstacle, ObstacleField};
pub use pickups::{Pickup, PickupField};
pub use progression::{Progression, Season, StageTransition};
pub use schedule::{Scheduler, TimedEvent};
pub use session::{InputEvent, Session, SessionPhase};
pub use snapshot::Snapshot;
