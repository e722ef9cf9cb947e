//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. Stages follow a few rules:
//! - One `tick` per animation frame; physics constants are per frame
//! - Millisecond clocks (cooldowns, delays) run on the clamped frame delta
//! - Randomness only from the generator handed to the constructor
//! - No rendering or platform dependencies; the HUD reads snapshots

pub mod boss;
pub mod collision;
pub mod entity;
pub mod events;
pub mod flight;
pub mod input;
pub mod snapshot;
pub mod timer;

pub use boss::{Boss, BossConfig, BossStage, BossStatus};
pub use collision::circles_overlap;
pub use entity::{Asteroid, Explosion, Faction, Particle, Player, Projectile, SizeClass, Star};
pub use events::StageEvent;
pub use flight::{FlightConfig, FlightMode, FlightStage, FlightStatus};
pub use input::{ControlSignals, Signal};
pub use snapshot::{BossSnapshot, FlightSnapshot};
pub use timer::{Cooldown, Deferred};
