//! Pizza Delivery - A side-scrolling space shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (flight stage, boss stage, collisions, events)
//! - `tables`: Static per-level and per-boss configuration
//! - `tuning`: Data-driven game balance
//! - `upgrades`: Meta-progression (purchases, equips, applied stats, persistence)
//! - `progression`: Screen state machine across stages
//! - `game`: Session driver that owns the active stage

pub mod error;
pub mod game;
pub mod progression;
pub mod sim;
pub mod tables;
pub mod tuning;
pub mod upgrades;

pub use error::StoreError;
pub use game::{Game, HudSnapshot};
pub use progression::{Progression, Screen};
pub use tuning::Tuning;
pub use upgrades::{AppliedStats, UpgradeState};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Nominal frame length the per-frame physics constants are tuned for (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest frame delta fed to millisecond clocks (tab switches, hitches)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Default playfield size
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Fuel gauge range
    pub const FUEL_MAX: f32 = 100.0;

    /// Starting lives per stage
    pub const FLIGHT_LIVES: u8 = 3;
    pub const BOSS_LIVES: u8 = 5;
}

/// Playfield size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: consts::DEFAULT_WIDTH,
            height: consts::DEFAULT_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if `pos` lies farther than `margin` outside the playfield
    #[inline]
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
