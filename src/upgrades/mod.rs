//! Meta-progression: points, purchases and equipped items
//!
//! - `catalog`: what can be bought and what it costs
//! - `state`: the persisted record and its purchase rules
//! - `stats`: the gameplay projection the stages consume
//! - `store`: LocalStorage persistence with default merging

pub mod catalog;
pub mod state;
pub mod stats;
pub mod store;

pub use catalog::{FiringMode, FiringModeConfig, VolleyShape};
pub use state::{Category, PurchaseOutcome, SpeedTrack, UpgradeState};
pub use stats::AppliedStats;
pub use store::{KeyValueStore, MemoryStore};
