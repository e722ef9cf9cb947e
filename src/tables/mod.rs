//! Static per-level configuration
//!
//! Both tables are fixed-length and indexed by level number. Lookups past the
//! end fall back to the first entry instead of failing.

pub mod bosses;
pub mod levels;

pub use bosses::{BOSSES, BossData, BossSilhouette, boss};
pub use levels::{LEVELS, LevelConfig, level};

/// Number of levels in the campaign
pub const LEVEL_COUNT: usize = 10;

/// Index of the final level
pub const FINAL_LEVEL: usize = LEVEL_COUNT - 1;
