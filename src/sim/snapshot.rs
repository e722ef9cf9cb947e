//! Read-only projections of stage state for the HUD
//!
//! The display layer never holds a reference into a stage. It gets one of these
//! per frame instead.

use serde::Serialize;

/// Flight stage HUD values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSnapshot {
    pub score: u64,
    pub lives: u8,
    pub fuel: f32,
    pub distance: f32,
    pub max_distance: f32,
    pub level: usize,
    pub level_name: &'static str,
    pub level_color: &'static str,
    pub combo: u32,
    pub kills: u32,
    pub boosting: bool,
    pub invincible: bool,
    /// Name of the level being announced while the transition banner is up
    pub banner: Option<&'static str>,
}

impl FlightSnapshot {
    /// Distance progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.max_distance <= 0.0 {
            return 1.0;
        }
        (self.distance / self.max_distance).clamp(0.0, 1.0)
    }
}

/// Boss stage HUD values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BossSnapshot {
    pub score: u64,
    pub lives: u8,
    pub level: usize,
    pub boss_name: &'static str,
    pub boss_color: &'static str,
    /// Remaining boss health in percent, `[0, 100]`
    pub boss_health_percent: f32,
    pub phase: u8,
    pub victory_pending: bool,
    pub invincible: bool,
}
