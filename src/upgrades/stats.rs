//! Projection of upgrade purchases into gameplay stats

use super::catalog::{
    self, BEAM_COLORS, BEAM_SPEED_TIERS, BeamColor, FiringModeConfig, ROCKET_COLORS,
    ROCKET_SHAPES, ROCKET_SPEED_TIERS, RocketColor, RocketShape,
};
use super::state::UpgradeState;

/// What the simulation consumes from the upgrade layer
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedStats {
    /// Scales ship acceleration and top speed
    pub rocket_speed_multiplier: f32,
    /// Scales projectile speed
    pub beam_speed_multiplier: f32,
    pub rocket_color: &'static RocketColor,
    pub rocket_shape: &'static RocketShape,
    pub beam_color: &'static BeamColor,
    pub firing_mode: &'static FiringModeConfig,
}

impl Default for AppliedStats {
    fn default() -> Self {
        Self::derive(&UpgradeState::default())
    }
}

impl AppliedStats {
    /// Pure projection; unknown ids and tiers fall back to the defaults
    pub fn derive(state: &UpgradeState) -> Self {
        Self {
            rocket_speed_multiplier: ROCKET_SPEED_TIERS
                .get(state.rocket_speed_tier)
                .map_or(1.0, |t| t.multiplier),
            beam_speed_multiplier: BEAM_SPEED_TIERS
                .get(state.beam_speed_tier)
                .map_or(1.0, |t| t.multiplier),
            rocket_color: catalog::rocket_color(&state.rocket_color_id)
                .unwrap_or(&ROCKET_COLORS[0]),
            rocket_shape: catalog::rocket_shape(&state.rocket_shape_id)
                .unwrap_or(&ROCKET_SHAPES[0]),
            beam_color: catalog::beam_color(&state.beam_color_id).unwrap_or(&BEAM_COLORS[0]),
            firing_mode: state.firing_mode.config(),
        }
    }

    /// Beam color for a level: the default beam follows the level theme
    pub fn beam_color_for(&self, level_color: &'static str) -> &'static str {
        if self.beam_color.follows_level_color() {
            level_color
        } else {
            self.beam_color.primary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrades::catalog::FiringMode;
    use crate::upgrades::state::{Category, SpeedTrack};

    #[test]
    fn test_defaults() {
        let stats = AppliedStats::derive(&UpgradeState::default());
        assert_eq!(stats.rocket_speed_multiplier, 1.0);
        assert_eq!(stats.beam_speed_multiplier, 1.0);
        assert_eq!(stats.firing_mode.id, FiringMode::Single);
        assert_eq!(stats.beam_color_for("#ff4444"), "#ff4444");
    }

    #[test]
    fn test_derive_is_idempotent() {
        let mut state = UpgradeState::default();
        state.add_points(20_000);
        state.purchase_tier(SpeedTrack::Rocket, 1);
        state.purchase_tier(SpeedTrack::Beam, 1);
        state.purchase(Category::BeamColor, "plasma");
        state.purchase(Category::FiringMode, "triple");

        let first = AppliedStats::derive(&state);
        let second = AppliedStats::derive(&state);
        assert_eq!(first, second);
        assert_eq!(first.rocket_speed_multiplier, 1.15);
        assert_eq!(first.beam_speed_multiplier, 1.20);
        assert_eq!(first.beam_color_for("#00d9ff"), "#ff4444");
        assert_eq!(first.firing_mode.id, FiringMode::Triple);
    }

    #[test]
    fn test_unknown_ids_fall_back() {
        let state = UpgradeState {
            rocket_speed_tier: 17,
            rocket_color_id: "plaid".into(),
            beam_color_id: "".into(),
            ..UpgradeState::default()
        };
        let stats = AppliedStats::derive(&state);
        assert_eq!(stats.rocket_speed_multiplier, 1.0);
        assert_eq!(stats.rocket_color.id, "default");
        assert_eq!(stats.beam_color.id, "default");
    }
}
