//! Data-driven game balance
//!
//! Every physics and combat constant the stages read lives here. Defaults match
//! the shipped feel; a JSON document can override any subset of keys:
//!
//! ```
//! use pizza_delivery::Tuning;
//! let tuning = Tuning::from_json(r#"{ "flight": { "max_speed": 12.0 } }"#).unwrap();
//! assert_eq!(tuning.flight.max_speed, 12.0);
//! assert_eq!(tuning.flight.friction, 0.94);
//! ```
//!
//! Velocities are pixels per frame; cooldowns and delays are milliseconds.

use serde::{Deserialize, Serialize};

/// All tunables for a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub flight: FlightTuning,
    pub boss: BossTuning,
    pub collision: CollisionTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON override document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Flight stage physics, fuel, firing and spawning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub boost_multiplier: f32,
    /// Distance kept between the ship and the playfield edge
    pub edge_margin: f32,
    /// Velocity factor applied when the ship hits an edge
    pub bounce: f32,
    pub fuel_drain: f32,
    pub fuel_regen: f32,
    pub invincibility_frames: u32,
    pub distance_per_frame: f32,
    pub boost_distance_bonus: f32,
    pub fire_interval_ms: f32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub projectile_damage: f32,
    /// Vertical offset of each barrel in the parallel-pair firing mode
    pub double_shot_offset: f32,
    pub combo_frames: u32,
    pub star_points: u64,
    /// Scales every level's asteroid and star spawn rates (0 disables spawning)
    pub spawn_rate_scale: f64,
    /// How long the classic-mode level banner freezes the stage
    pub level_banner_ms: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            acceleration: 0.6,
            friction: 0.94,
            max_speed: 10.0,
            boost_multiplier: 1.5,
            edge_margin: 20.0,
            bounce: -0.3,
            fuel_drain: 0.3,
            fuel_regen: 0.08,
            invincibility_frames: 120,
            distance_per_frame: 0.5,
            boost_distance_bonus: 0.5,
            fire_interval_ms: 150.0,
            projectile_speed: 12.0,
            projectile_radius: 4.0,
            projectile_damage: 10.0,
            double_shot_offset: 8.0,
            combo_frames: 90,
            star_points: 100,
            spawn_rate_scale: 1.0,
            level_banner_ms: 3000.0,
            player_width: 60.0,
            player_height: 35.0,
            spawn_x: 100.0,
            spawn_y: 300.0,
        }
    }
}

/// Boss stage physics and combat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub edge_margin: f32,
    /// Fraction of the playfield width the ship may not cross
    pub player_max_x_fraction: f32,
    pub invincibility_frames: u32,
    pub fire_interval_ms: f32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub base_damage: f32,
    pub damage_step_per_level: f32,
    pub min_damage: f32,
    pub base_health: f32,
    pub base_size: f32,
    pub size_per_level: f32,
    /// Fraction of the vertical gap closed per frame
    pub pursuit: f32,
    pub vertical_margin: f32,
    /// Distance from the right edge to the boss's left edge
    pub right_inset: f32,
    /// Total fan angle (radians) shared across a volley
    pub volley_spread: f32,
    pub boss_projectile_radius: f32,
    pub hit_score: u64,
    pub defeat_bonus_base: u64,
    pub defeat_bonus_per_level: u64,
    pub victory_delay_ms: f32,
    pub hit_flash: f32,
    pub hit_flash_decay: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            acceleration: 0.8,
            friction: 0.88,
            max_speed: 10.0,
            edge_margin: 20.0,
            player_max_x_fraction: 0.6,
            invincibility_frames: 120,
            fire_interval_ms: 120.0,
            projectile_speed: 14.0,
            projectile_radius: 5.0,
            base_damage: 8.0,
            damage_step_per_level: 0.3,
            min_damage: 4.0,
            base_health: 800.0,
            base_size: 160.0,
            size_per_level: 5.0,
            pursuit: 0.02,
            vertical_margin: 50.0,
            right_inset: 200.0,
            volley_spread: std::f32::consts::FRAC_PI_6,
            boss_projectile_radius: 8.0,
            hit_score: 10,
            defeat_bonus_base: 5000,
            defeat_bonus_per_level: 1000,
            victory_delay_ms: 2000.0,
            hit_flash: 20.0,
            hit_flash_decay: 2.0,
            player_width: 50.0,
            player_height: 30.0,
            spawn_x: 100.0,
            spawn_y: 300.0,
        }
    }
}

impl BossTuning {
    /// Per-shot player damage, reduced on later levels so fights stay a similar length
    pub fn player_damage(&self, level: usize) -> f32 {
        (self.base_damage - level as f32 * self.damage_step_per_level).max(self.min_damage)
    }

    /// Bonus awarded for defeating the boss of `level`
    pub fn defeat_bonus(&self, level: usize) -> u64 {
        self.defeat_bonus_base + level as u64 * self.defeat_bonus_per_level
    }
}

/// Radius fractions for the circle-circle hit tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    /// Ship radius as `min(width, height) / divisor` against asteroids
    pub player_radius_divisor: f32,
    /// Ship radius as `min(width, height) / divisor` against star pickups
    pub pickup_radius_divisor: f32,
    /// Share of an asteroid's drawn radius that counts against the ship
    pub asteroid_vs_player: f32,
    /// Share of an asteroid's drawn radius that counts against projectiles
    pub asteroid_vs_projectile: f32,
    /// Share of the boss width used as its hit radius
    pub boss_hit_fraction: f32,
    /// Share of the ship width used as its hit radius against boss fire
    pub player_vs_boss_fire: f32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            player_radius_divisor: 2.5,
            pickup_radius_divisor: 2.0,
            asteroid_vs_player: 0.8,
            asteroid_vs_projectile: 0.9,
            boss_hit_fraction: 0.5,
            player_vs_boss_fire: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "boss": { "victory_delay_ms": 500.0 } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.boss.victory_delay_ms, 500.0);
        assert_eq!(tuning.boss.pursuit, 0.02);
        assert_eq!(tuning.flight, FlightTuning::default());
        assert_eq!(tuning.collision, CollisionTuning::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ flight: ").is_err());
    }

    #[test]
    fn test_player_damage_floors() {
        let boss = BossTuning::default();
        assert!((boss.player_damage(0) - 8.0).abs() < 1e-6);
        assert!((boss.player_damage(5) - 6.5).abs() < 1e-6);
        assert_eq!(boss.player_damage(100), 4.0);
    }

    #[test]
    fn test_defeat_bonus_scales_with_level() {
        let boss = BossTuning::default();
        assert_eq!(boss.defeat_bonus(0), 5000);
        assert_eq!(boss.defeat_bonus(9), 14000);
    }
}
