//! Level table: spawn rates, scroll speeds and distance per stage

use super::LEVEL_COUNT;

/// One flight-stage level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub name: &'static str,
    /// Distance to travel before the boss (or next level) is reached
    pub distance: f32,
    /// Per-frame asteroid spawn probability
    pub asteroid_rate: f64,
    /// Per-frame star pickup spawn probability
    pub star_rate: f64,
    /// Base leftward asteroid speed (px/frame)
    pub asteroid_speed: f32,
    /// Theme color, also the beam color for the "Level Color" beam
    pub color: &'static str,
    pub bg_color: &'static str,
}

pub static LEVELS: [LevelConfig; LEVEL_COUNT] = [
    LevelConfig {
        name: "Earth Orbit",
        distance: 20000.0,
        asteroid_rate: 0.012,
        star_rate: 0.03,
        asteroid_speed: 2.0,
        color: "#00d9ff",
        bg_color: "#0a1628",
    },
    LevelConfig {
        name: "Asteroid Belt",
        distance: 25000.0,
        asteroid_rate: 0.025,
        star_rate: 0.025,
        asteroid_speed: 2.5,
        color: "#ff6b35",
        bg_color: "#1a0f0a",
    },
    LevelConfig {
        name: "Mars Approach",
        distance: 25000.0,
        asteroid_rate: 0.03,
        star_rate: 0.028,
        asteroid_speed: 3.0,
        color: "#ff4444",
        bg_color: "#1a0a0a",
    },
    LevelConfig {
        name: "Jupiter Gravity",
        distance: 30000.0,
        asteroid_rate: 0.035,
        star_rate: 0.025,
        asteroid_speed: 3.5,
        color: "#ffa500",
        bg_color: "#1a140a",
    },
    LevelConfig {
        name: "Saturn Rings",
        distance: 30000.0,
        asteroid_rate: 0.04,
        star_rate: 0.022,
        asteroid_speed: 4.0,
        color: "#ffd700",
        bg_color: "#1a1a0a",
    },
    LevelConfig {
        name: "Uranus Ice Field",
        distance: 35000.0,
        asteroid_rate: 0.045,
        star_rate: 0.02,
        asteroid_speed: 4.5,
        color: "#00ffcc",
        bg_color: "#0a1a1a",
    },
    LevelConfig {
        name: "Neptune Storm",
        distance: 35000.0,
        asteroid_rate: 0.05,
        star_rate: 0.018,
        asteroid_speed: 5.0,
        color: "#4466ff",
        bg_color: "#0a0a1a",
    },
    LevelConfig {
        name: "Kuiper Belt",
        distance: 40000.0,
        asteroid_rate: 0.055,
        star_rate: 0.015,
        asteroid_speed: 5.5,
        color: "#aa88ff",
        bg_color: "#140a1a",
    },
    LevelConfig {
        name: "Deep Space",
        distance: 40000.0,
        asteroid_rate: 0.06,
        star_rate: 0.012,
        asteroid_speed: 6.0,
        color: "#ff66aa",
        bg_color: "#1a0a14",
    },
    LevelConfig {
        name: "Space Station",
        distance: 30000.0,
        asteroid_rate: 0.03,
        star_rate: 0.04,
        asteroid_speed: 4.0,
        color: "#00ff88",
        bg_color: "#0a1a14",
    },
];

/// Level entry for `index`, or the first level if out of range
pub fn level(index: usize) -> &'static LevelConfig {
    LEVELS.get(index).unwrap_or(&LEVELS[0])
}
