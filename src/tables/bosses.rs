//! Boss table: per-level boss identity, palette and attack parameters

use serde::{Deserialize, Serialize};

use super::LEVEL_COUNT;

/// Silhouette archetype a front end draws the boss with.
/// The simulation never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BossSilhouette {
    Blob,
    Crystal,
    Skull,
    Cloud,
    Serpent,
    Ghost,
    Fish,
    Insect,
    Void,
    Mech,
}

/// One boss entry
#[derive(Debug, Clone, PartialEq)]
pub struct BossData {
    pub name: &'static str,
    pub color: &'static str,
    pub accent_color: &'static str,
    /// Also used as the boss projectile color
    pub eye_color: &'static str,
    /// Milliseconds between volleys
    pub attack_speed_ms: f32,
    pub projectile_speed: f32,
    pub projectile_count: u32,
    pub silhouette: BossSilhouette,
    pub health_multiplier: f32,
}

impl BossData {
    /// Max health for this boss given the base health
    pub fn max_health(&self, base_health: f32) -> f32 {
        (base_health * self.health_multiplier).floor()
    }
}

pub static BOSSES: [BossData; LEVEL_COUNT] = [
    BossData {
        name: "Void Crawler",
        color: "#6633ff",
        accent_color: "#aa66ff",
        eye_color: "#ff0066",
        attack_speed_ms: 2200.0,
        projectile_speed: 3.0,
        projectile_count: 2,
        silhouette: BossSilhouette::Blob,
        health_multiplier: 1.0,
    },
    BossData {
        name: "Rock Titan",
        color: "#8B4513",
        accent_color: "#CD853F",
        eye_color: "#ffcc00",
        attack_speed_ms: 2000.0,
        projectile_speed: 3.5,
        projectile_count: 3,
        silhouette: BossSilhouette::Crystal,
        health_multiplier: 1.5,
    },
    BossData {
        name: "Crimson Warlord",
        color: "#cc0000",
        accent_color: "#ff3333",
        eye_color: "#ffffff",
        attack_speed_ms: 1800.0,
        projectile_speed: 4.0,
        projectile_count: 3,
        silhouette: BossSilhouette::Skull,
        health_multiplier: 2.0,
    },
    BossData {
        name: "Storm King",
        color: "#ff8800",
        accent_color: "#ffcc00",
        eye_color: "#00ffff",
        attack_speed_ms: 1600.0,
        projectile_speed: 4.5,
        projectile_count: 4,
        silhouette: BossSilhouette::Cloud,
        health_multiplier: 2.5,
    },
    BossData {
        name: "Ring Serpent",
        color: "#ffd700",
        accent_color: "#ffee88",
        eye_color: "#ff0000",
        attack_speed_ms: 1500.0,
        projectile_speed: 5.0,
        projectile_count: 4,
        silhouette: BossSilhouette::Serpent,
        health_multiplier: 3.0,
    },
    BossData {
        name: "Frost Phantom",
        color: "#00ccff",
        accent_color: "#88eeff",
        eye_color: "#ffffff",
        attack_speed_ms: 1400.0,
        projectile_speed: 5.5,
        projectile_count: 5,
        silhouette: BossSilhouette::Ghost,
        health_multiplier: 3.5,
    },
    BossData {
        name: "Abyss Leviathan",
        color: "#0044aa",
        accent_color: "#0088ff",
        eye_color: "#00ffcc",
        attack_speed_ms: 1300.0,
        projectile_speed: 6.0,
        projectile_count: 5,
        silhouette: BossSilhouette::Fish,
        health_multiplier: 4.0,
    },
    BossData {
        name: "Swarm Queen",
        color: "#44aa00",
        accent_color: "#88ff44",
        eye_color: "#ffcc00",
        attack_speed_ms: 1200.0,
        projectile_speed: 6.5,
        projectile_count: 6,
        silhouette: BossSilhouette::Insect,
        health_multiplier: 5.0,
    },
    BossData {
        name: "Dark Matter Entity",
        color: "#330066",
        accent_color: "#6600cc",
        eye_color: "#ff00ff",
        attack_speed_ms: 1100.0,
        projectile_speed: 7.0,
        projectile_count: 6,
        silhouette: BossSilhouette::Void,
        health_multiplier: 6.0,
    },
    BossData {
        name: "Final Overlord",
        color: "#222222",
        accent_color: "#ff0000",
        eye_color: "#ff0000",
        attack_speed_ms: 900.0,
        projectile_speed: 7.5,
        projectile_count: 7,
        silhouette: BossSilhouette::Mech,
        health_multiplier: 8.0,
    },
];

/// Boss entry for `level`, or the first boss if out of range
pub fn boss(level: usize) -> &'static BossData {
    BOSSES.get(level).unwrap_or(&BOSSES[0])
}
