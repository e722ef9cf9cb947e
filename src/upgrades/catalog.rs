//! Purchasable items: speed tiers, cosmetics and firing modes

use serde::{Deserialize, Serialize};

/// A strictly ordered speed upgrade
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeTier {
    pub tier: usize,
    pub multiplier: f32,
    pub cost: u64,
    pub name: &'static str,
}

pub static ROCKET_SPEED_TIERS: [UpgradeTier; 4] = [
    UpgradeTier {
        tier: 0,
        multiplier: 1.0,
        cost: 0,
        name: "Standard",
    },
    UpgradeTier {
        tier: 1,
        multiplier: 1.15,
        cost: 500,
        name: "Enhanced",
    },
    UpgradeTier {
        tier: 2,
        multiplier: 1.30,
        cost: 1500,
        name: "Advanced",
    },
    UpgradeTier {
        tier: 3,
        multiplier: 1.50,
        cost: 4000,
        name: "Ultimate",
    },
];

pub static BEAM_SPEED_TIERS: [UpgradeTier; 4] = [
    UpgradeTier {
        tier: 0,
        multiplier: 1.0,
        cost: 0,
        name: "Standard",
    },
    UpgradeTier {
        tier: 1,
        multiplier: 1.20,
        cost: 400,
        name: "Swift",
    },
    UpgradeTier {
        tier: 2,
        multiplier: 1.40,
        cost: 1200,
        name: "Rapid",
    },
    UpgradeTier {
        tier: 3,
        multiplier: 1.70,
        cost: 3000,
        name: "Lightning",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct RocketColor {
    pub id: &'static str,
    pub name: &'static str,
    pub body_gradient: [&'static str; 4],
    pub nose_gradient: [&'static str; 3],
    pub fin_color: &'static str,
    pub glow_color: &'static str,
    pub cost: u64,
}

pub static ROCKET_COLORS: [RocketColor; 6] = [
    RocketColor {
        id: "default",
        name: "Classic Silver",
        body_gradient: ["#e8e8e8", "#ffffff", "#cccccc", "#999999"],
        nose_gradient: ["#cc0000", "#ff3333", "#aa0000"],
        fin_color: "#cc0000",
        glow_color: "#ffffff",
        cost: 0,
    },
    RocketColor {
        id: "flame",
        name: "Flame Red",
        body_gradient: ["#ff4444", "#ff6666", "#cc2222", "#991111"],
        nose_gradient: ["#ffaa00", "#ffcc00", "#ff8800"],
        fin_color: "#ffaa00",
        glow_color: "#ff4444",
        cost: 800,
    },
    RocketColor {
        id: "electric",
        name: "Electric Blue",
        body_gradient: ["#0088ff", "#00aaff", "#0066cc", "#004499"],
        nose_gradient: ["#00ffff", "#88ffff", "#00cccc"],
        fin_color: "#00ffff",
        glow_color: "#00aaff",
        cost: 800,
    },
    RocketColor {
        id: "cosmic",
        name: "Cosmic Purple",
        body_gradient: ["#8844ff", "#aa66ff", "#6622cc", "#441199"],
        nose_gradient: ["#ff44ff", "#ff88ff", "#cc22cc"],
        fin_color: "#ff44ff",
        glow_color: "#aa66ff",
        cost: 800,
    },
    RocketColor {
        id: "neon",
        name: "Neon Green",
        body_gradient: ["#44ff44", "#66ff66", "#22cc22", "#119911"],
        nose_gradient: ["#88ff00", "#aaff44", "#66cc00"],
        fin_color: "#88ff00",
        glow_color: "#44ff44",
        cost: 800,
    },
    RocketColor {
        id: "golden",
        name: "Golden Glory",
        body_gradient: ["#ffdd44", "#ffee66", "#ccaa22", "#998811"],
        nose_gradient: ["#ffffff", "#ffffcc", "#ddddaa"],
        fin_color: "#ffdd44",
        glow_color: "#ffee66",
        cost: 800,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct RocketShape {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: u64,
}

pub static ROCKET_SHAPES: [RocketShape; 4] = [
    RocketShape {
        id: "classic",
        name: "Classic",
        description: "The original pizza delivery rocket",
        cost: 0,
    },
    RocketShape {
        id: "sleek",
        name: "Sleek Fighter",
        description: "Aerodynamic design for speed demons",
        cost: 1500,
    },
    RocketShape {
        id: "heavy",
        name: "Heavy Cruiser",
        description: "Tank-like durability with intimidating presence",
        cost: 1500,
    },
    RocketShape {
        id: "stealth",
        name: "Stealth Viper",
        description: "Angular modern design with sharp edges",
        cost: 1500,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct BeamColor {
    pub id: &'static str,
    pub name: &'static str,
    pub primary: &'static str,
    pub glow: &'static str,
    pub trail: &'static str,
    pub cost: u64,
}

impl BeamColor {
    /// The default beam takes on the current level's theme color
    pub fn follows_level_color(&self) -> bool {
        self.id == DEFAULT_BEAM_COLOR
    }
}

pub static BEAM_COLORS: [BeamColor; 6] = [
    BeamColor {
        id: "default",
        name: "Level Color",
        primary: "#00d9ff",
        glow: "#00d9ff88",
        trail: "#00d9ff",
        cost: 0,
    },
    BeamColor {
        id: "plasma",
        name: "Red Plasma",
        primary: "#ff4444",
        glow: "#ff444488",
        trail: "#ff4444",
        cost: 600,
    },
    BeamColor {
        id: "energy",
        name: "Green Energy",
        primary: "#44ff44",
        glow: "#44ff4488",
        trail: "#44ff44",
        cost: 600,
    },
    BeamColor {
        id: "void",
        name: "Purple Void",
        primary: "#aa44ff",
        glow: "#aa44ff88",
        trail: "#aa44ff",
        cost: 600,
    },
    BeamColor {
        id: "sun",
        name: "Golden Sun",
        primary: "#ffcc00",
        glow: "#ffcc0088",
        trail: "#ffcc00",
        cost: 600,
    },
    BeamColor {
        id: "white",
        name: "White Hot",
        primary: "#ffffff",
        glow: "#ffffff88",
        trail: "#ffffff",
        cost: 600,
    },
];

/// Equipped weapon behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FiringMode {
    #[default]
    Single,
    Double,
    Triple,
    #[serde(rename = "machinegun")]
    MachineGun,
}

impl FiringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FiringMode::Single => "single",
            FiringMode::Double => "double",
            FiringMode::Triple => "triple",
            FiringMode::MachineGun => "machinegun",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "single" => Some(FiringMode::Single),
            "double" => Some(FiringMode::Double),
            "triple" => Some(FiringMode::Triple),
            "machinegun" => Some(FiringMode::MachineGun),
            _ => None,
        }
    }

    /// Catalog entry for this mode
    pub fn config(&self) -> &'static FiringModeConfig {
        FIRING_MODES
            .iter()
            .find(|m| m.id == *self)
            .unwrap_or(&FIRING_MODES[0])
    }
}

/// Projectile geometry for a volley
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolleyShape {
    /// One projectile straight ahead
    Single,
    /// Two projectiles side by side, both straight ahead
    ParallelPair,
    /// `count` projectiles fanned across `spread_degrees` either side of center
    Fan { count: u32, spread_degrees: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FiringModeConfig {
    pub id: FiringMode,
    pub name: &'static str,
    pub description: &'static str,
    pub projectile_count: u32,
    /// Degrees between adjacent fan projectiles
    pub spread_angle: f32,
    pub fire_rate_multiplier: f32,
    pub damage_multiplier: f32,
    pub cost: u64,
}

impl FiringModeConfig {
    pub fn volley(&self) -> VolleyShape {
        match self.projectile_count {
            0 | 1 => VolleyShape::Single,
            2 if self.spread_angle == 0.0 => VolleyShape::ParallelPair,
            count => VolleyShape::Fan {
                count,
                spread_degrees: self.spread_angle,
            },
        }
    }
}

pub static FIRING_MODES: [FiringModeConfig; 4] = [
    FiringModeConfig {
        id: FiringMode::Single,
        name: "Single Shot",
        description: "Standard single projectile",
        projectile_count: 1,
        spread_angle: 0.0,
        fire_rate_multiplier: 1.0,
        damage_multiplier: 1.0,
        cost: 0,
    },
    FiringModeConfig {
        id: FiringMode::Double,
        name: "Double Shot",
        description: "Fire two parallel beams",
        projectile_count: 2,
        spread_angle: 0.0,
        fire_rate_multiplier: 1.0,
        damage_multiplier: 0.7,
        cost: 2000,
    },
    FiringModeConfig {
        id: FiringMode::Triple,
        name: "Triple Spread",
        description: "Three beams in a fan pattern",
        projectile_count: 3,
        spread_angle: 15.0,
        fire_rate_multiplier: 0.9,
        damage_multiplier: 0.5,
        cost: 5000,
    },
    FiringModeConfig {
        id: FiringMode::MachineGun,
        name: "Machine Gun",
        description: "Rapid fire with reduced damage",
        projectile_count: 1,
        spread_angle: 0.0,
        fire_rate_multiplier: 3.0,
        damage_multiplier: 0.4,
        cost: 8000,
    },
];

pub const DEFAULT_ROCKET_COLOR: &str = "default";
pub const DEFAULT_ROCKET_SHAPE: &str = "classic";
pub const DEFAULT_BEAM_COLOR: &str = "default";

pub fn rocket_color(id: &str) -> Option<&'static RocketColor> {
    ROCKET_COLORS.iter().find(|c| c.id == id)
}

pub fn rocket_shape(id: &str) -> Option<&'static RocketShape> {
    ROCKET_SHAPES.iter().find(|s| s.id == id)
}

pub fn beam_color(id: &str) -> Option<&'static BeamColor> {
    BEAM_COLORS.iter().find(|c| c.id == id)
}
