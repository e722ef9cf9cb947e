//! Persisted upgrade record and the purchase/equip/reset rules over it
//!
//! Invariants kept by every mutation:
//! - each equipped id is a member of its category's unlock set
//! - speed tiers are bought strictly in order (tier N needs N-1)
//! - a rejected action leaves the record untouched

use serde::{Deserialize, Serialize};

use super::catalog::{
    self, BEAM_SPEED_TIERS, DEFAULT_BEAM_COLOR, DEFAULT_ROCKET_COLOR, DEFAULT_ROCKET_SHAPE,
    FiringMode, ROCKET_SPEED_TIERS, UpgradeTier,
};

/// Tiered (ordered) upgrade tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTrack {
    Rocket,
    Beam,
}

impl SpeedTrack {
    pub fn tiers(&self) -> &'static [UpgradeTier] {
        match self {
            SpeedTrack::Rocket => &ROCKET_SPEED_TIERS,
            SpeedTrack::Beam => &BEAM_SPEED_TIERS,
        }
    }
}

/// Unlock-then-equip categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    RocketColor,
    RocketShape,
    BeamColor,
    FiringMode,
}

impl Category {
    /// Id that is always unlocked and equipped after a reset
    pub fn default_id(&self) -> &'static str {
        match self {
            Category::RocketColor => DEFAULT_ROCKET_COLOR,
            Category::RocketShape => DEFAULT_ROCKET_SHAPE,
            Category::BeamColor => DEFAULT_BEAM_COLOR,
            Category::FiringMode => FiringMode::default().as_str(),
        }
    }

    /// Catalog price of `id`, or None if the catalog has no such item
    pub fn cost_of(&self, id: &str) -> Option<u64> {
        match self {
            Category::RocketColor => catalog::rocket_color(id).map(|c| c.cost),
            Category::RocketShape => catalog::rocket_shape(id).map(|s| s.cost),
            Category::BeamColor => catalog::beam_color(id).map(|c| c.cost),
            Category::FiringMode => FiringMode::from_str(id).map(|m| m.config().cost),
        }
    }
}

/// Result of a purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Points deducted, item unlocked and equipped
    Purchased,
    /// Item was already unlocked; it is now equipped
    Equipped,
    /// Tier is already owned
    AlreadyOwned,
    /// Previous tier not owned yet
    OutOfOrder,
    Unaffordable,
    UnknownItem,
}

impl PurchaseOutcome {
    /// Whether the attempt went through (purchase or equip)
    pub fn accepted(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased | PurchaseOutcome::Equipped)
    }
}

/// Everything the upgrade layer persists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpgradeState {
    pub total_points: u64,
    pub available_points: u64,

    pub rocket_speed_tier: usize,
    pub rocket_color_id: String,
    pub rocket_shape_id: String,

    pub beam_speed_tier: usize,
    pub beam_color_id: String,
    pub firing_mode: FiringMode,

    pub unlocked_rocket_colors: Vec<String>,
    pub unlocked_rocket_shapes: Vec<String>,
    pub unlocked_beam_colors: Vec<String>,
    pub unlocked_firing_modes: Vec<FiringMode>,
}

impl Default for UpgradeState {
    fn default() -> Self {
        Self {
            total_points: 0,
            available_points: 0,
            rocket_speed_tier: 0,
            rocket_color_id: DEFAULT_ROCKET_COLOR.to_string(),
            rocket_shape_id: DEFAULT_ROCKET_SHAPE.to_string(),
            beam_speed_tier: 0,
            beam_color_id: DEFAULT_BEAM_COLOR.to_string(),
            firing_mode: FiringMode::default(),
            unlocked_rocket_colors: vec![DEFAULT_ROCKET_COLOR.to_string()],
            unlocked_rocket_shapes: vec![DEFAULT_ROCKET_SHAPE.to_string()],
            unlocked_beam_colors: vec![DEFAULT_BEAM_COLOR.to_string()],
            unlocked_firing_modes: vec![FiringMode::default()],
        }
    }
}

impl UpgradeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit points earned in play
    pub fn add_points(&mut self, amount: u64) {
        self.total_points = self.total_points.saturating_add(amount);
        self.available_points = self.available_points.saturating_add(amount);
    }

    pub fn tier(&self, track: SpeedTrack) -> usize {
        match track {
            SpeedTrack::Rocket => self.rocket_speed_tier,
            SpeedTrack::Beam => self.beam_speed_tier,
        }
    }

    fn tier_mut(&mut self, track: SpeedTrack) -> &mut usize {
        match track {
            SpeedTrack::Rocket => &mut self.rocket_speed_tier,
            SpeedTrack::Beam => &mut self.beam_speed_tier,
        }
    }

    /// Buy the next speed tier on `track`
    pub fn purchase_tier(&mut self, track: SpeedTrack, tier: usize) -> PurchaseOutcome {
        let Some(config) = track.tiers().get(tier) else {
            return PurchaseOutcome::UnknownItem;
        };
        let current = self.tier(track);
        if current >= tier {
            return PurchaseOutcome::AlreadyOwned;
        }
        if current + 1 < tier {
            return PurchaseOutcome::OutOfOrder;
        }
        if self.available_points < config.cost {
            return PurchaseOutcome::Unaffordable;
        }

        self.available_points -= config.cost;
        *self.tier_mut(track) = tier;
        log::info!("Purchased {:?} speed tier {} ({})", track, tier, config.name);
        PurchaseOutcome::Purchased
    }

    /// Equipped id for a category
    pub fn equipped(&self, category: Category) -> &str {
        match category {
            Category::RocketColor => &self.rocket_color_id,
            Category::RocketShape => &self.rocket_shape_id,
            Category::BeamColor => &self.beam_color_id,
            Category::FiringMode => self.firing_mode.as_str(),
        }
    }

    pub fn is_unlocked(&self, category: Category, id: &str) -> bool {
        match category {
            Category::RocketColor => self.unlocked_rocket_colors.iter().any(|c| c == id),
            Category::RocketShape => self.unlocked_rocket_shapes.iter().any(|s| s == id),
            Category::BeamColor => self.unlocked_beam_colors.iter().any(|c| c == id),
            Category::FiringMode => FiringMode::from_str(id)
                .is_some_and(|mode| self.unlocked_firing_modes.contains(&mode)),
        }
    }

    /// Unlock and equip `id`, or just equip it if it is already unlocked
    pub fn purchase(&mut self, category: Category, id: &str) -> PurchaseOutcome {
        let Some(cost) = category.cost_of(id) else {
            return PurchaseOutcome::UnknownItem;
        };
        if self.is_unlocked(category, id) {
            self.set_equipped(category, id);
            return PurchaseOutcome::Equipped;
        }
        if self.available_points < cost {
            return PurchaseOutcome::Unaffordable;
        }

        self.available_points -= cost;
        self.unlock(category, id);
        self.set_equipped(category, id);
        log::info!("Purchased {:?} '{}' for {} points", category, id, cost);
        PurchaseOutcome::Purchased
    }

    /// Equip an already unlocked item. Returns false (and changes nothing) otherwise.
    pub fn equip(&mut self, category: Category, id: &str) -> bool {
        if !self.is_unlocked(category, id) {
            return false;
        }
        self.set_equipped(category, id);
        true
    }

    /// Full respec: refund every spent point and restore default selections
    pub fn reset(&mut self) {
        let total = self.total_points;
        *self = Self {
            total_points: total,
            available_points: total,
            ..Self::default()
        };
        log::info!("Upgrades reset, {} points refunded", total);
    }

    /// Repair a record read from storage: default items are always unlocked,
    /// duplicate and unknown unlocks are dropped, tiers are clamped to the
    /// catalog, and any equipped id that is not unlocked falls back to default.
    pub fn normalize(&mut self) {
        normalize_unlocks(&mut self.unlocked_rocket_colors, DEFAULT_ROCKET_COLOR, |id| {
            catalog::rocket_color(id).is_some()
        });
        normalize_unlocks(&mut self.unlocked_rocket_shapes, DEFAULT_ROCKET_SHAPE, |id| {
            catalog::rocket_shape(id).is_some()
        });
        normalize_unlocks(&mut self.unlocked_beam_colors, DEFAULT_BEAM_COLOR, |id| {
            catalog::beam_color(id).is_some()
        });

        let mut modes = vec![FiringMode::default()];
        for mode in self.unlocked_firing_modes.drain(..) {
            if !modes.contains(&mode) {
                modes.push(mode);
            }
        }
        self.unlocked_firing_modes = modes;

        self.rocket_speed_tier = self.rocket_speed_tier.min(ROCKET_SPEED_TIERS.len() - 1);
        self.beam_speed_tier = self.beam_speed_tier.min(BEAM_SPEED_TIERS.len() - 1);

        for category in [
            Category::RocketColor,
            Category::RocketShape,
            Category::BeamColor,
            Category::FiringMode,
        ] {
            let equipped = self.equipped(category).to_string();
            if !self.is_unlocked(category, &equipped) {
                log::warn!(
                    "Equipped {:?} '{}' is not unlocked, reverting to default",
                    category,
                    equipped
                );
                self.set_equipped(category, category.default_id());
            }
        }
    }

    fn unlock(&mut self, category: Category, id: &str) {
        match category {
            Category::RocketColor => self.unlocked_rocket_colors.push(id.to_string()),
            Category::RocketShape => self.unlocked_rocket_shapes.push(id.to_string()),
            Category::BeamColor => self.unlocked_beam_colors.push(id.to_string()),
            Category::FiringMode => {
                if let Some(mode) = FiringMode::from_str(id) {
                    self.unlocked_firing_modes.push(mode);
                }
            }
        }
    }

    fn set_equipped(&mut self, category: Category, id: &str) {
        match category {
            Category::RocketColor => self.rocket_color_id = id.to_string(),
            Category::RocketShape => self.rocket_shape_id = id.to_string(),
            Category::BeamColor => self.beam_color_id = id.to_string(),
            Category::FiringMode => {
                if let Some(mode) = FiringMode::from_str(id) {
                    self.firing_mode = mode;
                }
            }
        }
    }
}

fn normalize_unlocks(list: &mut Vec<String>, default_id: &str, known: impl Fn(&str) -> bool) {
    let mut out = vec![default_id.to_string()];
    for id in list.drain(..) {
        if known(&id) && !out.contains(&id) {
            out.push(id);
        }
    }
    *list = out;
}
