//! Session driver
//!
//! Owns the progression state machine, the upgrade record and whichever stage
//! is live. The host calls [`Game::tick`] once per animation frame with the
//! current control signals; everything else is a menu action.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::Bounds;
use crate::progression::{Progression, Screen};
use crate::sim::{
    BossConfig, BossSnapshot, BossStage, ControlSignals, FlightConfig, FlightMode,
    FlightSnapshot, FlightStage, StageEvent,
};
use crate::tuning::Tuning;
use crate::upgrades::{AppliedStats, Category, PurchaseOutcome, SpeedTrack, UpgradeState};

/// The stage currently simulating
#[derive(Debug)]
pub enum ActiveStage {
    Flight(FlightStage),
    Boss(BossStage),
}

impl ActiveStage {
    fn tick(&mut self, input: &ControlSignals, dt_ms: f32) {
        match self {
            ActiveStage::Flight(stage) => stage.tick(input, dt_ms),
            ActiveStage::Boss(stage) => stage.tick(input, dt_ms),
        }
    }

    fn take_events(&mut self) -> Vec<StageEvent> {
        match self {
            ActiveStage::Flight(stage) => stage.take_events(),
            ActiveStage::Boss(stage) => stage.take_events(),
        }
    }

    fn teardown(&mut self) {
        match self {
            ActiveStage::Flight(stage) => stage.teardown(),
            ActiveStage::Boss(stage) => stage.teardown(),
        }
    }

    /// True if this stage is live and is what `screen` shows
    fn matches(&self, screen: Screen) -> bool {
        match (self, screen) {
            (ActiveStage::Flight(stage), Screen::Flight { level }) => {
                stage.level() == level && !stage.is_over()
            }
            (ActiveStage::Boss(stage), Screen::Boss { level }) => {
                stage.level() == level && !stage.is_over()
            }
            _ => false,
        }
    }
}

/// Everything the HUD shows for a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HudSnapshot {
    pub screen: Screen,
    pub paused: bool,
    pub total_points: u64,
    pub available_points: u64,
    pub flight: Option<FlightSnapshot>,
    pub boss: Option<BossSnapshot>,
}

#[derive(Debug)]
pub struct Game {
    progression: Progression,
    upgrades: UpgradeState,
    tuning: Tuning,
    bounds: Bounds,
    seed: u64,
    stages_started: u64,
    stage: Option<ActiveStage>,
    paused: bool,
    upgrades_dirty: bool,
}

impl Game {
    pub fn new(upgrades: UpgradeState, tuning: Tuning, bounds: Bounds, seed: u64) -> Self {
        Self {
            progression: Progression::new(),
            upgrades,
            tuning,
            bounds,
            seed,
            stages_started: 0,
            stage: None,
            paused: false,
            upgrades_dirty: false,
        }
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn screen(&self) -> Screen {
        self.progression.screen()
    }

    pub fn upgrades(&self) -> &UpgradeState {
        &self.upgrades
    }

    pub fn stage(&self) -> Option<&ActiveStage> {
        self.stage.as_ref()
    }

    pub fn stage_mut(&mut self) -> Option<&mut ActiveStage> {
        self.stage.as_mut()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze or unfreeze the live stage. Nothing to freeze outside a stage.
    pub fn set_paused(&mut self, paused: bool) {
        let paused = paused && self.stage.is_some();
        if paused != self.paused {
            log::info!("{}", if paused { "Paused" } else { "Resumed" });
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Returns true once after the upgrade record changed, so the host can save it
    pub fn take_upgrades_dirty(&mut self) -> bool {
        std::mem::take(&mut self.upgrades_dirty)
    }

    /// Advance the live stage one frame and route what it reports.
    /// Returns the events for the host's own bookkeeping.
    pub fn tick(&mut self, input: &ControlSignals, dt_ms: f32) -> Vec<StageEvent> {
        if self.paused {
            return Vec::new();
        }
        let Some(stage) = self.stage.as_mut() else {
            return Vec::new();
        };

        stage.tick(input, dt_ms);
        let events = stage.take_events();

        let mut screen_changed = false;
        for event in &events {
            if let StageEvent::PointsEarned { amount } = event {
                self.upgrades.add_points(*amount);
                self.upgrades_dirty = true;
            }
            screen_changed |= self.progression.handle(event);
        }
        if screen_changed {
            self.sync_stage();
        }
        events
    }

    pub fn start(&mut self, mode: FlightMode) -> bool {
        let started = self.progression.start(mode);
        self.sync_stage();
        started
    }

    pub fn continue_from_here(&mut self) -> bool {
        let ok = self.progression.continue_from_here();
        self.sync_stage();
        ok
    }

    pub fn main_menu(&mut self) {
        self.progression.main_menu();
        self.sync_stage();
    }

    pub fn select_level(&mut self, level: usize) -> bool {
        let ok = self.progression.select_level(level);
        self.sync_stage();
        ok
    }

    pub fn continue_journey(&mut self) -> bool {
        let ok = self.progression.continue_journey();
        self.sync_stage();
        ok
    }

    pub fn purchase(&mut self, category: Category, id: &str) -> PurchaseOutcome {
        let outcome = self.upgrades.purchase(category, id);
        self.note_upgrade(outcome, id);
        outcome
    }

    pub fn purchase_tier(&mut self, track: SpeedTrack, tier: usize) -> PurchaseOutcome {
        let outcome = self.upgrades.purchase_tier(track, tier);
        self.note_upgrade(outcome, &format!("{:?} tier {}", track, tier));
        outcome
    }

    pub fn equip(&mut self, category: Category, id: &str) -> bool {
        let equipped = self.upgrades.equip(category, id);
        self.upgrades_dirty |= equipped;
        equipped
    }

    /// Full respec
    pub fn reset_upgrades(&mut self) {
        self.upgrades.reset();
        self.upgrades_dirty = true;
        log::info!(
            "Upgrades reset, {} points available",
            self.upgrades.available_points
        );
    }

    fn note_upgrade(&mut self, outcome: PurchaseOutcome, item: &str) {
        if outcome.accepted() {
            self.upgrades_dirty = true;
            log::debug!(
                "Upgrade {}: {:?} ({} points left)",
                item,
                outcome,
                self.upgrades.available_points
            );
        } else {
            log::warn!("Upgrade {} rejected: {:?}", item, outcome);
        }
    }

    /// Make the live stage match the screen, tearing down whatever it replaces
    fn sync_stage(&mut self) {
        let screen = self.progression.screen();
        if self.stage.as_ref().is_some_and(|s| s.matches(screen)) {
            return;
        }

        if let Some(mut old) = self.stage.take() {
            old.teardown();
        }
        self.paused = false;

        self.stage = match screen {
            Screen::Flight { level } => {
                let config = FlightConfig {
                    level,
                    mode: self.progression.mode(),
                    starting_score: self.progression.score(),
                    bounds: self.bounds,
                };
                let stats = AppliedStats::derive(&self.upgrades);
                let rng = self.next_rng();
                Some(ActiveStage::Flight(FlightStage::new(
                    config,
                    &self.tuning,
                    stats,
                    rng,
                )))
            }
            Screen::Boss { level } => {
                let config = BossConfig {
                    level,
                    starting_score: self.progression.score(),
                    bounds: self.bounds,
                };
                let rng = self.next_rng();
                Some(ActiveStage::Boss(BossStage::new(config, &self.tuning, rng)))
            }
            _ => None,
        };
    }

    /// Independent generator per stage, reproducible from the session seed
    fn next_rng(&mut self) -> Pcg32 {
        self.stages_started += 1;
        let seed = self
            .seed
            .wrapping_add(self.stages_started.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Pcg32::seed_from_u64(seed)
    }

    pub fn snapshot(&self) -> HudSnapshot {
        let (flight, boss) = match &self.stage {
            Some(ActiveStage::Flight(stage)) => (Some(stage.snapshot()), None),
            Some(ActiveStage::Boss(stage)) => (None, Some(stage.snapshot())),
            None => (None, None),
        };
        HudSnapshot {
            screen: self.progression.screen(),
            paused: self.paused,
            total_points: self.upgrades.total_points,
            available_points: self.upgrades.available_points,
            flight,
            boss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_game() -> Game {
        let mut tuning = Tuning::default();
        tuning.flight.spawn_rate_scale = 0.0;
        tuning.boss.victory_delay_ms = 100.0;
        Game::new(UpgradeState::default(), tuning, Bounds::default(), 5)
    }

    fn flight_mut(game: &mut Game) -> &mut FlightStage {
        match game.stage.as_mut() {
            Some(ActiveStage::Flight(stage)) => stage,
            _ => panic!("expected flight stage"),
        }
    }

    fn boss_mut(game: &mut Game) -> &mut BossStage {
        match game.stage.as_mut() {
            Some(ActiveStage::Boss(stage)) => stage,
            _ => panic!("expected boss stage"),
        }
    }

    #[test]
    fn test_no_stage_on_start_screen() {
        let mut game = quiet_game();
        assert!(game.stage().is_none());
        assert!(game.tick(&ControlSignals::default(), 16.0).is_empty());
        game.set_paused(true);
        assert!(!game.is_paused());
    }

    #[test]
    fn test_flight_to_boss_handoff_carries_score() {
        let mut game = quiet_game();
        game.start(FlightMode::Campaign);
        let flight = flight_mut(&mut game);
        flight.score = 4321;
        flight.distance = flight.level_config().distance;

        let events = game.tick(&ControlSignals::default(), 16.0);
        assert_eq!(
            events,
            vec![StageEvent::BossReached {
                level: 0,
                score: 4321
            }]
        );
        assert_eq!(game.screen(), Screen::Boss { level: 0 });
        assert_eq!(boss_mut(&mut game).score, 4321);
    }

    #[test]
    fn test_boss_win_credits_points_and_opens_map() {
        let mut game = quiet_game();
        game.start(FlightMode::Campaign);
        let flight = flight_mut(&mut game);
        flight.distance = flight.level_config().distance;
        game.tick(&ControlSignals::default(), 16.0);

        let boss = boss_mut(&mut game);
        boss.boss.health = 1.0;
        let center = boss.boss.center();
        boss.projectiles.push(crate::sim::Projectile {
            pos: center,
            vel: glam::Vec2::ZERO,
            radius: 5.0,
            damage: 8.0,
            color: "#fff",
            faction: crate::sim::Faction::Player,
        });
        game.tick(&ControlSignals::default(), 16.0);
        assert_eq!(game.upgrades().total_points, 5000);
        assert!(game.take_upgrades_dirty());
        assert!(!game.take_upgrades_dirty());

        for _ in 0..10 {
            game.tick(&ControlSignals::default(), 16.0);
        }
        assert_eq!(game.screen(), Screen::GalaxyMap);
        assert!(game.stage().is_none());
        assert_eq!(game.progression().score(), 5010);
    }

    #[test]
    fn test_pause_freezes_stage() {
        let mut game = quiet_game();
        game.start(FlightMode::Campaign);
        game.toggle_pause();
        assert!(game.is_paused());
        game.tick(&ControlSignals::default(), 16.0);
        assert_eq!(flight_mut(&mut game).distance, 0.0);
        game.toggle_pause();
        game.tick(&ControlSignals::default(), 16.0);
        assert!(flight_mut(&mut game).distance > 0.0);
        assert!(game.snapshot().flight.is_some());
    }

    #[test]
    fn test_purchases_mark_dirty() {
        let mut game = quiet_game();
        assert_eq!(
            game.purchase(Category::FiringMode, "double"),
            PurchaseOutcome::Unaffordable
        );
        assert!(!game.take_upgrades_dirty());
        game.reset_upgrades();
        assert!(game.take_upgrades_dirty());
    }

    #[test]
    fn test_classic_level_advance_keeps_stage() {
        let mut game = quiet_game();
        game.start(FlightMode::Classic);
        let flight = flight_mut(&mut game);
        flight.score = 900;
        flight.distance = flight.level_config().distance;
        game.tick(&ControlSignals::default(), 16.0);

        assert_eq!(game.screen(), Screen::Flight { level: 1 });
        let flight = flight_mut(&mut game);
        assert_eq!(flight.level(), 1);
        assert_eq!(flight.score, 900);
    }
}
