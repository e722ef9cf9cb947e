//! Whole-session flows: stages, screens, upgrades and persistence together

use pizza_delivery::game::ActiveStage;
use pizza_delivery::sim::{ControlSignals, FlightMode, StageEvent};
use pizza_delivery::tables::FINAL_LEVEL;
use pizza_delivery::upgrades::{Category, KeyValueStore, MemoryStore, PurchaseOutcome, store};
use pizza_delivery::{Bounds, Game, Progression, Screen, Tuning, UpgradeState};

fn quiet_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    tuning.flight.spawn_rate_scale = 0.0;
    tuning.boss.victory_delay_ms = 50.0;
    tuning
}

fn idle() -> ControlSignals {
    ControlSignals::default()
}

/// Jump the live flight stage to its finish line
fn finish_flight(game: &mut Game) -> Vec<StageEvent> {
    if let Some(ActiveStage::Flight(stage)) = game.stage_mut() {
        stage.distance = stage.level_config().distance;
    }
    game.tick(&idle(), 16.0)
}

/// Knock out the live boss and wait out the banner
fn win_boss_fight(game: &mut Game) {
    if let Some(ActiveStage::Boss(stage)) = game.stage_mut() {
        stage.boss.health = 0.5;
        let center = stage.boss.center();
        stage.projectiles.push(pizza_delivery::sim::Projectile {
            pos: center,
            vel: glam::Vec2::ZERO,
            radius: 5.0,
            damage: 1.0,
            color: "#fff",
            faction: pizza_delivery::sim::Faction::Player,
        });
    }
    for _ in 0..10 {
        game.tick(&idle(), 16.0);
    }
}

#[test]
fn campaign_runs_from_start_to_galaxy_map() {
    let mut game = Game::new(UpgradeState::default(), quiet_tuning(), Bounds::default(), 11);
    assert!(game.start(FlightMode::Campaign));
    assert_eq!(game.screen(), Screen::Flight { level: 0 });

    let events = finish_flight(&mut game);
    assert_eq!(events, vec![StageEvent::BossReached { level: 0, score: 0 }]);
    assert_eq!(game.screen(), Screen::Boss { level: 0 });

    win_boss_fight(&mut game);
    assert_eq!(game.screen(), Screen::GalaxyMap);
    assert_eq!(game.progression().completed_levels(), &[0]);
    assert_eq!(game.upgrades().available_points, 5000);

    // Spend the bonus on the upgrade layer, then fly on with it equipped
    assert_eq!(
        game.purchase(Category::FiringMode, "double"),
        PurchaseOutcome::Purchased
    );
    assert!(game.continue_journey());
    assert_eq!(game.screen(), Screen::Flight { level: 1 });

    let shoot = ControlSignals {
        shoot: true,
        ..Default::default()
    };
    game.tick(&shoot, 16.0);
    match game.stage() {
        Some(ActiveStage::Flight(stage)) => assert_eq!(stage.projectiles.len(), 2),
        _ => panic!("expected a flight stage"),
    }
}

#[test]
fn final_boss_leads_to_victory() {
    let mut progression = Progression::new();
    progression.start(FlightMode::Campaign);
    for level in 0..FINAL_LEVEL {
        progression.handle(&StageEvent::BossReached { level, score: 0 });
        progression.handle(&StageEvent::BossDefeated { score: 0 });
        assert!(progression.continue_journey());
    }
    progression.handle(&StageEvent::BossReached {
        level: FINAL_LEVEL,
        score: 123,
    });
    progression.handle(&StageEvent::BossDefeated { score: 99_999 });
    assert_eq!(progression.screen(), Screen::Victory { score: 99_999 });
    assert_eq!(progression.completed_levels().len(), FINAL_LEVEL + 1);
}

#[test]
fn death_then_continue_restarts_the_level() {
    let mut game = Game::new(UpgradeState::default(), quiet_tuning(), Bounds::default(), 3);
    game.start(FlightMode::Campaign);

    if let Some(ActiveStage::Flight(stage)) = game.stage_mut() {
        stage.lives = 1;
        stage.score = 640;
        let center = stage.player.center();
        stage.asteroids.push(pizza_delivery::sim::Asteroid {
            pos: center,
            radius: 20.0,
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            vertices: vec![1.0; 8],
            health: 10.0,
            max_health: 10.0,
            size: pizza_delivery::sim::SizeClass::Small,
        });
    }
    game.tick(&idle(), 16.0);
    assert_eq!(game.screen(), Screen::GameOver { score: 640 });
    assert!(game.stage().is_none());

    assert!(game.continue_from_here());
    assert_eq!(game.screen(), Screen::Flight { level: 0 });
    match game.stage() {
        Some(ActiveStage::Flight(stage)) => {
            assert_eq!(stage.score, 0);
            assert_eq!(stage.lives, 3);
        }
        _ => panic!("expected a flight stage"),
    }

    game.main_menu();
    assert_eq!(game.screen(), Screen::Start);
    assert!(game.stage().is_none());
}

#[test]
fn upgrades_survive_a_reload() {
    let mut backend = MemoryStore::new();
    let mut upgrades = store::load(&backend);
    upgrades.add_points(6000);
    upgrades.purchase(Category::BeamColor, "plasma");
    store::save(&mut backend, &upgrades).unwrap();

    let reloaded = store::load(&backend);
    assert_eq!(reloaded, upgrades);
    assert!(reloaded.is_unlocked(Category::BeamColor, "default"));
    assert_eq!(reloaded.equipped(Category::BeamColor), "plasma");

    backend
        .set(store::STORAGE_KEY, r#"{"totalPoints": "lots"}"#)
        .unwrap();
    assert_eq!(store::load(&backend), UpgradeState::default());
}

#[test]
fn classic_continue_keeps_the_banked_score() {
    let mut tuning = quiet_tuning();
    tuning.flight.level_banner_ms = 50.0;
    let mut game = Game::new(UpgradeState::default(), tuning, Bounds::default(), 5);
    game.start(FlightMode::Classic);

    if let Some(ActiveStage::Flight(stage)) = game.stage_mut() {
        stage.score = 9000;
    }
    let events = finish_flight(&mut game);
    assert_eq!(
        events,
        vec![StageEvent::LevelAdvanced {
            level: 1,
            score: 9000
        }]
    );
    assert_eq!(game.screen(), Screen::Flight { level: 1 });
    assert_eq!(game.progression().score(), 9000);

    // Let the level banner clear, then crash on the last life
    for _ in 0..5 {
        game.tick(&idle(), 16.0);
    }
    if let Some(ActiveStage::Flight(stage)) = game.stage_mut() {
        stage.lives = 1;
        let center = stage.player.center();
        stage.asteroids.push(pizza_delivery::sim::Asteroid {
            pos: center,
            radius: 20.0,
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            vertices: vec![1.0; 8],
            health: 10.0,
            max_health: 10.0,
            size: pizza_delivery::sim::SizeClass::Small,
        });
    }
    game.tick(&idle(), 16.0);
    assert_eq!(game.screen(), Screen::GameOver { score: 9000 });

    assert!(game.continue_from_here());
    assert_eq!(game.screen(), Screen::Flight { level: 1 });
    match game.stage() {
        Some(ActiveStage::Flight(stage)) => {
            assert_eq!(stage.level(), 1);
            assert_eq!(stage.score, 9000);
        }
        _ => panic!("expected a flight stage"),
    }
}
