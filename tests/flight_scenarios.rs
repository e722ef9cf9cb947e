//! Flight stage scenarios driven through the public API

use glam::Vec2;
use pizza_delivery::AppliedStats;
use pizza_delivery::Tuning;
use pizza_delivery::sim::{
    Asteroid, ControlSignals, Faction, FlightConfig, FlightStage, Projectile, SizeClass,
    StageEvent,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn quiet_stage(level: usize) -> FlightStage {
    let mut tuning = Tuning::default();
    tuning.flight.spawn_rate_scale = 0.0;
    FlightStage::new(
        FlightConfig::new(level),
        &tuning,
        AppliedStats::default(),
        Pcg32::seed_from_u64(1234),
    )
}

fn idle() -> ControlSignals {
    ControlSignals::default()
}

fn still_rock(pos: Vec2, size: SizeClass) -> Asteroid {
    let health = size.health(0);
    Asteroid {
        pos,
        radius: 20.0,
        speed: 0.0,
        rotation: 0.0,
        rotation_speed: 0.0,
        vertices: vec![0.85; 9],
        health,
        max_health: health,
        size,
    }
}

fn shot(pos: Vec2, damage: f32) -> Projectile {
    Projectile {
        pos,
        vel: Vec2::ZERO,
        radius: 4.0,
        damage,
        color: "#00d9ff",
        faction: Faction::Player,
    }
}

#[test]
fn asteroid_destroyed_by_cumulative_damage_scores_once() {
    let mut stage = quiet_stage(0);
    let target = Vec2::new(500.0, 100.0);
    stage.asteroids.push(still_rock(target, SizeClass::Medium));

    // 25 health: the second of three 13-damage hits finishes it
    for _ in 0..3 {
        stage.projectiles.push(shot(target, 13.0));
    }
    stage.tick(&idle(), 16.0);

    assert!(stage.asteroids.is_empty());
    assert_eq!(stage.score, 250);
    assert_eq!(stage.kills, 1);
    assert_eq!(
        stage.take_events(),
        vec![StageEvent::PointsEarned { amount: 250 }]
    );
    // The third projectile had nothing left to hit
    assert_eq!(stage.projectiles.len(), 1);

    stage.tick(&idle(), 16.0);
    assert_eq!(stage.score, 250);
    assert!(stage.take_events().is_empty());
}

#[test]
fn last_life_emits_game_over_once_and_freezes_score() {
    let mut stage = quiet_stage(0);
    stage.lives = 1;
    stage.score = 3200;
    let center = stage.player.center();
    stage.asteroids.push(still_rock(center, SizeClass::Small));

    stage.tick(&idle(), 16.0);
    assert_eq!(stage.take_events(), vec![StageEvent::GameOver { score: 3200 }]);
    assert_eq!(stage.lives, 0);

    // Nothing moves the score afterwards, even with a kill lined up
    let target = Vec2::new(500.0, 100.0);
    stage.asteroids.push(still_rock(target, SizeClass::Small));
    stage.projectiles.push(shot(target, 50.0));
    for _ in 0..30 {
        stage.tick(&idle(), 16.0);
    }
    assert!(stage.take_events().is_empty());
    assert_eq!(stage.score, 3200);
}

#[test]
fn level_completion_fires_exactly_once() {
    let mut stage = quiet_stage(2);
    let goal = stage.level_config().distance;
    stage.distance = goal - 1.0;
    stage.score = 800;

    // 0.5 per frame: the first tick falls short
    stage.tick(&idle(), 16.0);
    assert!(stage.take_events().is_empty());

    stage.tick(&idle(), 16.0);
    assert_eq!(
        stage.take_events(),
        vec![StageEvent::BossReached {
            level: 2,
            score: 800
        }]
    );

    for _ in 0..5 {
        stage.tick(&idle(), 16.0);
    }
    assert!(stage.take_events().is_empty());
    assert!(stage.is_over());
}

#[test]
fn combo_resets_after_its_window() {
    let mut stage = quiet_stage(0);
    stage.combo = 3;
    stage.combo_timer = 12;

    for _ in 0..11 {
        stage.tick(&idle(), 16.0);
        assert_eq!(stage.combo, 3);
    }
    stage.tick(&idle(), 16.0);
    assert_eq!(stage.combo, 0);
    assert_eq!(stage.combo_timer, 0);

    stage.tick(&idle(), 16.0);
    assert_eq!(stage.combo, 0);
}

#[test]
fn boosting_covers_more_ground_and_burns_fuel() {
    let mut cruising = quiet_stage(0);
    let mut boosting = quiet_stage(0);
    let boost = ControlSignals {
        boost: true,
        ..Default::default()
    };
    for _ in 0..100 {
        cruising.tick(&idle(), 16.0);
        boosting.tick(&boost, 16.0);
    }
    assert!(boosting.distance > cruising.distance);
    assert!(boosting.fuel < cruising.fuel);
    assert_eq!(cruising.fuel, 100.0);
}

#[test]
fn ship_stays_on_screen() {
    let mut stage = quiet_stage(0);
    let up_left = ControlSignals {
        move_up: true,
        move_left: true,
        boost: true,
        ..Default::default()
    };
    for _ in 0..500 {
        stage.tick(&up_left, 16.0);
        assert!(stage.player.pos.x >= 20.0);
        assert!(stage.player.pos.y >= 20.0);
    }
}
