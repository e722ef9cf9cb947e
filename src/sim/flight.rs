//! Flight stage: one scrolling level of asteroids and star pickups
//!
//! The stage runs until the ship loses its last life or covers the level's
//! distance. In campaign mode reaching the distance hands over to the boss of
//! that level; in classic mode the stage moves on to the next level in place and
//! finishes with a victory after the last one.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision;
use super::entity::{Asteroid, Explosion, Faction, Player, Projectile, Star};
use super::events::StageEvent;
use super::input::ControlSignals;
use super::snapshot::FlightSnapshot;
use super::timer::{Cooldown, Deferred};
use crate::consts::{FLIGHT_LIVES, FUEL_MAX, MAX_FRAME_MS};
use crate::tables::{self, FINAL_LEVEL, LevelConfig};
use crate::tuning::{CollisionTuning, FlightTuning, Tuning};
use crate::upgrades::{AppliedStats, VolleyShape};
use crate::{Bounds, direction};

/// Projectiles this far past an edge are culled
const PROJECTILE_CULL_MARGIN: f32 = 50.0;

/// What happens when the level distance is covered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightMode {
    /// Hand over to the level's boss
    #[default]
    Campaign,
    /// No bosses: advance levels in place, victory after the last
    Classic,
}

/// Stage construction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightConfig {
    pub level: usize,
    pub mode: FlightMode,
    /// Score carried in from earlier stages
    pub starting_score: u64,
    pub bounds: Bounds,
}

impl FlightConfig {
    pub fn new(level: usize) -> Self {
        Self {
            level,
            mode: FlightMode::Campaign,
            starting_score: 0,
            bounds: Bounds::default(),
        }
    }
}

/// Lifecycle of a flight stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightStatus {
    Running,
    /// Classic mode level banner; time is frozen until it elapses
    LevelBanner,
    /// A terminal event was emitted
    Finished,
    TornDown,
}

#[derive(Debug)]
pub struct FlightStage {
    tuning: FlightTuning,
    collision: CollisionTuning,
    stats: AppliedStats,
    bounds: Bounds,
    mode: FlightMode,
    level: usize,
    rng: Pcg32,

    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub asteroids: Vec<Asteroid>,
    pub stars: Vec<Star>,
    pub explosions: Vec<Explosion>,

    pub score: u64,
    pub lives: u8,
    pub fuel: f32,
    pub distance: f32,
    pub combo: u32,
    /// Frames left before the combo resets
    pub combo_timer: u32,
    pub kills: u32,

    fire_cooldown: Cooldown,
    banner: Deferred,
    status: FlightStatus,
    events: Vec<StageEvent>,
}

impl FlightStage {
    pub fn new(config: FlightConfig, tuning: &Tuning, stats: AppliedStats, rng: Pcg32) -> Self {
        let flight = tuning.flight.clone();
        let player = Player::new(
            Vec2::new(flight.spawn_x, flight.spawn_y),
            flight.player_width,
            flight.player_height,
        );
        let level = config.level;
        if level > FINAL_LEVEL {
            log::warn!("Level {} out of range, using the first level's layout", level);
        }

        log::info!(
            "Flight stage start: level {} ({}), {:?}",
            level,
            tables::level(level).name,
            config.mode
        );

        Self {
            tuning: flight,
            collision: tuning.collision.clone(),
            stats,
            bounds: config.bounds,
            mode: config.mode,
            level,
            rng,
            player,
            projectiles: Vec::new(),
            asteroids: Vec::new(),
            stars: Vec::new(),
            explosions: Vec::new(),
            score: config.starting_score,
            lives: FLIGHT_LIVES,
            fuel: FUEL_MAX,
            distance: 0.0,
            combo: 0,
            combo_timer: 0,
            kills: 0,
            fire_cooldown: Cooldown::default(),
            banner: Deferred::default(),
            status: FlightStatus::Running,
            events: Vec::new(),
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn level_config(&self) -> &'static LevelConfig {
        tables::level(self.level)
    }

    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    pub fn status(&self) -> FlightStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, FlightStatus::Finished | FlightStatus::TornDown)
    }

    /// Drain events queued since the last call
    pub fn take_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    /// Stop the stage for good. Later ticks do nothing and no further events
    /// are queued.
    pub fn teardown(&mut self) {
        self.banner.cancel();
        self.status = FlightStatus::TornDown;
    }

    /// Advance one animation frame
    pub fn tick(&mut self, input: &ControlSignals, dt_ms: f32) {
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);

        match self.status {
            FlightStatus::Finished | FlightStatus::TornDown => return,
            FlightStatus::LevelBanner => {
                if self.banner.advance(dt_ms) {
                    log::debug!("Level banner done, resuming level {}", self.level);
                    self.status = FlightStatus::Running;
                }
                return;
            }
            FlightStatus::Running => {}
        }

        self.fire_cooldown.advance(dt_ms);

        self.update_player(input);
        self.player.tick_invincibility();
        self.decay_combo();

        if input.shoot {
            self.fire();
        }

        self.spawn();
        self.update_projectiles();
        self.update_asteroids();

        if self.status == FlightStatus::Running {
            self.update_stars();
            self.advance_distance();
        }

        self.update_explosions();
    }

    /// Movement, edge bounce and fuel
    fn update_player(&mut self, input: &ControlSignals) {
        let boosting = input.boost && self.fuel > 0.0;
        self.player.boosting = boosting;

        let mut multiplier = self.stats.rocket_speed_multiplier;
        if boosting {
            multiplier *= self.tuning.boost_multiplier;
        }

        self.player.integrate(
            input.thrust(),
            self.tuning.acceleration,
            multiplier,
            self.tuning.friction,
            self.tuning.max_speed,
        );

        let margin = self.tuning.edge_margin;
        let min = Vec2::splat(margin);
        let max = Vec2::new(
            (self.bounds.width - self.player.width - margin).max(margin),
            (self.bounds.height - self.player.height - margin).max(margin),
        );
        self.player.confine(min, max, Some(self.tuning.bounce));

        if boosting {
            self.fuel -= self.tuning.fuel_drain;
        } else {
            self.fuel += self.tuning.fuel_regen;
        }
        self.fuel = self.fuel.clamp(0.0, FUEL_MAX);
    }

    fn decay_combo(&mut self) {
        if self.combo_timer > 0 {
            self.combo_timer -= 1;
            if self.combo_timer == 0 {
                self.combo = 0;
            }
        }
    }

    /// Spawn a volley in the equipped firing mode if the cooldown allows
    fn fire(&mut self) {
        let mode = self.stats.firing_mode;
        let interval = self.tuning.fire_interval_ms / mode.fire_rate_multiplier.max(f32::EPSILON);
        if !self.fire_cooldown.try_trigger(interval) {
            return;
        }

        let speed = self.tuning.projectile_speed * self.stats.beam_speed_multiplier;
        let damage = self.tuning.projectile_damage * mode.damage_multiplier;
        let radius = self.tuning.projectile_radius;
        let color = self.stats.beam_color_for(self.level_config().color);
        let muzzle = self.player.muzzle();

        let shot = |pos: Vec2, angle: f32| Projectile {
            pos,
            vel: direction(angle) * speed,
            radius,
            damage,
            color,
            faction: Faction::Player,
        };

        match mode.volley() {
            VolleyShape::Single => self.projectiles.push(shot(muzzle, 0.0)),
            VolleyShape::ParallelPair => {
                let offset = Vec2::new(0.0, self.tuning.double_shot_offset);
                self.projectiles.push(shot(muzzle - offset, 0.0));
                self.projectiles.push(shot(muzzle + offset, 0.0));
            }
            VolleyShape::Fan {
                count,
                spread_degrees,
            } => {
                let center = (count as f32 - 1.0) / 2.0;
                for i in 0..count {
                    let angle = ((i as f32 - center) * spread_degrees).to_radians();
                    self.projectiles.push(shot(muzzle, angle));
                }
            }
        }
    }

    /// One Bernoulli trial each for an asteroid and a star
    fn spawn(&mut self) {
        let level = self.level_config();
        let scale = self.tuning.spawn_rate_scale;

        if self
            .rng
            .random_bool((level.asteroid_rate * scale).clamp(0.0, 1.0))
        {
            let asteroid = Asteroid::spawn(&mut self.rng, self.level, level, &self.bounds);
            self.asteroids.push(asteroid);
        }

        if self
            .rng
            .random_bool((level.star_rate * scale).clamp(0.0, 1.0))
        {
            let star = Star::spawn(&mut self.rng, &self.bounds);
            self.stars.push(star);
        }
    }

    fn update_projectiles(&mut self) {
        let bounds = self.bounds;
        for projectile in &mut self.projectiles {
            projectile.advance();
        }
        self.projectiles
            .retain(|p| !bounds.is_outside(p.pos, PROJECTILE_CULL_MARGIN));

        let mut i = 0;
        while i < self.projectiles.len() {
            let target = self.asteroids.iter().position(|a| {
                collision::projectile_hits_asteroid(&self.projectiles[i], a, &self.collision)
            });
            let Some(j) = target else {
                i += 1;
                continue;
            };

            let projectile = self.projectiles.remove(i);
            self.explosions.push(Explosion::hit_marker(projectile.pos));

            let asteroid = &mut self.asteroids[j];
            asteroid.health -= projectile.damage;
            if asteroid.health <= 0.0 {
                let asteroid = self.asteroids.remove(j);
                self.destroy_asteroid(asteroid);
            }
        }
    }

    fn destroy_asteroid(&mut self, asteroid: Asteroid) {
        self.explosions.push(Explosion::burst(
            &mut self.rng,
            asteroid.pos,
            asteroid.radius,
        ));
        let points = asteroid.size.points();
        self.score += points;
        self.kills += 1;
        self.events.push(StageEvent::PointsEarned { amount: points });
    }

    fn update_asteroids(&mut self) {
        for asteroid in &mut self.asteroids {
            asteroid.advance();
        }
        self.asteroids.retain(|a| !a.is_gone());

        if self.player.invincible {
            return;
        }

        let hit = self
            .asteroids
            .iter()
            .position(|a| collision::player_hits_asteroid(&self.player, a, &self.collision));
        let Some(j) = hit else {
            return;
        };

        let asteroid = self.asteroids.remove(j);
        self.explosions.push(Explosion::burst(
            &mut self.rng,
            asteroid.pos,
            asteroid.radius,
        ));
        self.lives = self.lives.saturating_sub(1);
        self.combo = 0;
        self.combo_timer = 0;

        if self.lives == 0 {
            self.finish(StageEvent::GameOver { score: self.score });
        } else {
            log::debug!("Ship hit, {} lives left", self.lives);
            self.player.make_invincible(self.tuning.invincibility_frames);
        }
    }

    fn update_stars(&mut self) {
        for star in &mut self.stars {
            star.advance();
        }

        let mut collected = 0u32;
        let player = &self.player;
        let tuning = &self.collision;
        self.stars.retain(|star| {
            if star.is_gone() {
                return false;
            }
            let hit = collision::player_collects_star(player, star, tuning);
            if hit {
                collected += 1;
            }
            !hit
        });

        for _ in 0..collected {
            self.combo += 1;
            self.combo_timer = self.tuning.combo_frames;
            let points = self.tuning.star_points * u64::from(self.combo.max(1));
            self.score += points;
            self.events.push(StageEvent::PointsEarned { amount: points });
        }
    }

    fn advance_distance(&mut self) {
        self.distance += self.tuning.distance_per_frame;
        if self.player.boosting {
            self.distance += self.tuning.boost_distance_bonus;
        }

        if self.distance < self.level_config().distance {
            return;
        }

        match self.mode {
            FlightMode::Campaign => self.finish(StageEvent::BossReached {
                level: self.level,
                score: self.score,
            }),
            FlightMode::Classic if self.level >= FINAL_LEVEL => {
                self.finish(StageEvent::Victory { score: self.score })
            }
            FlightMode::Classic => self.advance_level(),
        }
    }

    /// Classic mode: move on to the next level without leaving the stage
    fn advance_level(&mut self) {
        self.level += 1;
        self.distance = 0.0;
        self.asteroids.clear();
        self.projectiles.clear();
        self.stars.clear();
        self.banner.start(self.tuning.level_banner_ms);
        self.status = FlightStatus::LevelBanner;
        self.events.push(StageEvent::LevelAdvanced {
            level: self.level,
            score: self.score,
        });
        log::info!(
            "Advanced to level {} ({})",
            self.level,
            self.level_config().name
        );
    }

    fn finish(&mut self, event: StageEvent) {
        log::info!("Flight stage over: {:?}", event);
        self.events.push(event);
        self.status = FlightStatus::Finished;
    }

    fn update_explosions(&mut self) {
        for explosion in &mut self.explosions {
            explosion.update();
        }
        self.explosions.retain(|e| !e.is_done());
    }

    pub fn snapshot(&self) -> FlightSnapshot {
        let level = self.level_config();
        FlightSnapshot {
            score: self.score,
            lives: self.lives,
            fuel: self.fuel,
            distance: self.distance,
            max_distance: level.distance,
            level: self.level,
            level_name: level.name,
            level_color: level.color,
            combo: self.combo,
            kills: self.kills,
            boosting: self.player.boosting,
            invincible: self.player.invincible,
            banner: (self.status == FlightStatus::LevelBanner).then_some(level.name),
        }
    }
}
