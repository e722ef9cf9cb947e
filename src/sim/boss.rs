//! Boss stage: a one-on-one duel against the boss of a level
//!
//! ```text
//! Active ──boss health ≤ 0──▶ VictoryPending ──delay──▶ Defeated
//!    │
//!    └──────lives = 0─────▶ Died
//! ```
//!
//! While the victory is pending the ship can still move and explosions keep
//! animating, but nothing fires and nothing can hurt the ship.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision;
use super::entity::{Explosion, Faction, Player, Projectile};
use super::events::StageEvent;
use super::input::ControlSignals;
use super::snapshot::BossSnapshot;
use super::timer::{Cooldown, Deferred};
use crate::consts::{BOSS_LIVES, MAX_FRAME_MS};
use crate::tables::{self, BossData, FINAL_LEVEL};
use crate::tuning::{BossTuning, CollisionTuning, Tuning};
use crate::{Bounds, direction};

/// Projectiles this far past an edge are culled
const PROJECTILE_CULL_MARGIN: f32 = 50.0;

/// Damage a boss projectile deals (one life)
const BOSS_PROJECTILE_DAMAGE: f32 = 1.0;

/// Lifecycle of a boss stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossStatus {
    Active,
    /// Boss destroyed; waiting out the banner before reporting
    VictoryPending,
    Defeated,
    Died,
    TornDown,
}

/// Stage construction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossConfig {
    pub level: usize,
    pub starting_score: u64,
    pub bounds: Bounds,
}

impl BossConfig {
    pub fn new(level: usize) -> Self {
        Self {
            level,
            starting_score: 0,
            bounds: Bounds::default(),
        }
    }
}

/// The boss. Position is the top-left corner of its square bounding box.
#[derive(Debug, Clone)]
pub struct Boss {
    pub data: &'static BossData,
    pub pos: Vec2,
    pub size: f32,
    pub health: f32,
    pub max_health: f32,
    /// 1 to 3, never decreases
    pub phase: u8,
    /// Decaying flash intensity after a hit
    pub hit_flash: f32,
    /// Frames alive, drives idle animation
    pub frame: u32,
}

impl Boss {
    pub fn new(level: usize, tuning: &BossTuning, bounds: &Bounds) -> Self {
        let data = tables::boss(level);
        let size = tuning.base_size + level as f32 * tuning.size_per_level;
        let max_health = data.max_health(tuning.base_health);
        Self {
            data,
            pos: Vec2::new(
                bounds.width - tuning.right_inset,
                bounds.height / 2.0 - size / 2.0,
            ),
            size,
            health: max_health,
            max_health,
            phase: 1,
            hit_flash: 0.0,
            frame: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Where boss projectiles leave: the middle of its left edge
    #[inline]
    pub fn mouth(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.size / 2.0)
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Raise the phase if health crossed a threshold. Returns the new phase on change.
    pub fn update_phase(&mut self) -> Option<u8> {
        let fraction = self.health_fraction();
        let target = if fraction <= 0.25 {
            3
        } else if fraction <= 0.5 {
            2
        } else {
            1
        };
        if target > self.phase {
            self.phase = target;
            Some(target)
        } else {
            None
        }
    }

    /// Ease vertically toward `target_y`, staying clear of the top and bottom
    pub fn pursue(&mut self, target_y: f32, factor: f32, margin: f32, bounds: &Bounds) {
        self.pos.y += (target_y - self.pos.y) * factor;
        let max_y = (bounds.height - self.size - margin).max(margin);
        self.pos.y = self.pos.y.clamp(margin, max_y);
    }
}

#[derive(Debug)]
pub struct BossStage {
    tuning: BossTuning,
    collision: CollisionTuning,
    bounds: Bounds,
    level: usize,
    rng: Pcg32,

    pub player: Player,
    pub boss: Boss,
    /// Both factions
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,

    pub score: u64,
    pub lives: u8,

    fire_cooldown: Cooldown,
    attack_cooldown: Cooldown,
    victory: Deferred,
    status: BossStatus,
    events: Vec<StageEvent>,
}

impl BossStage {
    pub fn new(config: BossConfig, tuning: &Tuning, rng: Pcg32) -> Self {
        let boss_tuning = tuning.boss.clone();
        let level = config.level;
        if level > FINAL_LEVEL {
            log::warn!("Level {} out of range, fighting the first boss", level);
        }
        let boss = Boss::new(level, &boss_tuning, &config.bounds);
        let player = Player::new(
            Vec2::new(boss_tuning.spawn_x, boss_tuning.spawn_y),
            boss_tuning.player_width,
            boss_tuning.player_height,
        );

        log::info!(
            "Boss stage start: level {} vs {} ({} hp)",
            level,
            boss.data.name,
            boss.max_health
        );

        Self {
            tuning: boss_tuning,
            collision: tuning.collision.clone(),
            bounds: config.bounds,
            level,
            rng,
            player,
            boss,
            projectiles: Vec::new(),
            explosions: Vec::new(),
            score: config.starting_score,
            lives: BOSS_LIVES,
            fire_cooldown: Cooldown::ready(),
            attack_cooldown: Cooldown::ready(),
            victory: Deferred::default(),
            status: BossStatus::Active,
            events: Vec::new(),
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn status(&self) -> BossStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self.status,
            BossStatus::Defeated | BossStatus::Died | BossStatus::TornDown
        )
    }

    /// Drain events queued since the last call
    pub fn take_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    /// Stop the stage for good, cancelling a pending victory report
    pub fn teardown(&mut self) {
        if self.victory.is_pending() {
            log::debug!("Boss stage torn down with victory pending");
        }
        self.victory.cancel();
        self.status = BossStatus::TornDown;
    }

    /// Advance one animation frame
    pub fn tick(&mut self, input: &ControlSignals, dt_ms: f32) {
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);

        match self.status {
            BossStatus::Defeated | BossStatus::Died | BossStatus::TornDown => return,
            BossStatus::VictoryPending => {
                if self.victory.advance(dt_ms) {
                    log::info!("Boss defeated, final score {}", self.score);
                    self.events
                        .push(StageEvent::BossDefeated { score: self.score });
                    self.status = BossStatus::Defeated;
                    return;
                }
            }
            BossStatus::Active => {}
        }

        self.update_player(input);
        self.player.tick_invincibility();
        self.boss.frame = self.boss.frame.wrapping_add(1);
        self.boss.hit_flash = (self.boss.hit_flash - self.tuning.hit_flash_decay).max(0.0);

        if self.status == BossStatus::Active {
            self.fire_cooldown.advance(dt_ms);
            self.attack_cooldown.advance(dt_ms);

            if input.shoot {
                self.fire();
            }

            let target_y = self.player.center().y - self.boss.size / 2.0;
            self.boss.pursue(
                target_y,
                self.tuning.pursuit,
                self.tuning.vertical_margin,
                &self.bounds,
            );
            self.attack();
        }

        let bounds = self.bounds;
        for projectile in &mut self.projectiles {
            projectile.advance();
        }
        self.projectiles
            .retain(|p| !bounds.is_outside(p.pos, PROJECTILE_CULL_MARGIN));

        if self.status == BossStatus::Active {
            self.resolve_player_fire();
        }
        if self.status == BossStatus::Active {
            self.resolve_boss_fire();
        }

        for explosion in &mut self.explosions {
            explosion.update();
        }
        self.explosions.retain(|e| !e.is_done());
    }

    /// Movement confined to the left part of the screen, no bounce
    fn update_player(&mut self, input: &ControlSignals) {
        self.player.boosting = false;
        self.player.integrate(
            input.thrust(),
            self.tuning.acceleration,
            1.0,
            self.tuning.friction,
            self.tuning.max_speed,
        );

        let margin = self.tuning.edge_margin;
        let max = Vec2::new(
            (self.bounds.width * self.tuning.player_max_x_fraction).max(margin),
            (self.bounds.height - self.player.height - margin).max(margin),
        );
        self.player.confine(Vec2::splat(margin), max, None);
    }

    fn fire(&mut self) {
        if !self.fire_cooldown.try_trigger(self.tuning.fire_interval_ms) {
            return;
        }
        self.projectiles.push(Projectile {
            pos: self.player.muzzle(),
            vel: Vec2::new(self.tuning.projectile_speed, 0.0),
            radius: self.tuning.projectile_radius,
            damage: self.tuning.player_damage(self.level),
            color: tables::level(self.level).color,
            faction: Faction::Player,
        });
    }

    /// Fan of projectiles aimed at where the ship is now
    fn attack(&mut self) {
        let data = self.boss.data;
        if !self.attack_cooldown.try_trigger(data.attack_speed_ms) {
            return;
        }

        let origin = self.boss.mouth();
        let to_player = self.player.center() - origin;
        let base_angle = to_player.y.atan2(to_player.x);
        let count = data.projectile_count.max(1);
        let step = self.tuning.volley_spread / count as f32;
        let center = (count as f32 - 1.0) / 2.0;

        for i in 0..count {
            let angle = base_angle + (i as f32 - center) * step;
            self.projectiles.push(Projectile {
                pos: origin,
                vel: direction(angle) * data.projectile_speed,
                radius: self.tuning.boss_projectile_radius,
                damage: BOSS_PROJECTILE_DAMAGE,
                color: data.eye_color,
                faction: Faction::Boss,
            });
        }
    }

    fn resolve_player_fire(&mut self) {
        let center = self.boss.center();
        let size = self.boss.size;

        let mut i = 0;
        while i < self.projectiles.len() {
            let projectile = &self.projectiles[i];
            if projectile.faction != Faction::Player
                || !collision::projectile_hits_boss(projectile, center, size, &self.collision)
            {
                i += 1;
                continue;
            }

            let projectile = self.projectiles.remove(i);
            self.explosions.push(Explosion::hit_marker(projectile.pos));
            self.boss.health -= projectile.damage;
            self.boss.hit_flash = self.tuning.hit_flash;
            self.score += self.tuning.hit_score;

            if let Some(phase) = self.boss.update_phase() {
                log::debug!("{} enters phase {}", self.boss.data.name, phase);
            }

            if self.boss.health <= 0.0 {
                self.defeat_boss();
                return;
            }
        }
    }

    fn defeat_boss(&mut self) {
        self.boss.health = 0.0;
        let bonus = self.tuning.defeat_bonus(self.level);
        self.score += bonus;
        self.events.push(StageEvent::PointsEarned { amount: bonus });
        self.explosions.push(Explosion::burst(
            &mut self.rng,
            self.boss.center(),
            self.boss.size / 2.0,
        ));
        self.projectiles.retain(|p| p.faction == Faction::Player);
        self.victory.start(self.tuning.victory_delay_ms);
        self.status = BossStatus::VictoryPending;
        log::info!(
            "{} destroyed, bonus {}, victory pending",
            self.boss.data.name,
            bonus
        );
    }

    fn resolve_boss_fire(&mut self) {
        if self.player.invincible {
            return;
        }

        let hit = self.projectiles.iter().position(|p| {
            p.faction == Faction::Boss
                && collision::projectile_hits_player(p, &self.player, &self.collision)
        });
        let Some(i) = hit else {
            return;
        };

        let projectile = self.projectiles.remove(i);
        self.explosions.push(Explosion::burst(
            &mut self.rng,
            projectile.pos,
            projectile.radius * 2.0,
        ));
        self.lives = self.lives.saturating_sub(1);

        if self.lives == 0 {
            log::info!("Ship destroyed by {}, score {}", self.boss.data.name, self.score);
            self.events.push(StageEvent::PlayerDied { score: self.score });
            self.status = BossStatus::Died;
        } else {
            log::debug!("Ship hit, {} lives left", self.lives);
            self.player.make_invincible(self.tuning.invincibility_frames);
        }
    }

    pub fn snapshot(&self) -> BossSnapshot {
        BossSnapshot {
            score: self.score,
            lives: self.lives,
            level: self.level,
            boss_name: self.boss.data.name,
            boss_color: self.boss.data.color,
            boss_health_percent: self.boss.health_fraction() * 100.0,
            phase: self.boss.phase,
            victory_pending: self.status == BossStatus::VictoryPending,
            invincible: self.player.invincible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn stage(level: usize) -> BossStage {
        BossStage::new(
            BossConfig::new(level),
            &Tuning::default(),
            Pcg32::seed_from_u64(9),
        )
    }

    fn idle() -> ControlSignals {
        ControlSignals::default()
    }

    fn player_shot(pos: Vec2, damage: f32) -> Projectile {
        Projectile {
            pos,
            vel: Vec2::ZERO,
            radius: 5.0,
            damage,
            color: "#fff",
            faction: Faction::Player,
        }
    }

    #[test]
    fn test_boss_scales_with_level() {
        let first = stage(0);
        let last = stage(FINAL_LEVEL);
        assert!(last.boss.size > first.boss.size);
        assert!(last.boss.max_health > first.boss.max_health);
        assert_eq!(first.boss.phase, 1);
    }

    #[test]
    fn test_unknown_level_fights_the_first_boss() {
        let s = stage(FINAL_LEVEL + 5);
        assert_eq!(s.level(), FINAL_LEVEL + 5);
        assert_eq!(s.boss.data, tables::boss(0));
    }

    #[test]
    fn test_phase_is_monotonic() {
        let mut s = stage(0);
        s.boss.health = s.boss.max_health * 0.5;
        assert_eq!(s.boss.update_phase(), Some(2));
        s.boss.health = s.boss.max_health * 0.2;
        assert_eq!(s.boss.update_phase(), Some(3));
        s.boss.health = s.boss.max_health;
        assert_eq!(s.boss.update_phase(), None);
        assert_eq!(s.boss.phase, 3);
    }

    #[test]
    fn test_player_is_kept_left() {
        let mut s = stage(0);
        let right = ControlSignals {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..300 {
            s.tick(&right, 16.0);
        }
        assert!(s.player.pos.x <= s.bounds.width * 0.6 + 1e-3);
    }

    #[test]
    fn test_first_volley_fires_at_once() {
        let mut s = stage(0);
        s.player.make_invincible(10_000);
        let boss_shots = |s: &BossStage| {
            s.projectiles
                .iter()
                .filter(|p| p.faction == Faction::Boss)
                .count() as u32
        };

        s.tick(&idle(), 16.0);
        let count = s.boss.data.projectile_count;
        assert_eq!(boss_shots(&s), count);

        // Next volley waits out the cadence
        s.tick(&idle(), 16.0);
        assert_eq!(boss_shots(&s), count);
    }

    #[test]
    fn test_hit_scores_and_flashes() {
        let mut s = stage(0);
        let center = s.boss.center();
        s.projectiles.push(player_shot(center, 8.0));
        s.tick(&idle(), 16.0);
        assert_eq!(s.score, 10);
        assert!(s.boss.hit_flash > 0.0);
        assert_eq!(s.boss.health, s.boss.max_health - 8.0);
    }

    #[test]
    fn test_boss_fire_costs_a_life() {
        let mut s = stage(0);
        let pos = s.player.center();
        s.projectiles.push(Projectile {
            pos,
            vel: Vec2::ZERO,
            radius: 8.0,
            damage: 1.0,
            color: "#f00",
            faction: Faction::Boss,
        });
        s.tick(&idle(), 16.0);
        assert_eq!(s.lives, BOSS_LIVES - 1);
        assert!(s.player.invincible);
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_teardown_cancels_pending_victory() {
        let mut s = stage(2);
        s.boss.health = 1.0;
        let center = s.boss.center();
        s.projectiles.push(player_shot(center, 5.0));
        s.tick(&idle(), 16.0);
        assert_eq!(s.status(), BossStatus::VictoryPending);
        s.take_events();

        s.teardown();
        for _ in 0..200 {
            s.tick(&idle(), 16.0);
        }
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_no_damage_while_victory_pending() {
        let mut s = stage(0);
        s.boss.health = 1.0;
        let center = s.boss.center();
        s.projectiles.push(player_shot(center, 5.0));
        s.tick(&idle(), 16.0);
        let pos = s.player.center();
        s.projectiles.push(Projectile {
            pos,
            vel: Vec2::ZERO,
            radius: 8.0,
            damage: 1.0,
            color: "#f00",
            faction: Faction::Boss,
        });
        s.tick(&idle(), 16.0);
        assert_eq!(s.lives, BOSS_LIVES);
        assert!(s.snapshot().victory_pending);
    }
}
