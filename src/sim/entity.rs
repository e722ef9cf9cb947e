//! Entities shared by the flight and boss stages

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::tables::LevelConfig;

/// The player's ship. Position is the top-left corner of its bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub boosting: bool,
    pub invincible: bool,
    pub invincible_timer: u32,
}

impl Player {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            width,
            height,
            boosting: false,
            invincible: false,
            invincible_timer: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Nose of the ship, where projectiles leave
    #[inline]
    pub fn muzzle(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height / 2.0)
    }

    /// Accelerate, apply friction, cap speed, then move.
    ///
    /// `multiplier` scales both the thrust and the speed cap (boost, upgrades).
    pub fn integrate(
        &mut self,
        thrust: Vec2,
        acceleration: f32,
        multiplier: f32,
        friction: f32,
        max_speed: f32,
    ) {
        self.vel += thrust * acceleration * multiplier;
        self.vel *= friction;

        let cap = max_speed * multiplier;
        let speed = self.vel.length();
        if speed > cap {
            self.vel = self.vel / speed * cap;
        }

        self.pos += self.vel;
    }

    /// Keep the ship inside `[min, max]` (top-left coordinates). With a bounce
    /// factor the velocity on the blocked axis is multiplied by it.
    pub fn confine(&mut self, min: Vec2, max: Vec2, bounce: Option<f32>) {
        if self.pos.x < min.x {
            self.pos.x = min.x;
            if let Some(b) = bounce {
                self.vel.x *= b;
            }
        }
        if self.pos.x > max.x {
            self.pos.x = max.x;
            if let Some(b) = bounce {
                self.vel.x *= b;
            }
        }
        if self.pos.y < min.y {
            self.pos.y = min.y;
            if let Some(b) = bounce {
                self.vel.y *= b;
            }
        }
        if self.pos.y > max.y {
            self.pos.y = max.y;
            if let Some(b) = bounce {
                self.vel.y *= b;
            }
        }
    }

    /// Count down invincibility by one frame
    pub fn tick_invincibility(&mut self) {
        if self.invincible {
            self.invincible_timer = self.invincible_timer.saturating_sub(1);
            if self.invincible_timer == 0 {
                self.invincible = false;
            }
        }
    }

    pub fn make_invincible(&mut self, frames: u32) {
        self.invincible = frames > 0;
        self.invincible_timer = frames;
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Boss,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub color: &'static str,
    pub faction: Faction,
}

impl Projectile {
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// Asteroid size bracket, rolled at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// 50% small, 35% medium, 15% large
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        let roll: f32 = rng.random();
        if roll < 0.5 {
            SizeClass::Small
        } else if roll < 0.85 {
            SizeClass::Medium
        } else {
            SizeClass::Large
        }
    }

    /// Drawn radius range; large rocks grow on later levels
    pub fn radius_range(&self, level: usize) -> (f32, f32) {
        match self {
            SizeClass::Small => (15.0, 25.0),
            SizeClass::Medium => (25.0, 40.0),
            SizeClass::Large => {
                let bonus = level as f32 * 2.0;
                (40.0 + bonus, 55.0 + bonus)
            }
        }
    }

    pub fn health(&self, level: usize) -> f32 {
        match self {
            SizeClass::Small => 10.0,
            SizeClass::Medium => 25.0,
            SizeClass::Large => 40.0 + level as f32 * 8.0,
        }
    }

    pub fn points(&self) -> u64 {
        match self {
            SizeClass::Small => 100,
            SizeClass::Medium => 250,
            SizeClass::Large => 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Per-vertex radius scale factors (0.7..1.0) giving the rock its silhouette
    pub vertices: Vec<f32>,
    pub health: f32,
    pub max_health: f32,
    pub size: SizeClass,
}

impl Asteroid {
    /// Roll a new asteroid just past the right edge
    pub fn spawn<R: Rng>(
        rng: &mut R,
        level_index: usize,
        level: &LevelConfig,
        bounds: &Bounds,
    ) -> Self {
        let size = SizeClass::roll(rng);
        let (min_r, max_r) = size.radius_range(level_index);
        let radius = rng.random_range(min_r..max_r);

        let vertex_count = rng.random_range(8..12);
        let vertices = (0..vertex_count)
            .map(|_| rng.random_range(0.7..1.0))
            .collect();

        let y_span = (bounds.height - radius * 2.0).max(1.0);
        let health = size.health(level_index);

        Self {
            pos: Vec2::new(
                bounds.width + radius,
                rng.random_range(0.0..y_span) + radius,
            ),
            radius,
            speed: level.asteroid_speed + rng.random_range(0.0..2.0),
            rotation: 0.0,
            rotation_speed: rng.random_range(-0.025..0.025),
            vertices,
            health,
            max_health: health,
            size,
        }
    }

    /// Drift left and spin
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
        self.rotation += self.rotation_speed;
    }

    /// Fully past the left edge
    pub fn is_gone(&self) -> bool {
        self.pos.x < -self.radius * 2.0
    }
}

/// Collectible star (feeds the combo counter)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub pulse: f32,
    pub pulse_speed: f32,
}

impl Star {
    pub fn spawn<R: Rng>(rng: &mut R, bounds: &Bounds) -> Self {
        Self {
            pos: Vec2::new(
                bounds.width + 20.0,
                rng.random_range(0.0..(bounds.height - 40.0).max(1.0)) + 20.0,
            ),
            radius: rng.random_range(12.0..18.0),
            speed: rng.random_range(3.0..5.0),
            pulse: rng.random_range(0.0..std::f32::consts::TAU),
            pulse_speed: rng.random_range(0.1..0.2),
        }
    }

    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
        self.pulse += self.pulse_speed;
    }

    pub fn is_gone(&self) -> bool {
        self.pos.x < -30.0
    }
}

/// A debris particle inside an explosion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
}

/// Expanding, fading blast. Cosmetic only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
    pub particles: Vec<Particle>,
}

/// Maximum particles per explosion
pub const MAX_BURST_PARTICLES: usize = 12;

impl Explosion {
    /// Small flash where a projectile connected
    pub fn hit_marker(pos: Vec2) -> Self {
        Self {
            pos,
            radius: 5.0,
            max_radius: 30.0,
            alpha: 1.0,
            particles: Vec::new(),
        }
    }

    /// Blast with a particle burst sized to `radius`
    pub fn burst<R: Rng>(rng: &mut R, pos: Vec2, radius: f32) -> Self {
        let count = ((radius / 5.0) as usize).clamp(4, MAX_BURST_PARTICLES);
        let particles = (0..count)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(1.0..4.0);
                Particle {
                    pos,
                    vel: crate::direction(angle) * speed,
                    size: rng.random_range(2.0..5.0),
                    alpha: 1.0,
                }
            })
            .collect();
        Self {
            pos,
            radius: 5.0,
            max_radius: radius * 1.5,
            alpha: 1.0,
            particles,
        }
    }

    pub fn update(&mut self) {
        if self.radius < self.max_radius {
            self.radius = (self.radius + 2.0).min(self.max_radius);
        }
        self.alpha -= 0.05;
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel *= 0.95;
            particle.alpha -= 0.04;
        }
        self.particles.retain(|p| p.alpha > 0.0);
    }

    pub fn is_done(&self) -> bool {
        self.alpha <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::level;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_integrate_caps_speed() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), 60.0, 35.0);
        for _ in 0..200 {
            player.integrate(Vec2::new(1.0, 1.0), 0.6, 1.5, 0.94, 10.0);
        }
        assert!(player.vel.length() <= 15.0 + 1e-4);
    }

    #[test]
    fn test_confine_bounces() {
        let mut player = Player::new(Vec2::new(5.0, 50.0), 60.0, 35.0);
        player.vel = Vec2::new(-4.0, 0.0);
        player.confine(Vec2::splat(20.0), Vec2::splat(500.0), Some(-0.3));
        assert_eq!(player.pos.x, 20.0);
        assert!((player.vel.x - 1.2).abs() < 1e-6);

        player.pos.x = 5.0;
        player.vel.x = -4.0;
        player.confine(Vec2::splat(20.0), Vec2::splat(500.0), None);
        assert_eq!(player.pos.x, 20.0);
        assert_eq!(player.vel.x, -4.0);
    }

    #[test]
    fn test_invincibility_countdown() {
        let mut player = Player::new(Vec2::ZERO, 10.0, 10.0);
        player.make_invincible(2);
        player.tick_invincibility();
        assert!(player.invincible);
        player.tick_invincibility();
        assert!(!player.invincible);
    }

    #[test]
    fn test_asteroid_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = Bounds::default();
        for _ in 0..200 {
            let a = Asteroid::spawn(&mut rng, 4, level(4), &bounds);
            let (lo, hi) = a.size.radius_range(4);
            assert!(a.radius >= lo && a.radius < hi);
            assert_eq!(a.health, a.max_health);
            assert!((8..12).contains(&a.vertices.len()));
            assert!(a.vertices.iter().all(|v| (0.7..1.0).contains(v)));
            assert!(a.pos.x > bounds.width);
        }
    }

    #[test]
    fn test_explosion_fades_out() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut explosion = Explosion::burst(&mut rng, Vec2::ZERO, 30.0);
        assert!(!explosion.particles.is_empty());
        let mut frames = 0;
        while !explosion.is_done() {
            explosion.update();
            frames += 1;
            assert!(frames < 100);
        }
        assert!(explosion.radius <= 45.0);
    }
}
