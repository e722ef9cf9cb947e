//! Circle-circle hit tests
//!
//! Every entity is approximated by a circle. The radius fractions come from
//! [`CollisionTuning`] and are tuned by feel, not derived from the drawn
//! silhouettes, so edge-of-sprite misses and grazes are expected.

use glam::Vec2;

use super::entity::{Asteroid, Player, Projectile, Star};
use crate::tuning::CollisionTuning;

/// True if two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Ship vs asteroid
pub fn player_hits_asteroid(
    player: &Player,
    asteroid: &Asteroid,
    tuning: &CollisionTuning,
) -> bool {
    let player_radius = player.width.min(player.height) / tuning.player_radius_divisor;
    circles_overlap(
        player.center(),
        player_radius,
        asteroid.pos,
        asteroid.radius * tuning.asteroid_vs_player,
    )
}

/// Ship vs star pickup
pub fn player_collects_star(player: &Player, star: &Star, tuning: &CollisionTuning) -> bool {
    let player_radius = player.width.min(player.height) / tuning.pickup_radius_divisor;
    circles_overlap(player.center(), player_radius, star.pos, star.radius)
}

/// Player projectile vs asteroid
pub fn projectile_hits_asteroid(
    projectile: &Projectile,
    asteroid: &Asteroid,
    tuning: &CollisionTuning,
) -> bool {
    circles_overlap(
        projectile.pos,
        projectile.radius,
        asteroid.pos,
        asteroid.radius * tuning.asteroid_vs_projectile,
    )
}

/// Player projectile vs boss: projectile center inside the boss's hit circle
pub fn projectile_hits_boss(
    projectile: &Projectile,
    boss_center: Vec2,
    boss_width: f32,
    tuning: &CollisionTuning,
) -> bool {
    circles_overlap(
        projectile.pos,
        0.0,
        boss_center,
        boss_width * tuning.boss_hit_fraction,
    )
}

/// Boss projectile vs ship
pub fn projectile_hits_player(
    projectile: &Projectile,
    player: &Player,
    tuning: &CollisionTuning,
) -> bool {
    circles_overlap(
        projectile.pos,
        projectile.radius,
        player.center(),
        player.width * tuning.player_vs_boss_fire,
    )
}
