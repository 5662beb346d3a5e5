//! Enemy spawner, enemy movement and the decorative starfield

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::orientation::{Layout, Orientation};
use super::pool::{Pool, Sweep};
use super::progression::Progression;
use super::state::{Enemy, Star};
use crate::consts::*;
use crate::settings::Settings;

/// Wall-clock spawn cadence, tracked as the next due time on the
/// simulation clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawner {
    /// Seconds between spawns
    pub interval: f64,
    /// Clock time of the next spawn
    pub next_spawn_at: f64,
}

impl EnemySpawner {
    pub fn new(interval_secs: f32) -> Self {
        let interval = f64::from(interval_secs);
        Self {
            interval,
            next_spawn_at: interval,
        }
    }

    /// Returns true when the cadence fired. Missed intervals are not
    /// replayed, so a long frame spawns at most one enemy.
    pub fn poll(&mut self, now: f64) -> bool {
        if now < self.next_spawn_at {
            return false;
        }
        self.next_spawn_at += self.interval;
        if self.next_spawn_at <= now {
            self.next_spawn_at = now + self.interval;
        }
        true
    }
}

/// Uniform sample in `[lo, hi)`, or `lo` for an empty or non-finite range
fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if lo.is_finite() && hi.is_finite() && hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// Roll a new enemy just beyond the far edge
pub fn spawn_enemy(
    rng: &mut impl Rng,
    layout: &Layout,
    settings: &Settings,
    progress: &Progression,
) -> Enemy {
    let size = uniform(rng, settings.enemy_min_size, settings.enemy_max_size);
    let offset = uniform(rng, 0.0, layout.cross_len() - size);
    let base = settings.enemy_base_speed;
    let speed = uniform(rng, base, base + settings.enemy_speed_range) * progress.enemy_speed_multiplier;
    log::trace!("Enemy spawned: size={:.1} speed={:.2}", size, speed);
    Enemy {
        rect: layout.spawn_rect(size, offset),
        speed,
        hue: progress.hue(),
    }
}

/// Move enemies toward the player, dropping those past the trailing edge.
/// Returns true if any enemy touched the player.
pub fn update_enemies(enemies: &mut Pool<Enemy>, player: &Rect, layout: &Layout) -> bool {
    let toward_player = -layout.orientation.forward();
    let mut player_hit = false;
    enemies.sweep(|enemy| {
        let velocity = toward_player * enemy.speed;
        layout.advance(&mut enemy.rect, velocity);
        if enemy.rect.intersects(player) {
            player_hit = true;
        }
        if layout.has_exited(&enemy.rect, velocity) {
            Sweep::Remove
        } else {
            Sweep::Keep
        }
    });
    player_hit
}

/// Fill the arena with background stars
pub fn scatter_stars(rng: &mut impl Rng, layout: &Layout, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(
                uniform(rng, 0.0, layout.width),
                uniform(rng, 0.0, layout.height),
            ),
            radius: uniform(rng, 0.0, STAR_MAX_RADIUS),
            speed: uniform(rng, STAR_MIN_SPEED, STAR_MIN_SPEED + STAR_SPEED_RANGE),
        })
        .collect()
}

/// Drift stars against the travel direction, wrapping to the far edge
pub fn update_stars(stars: &mut [Star], rng: &mut impl Rng, layout: &Layout) {
    for star in stars {
        match layout.orientation {
            Orientation::Horizontal => {
                star.pos.x -= star.speed;
                if star.pos.x < 0.0 {
                    star.pos.x = layout.width;
                    star.pos.y = uniform(rng, 0.0, layout.height);
                }
            }
            Orientation::Vertical => {
                star.pos.y += star.speed;
                if star.pos.y > layout.height {
                    star.pos.y = 0.0;
                    star.pos.x = uniform(rng, 0.0, layout.width);
                }
            }
        }
    }
}
