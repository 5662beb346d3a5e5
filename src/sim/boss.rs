//! Boss controller
//!
//! Lifecycle: `Inactive -> Active -> Defeated -> Inactive`. Active means
//! `GameState::boss` is `Some`; defeat is instantaneous and clears it.

use glam::Vec2;

use super::collision::Rect;
use super::orientation::Layout;
use super::pool::{Pool, Sweep};
use super::progression::{boss_attack_cooldown, boss_max_hp, boss_speed};
use super::state::{Boss, BossBullet, GameEvent, Hue};
use crate::consts::BOSS_HIT_DAMAGE;
use crate::settings::Settings;

/// Build the boss for `stage` at its entry position
pub fn spawn_boss(stage: u32, layout: &Layout, settings: &Settings) -> Boss {
    let max_hp = boss_max_hp(stage);
    let speed = boss_speed(stage);
    Boss {
        rect: layout.boss_start(settings.boss_size),
        vel: Vec2::splat(speed),
        hp: max_hp,
        max_hp,
        attack_cooldown: boss_attack_cooldown(stage),
        attack_timer: 0,
        hue: Hue::for_stage(stage),
    }
}

/// Bounce `pos` off `[lo, hi]`. Only a component heading out of the range
/// flips, so a boss squeezed against a wall can't jitter in place.
fn bounce(pos: &mut f32, vel: &mut f32, lo: f32, hi: f32) {
    if *pos <= lo {
        *pos = lo;
        *vel = vel.abs();
    } else if *pos >= hi {
        *pos = hi;
        *vel = -vel.abs();
    }
}

/// Move, attack and test contact with the player. Returns true on contact.
pub fn update_boss(
    boss: &mut Boss,
    player: &Rect,
    layout: &Layout,
    settings: &Settings,
    bullets: &mut Pool<BossBullet>,
    events: &mut Vec<GameEvent>,
) -> bool {
    boss.rect.x += boss.vel.x;
    boss.rect.y += boss.vel.y;

    let area = layout.boss_box();
    let max_x = (area.right() - boss.rect.width).max(area.x);
    let max_y = (area.bottom() - boss.rect.height).max(area.y);
    bounce(&mut boss.rect.x, &mut boss.vel.x, area.x, max_x);
    bounce(&mut boss.rect.y, &mut boss.vel.y, area.y, max_y);

    boss.attack_timer -= 1;
    if boss.attack_timer <= 0 {
        let size = settings.boss_bullet_size;
        bullets.spawn(BossBullet {
            rect: layout.muzzle(&boss.rect, size, size, false),
            velocity: -layout.orientation.forward() * settings.boss_bullet_speed,
        });
        boss.attack_timer = boss.attack_cooldown as i32;
        events.push(GameEvent::BossAttack);
    }

    boss.rect.intersects(player)
}

/// Apply one bullet impact. Returns true when the boss is destroyed.
pub fn apply_hit(boss: &mut Boss) -> bool {
    boss.hp = boss.hp.saturating_sub(BOSS_HIT_DAMAGE);
    boss.hp == 0
}

/// Move boss bullets toward the player side. Returns true on player contact.
pub fn update_boss_bullets(bullets: &mut Pool<BossBullet>, player: &Rect, layout: &Layout) -> bool {
    let mut player_hit = false;
    bullets.sweep(|bullet| {
        layout.advance(&mut bullet.rect, bullet.velocity);
        if bullet.rect.intersects(player) {
            player_hit = true;
        }
        if layout.has_exited(&bullet.rect, bullet.velocity) {
            Sweep::Remove
        } else {
            Sweep::Keep
        }
    });
    player_hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::orientation::Orientation;

    fn horizontal() -> Layout {
        Layout::new(800.0, 600.0, Orientation::Horizontal)
    }

    fn far_player() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_spawn_stats_scale_with_stage() {
        let settings = Settings::default();
        let boss = spawn_boss(1, &horizontal(), &settings);
        assert_eq!(boss.max_hp, 100);
        assert_eq!(boss.hp, 100);
        assert_eq!(boss.vel, Vec2::new(2.0, 2.0));
        assert_eq!(boss.attack_cooldown, 60);
        assert_eq!(boss.attack_timer, 0);
        assert_eq!(boss.rect, Rect::new(650.0, 250.0, 100.0, 100.0));

        let boss = spawn_boss(3, &horizontal(), &settings);
        assert_eq!(boss.max_hp, 200);
        assert_eq!(boss.vel, Vec2::new(3.0, 3.0));
        assert_eq!(boss.attack_cooldown, 50);
        assert_eq!(boss.hue, Hue::Yellow);
    }

    #[test]
    fn test_first_tick_attacks_then_waits() {
        let settings = Settings::default();
        let layout = horizontal();
        let mut boss = spawn_boss(1, &layout, &settings);
        let mut bullets = Pool::new();
        let mut events = Vec::new();

        update_boss(&mut boss, &far_player(), &layout, &settings, &mut bullets, &mut events);
        assert_eq!(bullets.len(), 1);
        assert_eq!(boss.attack_timer, 60);
        assert_eq!(bullets.as_slice()[0].velocity, -4.0);
        assert!(bullets.as_slice()[0].rect.right() <= boss.rect.x);

        for _ in 0..59 {
            update_boss(&mut boss, &far_player(), &layout, &settings, &mut bullets, &mut events);
        }
        assert_eq!(bullets.len(), 1);
        update_boss(&mut boss, &far_player(), &layout, &settings, &mut bullets, &mut events);
        assert_eq!(bullets.len(), 2);
    }

    #[test]
    fn test_boss_stays_in_its_half() {
        let settings = Settings::default();
        let layout = horizontal();
        let mut boss = spawn_boss(4, &layout, &settings);
        let mut bullets = Pool::new();
        let mut events = Vec::new();
        let area = layout.boss_box();
        let mut flipped_x = false;

        for _ in 0..2000 {
            let before = boss.vel.x;
            update_boss(&mut boss, &far_player(), &layout, &settings, &mut bullets, &mut events);
            flipped_x |= before.signum() != boss.vel.x.signum();
            assert!(boss.rect.x >= area.x && boss.rect.right() <= area.right());
            assert!(boss.rect.y >= 0.0 && boss.rect.bottom() <= 600.0);
            assert_eq!(boss.vel.x.abs(), 3.5);
            assert_eq!(boss.vel.y.abs(), 3.5);
        }
        assert!(flipped_x);
    }

    #[test]
    fn test_contact_reported() {
        let settings = Settings::default();
        let layout = horizontal();
        let mut boss = spawn_boss(1, &layout, &settings);
        let player = Rect::new(660.0, 260.0, 50.0, 50.0);
        let mut bullets = Pool::new();
        let mut events = Vec::new();
        assert!(update_boss(&mut boss, &player, &layout, &settings, &mut bullets, &mut events));
    }

    #[test]
    fn test_hits_until_defeat() {
        let settings = Settings::default();
        let mut boss = spawn_boss(1, &horizontal(), &settings);
        for hit in 1..10 {
            assert!(!apply_hit(&mut boss));
            assert_eq!(boss.hp, 100 - hit * 10);
        }
        assert!(apply_hit(&mut boss));
        assert_eq!(boss.hp, 0);
    }

    #[test]
    fn test_overkill_does_not_underflow() {
        let settings = Settings::default();
        let mut boss = spawn_boss(1, &horizontal(), &settings);
        boss.hp = 3;
        assert!(apply_hit(&mut boss));
        assert_eq!(boss.hp, 0);
    }

    #[test]
    fn test_vertical_boss_fires_down() {
        let settings = Settings::default();
        let layout = Layout::new(400.0, 700.0, Orientation::Vertical);
        let mut boss = spawn_boss(1, &layout, &settings);
        assert!(boss.rect.bottom() <= 350.0);
        let mut bullets = Pool::new();
        let mut events = Vec::new();
        update_boss(&mut boss, &far_player(), &layout, &settings, &mut bullets, &mut events);
        let shot = &bullets.as_slice()[0];
        assert_eq!(shot.velocity, 4.0);
        assert!(shot.rect.y >= boss.rect.bottom());
    }

    #[test]
    fn test_boss_bullets_drain() {
        let layout = Layout::new(400.0, 300.0, Orientation::Horizontal);
        let mut bullets = Pool::new();
        bullets.spawn(BossBullet {
            rect: Rect::new(10.0, 0.0, 15.0, 15.0),
            velocity: -4.0,
        });
        let player = Rect::new(300.0, 200.0, 50.0, 50.0);
        for _ in 0..6 {
            assert!(!update_boss_bullets(&mut bullets, &player, &layout));
        }
        assert_eq!(bullets.len(), 1);
        update_boss_bullets(&mut bullets, &player, &layout);
        assert!(bullets.is_empty());
    }
}
