//! Player controller: movement, firing and the ammo/reload cycle

use super::orientation::Layout;
use super::pool::Pool;
use super::state::{Bullet, GameEvent, Player, ReloadState};
use super::tick::TickInput;
use crate::settings::Settings;

/// Start a reload. A reload already in progress keeps its deadline.
pub fn begin_reload(player: &mut Player, now: f64, duration: f64, events: &mut Vec<GameEvent>) {
    if player.is_reloading() {
        return;
    }
    player.reload = ReloadState::Reloading {
        started_at: now,
        deadline: now + duration,
    };
    log::debug!("Reload started at {:.3}s", now);
    events.push(GameEvent::ReloadStarted);
}

/// Complete a due reload. Ammo and the flag change together, so no tick
/// ever sees a half-finished reload.
pub fn resolve_reload(player: &mut Player, now: f64, events: &mut Vec<GameEvent>) {
    if let ReloadState::Reloading { deadline, .. } = player.reload
        && now >= deadline
    {
        player.ammo = player.max_ammo;
        player.reload = ReloadState::Ready;
        log::debug!("Reload finished at {:.3}s", now);
        events.push(GameEvent::ReloadFinished);
    }
}

/// Advance the player by one tick
pub fn update(
    player: &mut Player,
    input: &TickInput,
    layout: &Layout,
    settings: &Settings,
    now: f64,
    bullets: &mut Pool<Bullet>,
    events: &mut Vec<GameEvent>,
) {
    player.fire_cooldown = player.fire_cooldown.saturating_sub(1);

    if input.fire && !player.is_reloading() && player.fire_cooldown == 0 {
        if player.ammo > 0 {
            player.ammo -= 1;
            player.fire_cooldown = player.fire_rate;
            bullets.spawn(Bullet {
                rect: layout.muzzle(
                    &player.rect,
                    settings.bullet_length,
                    settings.bullet_thickness,
                    true,
                ),
                velocity: layout.orientation.forward() * settings.bullet_speed,
            });
            events.push(GameEvent::ShotFired);
        }
        if player.ammo == 0 {
            begin_reload(
                player,
                now,
                f64::from(settings.reload_duration_secs),
                events,
            );
        }
    }

    let dir = layout.movement(
        input.move_up,
        input.move_down,
        input.move_left,
        input.move_right,
    );
    player.rect.x += dir.x * player.speed;
    player.rect.y += dir.y * player.speed;
    layout.clamp_inside(&mut player.rect);
}
