//! Simulation clock
//!
//! One call to [`tick`] advances every subsystem once, in a fixed order.

use super::boss;
use super::orientation::Layout;
use super::player;
use super::pool::{Pool, Sweep};
use super::progression::Progression;
use super::spawner;
use super::state::{Boss, Bullet, Enemy, GameEvent, GamePhase, GameState};
use crate::settings::Settings;

/// Input snapshot for a single tick (device agnostic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart request (only honoured after game over)
    pub restart: bool,
    /// New arena size/orientation from the layout collaborator
    pub layout: Option<Layout>,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game by one tick. `dt` is the wall-clock time in seconds
/// since the previous tick; it drives the reload and spawn timers while
/// movement stays per-tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(layout) = input.layout {
        state.apply_layout(layout);
    }
    state.events.clear();

    match state.phase {
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
            return;
        }
        GamePhase::Paused => {
            if !input.pause {
                return;
            }
            state.phase = GamePhase::Playing;
            log::info!("Resumed at tick {}", state.time_ticks);
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                log::info!("Paused at tick {}", state.time_ticks);
                return;
            }
        }
    }

    let input = if input.idle_mode {
        crate::autopilot::drive(state, input)
    } else {
        input.clone()
    };

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.time_ticks += 1;
    state.clock += f64::from(dt);
    let now = state.clock;
    let ticks = state.time_ticks;

    let GameState {
        rng,
        settings,
        layout,
        phase,
        progress,
        player,
        boss,
        enemies,
        player_bullets,
        boss_bullets,
        stars,
        spawner: cadence,
        bosses_defeated,
        events,
        ..
    } = state;

    // Timers due since the last tick
    player::resolve_reload(player, now, events);
    let spawn_due = cadence.poll(now);

    player::update(player, &input, layout, settings, now, player_bullets, events);

    let mut player_hit = false;
    match boss {
        Some(active) => {
            player_hit |= boss::update_boss(active, &player.rect, layout, settings, boss_bullets, events);
        }
        None => {
            if spawn_due {
                enemies.spawn(spawner::spawn_enemy(rng, layout, settings, progress));
                events.push(GameEvent::EnemySpawned);
            }
            player_hit |= spawner::update_enemies(enemies, &player.rect, layout);
        }
    }

    resolve_player_bullets(
        player_bullets,
        enemies,
        boss,
        progress,
        layout,
        settings,
        bosses_defeated,
        events,
    );
    player_hit |= boss::update_boss_bullets(boss_bullets, &player.rect, layout);

    spawner::update_stars(stars, rng, layout);

    if player_hit {
        *phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} stage {} after {} ticks",
            progress.score,
            progress.stage,
            ticks
        );
        events.push(GameEvent::GameOver {
            score: progress.score,
            stage: progress.stage,
        });
    }
}

/// Move player bullets and resolve their hits. Each bullet lands at most one
/// hit: the boss when present, otherwise the first enemy in scan order.
/// The kill that reaches the score threshold brings the boss in on the spot,
/// so the bullets still in flight meet the boss instead of enemies.
#[allow(clippy::too_many_arguments)]
fn resolve_player_bullets(
    bullets: &mut Pool<Bullet>,
    enemies: &mut Pool<Enemy>,
    boss: &mut Option<Boss>,
    progress: &mut Progression,
    layout: &Layout,
    settings: &Settings,
    bosses_defeated: &mut u32,
    events: &mut Vec<GameEvent>,
) {
    bullets.sweep(|bullet| {
        layout.advance(&mut bullet.rect, bullet.velocity);

        if let Some(active) = boss.as_mut() {
            // Enemies are always empty during a boss fight
            if bullet.rect.intersects(&active.rect) {
                let defeated = boss::apply_hit(active);
                events.push(GameEvent::BossHit { hp: active.hp });
                if defeated {
                    *boss = None;
                    progress.advance_stage(settings.difficulty);
                    *bosses_defeated += 1;
                    log::info!("Boss defeated! Advancing to stage {}", progress.stage);
                    events.push(GameEvent::BossDefeated {
                        new_stage: progress.stage,
                    });
                }
                return Sweep::Remove;
            }
        } else if let Some(index) = enemies.find_rev(|enemy| bullet.rect.intersects(&enemy.rect)) {
            enemies.remove_at(index);
            let boss_due = progress.on_enemy_killed(false);
            events.push(GameEvent::EnemyDestroyed {
                score: progress.score,
            });
            if boss_due {
                *boss = Some(bring_in_boss(enemies, progress, layout, settings, events));
            }
            return Sweep::Remove;
        }

        if layout.has_exited(&bullet.rect, bullet.velocity) {
            Sweep::Remove
        } else {
            Sweep::Keep
        }
    });
}

/// Clear the field and build the boss for the current stage
fn bring_in_boss(
    enemies: &mut Pool<Enemy>,
    progress: &Progression,
    layout: &Layout,
    settings: &Settings,
    events: &mut Vec<GameEvent>,
) -> Boss {
    enemies.clear();
    let spawned = boss::spawn_boss(progress.stage, layout, settings);
    log::info!(
        "Boss spawned: stage {} hp {} at score {}",
        progress.stage,
        spawned.max_hp,
        progress.score
    );
    events.push(GameEvent::BossSpawned {
        stage: progress.stage,
        max_hp: spawned.max_hp,
    });
    spawned
}
