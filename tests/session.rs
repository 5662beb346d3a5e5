//! End-to-end sessions through the public API

use neon_strike::consts::FRAME_DT;
use neon_strike::sim::{
    Bullet, Enemy, GameEvent, GamePhase, GameState, Hue, Layout, Orientation, Rect, TickInput, tick,
};
use neon_strike::{DifficultyProfile, Settings};

fn quiet_state(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    state.spawner.next_spawn_at = f64::INFINITY;
    state
}

fn input(f: impl FnOnce(&mut TickInput)) -> TickInput {
    let mut input = TickInput::default();
    f(&mut input);
    input
}

#[test]
fn boss_cycle_advances_stage() {
    let mut state = quiet_state(9);
    state.progress.score = 90;
    state.enemies.spawn(Enemy {
        rect: Rect::new(113.0, 290.0, 20.0, 20.0),
        speed: 1.0,
        hue: Hue::Green,
    });

    // Last kill before the threshold brings the boss in
    tick(&mut state, &input(|i| i.fire = true), FRAME_DT);
    assert!(state.is_boss_active());
    assert!(state.enemies.is_empty());
    assert!(
        state
            .events
            .contains(&GameEvent::BossSpawned { stage: 1, max_hp: 100 })
    );

    // Finish it with one bullet placed on its path
    if let Some(boss) = state.boss.as_mut() {
        boss.hp = 10;
    }
    state.player_bullets.spawn(Bullet {
        rect: Rect::new(640.0, 290.0, 15.0, 5.0),
        velocity: 10.0,
    });
    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert!(!state.is_boss_active());
    assert!(state.events.contains(&GameEvent::BossDefeated { new_stage: 2 }));
    assert_eq!(state.progress.stage, 2);
    assert_eq!(state.progress.score_threshold, 200);
    assert_eq!(state.bosses_defeated, 1);

    // Enemies return, faster and in the stage-2 colour
    state.spawner.next_spawn_at = state.clock;
    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert!(state.events.contains(&GameEvent::EnemySpawned));
    let enemy = &state.enemies.as_slice()[0];
    assert_eq!(enemy.hue, Hue::Magenta);
    assert!(enemy.speed >= 1.5 * 1.4 - 1e-4);
    assert!(state.validate().is_ok());
}

#[test]
fn restart_after_game_over_matches_fresh_session() {
    let mut state = GameState::new(77);
    let p = state.player.rect;
    state.enemies.spawn(Enemy {
        rect: Rect::new(p.x + 5.0, p.y + 5.0, 20.0, 20.0),
        speed: 1.0,
        hue: Hue::Green,
    });
    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert_eq!(state.phase, GamePhase::GameOver);

    tick(&mut state, &input(|i| i.restart = true), FRAME_DT);
    assert_eq!(state, GameState::new(77));
}

#[test]
fn portrait_session_from_settings_json() {
    let settings = Settings::from_json(
        r#"{ "arena_width": 400, "arena_height": 700, "difficulty": "Veteran" }"#,
    )
    .expect("valid settings");
    assert_eq!(settings.difficulty, DifficultyProfile::Veteran);

    let layout = Layout::from_dimensions(settings.arena_width, settings.arena_height);
    let mut state = GameState::with_settings(settings, layout, 3).expect("valid session");
    state.spawner.next_spawn_at = f64::INFINITY;
    assert_eq!(state.layout.orientation, Orientation::Vertical);

    // Shots travel up the screen
    tick(&mut state, &input(|i| i.fire = true), FRAME_DT);
    let bullet = &state.player_bullets.as_slice()[0];
    assert!(bullet.velocity < 0.0);
    assert!(bullet.rect.y < state.player.rect.y);

    // Up/down are ignored; left moves along the bottom row
    let before = state.player.rect;
    tick(
        &mut state,
        &input(|i| {
            i.move_up = true;
            i.move_left = true;
        }),
        FRAME_DT,
    );
    assert_eq!(state.player.rect.y, before.y);
    assert_eq!(state.player.rect.x, before.x - 5.0);
}

#[test]
fn rotating_mid_session_keeps_state_valid() {
    let mut state = GameState::new(21);
    let demo = input(|i| i.idle_mode = true);
    for _ in 0..400 {
        tick(&mut state, &demo, FRAME_DT);
    }
    let score = state.progress.score;

    let rotate = input(|i| {
        i.idle_mode = true;
        i.layout = Some(Layout::from_dimensions(500.0, 900.0));
    });
    tick(&mut state, &rotate, FRAME_DT);
    assert_eq!(state.layout.orientation, Orientation::Vertical);
    assert!(state.progress.score >= score);
    assert!(state.validate().is_ok());
}

#[test]
fn scenes_replay_identically() {
    let demo = input(|i| i.idle_mode = true);
    let mut a = GameState::new(1234);
    let mut b = GameState::new(1234);
    for _ in 0..900 {
        tick(&mut a, &demo, FRAME_DT);
        tick(&mut b, &demo, FRAME_DT);
        assert_eq!(a.scene(), b.scene());
    }
}
