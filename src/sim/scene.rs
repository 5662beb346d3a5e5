//! Renderable snapshot of a tick
//!
//! Plain data for the drawing layer: positions, sizes, colour tags and HUD
//! values. Serializes to JSON for out-of-process renderers.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::orientation::Layout;
use super::state::{GamePhase, GameState, Hue, Star};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySprite {
    pub rect: Rect,
    pub hue: Hue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossSprite {
    pub rect: Rect,
    pub hue: Hue,
    pub hp_fraction: f32,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub stage: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
    /// 0..1, 1 when not reloading
    pub reload_progress: f32,
    pub boss_hp_fraction: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub tick: u64,
    pub layout: Layout,
    pub player: Rect,
    pub player_bullets: Vec<Rect>,
    pub boss_bullets: Vec<Rect>,
    pub enemies: Vec<EnemySprite>,
    pub boss: Option<BossSprite>,
    pub stars: Vec<Star>,
    pub hud: Hud,
    pub paused: bool,
    pub game_over: bool,
}

impl Scene {
    pub fn capture(state: &GameState) -> Self {
        let boss = state.boss.as_ref().map(|b| BossSprite {
            rect: b.rect,
            hue: b.hue,
            hp_fraction: b.hp_fraction(),
        });
        Self {
            tick: state.time_ticks,
            layout: state.layout,
            player: state.player.rect,
            player_bullets: state.player_bullets.iter().map(|b| b.rect).collect(),
            boss_bullets: state.boss_bullets.iter().map(|b| b.rect).collect(),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemySprite {
                    rect: e.rect,
                    hue: e.hue,
                })
                .collect(),
            hud: Hud {
                score: state.progress.score,
                stage: state.progress.stage,
                ammo: state.player.ammo,
                max_ammo: state.player.max_ammo,
                reloading: state.player.is_reloading(),
                reload_progress: state.player.reload_progress(state.clock),
                boss_hp_fraction: boss.as_ref().map(|b| b.hp_fraction),
            },
            boss,
            stars: state.stars.clone(),
            paused: state.phase == GamePhase::Paused,
            game_over: state.phase == GamePhase::GameOver,
        }
    }
}

impl GameState {
    /// Snapshot for the renderer
    pub fn scene(&self) -> Scene {
        Scene::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boss::spawn_boss;

    #[test]
    fn test_scene_reflects_state() {
        let mut state = GameState::new(4);
        let mut boss = spawn_boss(2, &state.layout, &state.settings);
        boss.hp = 75;
        state.boss = Some(boss);
        state.progress.score = 130;
        state.player.ammo = 4;

        let scene = state.scene();
        assert_eq!(scene.hud.score, 130);
        assert_eq!(scene.hud.ammo, 4);
        assert_eq!(scene.hud.max_ammo, 10);
        assert!(!scene.hud.reloading);
        assert_eq!(scene.hud.boss_hp_fraction, Some(0.5));
        assert_eq!(scene.boss.as_ref().map(|b| b.hue), Some(Hue::Magenta));
        assert!(scene.enemies.is_empty());
        assert!(!scene.game_over);
    }

    #[test]
    fn test_scene_serializes() {
        let scene = GameState::new(4).scene();
        let json = serde_json::to_string(&scene).expect("serialize");
        let back: Scene = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.player, scene.player);
        assert_eq!(back.stars.len(), 100);
    }
}
