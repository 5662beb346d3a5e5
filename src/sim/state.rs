//! Game state and core simulation types
//!
//! Everything a session owns lives in [`GameState`]; restarting rebuilds it
//! from scratch so nothing leaks between sessions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::orientation::{Layout, Orientation};
use super::pool::Pool;
use super::progression::Progression;
use super::spawner::{self, EnemySpawner};
use crate::error::{InvariantViolation, RuleCode, SettingsError};
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen; the clock does not advance
    Paused,
    /// Lethal collision happened; waiting for restart
    GameOver,
}

/// Stage colour palette, cycled by stage number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hue {
    Green,
    Magenta,
    Yellow,
    Orange,
    Red,
}

impl Hue {
    pub const PALETTE: [Hue; 5] = [Hue::Green, Hue::Magenta, Hue::Yellow, Hue::Orange, Hue::Red];

    /// Palette entry for a 1-based stage
    pub fn for_stage(stage: u32) -> Self {
        let index = stage.saturating_sub(1) as usize % Self::PALETTE.len();
        Self::PALETTE[index]
    }
}

/// Reload timer, expressed as deadlines on the simulation clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReloadState {
    Ready,
    Reloading { started_at: f64, deadline: f64 },
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Pixels per tick
    pub speed: f32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reload: ReloadState,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
    /// Cooldown applied after each shot
    pub fire_rate: u32,
}

impl Player {
    pub fn new(settings: &Settings, layout: &Layout) -> Self {
        Self {
            rect: layout.player_start(settings.player_size),
            speed: settings.player_speed,
            ammo: settings.max_ammo,
            max_ammo: settings.max_ammo,
            reload: ReloadState::Ready,
            fire_cooldown: 0,
            fire_rate: settings.fire_rate_ticks,
        }
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self.reload, ReloadState::Reloading { .. })
    }

    /// Seconds left on the reload timer (0 when ready)
    pub fn reload_remaining(&self, now: f64) -> f64 {
        match self.reload {
            ReloadState::Ready => 0.0,
            ReloadState::Reloading { deadline, .. } => (deadline - now).max(0.0),
        }
    }

    /// Reload completion in `[0, 1]` (1 when ready)
    pub fn reload_progress(&self, now: f64) -> f32 {
        match self.reload {
            ReloadState::Ready => 1.0,
            ReloadState::Reloading {
                started_at,
                deadline,
            } => {
                let span = deadline - started_at;
                if span <= 0.0 {
                    1.0
                } else {
                    ((now - started_at) / span).clamp(0.0, 1.0) as f32
                }
            }
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Signed pixels per tick along the travel axis
    pub velocity: f32,
}

/// A regular hostile
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Pixels per tick toward the player's side
    pub speed: f32,
    pub hue: Hue,
}

/// The stage boss
#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub rect: Rect,
    pub vel: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    /// Ticks between attacks
    pub attack_cooldown: u32,
    /// Ticks until the next attack
    pub attack_timer: i32,
    pub hue: Hue,
}

impl Boss {
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }
}

/// A boss projectile
#[derive(Debug, Clone, PartialEq)]
pub struct BossBullet {
    pub rect: Rect,
    /// Signed pixels per tick along the travel axis
    pub velocity: f32,
}

/// Decorative background star (no gameplay effect)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

/// Things that happened during the last tick, for audio/HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    ReloadStarted,
    ReloadFinished,
    EnemySpawned,
    EnemyDestroyed { score: u64 },
    BossSpawned { stage: u32, max_hp: u32 },
    BossHit { hp: u32 },
    BossAttack,
    BossDefeated { new_stage: u32 },
    GameOver { score: u64, stage: u32 },
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub settings: Settings,
    pub layout: Layout,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds of unpaused play (monotonic session clock)
    pub clock: f64,
    pub progress: Progression,
    pub player: Player,
    /// Present exactly while a boss fight is on
    pub boss: Option<Boss>,
    pub enemies: Pool<Enemy>,
    pub player_bullets: Pool<Bullet>,
    pub boss_bullets: Pool<BossBullet>,
    pub stars: Vec<Star>,
    pub spawner: EnemySpawner,
    /// Bosses defeated this session
    pub bosses_defeated: u32,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session with default settings in the default layout
    pub fn new(seed: u64) -> Self {
        let settings = Settings::default();
        let layout = Layout::from_dimensions(settings.arena_width, settings.arena_height);
        Self::build(settings, layout, seed)
    }

    /// New session from custom settings. Rejects settings the simulation
    /// can't run with and layouts without finite, positive dimensions.
    pub fn with_settings(settings: Settings, layout: Layout, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        if !layout.is_usable() {
            return Err(SettingsError::invalid(
                "layout",
                format!("{}x{} is not a usable arena", layout.width, layout.height),
            ));
        }
        Ok(Self::build(settings, layout, seed))
    }

    fn build(settings: Settings, layout: Layout, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = spawner::scatter_stars(&mut rng, &layout, settings.star_count);
        Self {
            seed,
            rng,
            player: Player::new(&settings, &layout),
            spawner: EnemySpawner::new(settings.enemy_spawn_interval_secs),
            settings,
            layout,
            phase: GamePhase::Playing,
            time_ticks: 0,
            clock: 0.0,
            progress: Progression::default(),
            boss: None,
            enemies: Pool::new(),
            player_bullets: Pool::new(),
            boss_bullets: Pool::new(),
            stars,
            bosses_defeated: 0,
            events: Vec::new(),
        }
    }

    pub fn is_boss_active(&self) -> bool {
        self.boss.is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Rebuild the session from its settings, layout and seed
    pub fn restart(&mut self) {
        self.restart_with_seed(self.seed);
    }

    /// Rebuild the session with a new run seed
    pub fn restart_with_seed(&mut self, seed: u64) {
        *self = Self::build(self.settings.clone(), self.layout, seed);
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Adopt a new arena size/orientation between ticks
    pub fn apply_layout(&mut self, layout: Layout) {
        if layout == self.layout {
            return;
        }
        if !layout.is_usable() {
            log::warn!("Ignoring unusable layout {}x{}", layout.width, layout.height);
            return;
        }
        let flipped = layout.orientation != self.layout.orientation;
        log::info!(
            "Layout {}x{} {:?} -> {}x{} {:?}",
            self.layout.width,
            self.layout.height,
            self.layout.orientation,
            layout.width,
            layout.height,
            layout.orientation
        );
        self.layout = layout;

        if flipped {
            // In-flight entities travel along the old axis; drop them
            self.enemies.clear();
            self.player_bullets.clear();
            self.boss_bullets.clear();
            self.player.rect = layout.player_start(self.player.rect.width);
            if let Some(boss) = &mut self.boss {
                boss.rect = layout.boss_start(boss.rect.width);
            }
        } else {
            layout.clamp_inside(&mut self.player.rect);
            if layout.orientation == Orientation::Vertical {
                // Vertical play pins the ship to its row
                self.player.rect.y = layout.player_start(self.player.rect.width).y;
            }
            if let Some(boss) = &mut self.boss {
                layout.confine(&mut boss.rect);
            }
        }

        self.stars = spawner::scatter_stars(&mut self.rng, &layout, self.settings.star_count);
    }

    /// Audit the state rules
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let fail = |rule| {
            Err(InvariantViolation {
                tick: self.time_ticks,
                rule,
            })
        };

        if self.player.ammo > self.player.max_ammo {
            return fail(RuleCode::AmmoRange);
        }
        if let Some(boss) = &self.boss {
            if !self.enemies.is_empty() {
                return fail(RuleCode::BossEnemyExclusion);
            }
            if boss.hp == 0 || boss.hp > boss.max_hp {
                return fail(RuleCode::BossHpRange);
            }
        }
        if self.progress.stage == 0 {
            return fail(RuleCode::StageNonZero);
        }
        let p = &self.player.rect;
        let eps = 1e-3;
        if p.x < -eps
            || p.y < -eps
            || p.right() > self.layout.width.max(p.width) + eps
            || p.bottom() > self.layout.height.max(p.height) + eps
        {
            return fail(RuleCode::PlayerBounds);
        }
        let over_event = self
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }));
        if over_event && self.phase != GamePhase::GameOver {
            return fail(RuleCode::GameOverPhase);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.progress.score, 0);
        assert_eq!(state.progress.stage, 1);
        assert_eq!(state.player.ammo, state.player.max_ammo);
        assert!(!state.player.is_reloading());
        assert!(state.boss.is_none());
        assert!(state.enemies.is_empty());
        assert!(state.player_bullets.is_empty());
        assert!(state.boss_bullets.is_empty());
        assert_eq!(state.stars.len(), 100);
        assert_eq!(state.player.rect, Rect::new(50.0, 275.0, 50.0, 50.0));
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_hue_cycles() {
        assert_eq!(Hue::for_stage(1), Hue::Green);
        assert_eq!(Hue::for_stage(5), Hue::Red);
        assert_eq!(Hue::for_stage(6), Hue::Green);
        assert_eq!(Hue::for_stage(u32::MAX), Hue::PALETTE[(u32::MAX as usize - 1) % 5]);
        // Stage 0 never happens, but must not panic
        assert_eq!(Hue::for_stage(0), Hue::Green);
    }

    #[test]
    fn test_reload_progress() {
        let mut player = Player::new(&Settings::default(), &Layout::default());
        assert_eq!(player.reload_progress(3.0), 1.0);
        player.reload = ReloadState::Reloading {
            started_at: 1.0,
            deadline: 2.5,
        };
        assert!((player.reload_progress(1.75) - 0.5).abs() < 1e-6);
        assert!((player.reload_remaining(2.0) - 0.5).abs() < 1e-9);
        assert_eq!(player.reload_remaining(9.0), 0.0);
    }

    #[test]
    fn test_validate_catches_boss_with_enemies() {
        let mut state = GameState::new(1);
        state.boss = Some(Boss {
            rect: Rect::new(600.0, 200.0, 100.0, 100.0),
            vel: Vec2::new(2.0, 2.0),
            hp: 100,
            max_hp: 100,
            attack_cooldown: 60,
            attack_timer: 0,
            hue: Hue::Green,
        });
        state.enemies.spawn(Enemy {
            rect: Rect::new(700.0, 10.0, 20.0, 20.0),
            speed: 2.0,
            hue: Hue::Green,
        });
        let err = state.validate().unwrap_err();
        assert_eq!(err.rule, RuleCode::BossEnemyExclusion);
    }

    #[test]
    fn test_layout_flip_resets_positions() {
        let mut state = GameState::new(3);
        state.player_bullets.spawn(Bullet {
            rect: Rect::new(200.0, 200.0, 15.0, 5.0),
            velocity: 10.0,
        });
        state.apply_layout(Layout::new(400.0, 700.0, Orientation::Vertical));
        assert!(state.player_bullets.is_empty());
        assert_eq!(state.player.rect, Rect::new(175.0, 600.0, 50.0, 50.0));
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_with_settings_rejects_bad_config() {
        let stalled = Settings {
            fire_rate_ticks: 0,
            ..Settings::default()
        };
        let err = GameState::with_settings(stalled, Layout::default(), 1).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "fire_rate_ticks", .. }));

        let never = Settings {
            enemy_spawn_interval_secs: 0.0,
            ..Settings::default()
        };
        assert!(GameState::with_settings(never, Layout::default(), 1).is_err());

        let err = GameState::with_settings(Settings::default(), Layout::from_dimensions(f32::NAN, 600.0), 1)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "layout", .. }));

        let state = GameState::with_settings(Settings::default(), Layout::default(), 1).unwrap();
        assert_eq!(state, GameState::new(1));
    }

    #[test]
    fn test_unusable_layout_is_ignored() {
        let mut state = GameState::new(3);
        let before = state.clone();
        state.apply_layout(Layout::from_dimensions(f32::NAN, 600.0));
        state.apply_layout(Layout::from_dimensions(800.0, f32::INFINITY));
        state.apply_layout(Layout::new(0.0, 0.0, Orientation::Horizontal));
        assert_eq!(state, before);
    }

    #[test]
    fn test_layout_resize_clamps_player() {
        let mut state = GameState::new(3);
        state.player.rect.x = 700.0;
        state.apply_layout(Layout::new(600.0, 500.0, Orientation::Horizontal));
        assert_eq!(state.player.rect.x, 550.0);
        assert!(state.validate().is_ok());
    }
}
