//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timers run on the simulation clock fed by `tick`, never the OS clock
//! - Seeded RNG only
//! - Backward-scan iteration for every pool
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod orientation;
pub mod player;
pub mod pool;
pub mod progression;
pub mod scene;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, intersects};
pub use orientation::{Layout, Orientation};
pub use pool::{Pool, Sweep};
pub use progression::Progression;
pub use scene::{BossSprite, EnemySprite, Hud, Scene};
pub use state::{
    Boss, BossBullet, Bullet, Enemy, GameEvent, GamePhase, GameState, Hue, Player, ReloadState,
    Star,
};
pub use tick::{TickInput, tick};
