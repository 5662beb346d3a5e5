//! Neon Strike - a side/top scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, boss, progression)
//! - `settings`: Data-driven game balance
//! - `autopilot`: Demo-mode input generator
//!
//! Rendering and input devices live outside this crate: feed a
//! [`sim::TickInput`] to [`sim::tick`] each frame and draw the returned
//! [`sim::Scene`].

pub mod autopilot;
pub mod error;
pub mod settings;
pub mod sim;

pub use error::{InvariantViolation, RuleCode, SettingsError};
pub use settings::{DifficultyProfile, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration (display-synchronized, 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Points awarded per destroyed enemy
    pub const SCORE_PER_KILL: u64 = 10;
    /// Damage dealt to the boss by one player bullet
    pub const BOSS_HIT_DAMAGE: u32 = 10;

    /// Score needed for the first boss
    pub const INITIAL_SCORE_THRESHOLD: u64 = 100;
    /// Enemy speed multiplier added per cleared stage
    pub const SPEED_MULTIPLIER_STEP: f32 = 0.4;

    /// Boss tuning: base hp and per-stage growth
    pub const BOSS_BASE_HP: u32 = 100;
    pub const BOSS_HP_PER_STAGE: u32 = 50;
    /// Boss tuning: base speed (px/tick) and per-stage growth
    pub const BOSS_BASE_SPEED: f32 = 2.0;
    pub const BOSS_SPEED_PER_STAGE: f32 = 0.5;
    /// Boss attack cooldown in ticks, shrinking per stage down to a floor
    pub const BOSS_BASE_ATTACK_COOLDOWN: i64 = 60;
    pub const BOSS_ATTACK_COOLDOWN_STEP: i64 = 5;
    pub const BOSS_MIN_ATTACK_COOLDOWN: i64 = 20;

    /// Gap between the player and the arena edge at spawn
    pub const PLAYER_EDGE_MARGIN: f32 = 50.0;
    /// Star radius range upper bound
    pub const STAR_MAX_RADIUS: f32 = 2.0;
    /// Star drift speed range (px/tick)
    pub const STAR_MIN_SPEED: f32 = 0.2;
    pub const STAR_SPEED_RANGE: f32 = 0.5;
}

/// Clamp `value` into `[lo, hi]`, preferring `lo` when the range is empty.
///
/// Unlike `f32::clamp` this never panics, so a shrinking arena can't crash
/// the simulation.
#[inline]
pub fn clamp_span(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}
