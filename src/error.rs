//! Error types at the edges of the simulation
//!
//! A tick never fails. Errors only arise when loading settings or when an
//! integrator asks [`crate::sim::GameState::validate`] to audit a state.

use std::fmt;

/// Identifies which state rule an [`InvariantViolation`] broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    AmmoRange,
    BossEnemyExclusion,
    BossHpRange,
    StageNonZero,
    PlayerBounds,
    GameOverPhase,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmmoRange => write!(f, "AMMO_RANGE"),
            Self::BossEnemyExclusion => write!(f, "BOSS_ENEMY_EXCLUSION"),
            Self::BossHpRange => write!(f, "BOSS_HP_RANGE"),
            Self::StageNonZero => write!(f, "STAGE_NONZERO"),
            Self::PlayerBounds => write!(f, "PLAYER_BOUNDS"),
            Self::GameOverPhase => write!(f, "GAME_OVER_PHASE"),
        }
    }
}

/// A broken state rule, found at a given simulation tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvariantViolation {
    pub tick: u64,
    pub rule: RuleCode,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} violated at tick {}", self.rule, self.tick)
    }
}

impl std::error::Error for InvariantViolation {}

/// Failure to load or accept a [`crate::Settings`].
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read settings: {err}"),
            Self::Parse(err) => write!(f, "failed to parse settings: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
