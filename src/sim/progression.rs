//! Score, stage and the difficulty curve
//!
//! All formulas stay defined for any stage number: integer growth
//! saturates and colours cycle through the palette.

use serde::{Deserialize, Serialize};

use super::state::Hue;
use crate::consts::*;
use crate::settings::DifficultyProfile;

/// Score/stage bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub score: u64,
    /// 1-based difficulty epoch, advanced only by defeating a boss
    pub stage: u32,
    /// Score at which the next boss appears
    pub score_threshold: u64,
    pub enemy_speed_multiplier: f32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            score: 0,
            stage: 1,
            score_threshold: INITIAL_SCORE_THRESHOLD,
            enemy_speed_multiplier: 1.0,
        }
    }
}

impl Progression {
    /// Credit a kill. Returns true when a boss is now due.
    pub fn on_enemy_killed(&mut self, boss_active: bool) -> bool {
        self.score = self.score.saturating_add(SCORE_PER_KILL);
        !boss_active && self.boss_due()
    }

    pub fn boss_due(&self) -> bool {
        self.score >= self.score_threshold
    }

    /// Move to the next stage after a boss falls
    pub fn advance_stage(&mut self, profile: DifficultyProfile) {
        self.stage = self.stage.saturating_add(1);
        self.score_threshold = self
            .score_threshold
            .saturating_add(profile.threshold_increment());
        self.enemy_speed_multiplier += SPEED_MULTIPLIER_STEP;
    }

    pub fn hue(&self) -> Hue {
        Hue::for_stage(self.stage)
    }
}

/// Boss hit points: `100 + (stage-1)*50`
pub fn boss_max_hp(stage: u32) -> u32 {
    BOSS_BASE_HP.saturating_add(stage.saturating_sub(1).saturating_mul(BOSS_HP_PER_STAGE))
}

/// Boss speed per axis: `2 + (stage-1)*0.5`
pub fn boss_speed(stage: u32) -> f32 {
    BOSS_BASE_SPEED + stage.saturating_sub(1) as f32 * BOSS_SPEED_PER_STAGE
}

/// Ticks between boss attacks: `max(20, 60 - (stage-1)*5)`
pub fn boss_attack_cooldown(stage: u32) -> u32 {
    let steps = i64::from(stage.saturating_sub(1));
    let cooldown = BOSS_BASE_ATTACK_COOLDOWN - steps * BOSS_ATTACK_COOLDOWN_STEP;
    cooldown.max(BOSS_MIN_ATTACK_COOLDOWN) as u32
}
