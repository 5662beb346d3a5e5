//! Game settings and balance
//!
//! Loaded from JSON (any field may be omitted) and validated before a
//! session is built from them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Stage progression profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyProfile {
    /// Boss every +100 points
    #[default]
    Classic,
    /// Boss every +200 points
    Veteran,
}

impl DifficultyProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyProfile::Classic => "Classic",
            DifficultyProfile::Veteran => "Veteran",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "normal" => Some(DifficultyProfile::Classic),
            "veteran" | "hard" => Some(DifficultyProfile::Veteran),
            _ => None,
        }
    }

    /// Score threshold increment applied when a stage is cleared
    pub fn threshold_increment(&self) -> u64 {
        match self {
            DifficultyProfile::Classic => 100,
            DifficultyProfile::Veteran => 200,
        }
    }
}

/// Tunable game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: DifficultyProfile,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Player ===
    /// Square ship edge length
    pub player_size: f32,
    /// Pixels per tick
    pub player_speed: f32,
    pub max_ammo: u32,
    /// Ticks between two shots
    pub fire_rate_ticks: u32,
    /// Wall-clock seconds
    pub reload_duration_secs: f32,
    pub bullet_speed: f32,
    pub bullet_length: f32,
    pub bullet_thickness: f32,

    // === Enemies ===
    /// Wall-clock seconds between spawns
    pub enemy_spawn_interval_secs: f32,
    pub enemy_min_size: f32,
    pub enemy_max_size: f32,
    pub enemy_base_speed: f32,
    pub enemy_speed_range: f32,

    // === Boss ===
    pub boss_size: f32,
    pub boss_bullet_speed: f32,
    pub boss_bullet_size: f32,

    // === Background ===
    pub star_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyProfile::Classic,

            arena_width: 800.0,
            arena_height: 600.0,

            player_size: 50.0,
            player_speed: 5.0,
            max_ammo: 10,
            fire_rate_ticks: 8,
            reload_duration_secs: 1.5,
            bullet_speed: 10.0,
            bullet_length: 15.0,
            bullet_thickness: 5.0,

            enemy_spawn_interval_secs: 1.5,
            enemy_min_size: 20.0,
            enemy_max_size: 60.0,
            enemy_base_speed: 1.5,
            enemy_speed_range: 3.0,

            boss_size: 100.0,
            boss_bullet_speed: 4.0,
            boss_bullet_size: 15.0,

            star_count: 100,
        }
    }
}

impl Settings {
    /// Default balance with a difficulty profile applied
    pub fn from_profile(profile: DifficultyProfile) -> Self {
        Self {
            difficulty: profile,
            ..Self::default()
        }
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("player_size", self.player_size)?;
        positive("player_speed", self.player_speed)?;
        positive("reload_duration_secs", self.reload_duration_secs)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("bullet_length", self.bullet_length)?;
        positive("bullet_thickness", self.bullet_thickness)?;
        positive("enemy_spawn_interval_secs", self.enemy_spawn_interval_secs)?;
        positive("enemy_min_size", self.enemy_min_size)?;
        positive("enemy_max_size", self.enemy_max_size)?;
        positive("enemy_base_speed", self.enemy_base_speed)?;
        positive("boss_size", self.boss_size)?;
        positive("boss_bullet_speed", self.boss_bullet_speed)?;
        positive("boss_bullet_size", self.boss_bullet_size)?;

        if !self.enemy_speed_range.is_finite() || self.enemy_speed_range < 0.0 {
            return Err(SettingsError::invalid(
                "enemy_speed_range",
                "must be zero or positive",
            ));
        }
        if self.max_ammo == 0 {
            return Err(SettingsError::invalid("max_ammo", "must be at least 1"));
        }
        if self.fire_rate_ticks == 0 {
            return Err(SettingsError::invalid(
                "fire_rate_ticks",
                "must be at least 1",
            ));
        }
        if self.enemy_min_size > self.enemy_max_size {
            return Err(SettingsError::invalid(
                "enemy_min_size",
                "must not exceed enemy_max_size",
            ));
        }

        // The boss roams half the arena in either orientation
        let short_side = self.arena_width.min(self.arena_height);
        if short_side < self.boss_size * 2.0 {
            return Err(SettingsError::invalid(
                "arena_width",
                format!(
                    "arena {}x{} is too small for a boss of size {}",
                    self.arena_width, self.arena_height, self.boss_size
                ),
            ));
        }
        if short_side < self.player_size || short_side < self.enemy_max_size {
            return Err(SettingsError::invalid(
                "arena_width",
                "arena must fit the player and the largest enemy",
            ));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            field,
            format!("must be a positive number, got {value}"),
        ))
    }
}
