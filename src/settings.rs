//! Author-time game configuration
//!
//! Loaded once at startup from JSON. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Ease;

/// Scene wipe animation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    pub ease: Ease,
    /// Seconds for the wipe to cover the screen (and to uncover it again)
    pub duration: f32,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            ease: Ease::InOutQuad,
            duration: TRANSITION_DURATION,
        }
    }
}

/// Score roll-up animation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRollSettings {
    /// Vertical distance between the current and incoming score labels
    pub offset: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Default for ScoreRollSettings {
    fn default() -> Self {
        Self {
            offset: SCORE_ROLL_OFFSET,
            duration: SCORE_ROLL_DURATION,
            ease: Ease::OutQuad,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level scenes in play order
    pub levels: Vec<String>,
    pub menu_scene: String,
    /// Scene the engine boots into before the menu is shown
    pub bootstrap_scene: String,
    pub max_lives: u32,
    pub transition: TransitionSettings,
    pub score_roll: ScoreRollSettings,
    /// Seconds the game-over overlay stays up before returning to the menu
    pub game_over_delay: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            levels: vec!["Level1".to_string(), "Level2".to_string(), "Level3".to_string()],
            menu_scene: "MainMenu".to_string(),
            bootstrap_scene: "Bootstrap".to_string(),
            max_lives: MAX_LIVES,
            transition: TransitionSettings::default(),
            score_roll: ScoreRollSettings::default(),
            game_over_delay: GAME_OVER_DELAY,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {} - using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Problems worth reporting. Nothing here is fatal.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.levels.is_empty() {
            problems.push("no levels configured; every advance returns to the menu".to_string());
        }
        if self.menu_scene.is_empty() {
            problems.push("menu scene name is empty".to_string());
        }
        if self.levels.iter().any(|l| *l == self.menu_scene) {
            problems.push(format!("menu scene '{}' is also listed as a level", self.menu_scene));
        }
        if self.transition.duration <= 0.0 {
            problems.push("transition duration should be positive".to_string());
        }
        if self.score_roll.duration <= 0.0 {
            problems.push("score roll duration should be positive".to_string());
        }
        if self.game_over_delay < 0.0 {
            problems.push("game over delay is negative".to_string());
        }
        problems
    }
}
