//! Lives and score labels plus the game-over overlay

use crate::platform::{Label, Overlay};

/// Heads-up display bindings. Every binding is optional.
#[derive(Default)]
pub struct Hud {
    lives: Option<Box<dyn Label>>,
    score: Option<Box<dyn Label>>,
    game_over: Option<Box<dyn Overlay>>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lives_label(mut self, label: Box<dyn Label>) -> Self {
        self.lives = Some(label);
        self
    }

    pub fn with_score_label(mut self, label: Box<dyn Label>) -> Self {
        self.score = Some(label);
        self
    }

    pub fn with_game_over_overlay(mut self, overlay: Box<dyn Overlay>) -> Self {
        self.game_over = Some(overlay);
        self
    }

    pub fn show_lives(&mut self, lives: u32) {
        if let Some(label) = &mut self.lives {
            label.set_text(&format!("Lives: {}", lives));
        }
    }

    pub fn show_score(&mut self, score: u64) {
        if let Some(label) = &mut self.score {
            label.set_text(&format!("Score: {}", score));
        }
    }

    pub fn has_game_over_overlay(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn set_game_over(&mut self, visible: bool) {
        if let Some(overlay) = &mut self.game_over {
            overlay.set_active(visible);
        }
    }
}
