//! Brickbreak - brick-breaker gameplay and presentation logic
//!
//! Core modules:
//! - `sim`: Pure state (session counters, level order, timers, tweens)
//! - `game`: Coordinators reacting to gameplay and scene-load signals
//! - `ui`: Score roll-up animation and HUD bindings
//! - `platform`: Engine collaborator traits and a headless engine
//! - `settings`: Author-time configuration

pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::{GameManager, SceneHandler, TransitionRequest, TransitionVisual};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed frame timestep for the headless loop (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Lives at the start of a run
    pub const MAX_LIVES: u32 = 3;

    /// Scene wipe duration (seconds)
    pub const TRANSITION_DURATION: f32 = 1.0;

    /// Score roll-up: distance between the stacked labels and slide time
    pub const SCORE_ROLL_OFFSET: f32 = 50.0;
    pub const SCORE_ROLL_DURATION: f32 = 0.4;

    /// Game-over overlay time before returning to the menu (seconds)
    pub const GAME_OVER_DELAY: f32 = 1.5;
}
