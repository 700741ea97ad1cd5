//! Platform abstraction layer
//!
//! The game logic never reaches into the engine directly. It talks to these
//! collaborator traits, which the host engine implements:
//! - Scene loading and lookup of the per-scene ball and bricks container
//! - Ball control (reset / fire)
//! - Text labels and toggleable overlays

pub mod headless;

pub use headless::{BallStats, HeadlessEngine, SceneLayout, SharedLabel, SharedOverlay};

/// The player's ball, owned by the engine's physics
pub trait Ball {
    /// Put the ball back on the paddle, at rest
    fn reset_ball(&mut self);
    /// Launch the ball from the paddle
    fn fire_ball(&mut self);
}

/// A text element on screen
pub trait Label {
    fn set_text(&mut self, text: &str);
}

/// A UI element that can be shown or hidden (e.g. the game-over canvas)
pub trait Overlay {
    fn set_active(&mut self, active: bool);
}

/// Engine services used by the game coordinators
pub trait Engine {
    /// Name of the scene currently loaded, if any
    fn active_scene(&self) -> Option<&str>;

    /// Request a scene by name. The engine reports completion later through
    /// the scene-loaded signal.
    fn load_scene(&mut self, name: &str);

    /// Resolve the ball in the active scene
    fn find_ball(&mut self) -> Option<Box<dyn Ball>>;

    /// Child count of the active scene's bricks container, if it has one
    fn bricks_in_container(&self) -> Option<usize>;
}
