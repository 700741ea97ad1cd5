//! Gameplay coordinators wired to the engine collaborators
//!
//! - `manager`: lives, score and brick events
//! - `scene_handler`: level order and transition state machine
//! - `transition`: the sliding wipe panel

pub mod manager;
pub mod scene_handler;
pub mod transition;

pub use manager::GameManager;
pub use scene_handler::{SceneHandler, TransitionRequest};
pub use transition::TransitionVisual;
