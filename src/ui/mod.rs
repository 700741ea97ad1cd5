//! On-screen presentation driven by gameplay events

pub mod hud;
pub mod score_roll;

pub use hud::Hud;
pub use score_roll::ScoreRoll;
