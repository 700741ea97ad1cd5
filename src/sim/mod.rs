//! Engine-independent game state
//!
//! Everything here is pure and deterministic:
//! - Time only moves through explicit `advance(dt)` calls
//! - No engine, UI or platform dependencies

pub mod levels;
pub mod scheduler;
pub mod session;
pub mod tween;

pub use levels::{Destination, LevelSequence};
pub use scheduler::{Scheduler, TimerId};
pub use session::{BallLostOutcome, BrickOutcome, GameSession};
pub use tween::{Ease, Tween, lerp};
