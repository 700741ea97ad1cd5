//! Per-run counters: lives, score and bricks left in the current level

use serde::{Deserialize, Serialize};

/// What a brick-destroyed event did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickOutcome {
    /// No bricks were left to destroy; state unchanged
    Ignored,
    /// Score went up, bricks remain
    Scored { score: u64, bricks_remaining: usize },
    /// Last brick of the level destroyed
    Cleared { score: u64 },
}

/// What a ball-lost event did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallLostOutcome {
    /// Game over already pending
    Ignored,
    LifeLost { lives_remaining: u32 },
    /// Lives ran out. Score is zeroed and lives restored for the next run.
    GameOver,
}

/// Lives, score and brick bookkeeping for one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    max_lives: u32,
    lives_remaining: u32,
    score: u64,
    bricks_remaining: usize,
    total_bricks: usize,
    is_game_over: bool,
}

impl GameSession {
    pub fn new(max_lives: u32) -> Self {
        Self {
            max_lives,
            lives_remaining: max_lives,
            score: 0,
            bricks_remaining: 0,
            total_bricks: 0,
            is_game_over: false,
        }
    }

    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives_remaining
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks_remaining
    }

    pub fn total_bricks(&self) -> usize {
        self.total_bricks
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Start counting a freshly loaded level
    pub fn reset_level(&mut self, total_bricks: usize) {
        self.total_bricks = total_bricks;
        self.bricks_remaining = total_bricks;
    }

    /// Back to the initial state of a new run
    pub fn reset_run(&mut self) {
        *self = Self::new(self.max_lives);
    }

    pub fn on_brick_destroyed(&mut self) -> BrickOutcome {
        if self.bricks_remaining == 0 {
            return BrickOutcome::Ignored;
        }

        self.bricks_remaining -= 1;
        self.score += 1;

        if self.bricks_remaining == 0 {
            BrickOutcome::Cleared { score: self.score }
        } else {
            BrickOutcome::Scored {
                score: self.score,
                bricks_remaining: self.bricks_remaining,
            }
        }
    }

    pub fn on_ball_lost(&mut self) -> BallLostOutcome {
        if self.is_game_over {
            return BallLostOutcome::Ignored;
        }

        match self.lives_remaining.checked_sub(1) {
            Some(lives) => {
                self.lives_remaining = lives;
                BallLostOutcome::LifeLost {
                    lives_remaining: lives,
                }
            }
            None => {
                self.is_game_over = true;
                self.score = 0;
                self.lives_remaining = self.max_lives;
                BallLostOutcome::GameOver
            }
        }
    }
}
