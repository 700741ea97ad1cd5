//! Rolling score counter
//!
//! Two labels stacked in one container: the "current" label is visible, the
//! "incoming" label sits `offset` below it. A new score is written into the
//! incoming label, the container slides up to reveal it, and once the slide
//! duration has elapsed the current label takes the new value and the
//! container snaps back to rest.
//!
//! Calls that arrive while a roll is in flight are not coalesced. Each one
//! schedules its own commit; the first commit to fire snaps the container
//! back and the last one leaves the final score on the current label.

use glam::Vec2;

use crate::platform::Label;
use crate::settings::ScoreRollSettings;
use crate::sim::{Scheduler, Tween};

pub struct ScoreRoll {
    current: Option<Box<dyn Label>>,
    incoming: Option<Box<dyn Label>>,
    settings: ScoreRollSettings,
    rest: Vec2,
    position: Vec2,
    slide: Option<Tween>,
    commits: Scheduler<u64>,
}

impl ScoreRoll {
    /// `rest` is the container's local position when idle
    pub fn new(settings: ScoreRollSettings, rest: Vec2) -> Self {
        Self {
            current: None,
            incoming: None,
            settings,
            rest,
            position: rest,
            slide: None,
            commits: Scheduler::new(),
        }
    }

    pub fn with_labels(mut self, current: Box<dyn Label>, incoming: Box<dyn Label>) -> Self {
        self.current = Some(current);
        self.incoming = Some(incoming);
        self
    }

    /// Reset both labels to zero and park the container
    pub fn start(&mut self) {
        if self.current.is_none() || self.incoming.is_none() {
            log::error!("Score roll labels are not bound - score animation disabled");
        }
        set_label(&mut self.current, "0");
        set_label(&mut self.incoming, "0");
        self.cancel_pending();
    }

    pub fn update_score(&mut self, score: u64) {
        set_label(&mut self.incoming, &score.to_string());

        self.slide = Some(Tween::new(
            self.position.y,
            self.rest.y + self.settings.offset,
            self.settings.duration,
            self.settings.ease,
        ));
        self.commits.schedule(self.settings.duration, score);
    }

    /// Advance the slide and apply any commits that came due
    pub fn update(&mut self, dt: f32) {
        if let Some(slide) = &mut self.slide {
            self.position.y = slide.advance(dt);
            if slide.is_finished() {
                self.slide = None;
            }
        }

        for score in self.commits.advance(dt) {
            set_label(&mut self.current, &score.to_string());
            self.position.y = self.rest.y;
            self.slide = None;
        }
    }

    /// Abort any roll in progress and snap back to rest
    pub fn cancel_pending(&mut self) {
        self.commits.clear();
        self.slide = None;
        self.position = self.rest;
    }

    /// Container local position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_rolling(&self) -> bool {
        self.commits.pending() > 0
    }
}

fn set_label(label: &mut Option<Box<dyn Label>>, text: &str) {
    if let Some(label) = label {
        label.set_text(text);
    }
}
