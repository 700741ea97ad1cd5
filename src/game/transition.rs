//! Sliding overlay that masks scene loads

use glam::Vec2;

use crate::sim::{Ease, Tween};

/// Full-screen panel that slides one width across to cover the screen and
/// slides back to uncover it
#[derive(Debug, Clone)]
pub struct TransitionVisual {
    rest: Vec2,
    width: f32,
    position: Vec2,
    slide: Option<Tween>,
}

impl TransitionVisual {
    pub fn new(rest: Vec2, width: f32) -> Self {
        Self {
            rest,
            width,
            position: rest,
            slide: None,
        }
    }

    /// Slide one panel width from rest
    pub fn slide_out(&mut self, duration: f32, ease: Ease) {
        self.slide_to(self.rest.x + self.width, duration, ease);
    }

    /// Slide back to rest
    pub fn slide_home(&mut self, duration: f32, ease: Ease) {
        self.slide_to(self.rest.x, duration, ease);
    }

    fn slide_to(&mut self, x: f32, duration: f32, ease: Ease) {
        self.slide = Some(Tween::new(self.position.x, x, duration, ease));
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(slide) = &mut self.slide {
            self.position.x = slide.advance(dt);
            if slide.is_finished() {
                self.slide = None;
            }
        }
    }

    /// Local position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Horizontal distance from rest (0 = uncovered, width = covering)
    pub fn offset(&self) -> f32 {
        self.position.x - self.rest.x
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }
}
