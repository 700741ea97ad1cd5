//! In-memory engine for the headless binary and tests
//!
//! Scene loads are queued and only applied on `pump_loads`, which mirrors an
//! engine finishing the load on a later frame.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use super::{Ball, Engine, Label, Overlay};

/// Counts what has been done to the ball
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BallStats {
    pub resets: u32,
    pub fires: u32,
}

struct HeadlessBall(Rc<RefCell<BallStats>>);

impl Ball for HeadlessBall {
    fn reset_ball(&mut self) {
        self.0.borrow_mut().resets += 1;
    }

    fn fire_ball(&mut self) {
        self.0.borrow_mut().fires += 1;
    }
}

/// What a scene contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    /// Bricks container child count (None = no container)
    pub brick_count: Option<usize>,
    pub has_ball: bool,
}

impl SceneLayout {
    /// A level with a ball and `bricks` bricks
    pub fn level(bricks: usize) -> Self {
        Self {
            brick_count: Some(bricks),
            has_ball: true,
        }
    }

    /// A scene with neither ball nor bricks (menus, bootstrap)
    pub fn empty() -> Self {
        Self {
            brick_count: None,
            has_ball: false,
        }
    }
}

/// Headless engine with a fixed scene registry
#[derive(Default)]
pub struct HeadlessEngine {
    scenes: HashMap<String, SceneLayout>,
    active: Option<String>,
    queued: VecDeque<String>,
    requested: Vec<String>,
    ball: Rc<RefCell<BallStats>>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene
    pub fn with_scene(mut self, name: impl Into<String>, layout: SceneLayout) -> Self {
        self.scenes.insert(name.into(), layout);
        self
    }

    /// Mark a registered scene as already loaded (engine boot scene)
    pub fn with_active(mut self, name: impl Into<String>) -> Self {
        self.active = Some(name.into());
        self
    }

    /// Apply queued loads in request order and return the scenes that
    /// finished loading. Unknown scenes are dropped with an error.
    pub fn pump_loads(&mut self) -> Vec<String> {
        let mut loaded = Vec::new();
        while let Some(name) = self.queued.pop_front() {
            if self.scenes.contains_key(&name) {
                log::info!("Scene '{}' loaded", name);
                self.active = Some(name.clone());
                loaded.push(name);
            } else {
                log::error!("Scene '{}' is not registered", name);
            }
        }
        loaded
    }

    /// Every load ever requested, in order
    pub fn requested_loads(&self) -> &[String] {
        &self.requested
    }

    pub fn queued_loads(&self) -> usize {
        self.queued.len()
    }

    /// Snapshot of the ball counters
    pub fn ball_stats(&self) -> BallStats {
        self.ball.borrow().clone()
    }

    fn active_layout(&self) -> Option<&SceneLayout> {
        self.active.as_ref().and_then(|name| self.scenes.get(name))
    }
}

impl Engine for HeadlessEngine {
    fn active_scene(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn load_scene(&mut self, name: &str) {
        self.requested.push(name.to_string());
        self.queued.push_back(name.to_string());
    }

    fn find_ball(&mut self) -> Option<Box<dyn Ball>> {
        match self.active_layout() {
            Some(layout) if layout.has_ball => {
                let ball: Box<dyn Ball> = Box::new(HeadlessBall(self.ball.clone()));
                Some(ball)
            }
            _ => None,
        }
    }

    fn bricks_in_container(&self) -> Option<usize> {
        self.active_layout().and_then(|layout| layout.brick_count)
    }
}

/// Label whose text can be read back through any clone
#[derive(Debug, Clone, Default)]
pub struct SharedLabel(Rc<RefCell<String>>);

impl SharedLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }
}

impl Label for SharedLabel {
    fn set_text(&mut self, text: &str) {
        *self.0.borrow_mut() = text.to_string();
    }
}

/// Overlay whose visibility can be read back through any clone
#[derive(Debug, Clone, Default)]
pub struct SharedOverlay(Rc<RefCell<bool>>);

impl SharedOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        *self.0.borrow()
    }
}

impl Overlay for SharedOverlay {
    fn set_active(&mut self, active: bool) {
        *self.0.borrow_mut() = active;
    }
}
