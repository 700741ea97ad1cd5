//! Level sequencing and animated scene transitions
//!
//! Two states: idle and transitioning. A transition starts on
//! `advance_level` / `return_to_menu` and ends when the engine reports the
//! destination scene loaded. Requests that arrive mid-transition are
//! rejected, never queued.

use crate::game::TransitionVisual;
use crate::platform::Engine;
use crate::settings::{Settings, TransitionSettings};
use crate::sim::{Destination, LevelSequence, Scheduler};

/// How a transition request was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionRequest {
    /// Wipe started; the scene load fires when it covers the screen
    Scheduled(String),
    /// No transition visual bound; scene load requested right away
    Immediate(String),
    /// Another transition is still in flight
    Rejected,
}

pub struct SceneHandler {
    sequence: LevelSequence,
    transition: TransitionSettings,
    bootstrap_scene: String,
    visual: Option<TransitionVisual>,
    is_transitioning: bool,
    subscribed: bool,
    loads: Scheduler<String>,
}

impl SceneHandler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sequence: LevelSequence::new(settings.levels.clone(), settings.menu_scene.clone()),
            transition: settings.transition.clone(),
            bootstrap_scene: settings.bootstrap_scene.clone(),
            visual: None,
            is_transitioning: false,
            subscribed: false,
            loads: Scheduler::new(),
        }
    }

    pub fn with_visual(mut self, visual: TransitionVisual) -> Self {
        self.visual = Some(visual);
        self
    }

    /// Begin listening for scene loads. Boots into the menu when the engine
    /// has nothing loaded yet or is still on the bootstrap scene.
    pub fn start(&mut self, engine: &mut dyn Engine) {
        self.subscribed = true;
        if self.visual.is_none() {
            log::error!("Transition visual is not bound - scene loads will not animate");
        }

        let at_boot = match engine.active_scene() {
            None => true,
            Some(scene) => scene == self.bootstrap_scene,
        };
        if at_boot {
            log::info!("Booting into menu '{}'", self.sequence.menu());
            engine.load_scene(self.sequence.menu());
        }
    }

    /// Stop listening for scene loads and drop any load not yet requested.
    /// A load already handed to the engine will not be reported back, so the
    /// transition guard is released here.
    pub fn stop(&mut self) {
        self.subscribed = false;
        self.loads.clear();
        if self.is_transitioning {
            log::debug!("Stopped mid-transition, releasing guard");
            if let Some(visual) = &mut self.visual {
                visual.slide_home(self.transition.duration, self.transition.ease);
            }
            self.is_transitioning = false;
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn sequence(&self) -> &LevelSequence {
        &self.sequence
    }

    pub fn visual(&self) -> Option<&TransitionVisual> {
        self.visual.as_ref()
    }

    /// Scene loads scheduled but not yet handed to the engine
    pub fn pending_loads(&self) -> usize {
        self.loads.pending()
    }

    /// Go to the next level, or to the menu once every level has been played
    pub fn advance_level(&mut self, engine: &mut dyn Engine) -> TransitionRequest {
        if self.is_transitioning {
            log::warn!("Scene transition already in progress!");
            return TransitionRequest::Rejected;
        }
        if self.sequence.is_exhausted() {
            return self.return_to_menu(engine);
        }

        let destination = self.sequence.advance();
        self.begin(destination, engine)
    }

    pub fn return_to_menu(&mut self, engine: &mut dyn Engine) -> TransitionRequest {
        if self.is_transitioning {
            log::warn!("Scene transition already in progress!");
            return TransitionRequest::Rejected;
        }

        let destination = self.sequence.to_menu();
        self.begin(destination, engine)
    }

    fn begin(&mut self, destination: Destination, engine: &mut dyn Engine) -> TransitionRequest {
        self.is_transitioning = true;
        let scene = destination.scene_name().to_string();

        match &mut self.visual {
            Some(visual) => {
                log::info!("Transitioning to '{}'", scene);
                visual.slide_out(self.transition.duration, self.transition.ease);
                self.loads.schedule(self.transition.duration, scene.clone());
                TransitionRequest::Scheduled(scene)
            }
            None => {
                log::error!("Cannot animate transition to '{}': no transition visual", scene);
                engine.load_scene(&scene);
                TransitionRequest::Immediate(scene)
            }
        }
    }

    /// Advance the wipe and hand due scene loads to the engine
    pub fn update(&mut self, dt: f32, engine: &mut dyn Engine) {
        if let Some(visual) = &mut self.visual {
            visual.update(dt);
        }
        for scene in self.loads.advance(dt) {
            engine.load_scene(&scene);
        }
    }

    /// Engine signal: a scene finished loading
    pub fn on_scene_loaded(&mut self, scene: &str) {
        if !self.subscribed {
            return;
        }
        log::debug!("Scene '{}' ready, uncovering", scene);
        if let Some(visual) = &mut self.visual {
            visual.slide_home(self.transition.duration, self.transition.ease);
        }
        self.is_transitioning = false;
    }

    /// Abort a transition whose scene load has not been requested yet.
    /// The level cursor is left where the aborted request put it.
    pub fn cancel_pending(&mut self) {
        if self.loads.pending() == 0 {
            return;
        }
        self.loads.clear();
        if let Some(visual) = &mut self.visual {
            visual.slide_home(self.transition.duration, self.transition.ease);
        }
        self.is_transitioning = false;
    }
}
