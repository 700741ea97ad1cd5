//! Central gameplay coordinator
//!
//! Owns the session counters and reacts to the three gameplay signals:
//! fire input, brick destroyed, and ball lost. Counter updates always happen
//! before any UI or scene side effect issued for the same event.

use glam::Vec3;

use crate::game::{SceneHandler, TransitionRequest};
use crate::platform::{Ball, Engine};
use crate::settings::Settings;
use crate::sim::{BallLostOutcome, BrickOutcome, GameSession, Scheduler};
use crate::ui::{Hud, ScoreRoll};

/// Work the manager defers to a later frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ReturnToMenu,
}

pub struct GameManager {
    session: GameSession,
    scenes: SceneHandler,
    score_roll: ScoreRoll,
    hud: Hud,
    ball: Option<Box<dyn Ball>>,
    game_over_delay: f32,
    enabled: bool,
    /// Game over happened and the menu has not loaded yet
    awaiting_menu: bool,
    deferred: Scheduler<Deferred>,
}

impl GameManager {
    pub fn new(settings: &Settings, scenes: SceneHandler, score_roll: ScoreRoll, hud: Hud) -> Self {
        Self {
            session: GameSession::new(settings.max_lives),
            scenes,
            score_roll,
            hud,
            ball: None,
            game_over_delay: settings.game_over_delay,
            enabled: false,
            awaiting_menu: false,
            deferred: Scheduler::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn scenes(&self) -> &SceneHandler {
        &self.scenes
    }

    pub fn score_roll(&self) -> &ScoreRoll {
        &self.score_roll
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True between a game over and the menu finishing its load
    pub fn is_awaiting_menu(&self) -> bool {
        self.awaiting_menu
    }

    /// Enable input and scene-load handling and prepare the current scene
    pub fn start(&mut self, engine: &mut dyn Engine) {
        self.enabled = true;
        self.scenes.start(engine);
        self.score_roll.start();
        self.hud.set_game_over(false);
        self.reset_level(engine);
        self.refresh_hud();
    }

    /// Disable input and scene-load handling and drop pending deferred work
    pub fn stop(&mut self) {
        self.enabled = false;
        self.scenes.stop();
        self.score_roll.cancel_pending();
        self.deferred.clear();
        self.awaiting_menu = false;
    }

    /// Fire input from the player
    pub fn on_fire(&mut self) {
        if !self.enabled {
            return;
        }
        match &mut self.ball {
            Some(ball) => ball.fire_ball(),
            None => log::warn!("Fire ignored: no ball in this scene"),
        }
    }

    /// A brick reported its own destruction
    pub fn on_brick_destroyed(&mut self, position: Vec3, engine: &mut dyn Engine) -> BrickOutcome {
        if self.awaiting_menu || self.session.is_game_over() {
            log::debug!("Brick destroyed at {} after game over - ignored", position);
            return BrickOutcome::Ignored;
        }

        let outcome = self.session.on_brick_destroyed();
        match outcome {
            BrickOutcome::Ignored => {
                log::warn!("Brick destroyed at {} with no bricks remaining - ignored", position);
            }
            BrickOutcome::Scored { score, .. } => {
                self.publish_score(score);
            }
            BrickOutcome::Cleared { score } => {
                self.publish_score(score);
                log::info!("Level cleared with score {}", score);
                self.scenes.advance_level(engine);
            }
        }
        outcome
    }

    /// The ball fell past the paddle
    pub fn kill_ball(&mut self, engine: &mut dyn Engine) -> BallLostOutcome {
        if self.awaiting_menu {
            log::debug!("Ball lost while game over is pending - ignored");
            return BallLostOutcome::Ignored;
        }

        let outcome = self.session.on_ball_lost();
        match outcome {
            BallLostOutcome::Ignored => {
                log::debug!("Ball lost while game over is pending - ignored");
            }
            BallLostOutcome::LifeLost { lives_remaining } => {
                self.reset_ball();
                self.hud.show_lives(lives_remaining);
            }
            BallLostOutcome::GameOver => {
                log::info!("Game over");
                self.awaiting_menu = true;
                self.reset_ball();
                self.hud.show_lives(0);
                self.hud.show_score(0);
                self.show_game_over(engine);
            }
        }
        outcome
    }

    /// Start the next level (also used by the menu to begin a run)
    pub fn advance_level(&mut self, engine: &mut dyn Engine) -> TransitionRequest {
        self.scenes.advance_level(engine)
    }

    pub fn return_to_menu(&mut self, engine: &mut dyn Engine) -> TransitionRequest {
        self.hud.set_game_over(false);
        self.scenes.return_to_menu(engine)
    }

    /// Engine signal: a scene finished loading. Every load starts the
    /// session over from its initial values.
    pub fn on_scene_loaded(&mut self, scene: &str, engine: &mut dyn Engine) {
        if !self.enabled {
            return;
        }
        self.scenes.on_scene_loaded(scene);

        if self.scenes.sequence().is_menu(scene) {
            log::info!("Back at menu");
            self.deferred.clear();
            self.awaiting_menu = false;
        }

        self.session.reset_run();
        self.score_roll.start();
        if !self.awaiting_menu {
            self.hud.set_game_over(false);
        }
        self.reset_level(engine);
        self.refresh_hud();

        // The menu request lost a race with a level transition
        if self.awaiting_menu && self.deferred.pending() == 0 {
            log::warn!("Game over pending on '{}' - returning to menu", scene);
            self.finish_game_over(engine);
        }
    }

    /// Advance timed work: transitions, score roll, deferred game over
    pub fn update(&mut self, dt: f32, engine: &mut dyn Engine) {
        self.scenes.update(dt, engine);
        self.score_roll.update(dt);

        for action in self.deferred.advance(dt) {
            match action {
                Deferred::ReturnToMenu => self.finish_game_over(engine),
            }
        }
    }

    /// Re-resolve the scene's ball and bricks and reset the ball.
    /// Missing bindings are only reported for configured level scenes.
    fn reset_level(&mut self, engine: &mut dyn Engine) {
        let in_level = engine
            .active_scene()
            .is_some_and(|scene| self.scenes.sequence().is_level(scene));

        self.ball = engine.find_ball();
        if self.ball.is_none() && in_level {
            log::warn!("No ball found in scene");
        }

        let bricks = engine.bricks_in_container().unwrap_or_else(|| {
            if in_level {
                log::warn!("No bricks container found in scene - playing with zero bricks");
            }
            0
        });
        self.session.reset_level(bricks);
        self.reset_ball();
    }

    fn reset_ball(&mut self) {
        if let Some(ball) = &mut self.ball {
            ball.reset_ball();
        }
    }

    fn publish_score(&mut self, score: u64) {
        self.hud.show_score(score);
        self.score_roll.update_score(score);
    }

    fn refresh_hud(&mut self) {
        self.hud.show_lives(self.session.lives_remaining());
        self.hud.show_score(self.session.score());
    }

    fn show_game_over(&mut self, engine: &mut dyn Engine) {
        if self.hud.has_game_over_overlay() {
            self.hud.set_game_over(true);
            self.deferred.schedule(self.game_over_delay, Deferred::ReturnToMenu);
        } else {
            self.finish_game_over(engine);
        }
    }

    /// Hide the overlay and head for the menu. A rejected request is retried
    /// when the transition in flight lands.
    fn finish_game_over(&mut self, engine: &mut dyn Engine) {
        if self.return_to_menu(engine) == TransitionRequest::Rejected {
            log::warn!("Menu request deferred until the current transition lands");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::game::TransitionVisual;
    use crate::platform::{HeadlessEngine, SceneLayout, SharedLabel, SharedOverlay};
    use glam::Vec2;

    struct Rig {
        manager: GameManager,
        engine: HeadlessEngine,
        lives: SharedLabel,
        score: SharedLabel,
        rolled: SharedLabel,
        game_over: SharedOverlay,
    }

    fn settings() -> Settings {
        Settings {
            levels: vec!["L1".into(), "L2".into()],
            menu_scene: "Menu".into(),
            bootstrap_scene: "Boot".into(),
            ..Default::default()
        }
    }

    fn rig_with(with_visual: bool, with_overlay: bool) -> Rig {
        rig_from(settings(), with_visual, with_overlay)
    }

    fn rig_from(settings: Settings, with_visual: bool, with_overlay: bool) -> Rig {
        let engine = HeadlessEngine::new()
            .with_scene("Boot", SceneLayout::empty())
            .with_scene("Menu", SceneLayout::empty())
            .with_scene("L1", SceneLayout::level(3))
            .with_scene("L2", SceneLayout::level(2))
            .with_active("Boot");

        let lives = SharedLabel::new();
        let score = SharedLabel::new();
        let rolled = SharedLabel::new();
        let game_over = SharedOverlay::new();

        let mut scenes = SceneHandler::new(&settings);
        if with_visual {
            scenes = scenes.with_visual(TransitionVisual::new(Vec2::ZERO, 1280.0));
        }
        let score_roll = ScoreRoll::new(settings.score_roll.clone(), Vec2::new(0.0, 2.0))
            .with_labels(Box::new(rolled.clone()), Box::new(SharedLabel::new()));
        let mut hud = Hud::new()
            .with_lives_label(Box::new(lives.clone()))
            .with_score_label(Box::new(score.clone()));
        if with_overlay {
            hud = hud.with_game_over_overlay(Box::new(game_over.clone()));
        }

        let mut rig = Rig {
            manager: GameManager::new(&settings, scenes, score_roll, hud),
            engine,
            lives,
            score,
            rolled,
            game_over,
        };
        rig.manager.start(&mut rig.engine);
        rig.run(0.1);
        rig
    }

    fn rig() -> Rig {
        rig_with(true, false)
    }

    impl Rig {
        /// Fixed-step frames, delivering scene loads as the engine finishes them
        fn run(&mut self, secs: f32) {
            let frames = (secs / SIM_DT).ceil() as u32;
            for _ in 0..frames {
                self.manager.update(SIM_DT, &mut self.engine);
                for scene in self.engine.pump_loads() {
                    self.manager.on_scene_loaded(&scene, &mut self.engine);
                }
            }
        }

        fn destroy_bricks(&mut self, n: usize) {
            for _ in 0..n {
                self.manager.on_brick_destroyed(Vec3::ZERO, &mut self.engine);
            }
        }

        fn play_from_menu(&mut self) {
            self.manager.advance_level(&mut self.engine);
            self.run(1.5);
        }
    }

    #[test]
    fn test_start_boots_into_menu() {
        let rig = rig();
        assert_eq!(rig.engine.active_scene(), Some("Menu"));
        assert_eq!(rig.lives.text(), "Lives: 3");
        assert_eq!(rig.score.text(), "Score: 0");
        assert_eq!(rig.rolled.text(), "0");
    }

    #[test]
    fn test_level_load_counts_bricks_and_resets_ball() {
        let mut rig = rig();
        rig.play_from_menu();

        assert_eq!(rig.engine.active_scene(), Some("L1"));
        assert_eq!(rig.manager.session().total_bricks(), 3);
        assert_eq!(rig.manager.session().bricks_remaining(), 3);
        assert!(rig.engine.ball_stats().resets >= 1);
        assert!(!rig.manager.scenes().is_transitioning());
    }

    #[test]
    fn test_fire_reaches_ball() {
        let mut rig = rig();
        // Menu has no ball
        rig.manager.on_fire();
        assert_eq!(rig.engine.ball_stats().fires, 0);

        rig.play_from_menu();
        rig.manager.on_fire();
        assert_eq!(rig.engine.ball_stats().fires, 1);
    }

    #[test]
    fn test_partial_clear_does_not_advance() {
        let mut rig = rig();
        rig.play_from_menu();

        rig.destroy_bricks(2);
        assert_eq!(rig.manager.session().bricks_remaining(), 1);
        assert_eq!(rig.manager.session().score(), 2);
        assert_eq!(rig.score.text(), "Score: 2");
        assert!(!rig.manager.scenes().is_transitioning());

        rig.run(0.5);
        assert_eq!(rig.rolled.text(), "2");
    }

    #[test]
    fn test_full_run_returns_to_menu() {
        let mut rig = rig();
        assert_eq!(rig.manager.scenes().sequence().next_level_index(), 0);

        rig.play_from_menu();
        assert_eq!(rig.engine.active_scene(), Some("L1"));
        assert_eq!(rig.manager.scenes().sequence().next_level_index(), 1);

        rig.destroy_bricks(3);
        assert!(rig.manager.scenes().is_transitioning());
        rig.run(1.5);
        assert_eq!(rig.engine.active_scene(), Some("L2"));
        assert_eq!(rig.manager.scenes().sequence().next_level_index(), 2);
        // Each scene load starts the session over
        assert_eq!(rig.manager.session().score(), 0);

        rig.destroy_bricks(2);
        assert_eq!(rig.manager.scenes().sequence().next_level_index(), 0);
        rig.run(1.5);
        assert_eq!(rig.engine.active_scene(), Some("Menu"));
        assert_eq!(rig.manager.session().score(), 0);
        assert_eq!(rig.engine.requested_loads(), ["Menu", "L1", "L2", "Menu"]);
    }

    #[test]
    fn test_level_load_resets_session() {
        let mut rig = rig();
        rig.play_from_menu();

        rig.manager.kill_ball(&mut rig.engine);
        rig.destroy_bricks(3);
        assert_eq!(rig.manager.session().lives_remaining(), 2);
        assert_eq!(rig.manager.session().score(), 3);

        rig.run(1.5);
        assert_eq!(rig.engine.active_scene(), Some("L2"));
        assert_eq!(rig.manager.session().score(), 0);
        assert_eq!(rig.manager.session().lives_remaining(), 3);
        assert_eq!(rig.manager.session().bricks_remaining(), 2);
        assert_eq!(rig.lives.text(), "Lives: 3");
        assert_eq!(rig.score.text(), "Score: 0");
        assert_eq!(rig.rolled.text(), "0");
    }

    #[test]
    fn test_duplicate_brick_signal_is_ignored() {
        let mut rig = rig();
        rig.play_from_menu();
        rig.destroy_bricks(3);

        let outcome = rig.manager.on_brick_destroyed(Vec3::ONE, &mut rig.engine);
        assert_eq!(outcome, BrickOutcome::Ignored);
        assert_eq!(rig.manager.session().score(), 3);
        assert_eq!(rig.manager.scenes().pending_loads(), 1);
    }

    #[test]
    fn test_game_over_returns_to_menu() {
        let mut rig = rig();
        rig.play_from_menu();
        rig.destroy_bricks(1);
        let resets_before = rig.engine.ball_stats().resets;

        for lives in [2, 1, 0] {
            rig.manager.kill_ball(&mut rig.engine);
            assert_eq!(rig.lives.text(), format!("Lives: {}", lives));
        }
        assert!(!rig.manager.session().is_game_over());

        assert_eq!(rig.manager.kill_ball(&mut rig.engine), BallLostOutcome::GameOver);
        assert!(rig.manager.session().is_game_over());
        assert_eq!(rig.manager.session().score(), 0);
        assert_eq!(rig.manager.session().lives_remaining(), 3);
        assert_eq!(rig.engine.ball_stats().resets, resets_before + 4);
        assert!(rig.manager.scenes().is_transitioning());

        assert_eq!(rig.manager.kill_ball(&mut rig.engine), BallLostOutcome::Ignored);

        rig.run(1.5);
        assert_eq!(rig.engine.active_scene(), Some("Menu"));
        assert!(!rig.manager.session().is_game_over());
        assert_eq!(rig.lives.text(), "Lives: 3");
        assert_eq!(rig.manager.scenes().sequence().next_level_index(), 0);
    }

    #[test]
    fn test_game_over_overlay_delays_menu() {
        let mut rig = rig_with(true, true);
        rig.play_from_menu();

        for _ in 0..4 {
            rig.manager.kill_ball(&mut rig.engine);
        }
        assert!(rig.game_over.is_active());
        assert!(!rig.manager.scenes().is_transitioning());

        // Overlay delay, then the wipe
        rig.run(1.6);
        assert!(!rig.game_over.is_active());
        assert!(rig.manager.scenes().is_transitioning());
        rig.run(1.5);
        assert_eq!(rig.engine.active_scene(), Some("Menu"));
    }

    /// Clear L1, then run out of lives while the wipe to L2 is still covering
    fn game_over_during_wipe(rig: &mut Rig) {
        rig.play_from_menu();
        rig.destroy_bricks(3);
        assert!(rig.manager.scenes().is_transitioning());
        for _ in 0..4 {
            rig.manager.kill_ball(&mut rig.engine);
        }
        assert!(rig.manager.is_awaiting_menu());
    }

    #[test]
    fn test_game_over_during_wipe_returns_to_menu_after_level_loads() {
        let mut rig = rig();
        game_over_during_wipe(&mut rig);

        rig.run(1.5);
        assert_eq!(rig.engine.active_scene(), Some("L2"));
        // Menu re-requested once the level landed; the level is not playable
        assert!(rig.manager.scenes().is_transitioning());
        assert_eq!(rig.manager.kill_ball(&mut rig.engine), BallLostOutcome::Ignored);
        assert_eq!(
            rig.manager.on_brick_destroyed(Vec3::ZERO, &mut rig.engine),
            BrickOutcome::Ignored
        );

        rig.run(1.5);
        assert_eq!(rig.engine.active_scene(), Some("Menu"));
        assert!(!rig.manager.is_awaiting_menu());
        assert_eq!(rig.engine.requested_loads(), ["Menu", "L1", "L2", "Menu"]);
    }

    #[test]
    fn test_game_over_overlay_outlasts_wipe() {
        let mut rig = rig_with(true, true);
        game_over_during_wipe(&mut rig);
        assert!(rig.game_over.is_active());

        // L2 lands before the overlay delay runs out
        rig.run(1.2);
        assert_eq!(rig.engine.active_scene(), Some("L2"));
        assert!(rig.game_over.is_active());
        assert!(!rig.manager.scenes().is_transitioning());

        rig.run(0.5);
        assert!(!rig.game_over.is_active());
        assert!(rig.manager.scenes().is_transitioning());

        rig.run(1.5);
        assert_eq!(rig.engine.active_scene(), Some("Menu"));
        assert_eq!(rig.engine.requested_loads(), ["Menu", "L1", "L2", "Menu"]);
    }

    #[test]
    fn test_short_game_over_overlay_retries_after_wipe() {
        let mut settings = settings();
        settings.game_over_delay = 0.5;
        let mut rig = rig_from(settings, true, true);
        game_over_during_wipe(&mut rig);

        // Delay runs out mid-wipe; the menu request is rejected
        rig.run(0.6);
        assert!(!rig.game_over.is_active());
        assert!(rig.manager.is_awaiting_menu());
        assert_eq!(rig.engine.requested_loads(), ["Menu", "L1"]);

        rig.run(1.0);
        assert_eq!(rig.engine.active_scene(), Some("L2"));
        assert!(rig.manager.scenes().is_transitioning());

        rig.run(1.5);
        assert_eq!(rig.engine.active_scene(), Some("Menu"));
        assert_eq!(rig.engine.requested_loads(), ["Menu", "L1", "L2", "Menu"]);
    }

    #[test]
    fn test_no_visual_loads_immediately() {
        let mut rig = rig_with(false, false);
        assert_eq!(
            rig.manager.advance_level(&mut rig.engine),
            TransitionRequest::Immediate("L1".into())
        );
        rig.run(SIM_DT);
        assert_eq!(rig.engine.active_scene(), Some("L1"));
        assert!(!rig.manager.scenes().is_transitioning());
    }

    #[test]
    fn test_level_without_container_has_zero_bricks() {
        let settings = settings();
        let mut engine = HeadlessEngine::new()
            .with_scene(
                "L1",
                SceneLayout {
                    brick_count: None,
                    has_ball: false,
                },
            )
            .with_active("L1");
        let scenes = SceneHandler::new(&settings);
        let score_roll = ScoreRoll::new(settings.score_roll.clone(), Vec2::ZERO);
        let mut manager = GameManager::new(&settings, scenes, score_roll, Hud::new());

        manager.start(&mut engine);
        assert_eq!(manager.session().total_bricks(), 0);
        assert_eq!(
            manager.on_brick_destroyed(Vec3::ZERO, &mut engine),
            BrickOutcome::Ignored
        );
        manager.on_fire();
        assert_eq!(engine.ball_stats().fires, 0);
    }

    #[test]
    fn test_stopped_manager_ignores_fire_and_loads() {
        let mut rig = rig();
        rig.play_from_menu();
        rig.manager.stop();
        assert!(!rig.manager.is_enabled());

        rig.manager.on_fire();
        assert_eq!(rig.engine.ball_stats().fires, 0);
    }

    #[test]
    fn test_restart_after_stop_mid_wipe() {
        let mut rig = rig();
        rig.play_from_menu();
        rig.destroy_bricks(3);
        assert!(rig.manager.scenes().is_transitioning());

        rig.manager.stop();
        rig.manager.start(&mut rig.engine);
        rig.run(2.0);
        assert_eq!(rig.engine.active_scene(), Some("L1"));
        assert!(!rig.manager.scenes().is_transitioning());

        // Cursor already moved past L2, so the next advance heads for the menu
        assert_eq!(
            rig.manager.advance_level(&mut rig.engine),
            TransitionRequest::Scheduled("Menu".into())
        );
        rig.run(1.5);
        assert_eq!(rig.engine.active_scene(), Some("Menu"));
    }
}
