//! Brickbreak headless runner
//!
//! Plays one seeded autoplay run against the in-memory engine at a fixed
//! timestep and logs every gameplay event.
//!
//! Usage: `brickbreak [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use glam::Vec3;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use brickbreak::consts::*;
    use brickbreak::platform::{Engine, HeadlessEngine, SceneLayout, SharedLabel, SharedOverlay};
    use brickbreak::sim::{BallLostOutcome, BrickOutcome};
    use brickbreak::ui::{Hud, ScoreRoll};
    use brickbreak::{GameManager, SceneHandler, Settings, TransitionVisual};

    /// Frames between rally outcomes once the ball is in play
    const RALLY_FRAMES: u32 = 20;
    /// Chance a rally ends with a brick broken rather than the ball lost
    const HIT_CHANCE: f64 = 0.85;
    /// Give up after ten minutes of simulated time
    const MAX_FRAMES: u32 = 60 * 600;

    fn bricks_for_level(index: usize) -> usize {
        6 + index * 4
    }

    fn build_engine(settings: &Settings) -> HeadlessEngine {
        let mut engine = HeadlessEngine::new()
            .with_scene(settings.bootstrap_scene.clone(), SceneLayout::empty())
            .with_scene(settings.menu_scene.clone(), SceneLayout::empty())
            .with_active(settings.bootstrap_scene.clone());
        for (i, level) in settings.levels.iter().enumerate() {
            engine = engine.with_scene(level.clone(), SceneLayout::level(bricks_for_level(i)));
        }
        engine
    }

    pub fn run(settings: Settings, seed: u64) {
        for problem in settings.validate() {
            log::warn!("Settings: {}", problem);
        }

        let mut engine = build_engine(&settings);
        let score_label = SharedLabel::new();
        let lives_label = SharedLabel::new();

        let scenes = SceneHandler::new(&settings)
            .with_visual(TransitionVisual::new(glam::Vec2::ZERO, 1280.0));
        let score_roll = ScoreRoll::new(settings.score_roll.clone(), glam::Vec2::new(0.0, 2.0))
            .with_labels(Box::new(SharedLabel::new()), Box::new(SharedLabel::new()));
        let hud = Hud::new()
            .with_lives_label(Box::new(lives_label.clone()))
            .with_score_label(Box::new(score_label.clone()))
            .with_game_over_overlay(Box::new(SharedOverlay::new()));

        let mut manager = GameManager::new(&settings, scenes, score_roll, hud);
        manager.start(&mut engine);

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut run_started = false;
        let mut ball_in_play = false;
        let mut rally_timer = 0;
        let mut best_score = 0;

        for frame in 0..MAX_FRAMES {
            manager.update(SIM_DT, &mut engine);

            let mut back_at_menu = false;
            for scene in engine.pump_loads() {
                manager.on_scene_loaded(&scene, &mut engine);
                ball_in_play = false;
                back_at_menu |= run_started && scene == settings.menu_scene;
            }
            if back_at_menu {
                log::info!(
                    "Run over after {:.1}s - best score {}",
                    frame as f32 * SIM_DT,
                    best_score
                );
                break;
            }

            if manager.scenes().is_transitioning() || manager.session().is_game_over() {
                continue;
            }

            let in_menu = engine.active_scene() == Some(settings.menu_scene.as_str());
            if in_menu {
                if !run_started {
                    log::info!("Starting run (seed {})", seed);
                    manager.advance_level(&mut engine);
                    run_started = true;
                }
                continue;
            }

            if !ball_in_play {
                manager.on_fire();
                ball_in_play = true;
                rally_timer = 0;
                continue;
            }

            rally_timer += 1;
            if rally_timer < RALLY_FRAMES {
                continue;
            }
            rally_timer = 0;

            if rng.random_bool(HIT_CHANCE) {
                let position = Vec3::new(
                    rng.random_range(-300.0..300.0),
                    rng.random_range(0.0..200.0),
                    0.0,
                );
                if let BrickOutcome::Cleared { score } = manager.on_brick_destroyed(position, &mut engine) {
                    best_score = best_score.max(score);
                    ball_in_play = false;
                }
                best_score = best_score.max(manager.session().score());
            } else {
                match manager.kill_ball(&mut engine) {
                    BallLostOutcome::LifeLost { lives_remaining } => {
                        log::info!("Ball lost - {} lives left", lives_remaining);
                    }
                    BallLostOutcome::GameOver => {
                        log::info!("Out of lives");
                    }
                    BallLostOutcome::Ignored => {}
                }
                ball_in_play = false;
            }
        }

        log::info!("Final HUD: {} / {}", score_label.text(), lives_label.text());
        log::info!("Scenes loaded: {:?}", engine.requested_loads());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brickbreak::Settings;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brickbreak (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    autoplay::run(settings, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless runner is native only
}
