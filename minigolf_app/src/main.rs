//! Headless Minigolf Demo
//!
//! Loads a course configuration and lets a scripted golfer play every hole
//! at a fixed 60 Hz step, logging shots, resets and completed holes.
//!
//! Usage: `minigolf_app [config.toml|config.ron]`

mod autoplay;

use std::path::{Path, PathBuf};

use minigolf_engine::config::{Config, ConfigError};
use minigolf_engine::controller::{present, BallController, CourseSet, ResetReason, ShotPhase};
use minigolf_engine::core::GameConfig;
use minigolf_engine::foundation::logging;
use minigolf_engine::foundation::time::FrameClock;
use minigolf_engine::physics::{CollisionError, CollisionWorld, CourseId};

use autoplay::Autoplayer;

const FRAME_TIME: f32 = 1.0 / 60.0;
const MAX_STROKES: u32 = 12;
const MAX_FRAMES: u64 = 60 * 60 * 10;
const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/minigolf.toml");

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("collision geometry: {0}")]
    Collision(#[from] CollisionError),
}

struct MinigolfApp {
    world: CollisionWorld,
    courses: CourseSet,
    ball: BallController,
    clock: FrameClock,
    golfer: Autoplayer,
    scorecard: Vec<(CourseId, Option<u32>)>,
}

impl MinigolfApp {
    fn new(config_path: &Path) -> Result<Self, AppError> {
        let config = GameConfig::load_from_file(config_path)?;
        config.validate()?;
        logging::init_with_level(&config.engine.log_level);
        log::info!("Loaded configuration from {}", config_path.display());

        let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
        let mut world = CollisionWorld::from_config(&config.world);
        for (index, course) in config.courses.iter().enumerate() {
            match &course.colliders {
                Some(file) => {
                    world.load_descriptors(base_dir.join(file), Some(CourseId(index)))?;
                }
                None => log::warn!("{} has no collider file", CourseId(index)),
            }
        }
        world.build_index()?;

        let courses = CourseSet::from_config(&config.courses);
        let ball = BallController::for_courses(config.ball.clone(), &courses)
            .with_max_frame_time(config.engine.max_frame_time);

        Ok(Self {
            world,
            courses,
            ball,
            clock: FrameClock::new(config.engine.max_frame_time),
            golfer: Autoplayer::default(),
            scorecard: Vec::new(),
        })
    }

    fn run(mut self) -> Result<(), AppError> {
        while self.scorecard.len() < self.courses.len() && self.clock.frame_count() < MAX_FRAMES {
            let keys = self.golfer.next_keys(&self.ball, &self.courses, FRAME_TIME);
            let delta_time = self.clock.advance(FRAME_TIME);
            let report = self.ball.tick(keys, delta_time, &self.world, &self.courses);

            match report.reset {
                Some(ResetReason::OutOfBounds) => log::info!("Out of bounds, back to checkpoint"),
                Some(ResetReason::SafetyNet) => log::info!("Ball lost, back to checkpoint"),
                None => {}
            }

            if let Some(course) = report.completed {
                log::info!("{} holed in {} strokes", course, self.golfer.strokes());
                self.scorecard.push((course, Some(self.golfer.strokes())));
                self.golfer.reset_strokes();
            } else if self.golfer.strokes() >= MAX_STROKES && self.ball.phase() == ShotPhase::Idle {
                let course = CourseId(self.ball.active_course());
                log::warn!("Giving up on {} after {} strokes", course, MAX_STROKES);
                self.scorecard.push((course, None));
                self.golfer.reset_strokes();
                let next = self.courses.next_index(course.0);
                self.ball.start_course(next, &self.courses);
            }
        }

        let frame = present(&self.ball);
        if let Some(camera) = frame.camera {
            log::debug!("Final camera eye {:?} looking at {:?}", camera.eye, camera.target);
        }

        println!();
        println!("=== Scorecard ({:.1}s simulated) ===", self.clock.total_time());
        for (course, strokes) in &self.scorecard {
            match strokes {
                Some(strokes) => println!("  {course}: {strokes}"),
                None => println!("  {course}: gave up"),
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);

    println!("=== Minigolf Demo ===");
    println!("Config: {}", config_path.display());

    let app = MinigolfApp::new(&config_path)?;
    app.run()?;
    Ok(())
}
