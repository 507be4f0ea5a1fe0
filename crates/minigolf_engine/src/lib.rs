//! # Minigolf Engine
//!
//! Collision detection and ball control for a minigolf game.
//!
//! ## Features
//!
//! - **Oriented Box Geometry**: Static level geometry loaded from text descriptors
//! - **Quad-Tree Broad Phase**: Build-once horizontal index over the level
//! - **Ball Controller**: Aim, charge and shoot, with bounce, rolling friction,
//!   checkpoints and out-of-bounds handling
//! - **Course Progression**: Goal volumes that advance play to the next hole
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minigolf_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GameConfig::default();
//!     let mut world = CollisionWorld::from_config(&config.world);
//!     world.load_descriptors("resources/courses/hole1.boxc", Some(CourseId(0)))?;
//!     world.build_index()?;
//!
//!     let courses = CourseSet::from_config(&config.courses);
//!     let mut ball = BallController::for_courses(config.ball.clone(), &courses);
//!     let mut clock = FrameClock::new(config.engine.max_frame_time);
//!
//!     loop {
//!         let delta_time = clock.tick();
//!         let report = ball.tick(KeyState::empty(), delta_time, &world, &courses);
//!         if report.completed.is_some() {
//!             break;
//!         }
//!         let _frame = present(&ball);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod spatial;
pub mod physics;
pub mod controller;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::Config,
        controller::{
            present, BallController, CameraMode, CourseSet, KeyState, Presentation, ShotPhase,
            TickReport,
        },
        core::{BallConfig, GameConfig, WorldConfig},
        foundation::{
            math::{Vec2, Vec3},
            time::FrameClock,
        },
        physics::{
            BoxCollider, Collider, CollisionError, CollisionWorld, CourseId, SphereCollider,
        },
    };
}
