//! # Core Engine Module
//!
//! Shared abstractions used by every subsystem of the engine.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the collision world, the ball
//!   controller and the course layout

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    AimConfig,
    BallConfig,
    BallPhysicsConfig,
    CameraRigConfig,
    Config,
    ConfigError,
    CourseConfig,
    EngineConfig,
    GameConfig,
    WorldConfig,
};
