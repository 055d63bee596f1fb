//! Application trait and lifecycle hooks

use crate::assets::AssetError;
use crate::engine::{Engine, EngineError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this to populate and drive a game with the engine. The engine
/// owns the frame loop; the application owns what is in the world.
pub trait Application {
    /// Populate the initial world
    ///
    /// Called once, after the engine's window and renderer are up and
    /// before the first frame. Load textures and spawn the starting actors
    /// here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Per-frame application logic, before the world update pass
    ///
    /// `delta_time` is the time since the last frame in seconds.
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        let _ = (engine, delta_time);
        Ok(())
    }

    /// Tear down application state
    ///
    /// Called once during unload, while the world and the texture cache
    /// are still alive.
    fn cleanup(&mut self, engine: &mut Engine) {
        let _ = engine;
    }
}

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Asset loading error
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// Custom application error
    #[error("application error: {0}")]
    Custom(String),
}
