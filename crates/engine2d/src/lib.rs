//! # Engine2D
//!
//! A minimal real-time 2D game engine: a fixed frame loop, an
//! actor/component entity model, and a thin software-rendering layer.
//!
//! ## Features
//!
//! - **Actor/Component Model**: actors own ordered, priority-sorted
//!   components; deferred registration and reaping keep mid-frame mutation
//!   safe
//! - **Software Rendering**: pixel-exact drawing into a CPU framebuffer,
//!   presented through a native window
//! - **Asset Caching**: string-handle texture cache with one-decode loading
//! - **Single-Threaded**: one explicit engine object, no global state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use engine2d::prelude::*;
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let mut ball = Actor::new();
//!         ball.set_position(Vec2::new(100.0, 100.0));
//!         ball.add_component(Box::new(DrawCircleComponent::new(50)));
//!         engine.spawn(ball);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     engine2d::foundation::logging::init();
//!     let config = EngineConfig::default();
//!     let mut game = MyGame;
//!     Engine::run(&config, &mut game)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod actors;
pub mod assets;
pub mod foundation;
pub mod input;
pub mod platform;
pub mod render;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineConfig, EngineError, EngineState, WindowConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        actors::{
            components::{AnimSpriteComponent, DrawCircleComponent, SpriteComponent},
            Actor, ActorBehavior, ActorKey, ActorState, Capabilities, Component, ComponentId,
            UpdateContext, World,
        },
        assets::{AssetError, Texture, TextureCache},
        foundation::{
            math::{Transform2, Vec2},
            time::Timer,
        },
        input::{InputState, KeyCode},
        render::{Canvas, Renderer},
        AppError, Application, Engine, EngineConfig, EngineError, EngineState, WindowConfig,
    };
}
