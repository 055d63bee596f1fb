//! Concrete component implementations

pub mod circle;
pub mod sprite;

pub use circle::DrawCircleComponent;
pub use sprite::{AnimSpriteComponent, SpriteComponent};
