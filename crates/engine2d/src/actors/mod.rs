//! Actor/component entity model
//!
//! Provides the world registry, the actor lifecycle, and the component
//! capability seam that concrete behaviors and drawables plug into.

pub mod actor;
pub mod component;
pub mod components;
pub mod world;

pub use actor::{Actor, ActorBehavior, ActorState};
pub use component::{Capabilities, Component, ComponentId};
pub use world::{ActorKey, UpdateContext, UpdateReport, World};
