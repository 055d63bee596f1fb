//! Component trait and capability flags
//!
//! A component is a unit of behavior or rendering owned by exactly one
//! actor; ownership is structural (the actor holds the box), so a component
//! can never outlive or re-parent away from its owner.

use bitflags::bitflags;

use crate::assets::TextureCache;
use crate::foundation::math::Transform2;
use crate::render::Canvas;

bitflags! {
    /// Which per-frame passes a component participates in
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        /// Receives `update` during the actor update pass
        const UPDATE = 1 << 0;
        /// Receives `draw` during the render pass
        const DRAW = 1 << 1;
    }
}

/// Identity of a component within its owning actor
///
/// Assigned by [`Actor::add_component`](super::Actor::add_component) and
/// stable for the component's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub(super) u64);

/// Attachable unit of behavior or rendering
///
/// A concrete component implements only the passes it declares in
/// [`capabilities`](Self::capabilities); the defaults are no-ops.
pub trait Component {
    /// Passes this component participates in
    fn capabilities(&self) -> Capabilities;

    /// Update-order priority; higher runs earlier, insertion order breaks ties
    fn priority(&self) -> i32 {
        100
    }

    /// Per-frame behavior; `dt` is elapsed seconds
    fn update(&mut self, owner: &mut Transform2, dt: f32) {
        let _ = (owner, dt);
    }

    /// Render this component onto the canvas
    fn draw(&self, owner: &Transform2, assets: &TextureCache, canvas: &mut Canvas) {
        let _ = (owner, assets, canvas);
    }
}
