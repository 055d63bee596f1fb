//! Rendering layer
//!
//! The renderer owns the frame canvas and a registry of drawable handles.
//! A handle is a weak (actor, component) reference: the renderer never owns
//! a component and never destroys one. Handles whose owner has been
//! destroyed are skipped and pruned during the draw pass; the engine also
//! unregisters them eagerly when it destroys the owner, keeping one
//! registration matched with exactly one removal.

pub mod canvas;

pub use canvas::Canvas;

use crate::actors::{ActorKey, ComponentId, World};
use crate::assets::TextureCache;
use crate::platform::{PlatformError, Window};

/// Weak reference to one drawable component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawableHandle {
    /// The owning actor
    pub actor: ActorKey,
    /// The component within that actor
    pub component: ComponentId,
}

/// Frame clear color (opaque black)
const CLEAR_COLOR: u32 = 0xFF00_0000;

/// Software renderer: drawable registry plus the frame surface
#[derive(Default)]
pub struct Renderer {
    canvas: Canvas,
    drawables: Vec<DrawableHandle>,
}

impl Renderer {
    /// Create a renderer with no surface yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the frame surface
    pub fn initialize(&mut self, width: usize, height: usize) -> Result<(), PlatformError> {
        if width == 0 || height == 0 {
            return Err(PlatformError::InvalidSurface { width, height });
        }
        self.canvas = Canvas::new(width, height);
        log::info!("Renderer surface allocated ({width}x{height})");
        Ok(())
    }

    /// Register a drawable; entries draw in registration order
    pub fn register(&mut self, handle: DrawableHandle) {
        self.drawables.push(handle);
    }

    /// Unregister one drawable; no-op when absent
    ///
    /// Preserves the registration order of the remaining entries.
    pub fn unregister(&mut self, handle: DrawableHandle) {
        if let Some(position) = self.drawables.iter().position(|&h| h == handle) {
            self.drawables.remove(position);
        }
    }

    /// Unregister every drawable belonging to an actor
    pub fn unregister_actor(&mut self, actor: ActorKey) {
        self.drawables.retain(|h| h.actor != actor);
    }

    /// Drop every registration
    pub fn clear_drawables(&mut self) {
        self.drawables.clear();
    }

    /// Number of currently registered drawables
    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    /// Start a frame: wipe the surface
    pub fn begin_draw(&mut self) {
        self.canvas.clear(CLEAR_COLOR);
    }

    /// Draw every registered drawable, in registration order
    ///
    /// Handles whose owner (or component) no longer exists are stale: they
    /// are skipped and dropped from the registry.
    pub fn draw(&mut self, world: &World, assets: &TextureCache) {
        let canvas = &mut self.canvas;
        self.drawables.retain(|handle| {
            let drawn = world
                .actor(handle.actor)
                .is_some_and(|actor| actor.draw_component(handle.component, assets, canvas));
            if !drawn {
                log::warn!("Pruned stale drawable {handle:?}");
            }
            drawn
        });
    }

    /// Finish the frame: present the surface to the window
    pub fn end_draw(&mut self, window: &mut Window) -> Result<(), PlatformError> {
        window.present(self.canvas.pixels(), self.canvas.width(), self.canvas.height())
    }

    /// The frame surface
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::components::DrawCircleComponent;
    use crate::actors::Actor;

    fn world_with_circle() -> (World, DrawableHandle) {
        let mut world = World::new();
        let mut actor = Actor::new();
        let component = actor.add_component(Box::new(DrawCircleComponent::new(5)));
        let key = world.add_actor(actor);
        (
            world,
            DrawableHandle {
                actor: key,
                component,
            },
        )
    }

    #[test]
    fn test_register_unregister_symmetry() {
        let (_world, handle) = world_with_circle();
        let mut renderer = Renderer::new();
        let before = renderer.drawable_count();

        for _ in 0..3 {
            renderer.register(handle);
        }
        for _ in 0..3 {
            renderer.unregister(handle);
        }
        assert_eq!(renderer.drawable_count(), before);
    }

    #[test]
    fn test_unregister_absent_handle_is_noop() {
        let (_world, handle) = world_with_circle();
        let mut renderer = Renderer::new();
        renderer.unregister(handle);
        assert_eq!(renderer.drawable_count(), 0);
    }

    #[test]
    fn test_draw_prunes_stale_handles() {
        let (mut world, handle) = world_with_circle();
        let mut renderer = Renderer::new();
        renderer.initialize(32, 32).unwrap();
        renderer.register(handle);

        world.remove_actor(handle.actor);
        renderer.begin_draw();
        renderer.draw(&world, &TextureCache::new());

        assert_eq!(renderer.drawable_count(), 0);
    }

    #[test]
    fn test_draw_renders_live_drawables() {
        let (world, handle) = world_with_circle();
        let mut renderer = Renderer::new();
        renderer.initialize(32, 32).unwrap();
        renderer.register(handle);

        renderer.begin_draw();
        renderer.draw(&world, &TextureCache::new());

        // The circle outline touched the surface somewhere.
        assert!(renderer
            .canvas()
            .pixels()
            .iter()
            .any(|&px| px != 0xFF00_0000));
        assert_eq!(renderer.drawable_count(), 1);
    }

    #[test]
    fn test_initialize_rejects_zero_surface() {
        let mut renderer = Renderer::new();
        assert!(renderer.initialize(0, 32).is_err());
    }
}
