//! Texture-backed drawables: static and frame-animated sprites

use crate::actors::component::{Capabilities, Component};
use crate::assets::TextureCache;
use crate::foundation::math::Transform2;
use crate::render::Canvas;

/// Draws one cached texture centered on the owning actor
///
/// Honors the actor's scale and rotation. The texture is referenced by its
/// cache handle; a missing handle is logged and skipped, never substituted.
pub struct SpriteComponent {
    texture: String,
    draw_order: i32,
}

impl SpriteComponent {
    /// Create a sprite referencing a cached texture
    pub fn new(texture: &str) -> Self {
        Self {
            texture: texture.to_string(),
            draw_order: 100,
        }
    }

    /// Create a sprite with an explicit draw order
    ///
    /// Higher orders are inserted earlier in the owning actor's collection
    /// and therefore drawn first (background-most).
    pub fn with_draw_order(texture: &str, draw_order: i32) -> Self {
        Self {
            texture: texture.to_string(),
            draw_order,
        }
    }

    /// Cache handle of the texture this sprite draws
    pub fn texture(&self) -> &str {
        &self.texture
    }
}

impl Component for SpriteComponent {
    fn capabilities(&self) -> Capabilities {
        Capabilities::DRAW
    }

    fn priority(&self) -> i32 {
        self.draw_order
    }

    fn draw(&self, owner: &Transform2, assets: &TextureCache, canvas: &mut Canvas) {
        match assets.get_texture(&self.texture) {
            Ok(texture) => {
                canvas.blit(texture, owner.position, owner.scale, owner.rotation);
            }
            Err(e) => log::warn!("Sprite skipped: {e}"),
        }
    }
}

/// Cycles through a list of cached textures at a fixed animation rate
///
/// The frame cursor accumulates `fps * dt` and wraps at the end of the
/// list, so the animation loops seamlessly at any frame rate.
pub struct AnimSpriteComponent {
    textures: Vec<String>,
    current_frame: f32,
    fps: f32,
}

impl AnimSpriteComponent {
    /// Create an animation over the given texture handles
    pub fn new(textures: Vec<String>, fps: f32) -> Self {
        Self {
            textures,
            current_frame: 0.0,
            fps,
        }
    }

    /// Animation rate in frames per second
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Change the animation rate
    pub fn set_fps(&mut self, fps: f32) {
        self.fps = fps;
    }

    /// Index of the frame that would be drawn now
    pub fn current_frame(&self) -> usize {
        self.current_frame as usize
    }
}

impl Component for AnimSpriteComponent {
    fn capabilities(&self) -> Capabilities {
        Capabilities::UPDATE | Capabilities::DRAW
    }

    fn update(&mut self, _owner: &mut Transform2, dt: f32) {
        if self.textures.is_empty() {
            return;
        }
        self.current_frame += self.fps * dt;
        let frame_count = self.textures.len() as f32;
        while self.current_frame >= frame_count {
            self.current_frame -= frame_count;
        }
    }

    fn draw(&self, owner: &Transform2, assets: &TextureCache, canvas: &mut Canvas) {
        let Some(name) = self.textures.get(self.current_frame as usize) else {
            return;
        };
        match assets.get_texture(name) {
            Ok(texture) => {
                canvas.blit(texture, owner.position, owner.scale, owner.rotation);
            }
            Err(e) => log::warn!("Animation frame skipped: {e}"),
        }
    }
}
