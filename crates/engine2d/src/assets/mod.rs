//! Asset loading and caching
//!
//! Textures are decoded once, converted to packed ARGB pixels, and stored
//! under a string handle. Looking up a handle that was never loaded (or was
//! cleared) is a hard error; there is no placeholder-texture fallback.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Asset system errors
#[derive(Debug, Error)]
pub enum AssetError {
    /// Texture decode failed
    #[error("failed to load texture from {path}: {source}")]
    Decode {
        /// Path of the file that failed to decode
        path: String,
        /// Underlying decoder error
        source: image::ImageError,
    },

    /// Lookup of a handle that is not in the cache
    #[error("no texture cached under name '{0}'")]
    NotFound(String),
}

/// A decoded image, stored as packed `0xAARRGGBB` pixels in row-major order
#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Texture {
    /// Build a texture from raw RGBA8 bytes (as produced by the decoder)
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Self {
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| {
                (u32::from(px[3]) << 24)
                    | (u32::from(px[0]) << 16)
                    | (u32::from(px[1]) << 8)
                    | u32::from(px[2])
            })
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build a single-color texture
    pub fn solid(width: u32, height: u32, argb: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![argb; (width * height) as usize],
        }
    }

    /// Texture width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed ARGB pixel at (x, y); `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            self.pixels.get((y * self.width + x) as usize).copied()
        } else {
            None
        }
    }
}

/// String-handle texture cache
///
/// Owns every loaded texture for the lifetime of the engine; cleared as a
/// whole at unload.
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: HashMap<String, Texture>,
}

impl TextureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a texture from file and cache it under `name`
    ///
    /// Loading a name that is already cached is a cache hit: the existing
    /// texture is returned and the file is not decoded again.
    pub fn load_texture(
        &mut self,
        path: impl AsRef<Path>,
        name: &str,
    ) -> Result<&Texture, AssetError> {
        if !self.textures.contains_key(name) {
            let path = path.as_ref();
            let decoded = image::open(path)
                .map_err(|source| AssetError::Decode {
                    path: path.display().to_string(),
                    source,
                })?
                .to_rgba8();
            let texture =
                Texture::from_rgba8(decoded.width(), decoded.height(), decoded.as_raw());
            log::debug!(
                "Loaded texture '{}' ({}x{}) from {}",
                name,
                texture.width,
                texture.height,
                path.display()
            );
            self.textures.insert(name.to_string(), texture);
        }
        Ok(&self.textures[name])
    }

    /// Insert an already-built texture under `name`
    ///
    /// Mainly useful for procedurally generated textures; follows the same
    /// cache-hit rule as `load_texture` (an existing entry is kept).
    pub fn insert(&mut self, name: &str, texture: Texture) {
        self.textures.entry(name.to_string()).or_insert(texture);
    }

    /// Look up a cached texture; `AssetError::NotFound` when absent
    pub fn get_texture(&self, name: &str) -> Result<&Texture, AssetError> {
        self.textures
            .get(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    /// Number of cached textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Release every cached texture
    pub fn clear(&mut self) {
        log::debug!("Clearing {} cached texture(s)", self.textures.len());
        self.textures.clear();
    }
}
