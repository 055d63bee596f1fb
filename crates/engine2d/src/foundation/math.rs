//! Math utilities and types
//!
//! Provides the fundamental math types for 2D game development.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Transform representing position, uniform scale, and rotation
///
/// Rotation is expressed in radians, counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2 {
    /// Position in world space
    pub position: Vec2,

    /// Uniform scale factor
    pub scale: f32,

    /// Rotation in radians
    pub rotation: f32,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Transform2 {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_identity() {
        let transform = Transform2::identity();

        assert_eq!(transform.position, Vec2::zeros());
        assert_eq!(transform.scale, 1.0);
        assert_eq!(transform.rotation, 0.0);
    }

    #[test]
    fn test_transform_from_position() {
        let position = Vec2::new(3.0, -4.0);
        let transform = Transform2::from_position(position);

        assert_eq!(transform.position, position);
        assert_eq!(transform.scale, 1.0);
    }
}
