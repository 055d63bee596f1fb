//! Circle-outline drawable

use crate::actors::component::{Capabilities, Component};
use crate::assets::TextureCache;
use crate::foundation::math::Transform2;
use crate::render::Canvas;

/// Default outline color (purple)
const DEFAULT_COLOR: u32 = 0xFF73_1A8A;

/// Draws a one-pixel circle outline centered on the owning actor
///
/// Uses the integer midpoint-circle algorithm, so the plotted point set is
/// exact and reproducible for a given radius.
pub struct DrawCircleComponent {
    radius: i32,
    color: u32,
}

impl DrawCircleComponent {
    /// Create an outline with the given radius, in the default color
    pub fn new(radius: i32) -> Self {
        Self {
            radius,
            color: DEFAULT_COLOR,
        }
    }

    /// Create an outline with an explicit color
    pub fn with_color(radius: i32, color: u32) -> Self {
        Self { radius, color }
    }

    /// Outline radius in pixels
    pub fn radius(&self) -> i32 {
        self.radius
    }
}

impl Component for DrawCircleComponent {
    fn capabilities(&self) -> Capabilities {
        Capabilities::DRAW
    }

    fn draw(&self, owner: &Transform2, _assets: &TextureCache, canvas: &mut Canvas) {
        let cx = owner.position.x as i32;
        let cy = owner.position.y as i32;
        plot_outline(cx, cy, self.radius, |x, y| {
            canvas.set_pixel(x, y, self.color);
        });
    }
}

/// Midpoint-circle rasterization
///
/// Walks one octant with the classic decision variables `tx`/`ty` (each
/// incremented by 2 per step) and a running error term, plotting all eight
/// symmetric points per step, until the perpendicular coordinate `y`
/// overtakes the radial coordinate `x`.
fn plot_outline(cx: i32, cy: i32, radius: i32, mut plot: impl FnMut(i32, i32)) {
    let diameter = radius * 2;
    let mut x = radius - 1;
    let mut y = 0;
    let mut tx = 1;
    let mut ty = 1;
    let mut error = tx - diameter;

    while x >= y {
        plot(cx + x, cy - y);
        plot(cx + x, cy + y);
        plot(cx - x, cy - y);
        plot(cx - x, cy + y);
        plot(cx + y, cy - x);
        plot(cx + y, cy + x);
        plot(cx - y, cy - x);
        plot(cx - y, cy + x);

        if error <= 0 {
            y += 1;
            error += ty;
            ty += 2;
        }

        if error > 0 {
            x -= 1;
            tx += 2;
            error += tx - diameter;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use std::collections::HashSet;

    fn collect_points(cx: i32, cy: i32, radius: i32) -> HashSet<(i32, i32)> {
        let mut points = HashSet::new();
        plot_outline(cx, cy, radius, |x, y| {
            points.insert((x, y));
        });
        points
    }

    #[test]
    fn test_point_set_is_eightfold_symmetric() {
        // Guards the octant plotting: mixing up cx and cy in any of the
        // eight mirrored points produces an asymmetric artifact, which a
        // well-known SDL circle snippet suffers from.
        let points = collect_points(100, 100, 50);
        for &(x, y) in &points {
            let dx = x - 100;
            let dy = y - 100;
            for reflected in [
                (dx, -dy),
                (-dx, dy),
                (-dx, -dy),
                (dy, dx),
                (dy, -dx),
                (-dy, dx),
                (-dy, -dx),
            ] {
                assert!(
                    points.contains(&(100 + reflected.0, 100 + reflected.1)),
                    "missing reflection {reflected:?} of ({dx}, {dy})"
                );
            }
        }
    }

    #[test]
    fn test_no_point_farther_than_radius() {
        let radius = 50;
        let points = collect_points(100, 100, radius);
        for &(x, y) in &points {
            let dx = f64::from(x - 100);
            let dy = f64::from(y - 100);
            let distance = (dx * dx + dy * dy).sqrt();
            assert!(
                distance <= f64::from(radius) + 1.0,
                "({x}, {y}) lies {distance:.2} from center"
            );
        }
    }

    #[test]
    fn test_outline_is_thin() {
        // Every point sits near the ring, not inside it.
        let radius = 20;
        let points = collect_points(0, 0, radius);
        for &(x, y) in &points {
            let distance = (f64::from(x * x) + f64::from(y * y)).sqrt();
            assert!(
                distance >= f64::from(radius) - 2.0,
                "({x}, {y}) lies {distance:.2} from center, inside the ring"
            );
        }
    }

    #[test]
    fn test_draw_plots_onto_canvas() {
        let mut canvas = Canvas::new(64, 64);
        let assets = TextureCache::new();
        let component = DrawCircleComponent::with_color(10, 0xFFFF_0000);
        let owner = Transform2::from_position(Vec2::new(32.0, 32.0));

        component.draw(&owner, &assets, &mut canvas);

        // Rightmost point of the outline: x starts at radius - 1.
        assert_eq!(canvas.pixel(32 + 9, 32), Some(0xFFFF_0000));
        assert_eq!(canvas.pixel(32, 32), Some(0xFF00_0000));
    }
}
