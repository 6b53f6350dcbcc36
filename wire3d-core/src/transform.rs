/// Point transforms and per-frame animation state
use crate::geometry::Point;

/// Rotate `point` by `angle` radians
///
/// Two plane rotations by the same angle: first (x, z), then (x', y) using the x
/// produced by the first step. z keeps its first-step value. This couples x across
/// both planes and is not a rotation about a single fixed axis.
// NOTE: the coupling looks unintended; kept as-is until the expected motion is confirmed.
pub fn rotate(point: &Point, angle: f64) -> Point {
    let (s, c) = angle.sin_cos();

    let x1 = point.x() * c - point.z() * s;
    let z1 = point.x() * s + point.z() * c;

    Point::new(x1 * c - point.y() * s, x1 * s + point.y() * c, z1)
}

/// Shift `point` along the depth axis
pub fn translate(point: &Point, dz: f64) -> Point {
    Point::new(point.x(), point.y(), point.z() + dz)
}

/// Animation parameters applied to every vertex of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub angle: f64,
    pub depth_offset: f64,
}

impl AnimationState {
    pub fn new(angle: f64, depth_offset: f64) -> Self {
        Self {
            angle,
            depth_offset,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Advance the rotation by `step` radians
    pub fn advance(&mut self, step: f64) {
        self.angle += step;
    }

    /// Rotate then translate a model-space point for this frame
    pub fn apply(&self, point: &Point) -> Point {
        translate(&rotate(point, self.angle), self.depth_offset)
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::zero()
    }
}
