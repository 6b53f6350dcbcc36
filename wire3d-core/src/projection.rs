/// Perspective projection and viewport coordinate conversion
use nalgebra::Point2;

use crate::geometry::Point;

/// Depths closer than this to the camera plane cannot be divided by
pub const DEPTH_EPSILON: f64 = 1e-9;

/// Result of projecting a point onto the image plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projected {
    /// Pixel offset from the viewport centre, y up
    Finite(Point2<i32>),
    /// The point lies on the camera plane
    AtInfinity,
}

impl Projected {
    /// Coordinates as a pair, `(i32::MAX, i32::MAX)` for points at infinity
    pub fn to_pair(self) -> (i32, i32) {
        match self {
            Projected::Finite(p) => (p.x, p.y),
            Projected::AtInfinity => (i32::MAX, i32::MAX),
        }
    }

    pub fn finite(self) -> Option<Point2<i32>> {
        match self {
            Projected::Finite(p) => Some(p),
            Projected::AtInfinity => None,
        }
    }
}

/// Fixed pinhole camera looking down +z from `-distance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f64,
    pub focal_length: f64,
}

impl Camera {
    pub fn new(distance: f64, focal_length: f64) -> Self {
        Self {
            distance,
            focal_length,
        }
    }

    /// Project a point to a centred pixel offset
    pub fn project(&self, point: &Point) -> Projected {
        let zcam = point.z() + self.distance;

        // Prevent division by near-zero depth values
        if zcam.abs() < DEPTH_EPSILON {
            return Projected::AtInfinity;
        }

        let px = point.x() / zcam * self.focal_length;
        let py = point.y() / zcam * self.focal_length;

        // `as` saturates, so far-off points clamp instead of wrapping
        Projected::Finite(Point2::new(px.round() as i32, py.round() as i32))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(5000.0, 1000.0)
    }
}

/// Pixel dimensions of the output image and display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn half_width(&self) -> i32 {
        (self.width / 2) as i32
    }

    fn half_height(&self) -> i32 {
        (self.height / 2) as i32
    }

    /// Centre-origin, y-up coordinates to top-left-origin, y-down coordinates
    pub fn cartesian_to_screen(&self, cartesian: Point2<i32>) -> Point2<i32> {
        Point2::new(
            cartesian.x.saturating_add(self.half_width()),
            self.half_height().saturating_sub(cartesian.y),
        )
    }

    /// Inverse of [`Viewport::cartesian_to_screen`]
    pub fn screen_to_cartesian(&self, screen: Point2<i32>) -> Point2<i32> {
        Point2::new(
            screen.x.saturating_sub(self.half_width()),
            self.half_height().saturating_sub(screen.y),
        )
    }

    /// Whether a screen coordinate falls on a pixel
    pub fn contains(&self, screen: Point2<i32>) -> bool {
        screen.x >= 0
            && screen.y >= 0
            && (screen.x as i64) < self.width as i64
            && (screen.y as i64) < self.height as i64
    }

    /// Project and convert to screen space in one step
    pub fn to_screen(&self, camera: &Camera, point: &Point) -> Option<Point2<i32>> {
        camera
            .project(point)
            .finite()
            .map(|p| self.cartesian_to_screen(p))
    }
}
