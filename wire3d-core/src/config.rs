/// Render and animation settings
use std::f64::consts::FRAC_PI_4;
use std::path::PathBuf;
use std::time::Duration;

use crate::projection::{Camera, Viewport};
use crate::raster::{EDGE_GLYPH, VERTEX_GLYPH};

/// Everything the animation loop needs to know, with the stock defaults
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub frames: usize,
    /// Radians per second of animation time
    pub angular_velocity: f64,
    pub depth_offset: f64,
    pub camera_distance: f64,
    pub focal_length: f64,
    /// Clear the display every this many frames (0 never clears)
    pub clear_interval: usize,
    pub output_dir: PathBuf,
    pub extension: String,
    pub edge_glyph: char,
    pub vertex_glyph: char,
}

impl RenderConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.camera_distance, self.focal_length)
    }

    /// Sleep between frames, whole milliseconds
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(u64::from(1000 / self.fps.max(1)))
    }

    /// Angle added each frame
    pub fn angle_step(&self) -> f64 {
        self.angular_velocity * (1.0 / f64::from(self.fps.max(1)))
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1880,
            height: 500,
            fps: 60,
            frames: 999,
            angular_velocity: FRAC_PI_4,
            depth_offset: 1.0,
            camera_distance: 5000.0,
            focal_length: 1000.0,
            clear_interval: 3,
            output_dir: PathBuf::from("./output"),
            extension: "ppm".to_string(),
            edge_glyph: EDGE_GLYPH,
            vertex_glyph: VERTEX_GLYPH,
        }
    }
}
