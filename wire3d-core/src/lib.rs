/// wire3d core library - wireframe geometry, projection and rasterization
///
/// This library holds everything that does not touch a real terminal: OBJ loading,
/// point transforms, perspective projection, Bresenham line drawing onto a
/// character surface, PBM frame output and the fixed-length animation loop.

pub mod animation;
pub mod bitmap;
pub mod config;
pub mod error;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod render;
pub mod transform;

// Re-export commonly used types
pub use animation::{AnimationSummary, Animator};
pub use bitmap::{Bitmap, FrameWriter};
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use geometry::{Axis, AxisError, Face, Mesh, Point};
pub use obj::{load_obj, parse_obj, VertexScale};
pub use projection::{Camera, Projected, Viewport};
pub use raster::{draw_line, GlyphGrid, Line, Surface};
pub use render::WireframeRenderer;
pub use transform::{rotate, translate, AnimationState};
