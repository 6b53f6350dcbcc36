/// Wireframe frame rendering
use nalgebra::Point2;
use std::io;

use crate::bitmap::{Bitmap, FOREGROUND};
use crate::geometry::Mesh;
use crate::projection::{Camera, Viewport};
use crate::raster::{draw_line, Surface, EDGE_GLYPH, VERTEX_GLYPH};
use crate::transform::AnimationState;

/// Draws a mesh's edges and vertices for one animation state
#[derive(Debug, Clone)]
pub struct WireframeRenderer {
    camera: Camera,
    viewport: Viewport,
    edge_glyph: char,
    vertex_glyph: char,
}

impl WireframeRenderer {
    pub fn new(camera: Camera, viewport: Viewport) -> Self {
        Self {
            camera,
            viewport,
            edge_glyph: EDGE_GLYPH,
            vertex_glyph: VERTEX_GLYPH,
        }
    }

    pub fn with_glyphs(mut self, edge: char, vertex: char) -> Self {
        self.edge_glyph = edge;
        self.vertex_glyph = vertex;
        self
    }

    /// Screen position of every vertex, `None` for vertices on the camera plane
    pub fn project_vertices(
        &self,
        mesh: &Mesh,
        state: &AnimationState,
    ) -> Vec<Option<Point2<i32>>> {
        mesh.vertices()
            .iter()
            .map(|v| self.viewport.to_screen(&self.camera, &state.apply(v)))
            .collect()
    }

    /// Render one frame
    ///
    /// Edges only reach the surface. Vertices inside the viewport are drawn on the
    /// surface and set to foreground in the returned bitmap.
    pub fn render<S: Surface + ?Sized>(
        &self,
        mesh: &Mesh,
        state: &AnimationState,
        surface: &mut S,
    ) -> io::Result<Bitmap> {
        let mut bitmap = Bitmap::new(self.viewport.width as usize, self.viewport.height as usize);
        let screen = self.project_vertices(mesh, state);

        for face in mesh.faces() {
            for (a, b) in face.edges() {
                // An endpoint at infinity has no line to draw
                if let (Some(from), Some(to)) = (screen[a], screen[b]) {
                    draw_line(surface, from, to, self.edge_glyph)?;
                }
            }
        }

        for at in screen.into_iter().flatten() {
            if self.viewport.contains(at) {
                surface.put(at, self.vertex_glyph)?;
                bitmap.set(at, FOREGROUND);
            }
        }

        Ok(bitmap)
    }
}
