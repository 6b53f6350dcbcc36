/// Fixed-length animation loop
use log::{debug, info, warn};
use nalgebra::Point2;
use std::io;
use std::thread;
use std::time::Duration;

use crate::bitmap::FrameWriter;
use crate::config::RenderConfig;
use crate::geometry::Mesh;
use crate::raster::Surface;
use crate::render::WireframeRenderer;
use crate::transform::AnimationState;

/// Shown once every frame has been produced
pub const FINISHED_MESSAGE: &str = "Frames generated.";

/// Counts reported after the loop ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSummary {
    pub frames_rendered: usize,
    pub frames_written: usize,
    pub write_failures: usize,
    pub final_angle: f64,
}

/// Runs a mesh through a fixed number of rotating frames
///
/// Pacing is a plain sleep per frame; render time is not subtracted.
pub struct Animator {
    renderer: WireframeRenderer,
    writer: FrameWriter,
    frames: usize,
    frame_interval: Duration,
    angle_step: f64,
    clear_interval: usize,
    state: AnimationState,
}

impl Animator {
    pub fn new(config: &RenderConfig) -> Self {
        let renderer = WireframeRenderer::new(config.camera(), config.viewport())
            .with_glyphs(config.edge_glyph, config.vertex_glyph);

        Self {
            renderer,
            writer: FrameWriter::new(config.output_dir.clone(), config.extension.clone()),
            frames: config.frames,
            frame_interval: config.frame_interval(),
            angle_step: config.angle_step(),
            clear_interval: config.clear_interval,
            state: AnimationState::new(0.0, config.depth_offset),
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Render and write every frame, numbering files from 1
    ///
    /// Frame files that cannot be written are reported on `surface` and skipped.
    /// Errors from the surface itself end the loop.
    pub fn run<S: Surface + ?Sized>(
        &mut self,
        mesh: &Mesh,
        surface: &mut S,
    ) -> io::Result<AnimationSummary> {
        if let Err(err) = self.writer.prepare() {
            warn!(
                "cannot create output directory {}: {}",
                self.writer.directory().display(),
                err
            );
        }

        let mut summary = AnimationSummary {
            frames_rendered: 0,
            frames_written: 0,
            write_failures: 0,
            final_angle: self.state.angle,
        };
        let mut ticks = 0;

        for index in 1..=self.frames {
            surface.refresh()?;
            thread::sleep(self.frame_interval);

            if self.clear_interval > 0 && ticks == self.clear_interval {
                surface.clear()?;
                ticks = 0;
            }
            ticks += 1;

            self.state.advance(self.angle_step);
            let bitmap = self.renderer.render(mesh, &self.state, surface)?;
            summary.frames_rendered += 1;
            debug!("frame {} at angle {:.4}", index, self.state.angle);

            match self.writer.write(index, &bitmap) {
                Ok(_) => summary.frames_written += 1,
                Err(err) => {
                    let path = self.writer.path_for(index);
                    warn!("cannot write {}: {}", path.display(), err);
                    surface.print(
                        Point2::new(0, 0),
                        &format!("Error opening file: {}", path.display()),
                    )?;
                    surface.refresh()?;
                    summary.write_failures += 1;
                }
            }
        }

        summary.final_angle = self.state.angle;

        surface.clear()?;
        surface.print(Point2::new(0, 0), FINISHED_MESSAGE)?;
        surface.refresh()?;

        info!(
            "{} frames rendered, {} written to {}",
            summary.frames_rendered,
            summary.frames_written,
            self.writer.directory().display()
        );
        Ok(summary)
    }
}
