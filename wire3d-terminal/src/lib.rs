/// Terminal front end for the wireframe renderer
use anyhow::Context;
use log::info;
use std::io;
use wire3d_core::{AnimationSummary, Animator, GlyphGrid, Mesh, RenderConfig, Surface, Viewport};

pub mod surface;

pub use surface::TerminalSurface;

/// Take over the terminal, load the mesh, then play every frame
///
/// `load` runs after the terminal is acquired; whatever it returns, the terminal is
/// restored before this function returns.
pub fn run_in_terminal<F>(config: &RenderConfig, load: F) -> anyhow::Result<AnimationSummary>
where
    F: FnOnce() -> wire3d_core::Result<Mesh>,
{
    run_with_surface(config, TerminalSurface::acquire, load)
}

/// Acquire a surface for the configured viewport, load the mesh, then play every frame
///
/// The surface is dropped before returning on every path, including a failed load.
/// Nothing is written to the output directory unless the mesh loads.
pub fn run_with_surface<S, A, F>(
    config: &RenderConfig,
    acquire: A,
    load: F,
) -> anyhow::Result<AnimationSummary>
where
    S: Surface,
    A: FnOnce(Viewport) -> io::Result<S>,
    F: FnOnce() -> wire3d_core::Result<Mesh>,
{
    let mut surface = acquire(config.viewport()).context("failed to acquire display")?;
    let (columns, rows) = surface.dimensions();
    info!("display surface {}x{}", columns, rows);

    let mesh = load().context("failed to load mesh")?;
    let summary = Animator::new(config).run(&mesh, &mut surface)?;
    Ok(summary)
}

/// Play every frame into an off-screen grid, producing only the frame files
pub fn run_headless(config: &RenderConfig, mesh: &Mesh) -> anyhow::Result<AnimationSummary> {
    let mut grid = GlyphGrid::new(config.width as usize, config.height as usize);
    let summary = Animator::new(config).run(mesh, &mut grid)?;
    Ok(summary)
}
