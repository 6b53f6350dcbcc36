/// wire3d - rotating wireframe renderer
///
/// Loads an OBJ mesh (or a demo box), spins it for a fixed number of frames in the
/// terminal and writes every frame as a PBM file.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use wire3d_core::{load_obj, Mesh, VertexScale};

use cli::Args;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = args.render_config();

    let load = || -> wire3d_core::Result<Mesh> {
        match &args.mesh {
            Some(path) => load_obj(path, &VertexScale::default()),
            None => Ok(Mesh::demo_box(200.0, 100.0)),
        }
    };

    let summary = if args.headless {
        let mesh = load().context("failed to load mesh")?;
        wire3d_terminal::run_headless(&config, &mesh)?
    } else {
        wire3d_terminal::run_in_terminal(&config, load)?
    };

    if summary.write_failures > 0 {
        eprintln!(
            "{} of {} frames could not be written to {}",
            summary.write_failures,
            summary.frames_rendered,
            config.output_dir.display()
        );
    }

    Ok(())
}
