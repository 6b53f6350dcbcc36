/// Command line arguments for the `wire3d` binary
use clap::Parser;
use std::path::PathBuf;
use wire3d_core::RenderConfig;

#[derive(Parser, Debug)]
#[command(name = "wire3d", version, about = "Rotating wireframe renderer for the terminal")]
pub struct Args {
    /// OBJ mesh to render; a demo box is used when omitted
    pub mesh: Option<PathBuf>,

    /// Directory that receives one PBM file per frame
    #[arg(short, long, default_value = "./output")]
    pub output: PathBuf,

    /// Number of frames to render
    #[arg(short = 'n', long, default_value_t = 999)]
    pub frames: usize,

    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    #[arg(long, default_value_t = 1880)]
    pub width: u32,

    #[arg(long, default_value_t = 500)]
    pub height: u32,

    /// Rotation speed in radians per second
    #[arg(long, default_value_t = std::f64::consts::FRAC_PI_4)]
    pub angular_velocity: f64,

    /// Constant shift along the depth axis applied to every vertex
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub depth_offset: f64,

    /// Render without a terminal display, writing frame files only
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            fps: self.fps,
            frames: self.frames,
            angular_velocity: self.angular_velocity,
            depth_offset: self.depth_offset,
            output_dir: self.output.clone(),
            ..RenderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_render_config() {
        let args = Args::parse_from(["wire3d"]);
        assert_eq!(args.render_config(), RenderConfig::default());
        assert!(args.mesh.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "wire3d",
            "teapot.obj",
            "-n",
            "10",
            "--fps",
            "30",
            "--depth-offset",
            "-200",
            "--headless",
        ]);
        let config = args.render_config();
        assert_eq!(args.mesh, Some(PathBuf::from("teapot.obj")));
        assert_eq!(config.frames, 10);
        assert_eq!(config.fps, 30);
        assert_eq!(config.depth_offset, -200.0);
        assert!(args.headless);
    }

    #[test]
    fn test_zero_fps_is_rejected() {
        assert!(Args::try_parse_from(["wire3d", "--fps", "0"]).is_err());
    }
}
