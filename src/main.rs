use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gridsplit::{
    debug::{save_preview_with_layout, LayoutDrawingConfig},
    render_all, upload_order, EdgePadding, FittingPolicy, FrameConfig, FrameStyle, GridSpec,
    MarginConfig, RenderConfig,
};
use tracing::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "Split an image into a 3-column grid of posts that line up into one picture"
)]
struct Args {
    /// Path to the source image
    source: PathBuf,

    /// Number of posts: 3, 6 or 9
    #[arg(long, default_value_t = 6)]
    tiles: u32,

    /// Top/bottom margin around the whole grid, in pixels
    #[arg(long, default_value_t = 80)]
    margin_tb: u32,

    /// Left/right margin around the whole grid, in pixels
    #[arg(long, default_value_t = 80)]
    margin_lr: u32,

    /// Do not draw frame lines
    #[arg(long)]
    no_frame: bool,

    /// Frame thickness, in pixels
    #[arg(long, default_value_t = 4)]
    frame_thickness: u32,

    #[arg(long, value_enum, default_value_t = StyleArg::Outer)]
    frame_style: StyleArg,

    #[arg(long, value_enum, default_value_t = ModeArg::Cover)]
    mode: ModeArg,

    /// Gutter between the columns' visible content, in pixels (0 disables it)
    #[arg(long, default_value_t = 0)]
    edge_padding: u32,

    /// Output folder [default: <source stem>_grid_<tiles> next to the source]
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Also save layout_debug.png with tile seams and content regions marked
    #[arg(long)]
    debug_overlay: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    Outer,
    Individual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Cover,
    Fit,
}

impl Args {
    fn render_config(&self) -> Result<RenderConfig> {
        let grid = GridSpec::new(self.tiles).context("Invalid tile count")?;
        let style = match self.frame_style {
            StyleArg::Outer => FrameStyle::Outer,
            StyleArg::Individual => FrameStyle::Individual,
        };
        let fitting = match self.mode {
            ModeArg::Cover => FittingPolicy::Cover,
            ModeArg::Fit => FittingPolicy::Fit,
        };
        Ok(RenderConfig::new(grid)
            .with_margins(MarginConfig::new(self.margin_tb, self.margin_lr))
            .with_frame(FrameConfig::new(!self.no_frame, self.frame_thickness, style))
            .with_fitting(fitting)
            .with_edge_padding(EdgePadding::from_flags(
                self.edge_padding > 0,
                self.edge_padding,
            )))
    }

    fn output_dir(&self) -> PathBuf {
        match &self.output {
            Some(dir) => dir.clone(),
            None => default_output_dir(&self.source, self.tiles),
        }
    }
}

/// `<folder of source>/<source stem>_grid_<tiles>`
fn default_output_dir(source: &Path, tiles: u32) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("{stem}_grid_{tiles}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.render_config()?;

    let source = image::open(&args.source)
        .with_context(|| format!("Failed to open image {}", args.source.display()))?
        .to_rgb8();
    info!("Loaded {}x{} source", source.width(), source.height());

    let output = render_all(&config, &source).context("Failed to render grid")?;

    let output_dir = args.output_dir();
    output
        .persist(&output_dir)
        .with_context(|| format!("Failed to save to {}", output_dir.display()))?;

    if args.debug_overlay {
        save_preview_with_layout(
            &output.preview,
            &output.layout,
            output_dir.join("layout_debug.png"),
            &LayoutDrawingConfig::default(),
        )
        .context("Failed to save layout overlay")?;
    }

    // The profile grid shows the newest post first, so the last tile goes up first.
    println!("Upload order:");
    for (position, path) in upload_order(&output_dir)?.iter().enumerate() {
        println!("  {}. {}", position + 1, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_render_defaults() {
        let args = Args::try_parse_from(["gridsplit", "photo.jpg"]).unwrap();
        let config = args.render_config().unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_full_argument_set() {
        let args = Args::try_parse_from([
            "gridsplit",
            "shots/photo.jpg",
            "--tiles",
            "9",
            "--margin-tb",
            "40",
            "--margin-lr",
            "20",
            "--no-frame",
            "--frame-style",
            "individual",
            "--mode",
            "fit",
            "--edge-padding",
            "12",
        ])
        .unwrap();
        let config = args.render_config().unwrap();

        assert_eq!(config.grid.total_tiles(), 9);
        assert_eq!(config.margins, MarginConfig::new(40, 20));
        assert!(!config.frame.enabled);
        assert_eq!(config.frame.style, FrameStyle::Individual);
        assert_eq!(config.fitting, FittingPolicy::Fit);
        assert_eq!(config.edge_padding, EdgePadding::Uniform(12));
        assert_eq!(args.output_dir(), PathBuf::from("shots/photo_grid_9"));
    }

    #[test]
    fn test_bad_tile_count() {
        let args = Args::try_parse_from(["gridsplit", "photo.jpg", "--tiles", "5"]).unwrap();
        assert!(args.render_config().is_err());
    }

    #[test]
    fn test_explicit_output_dir() {
        let args =
            Args::try_parse_from(["gridsplit", "photo.jpg", "--output", "out/posts"]).unwrap();
        assert_eq!(args.output_dir(), PathBuf::from("out/posts"));
        assert_eq!(
            default_output_dir(Path::new("photo.jpg"), 3),
            PathBuf::from("photo_grid_3")
        );
    }
}
