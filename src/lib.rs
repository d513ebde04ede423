//! This crate splits a single image into a 3-column grid of fixed-size posts which,
//! placed side by side in grid order, rebuild one seamless composite.
//! It uses the `image` and `imageproc` crates for image manipulation and `insta` for snapshot testing.
//!
//! A render pass is a pipeline of pure stages:
//! [`Layout::plan`] → [`fitting::fit_source`] → [`compose::compose_tiles`] →
//! [`drawing::draw_frames`] → [`assemble::assemble_preview`].
//! [`render_all`] runs the whole pipeline and [`persist`] writes the result to disk.

/// Final stage: renders the full pipeline, joins tiles into the preview and writes files.
///
/// # Example
/// ```
/// use gridsplit::*;
/// use image::{Rgb, RgbImage};
///
/// let source = RgbImage::from_pixel(40, 30, Rgb([90, 120, 200]));
/// let config = RenderConfig::default()
///     .with_canvas(TileCanvasSize::new(108, 135))
///     .with_margins(MarginConfig::new(8, 8));
/// let output = render_all(&config, &source).unwrap();
///
/// assert_eq!(output.tiles.len(), 6);
/// assert_eq!(output.preview.dimensions(), (3 * 108, 2 * 135));
/// ```
pub mod assemble;
/// Slices the fitted raster into per-tile canvases.
pub mod compose;
/// Debug overlay for checking tile seams and content regions on a preview.
pub mod debug;
/// Frame rendering along the outer boundary of the grid.
///
/// Only edges that lie on the boundary of the whole assembled grid are drawn, so
/// adjacent tiles never show a doubled seam line.
pub mod drawing;
/// Resizes the source image into the visible area under a [`FittingPolicy`].
pub mod fitting;
/// Grid geometry: configuration value objects and the [`Layout`] planner.
pub mod grid;

pub use assemble::{
    assemble_preview, persist, render_all, tile_file_name, upload_order, RenderOutput,
    PREVIEW_FILE_NAME,
};
pub use compose::Tile;
pub use grid::*;

use image::Rgb;
use smallvec::SmallVec;
use thiserror::Error;

/// Width of one post on the target platform.
pub const TILE_WIDTH: u32 = 1080;
/// Height of one post on the target platform (4:5 portrait).
pub const TILE_HEIGHT: u32 = 1350;
/// Profile grids are always three posts wide.
pub const GRID_COLUMNS: u32 = 3;
/// Tile counts the planner accepts.
pub const SUPPORTED_TILE_COUNTS: [u32; 3] = [3, 6, 9];
/// Fill colour for margins, gutters and letterbox bands.
pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

const DEFAULT_SMALLVEC_SIZE: usize = 4;

/// A type alias for SmallVec with an optimized stack-allocated buffer size.
pub type SmallVecLine<T> = SmallVec<[T; DEFAULT_SMALLVEC_SIZE]>;

/// A grid, margin or padding combination the planner refuses.
///
/// These are detected before any pixel work and are never corrected silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported tile count {0}: expected one of 3, 6 or 9")]
    UnsupportedTileCount(u32),

    #[error("Side margins too large: 2 * {margin} >= tile width {width}")]
    SideMarginTooLarge { margin: u32, width: u32 },

    #[error("Top/bottom margins too large for a single row: 2 * {margin} >= tile height {height}")]
    VerticalMarginTooLarge { margin: u32, height: u32 },

    #[error("Column {column} has no room left for content")]
    EmptyColumn { column: u32 },

    #[error("Row {row} has no room left for content")]
    EmptyRow { row: u32 },

    #[error("Edge padding of {padding}px on column {column} exceeds its content width of {width}px")]
    EdgePaddingTooLarge { column: u32, padding: u32, width: u32 },

    #[error("Edge padding table has {actual} entries, grid has {expected} columns")]
    PaddingTableMismatch { expected: u32, actual: u32 },

    #[error("Grid does not fit in 32-bit pixel coordinates along {axis}")]
    CoordinateOverflow { axis: &'static str },
}

#[derive(Error, Debug)]
pub enum TilingError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid image dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
