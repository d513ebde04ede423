use crate::compose::compose_tiles;
use crate::drawing::draw_frames;
use crate::fitting::fit_source;
use crate::*;
use image::{imageops, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::*;

/// File name of the assembled preview inside an output folder.
pub const PREVIEW_FILE_NAME: &str = "preview_grid.png";

const TILE_FILE_PREFIX: &str = "grid_";
const TILE_FILE_EXTENSION: &str = ".png";

/// Everything one render pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub layout: Layout,
    /// Tiles in reading order; `tiles[i].index == i + 1`.
    pub tiles: Vec<Tile>,
    pub preview: RgbImage,
}

impl RenderOutput {
    /// Looks up a tile by its 1-based grid index.
    pub fn tile(&self, index: u32) -> Option<&Tile> {
        let position = index.checked_sub(1)? as usize;
        self.tiles.get(position)
    }

    /// Writes the tiles and the preview into `output_dir`.
    pub fn persist(&self, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, TilingError> {
        persist(output_dir, &self.tiles, &self.preview)
    }
}

/// Runs the whole pipeline on `source`.
///
/// Fails with [`TilingError::Config`] before touching any pixels when the layout is
/// rejected. Every call starts from scratch, so identical inputs give identical output.
pub fn render_all(config: &RenderConfig, source: &RgbImage) -> Result<RenderOutput, TilingError> {
    let layout = Layout::from_config(config)?;
    info!(
        "Rendering {} tiles from a {}x{} source",
        config.grid.total_tiles(),
        source.width(),
        source.height()
    );

    let fitted = fit_source(source, layout.visible_size(), config.fitting, config.filter)?;
    let mut tiles = compose_tiles(&fitted, &layout)?;
    draw_frames(&mut tiles, &layout, &config.frame, config.fitting);
    let preview = assemble_preview(&layout, &tiles);

    Ok(RenderOutput {
        layout,
        tiles,
        preview,
    })
}

/// Places every tile at `(col * width, row * height)` on one preview raster.
pub fn assemble_preview(layout: &Layout, tiles: &[Tile]) -> RgbImage {
    let (width, height) = layout.preview_size();
    let mut preview = RgbImage::from_pixel(width, height, BACKGROUND);
    for tile in tiles {
        let (x, y) = tile.preview_origin();
        imageops::replace(&mut preview, &tile.raster, x as i64, y as i64);
    }
    preview
}

/// File name of the tile at a 1-based grid index: `grid_01.png`, `grid_02.png`, ...
pub fn tile_file_name(index: u32) -> String {
    format!("{TILE_FILE_PREFIX}{index:02}{TILE_FILE_EXTENSION}")
}

/// Writes `grid_NN.png` for each tile and `preview_grid.png` into `output_dir`,
/// creating it when needed.
///
/// Files are written one after another. When a write fails, the files already written
/// stay on disk and the error is returned as is.
pub fn persist(
    output_dir: impl AsRef<Path>,
    tiles: &[Tile],
    preview: &RgbImage,
) -> Result<Vec<PathBuf>, TilingError> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(tiles.len() + 1);
    for tile in tiles {
        let path = output_dir.join(tile_file_name(tile.index));
        tile.raster.save(&path)?;
        debug!("Saved tile {}", path.display());
        written.push(path);
    }
    let preview_path = output_dir.join(PREVIEW_FILE_NAME);
    preview.save(&preview_path)?;
    written.push(preview_path);

    info!("Saved {} tiles and preview to {}", tiles.len(), output_dir.display());
    Ok(written)
}

/// Lists the `grid_NN.png` files of a folder in posting order.
///
/// Profile grids show the most recent upload first, so the last tile must be posted
/// first: the result runs from the highest index down to `grid_01.png`.
pub fn upload_order(output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, TilingError> {
    let mut indexed: Vec<(u32, PathBuf)> = fs::read_dir(output_dir.as_ref())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter_map(|path| {
            let index = path
                .file_name()?
                .to_str()?
                .strip_prefix(TILE_FILE_PREFIX)?
                .strip_suffix(TILE_FILE_EXTENSION)?
                .parse::<u32>()
                .ok()?;
            Some((index, path))
        })
        .collect();
    indexed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(indexed.into_iter().map(|(_, path)| path).collect())
}
