//! Frames are drawn as nested one-pixel line segments along the edges of each tile's
//! content that lie on the boundary of the whole grid.
//!
//! # Examples
//!
//! ```rust
//! use gridsplit::{drawing::*, FrameConfig, FrameStyle};
//! use image::{Rgb, RgbImage};
//!
//! let mut image = RgbImage::new(10, 10);
//! let segments = FrameSegments {
//!     bounds: FrameBounds { left: 2, top: 2, right: 7, bottom: 7 },
//!     edges: FrameEdges { top: true, bottom: false, left: false, right: false },
//! };
//! segments.draw(&mut image, &FrameConfig::new(true, 2, FrameStyle::Outer));
//!
//! assert_eq!(*image.get_pixel(2, 3), Rgb([255, 255, 255]));
//! assert_eq!(*image.get_pixel(2, 4), Rgb([0, 0, 0]));
//! ```

use crate::*;
use image::RgbImage;
use imageproc::drawing::draw_line_segment_mut;
use imageproc::rect::Rect;
use tracing::*;

/// Inclusive pixel bounds of a frame inside a tile canvas.
///
/// Built from a cell's pasted content rectangle, so on a column with a leading
/// edge-padding gutter the left bound sits at `left_margin + pad_leading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl FrameBounds {
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

impl From<Rect> for FrameBounds {
    fn from(rect: Rect) -> Self {
        FrameBounds {
            left: rect.left() as u32,
            top: rect.top() as u32,
            right: rect.right() as u32,
            bottom: rect.bottom() as u32,
        }
    }
}

/// Which sides of a tile's frame lie on the outer boundary of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl FrameEdges {
    /// Outer sides of a cell. A side with an edge-padding gutter is not part of the
    /// boundary.
    pub fn for_cell(cell: &Cell) -> Self {
        FrameEdges {
            top: cell.on_top_edge(),
            bottom: cell.on_bottom_edge(),
            left: cell.on_left_edge() && cell.column.pad_leading == 0,
            right: cell.on_right_edge() && cell.column.pad_trailing == 0,
        }
    }

    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// The frame segments to draw on one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSegments {
    pub bounds: FrameBounds,
    pub edges: FrameEdges,
}

/// Trait for types that can be drawn on a tile raster.
pub trait Drawable {
    /// Draws the object on the provided image using the given configuration.
    fn draw(&self, image: &mut RgbImage, config: &FrameConfig);
}

impl Drawable for FrameSegments {
    fn draw(&self, image: &mut RgbImage, config: &FrameConfig) {
        let FrameBounds {
            left,
            top,
            right,
            bottom,
        } = self.bounds;
        let (left_f, top_f, right_f, bottom_f) =
            (left as f32, top as f32, right as f32, bottom as f32);
        let rows = config.thickness.min(self.bounds.height());
        let cols = config.thickness.min(self.bounds.width());

        for t in 0..rows {
            if self.edges.top {
                let y = (top + t) as f32;
                draw_line_segment_mut(image, (left_f, y), (right_f, y), config.color);
            }
            if self.edges.bottom {
                let y = (bottom - t) as f32;
                draw_line_segment_mut(image, (left_f, y), (right_f, y), config.color);
            }
        }
        for t in 0..cols {
            if self.edges.left {
                let x = (left + t) as f32;
                draw_line_segment_mut(image, (x, top_f), (x, bottom_f), config.color);
            }
            if self.edges.right {
                let x = (right - t) as f32;
                draw_line_segment_mut(image, (x, top_f), (x, bottom_f), config.color);
            }
        }
    }
}

/// Bounding box of the pixels inside `region` with any channel above `threshold`.
///
/// Returns `None` when the region holds nothing but background.
pub fn content_bounds(raster: &RgbImage, region: Rect, threshold: u8) -> Option<FrameBounds> {
    let mut bounds: Option<FrameBounds> = None;
    for y in region.top() as u32..=region.bottom() as u32 {
        for x in region.left() as u32..=region.right() as u32 {
            if !raster.get_pixel(x, y).0.iter().any(|&c| c > threshold) {
                continue;
            }
            bounds = Some(match bounds {
                None => FrameBounds {
                    left: x,
                    top: y,
                    right: x,
                    bottom: y,
                },
                Some(b) => FrameBounds {
                    left: b.left.min(x),
                    top: b.top.min(y),
                    right: b.right.max(x),
                    bottom: b.bottom.max(y),
                },
            });
        }
    }
    bounds
}

/// Works out where the frame of one tile goes, or `None` when nothing is drawn.
///
/// Bounds are the cell's content rectangle, gutters included in its offset. Only
/// individual framing of fitted content narrows them to the detected content.
pub fn frame_segments(
    tile: &Tile,
    cell: &Cell,
    frame: &FrameConfig,
    policy: FittingPolicy,
) -> Option<FrameSegments> {
    let edges = FrameEdges::for_cell(cell);
    if !edges.any() {
        return None;
    }
    let content = cell.content_rect();
    let bounds = match (frame.style, policy) {
        (FrameStyle::Individual, FittingPolicy::Fit) if frame.detect_content_bounds => {
            content_bounds(&tile.raster, content, frame.background_threshold)?
        }
        _ => FrameBounds::from(content),
    };
    Some(FrameSegments { bounds, edges })
}

/// Draws the outer frame onto every tile of a render pass.
///
/// Tiles whose content is all background under individual fit framing are skipped.
pub fn draw_frames(tiles: &mut [Tile], layout: &Layout, frame: &FrameConfig, policy: FittingPolicy) {
    if !frame.enabled || frame.thickness == 0 {
        return;
    }
    trace!("Drawing {:?} frame, {}px", frame.style, frame.thickness);
    for (tile, cell) in tiles.iter_mut().zip(layout.cells()) {
        match frame_segments(tile, &cell, frame, policy) {
            Some(segments) => segments.draw(&mut tile.raster, frame),
            None => trace!("No frame on tile {}", tile.index),
        }
    }
}
