use std::fmt;
use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use super::*;

/// Colours for the layout overlay.
pub struct LayoutDrawingConfig {
    /// Colour of the lines where two tiles meet.
    pub seam_color: Rgb<u8>,
    /// Default outline colour of each tile's content region.
    pub content_color: Rgb<u8>,
    /// Optional function giving a content outline colour per 1-based tile index.
    pub content_color_provider: Option<Box<dyn Fn(u32) -> Rgb<u8>>>,
}

impl fmt::Debug for LayoutDrawingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutDrawingConfig")
            .field("seam_color", &self.seam_color)
            .field("content_color", &self.content_color)
            .field("content_color_provider", &"<function>")
            .finish()
    }
}

impl Default for LayoutDrawingConfig {
    fn default() -> Self {
        LayoutDrawingConfig {
            seam_color: Rgb([255, 0, 0]),      // Red
            content_color: Rgb([0, 255, 255]), // Cyan
            content_color_provider: None,
        }
    }
}

/// Draws tile seams and content outlines onto a preview raster.
pub fn draw_layout(preview: &mut RgbImage, layout: &Layout, config: &LayoutDrawingConfig) {
    let (width, height) = preview.dimensions();
    for col in 1..layout.grid.columns() {
        let x = (col * layout.canvas.width) as f32;
        draw_line_segment_mut(preview, (x, 0.0), (x, height as f32), config.seam_color);
    }
    for row in 1..layout.grid.rows() {
        let y = (row * layout.canvas.height) as f32;
        draw_line_segment_mut(preview, (0.0, y), (width as f32, y), config.seam_color);
    }

    for cell in layout.cells() {
        let content = cell.content_rect();
        let origin_x = (cell.column.index * layout.canvas.width) as i32;
        let origin_y = (cell.row.index * layout.canvas.height) as i32;
        let outline = Rect::at(origin_x + content.left(), origin_y + content.top())
            .of_size(content.width(), content.height());
        let color = match config.content_color_provider {
            Some(ref provider) => provider(cell.index()),
            None => config.content_color,
        };
        draw_hollow_rect_mut(preview, outline, color);
    }
}

/// Saves a copy of the preview with the layout drawn on it.
///
/// # Examples
///
/// ```rust
/// use gridsplit::{debug::*, *};
/// use image::{Rgb, RgbImage};
///
/// let config = RenderConfig::default()
///     .with_canvas(TileCanvasSize::new(54, 68))
///     .with_margins(MarginConfig::new(4, 4));
/// let output = render_all(&config, &RgbImage::from_pixel(20, 20, Rgb([90, 90, 90]))).unwrap();
///
/// let path = std::env::temp_dir().join("gridsplit_layout_doc.png");
/// save_preview_with_layout(&output.preview, &output.layout, &path, &LayoutDrawingConfig::default()).unwrap();
/// # std::fs::remove_file(&path).unwrap();
/// ```
pub fn save_preview_with_layout(
    preview: &RgbImage,
    layout: &Layout,
    output_path: impl AsRef<Path>,
    config: &LayoutDrawingConfig,
) -> Result<(), TilingError> {
    let mut overlay = preview.clone();
    draw_layout(&mut overlay, layout, config);
    overlay.save(output_path.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout() -> Layout {
        Layout::plan(
            GridSpec::new(6).unwrap(),
            TileCanvasSize::new(20, 30),
            MarginConfig::new(3, 2),
            &EdgePadding::None,
        )
        .unwrap()
    }

    #[test]
    fn test_draw_layout_marks_seams_and_content() {
        let layout = layout();
        let mut preview = RgbImage::new(60, 60);
        let config = LayoutDrawingConfig::default();
        draw_layout(&mut preview, &layout, &config);

        // Above the content outlines, and left of the first one.
        assert_eq!(*preview.get_pixel(20, 1), config.seam_color);
        assert_eq!(*preview.get_pixel(1, 30), config.seam_color);
        // Tile 1 content starts after the 2px side margin and 3px top margin.
        assert_eq!(*preview.get_pixel(2, 10), config.content_color);
        assert_eq!(*preview.get_pixel(10, 3), config.content_color);
        assert_eq!(*preview.get_pixel(1, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_color_provider_per_tile() {
        let layout = layout();
        let mut preview = RgbImage::new(60, 60);
        let config = LayoutDrawingConfig {
            content_color_provider: Some(Box::new(|index: u32| Rgb([index as u8, 0, 0]))),
            ..LayoutDrawingConfig::default()
        };
        draw_layout(&mut preview, &layout, &config);

        // Tile 6 sits bottom right; its content ends 2px before the right edge.
        assert_eq!(*preview.get_pixel(57, 45), Rgb([6, 0, 0]));
    }

    #[test]
    fn test_save_preview_with_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.png");
        let preview = RgbImage::new(60, 60);
        save_preview_with_layout(&preview, &layout(), &path, &LayoutDrawingConfig::default())
            .unwrap();
        assert!(path.exists());
        // The caller's preview is left untouched.
        assert!(preview.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
