use crate::*;
use image::{imageops, RgbImage};
use tracing::*;

/// One output post: a full canvas holding its slice of the fitted source.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// 1-based position in reading order; drives file names and posting order.
    pub index: u32,
    pub row: u32,
    pub col: u32,
    pub raster: RgbImage,
}

impl Tile {
    /// Top-left corner of this tile inside the assembled preview.
    pub fn preview_origin(&self) -> (u32, u32) {
        (self.col * self.raster.width(), self.row * self.raster.height())
    }
}

/// Cuts `fitted` along the layout and pastes every slice onto a blank tile canvas.
///
/// Tiles come back in reading order. Fails with [`TilingError::InvalidDimensions`]
/// when `fitted` does not have the layout's visible size.
pub fn compose_tiles(fitted: &RgbImage, layout: &Layout) -> Result<Vec<Tile>, TilingError> {
    let (width, height) = fitted.dimensions();
    if (width, height) != layout.visible_size() {
        error!(
            "Fitted raster is {}x{}, layout expects {:?}",
            width,
            height,
            layout.visible_size()
        );
        return Err(TilingError::InvalidDimensions { width, height });
    }
    trace!("Composing {} tiles", layout.grid.total_tiles());

    Ok(layout
        .cells()
        .map(|cell| compose_tile(fitted, layout, &cell))
        .collect())
}

fn compose_tile(fitted: &RgbImage, layout: &Layout, cell: &Cell) -> Tile {
    let source = cell.source_rect();
    let slice = imageops::crop_imm(
        fitted,
        source.left() as u32,
        source.top() as u32,
        source.width(),
        source.height(),
    )
    .to_image();

    let mut raster = RgbImage::from_pixel(layout.canvas.width, layout.canvas.height, BACKGROUND);
    let content = cell.content_rect();
    imageops::replace(
        &mut raster,
        &slice,
        content.left() as i64,
        content.top() as i64,
    );

    Tile {
        index: cell.index(),
        row: cell.row.index,
        col: cell.column.index,
        raster,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb};
    use pretty_assertions::assert_eq;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 250) as u8 + 1, (y % 250) as u8 + 1, 128])
        })
    }

    #[test]
    fn test_tiles_follow_reading_order() {
        let layout = Layout::plan(
            GridSpec::new(6).unwrap(),
            TileCanvasSize::new(30, 40),
            MarginConfig::new(5, 4),
            &EdgePadding::None,
        )
        .unwrap();
        let fitted = gradient(82, 70);
        let tiles = compose_tiles(&fitted, &layout).unwrap();

        let positions: Vec<(u32, u32, u32)> =
            tiles.iter().map(|t| (t.index, t.row, t.col)).collect();
        assert_eq!(
            positions,
            vec![
                (1, 0, 0),
                (2, 0, 1),
                (3, 0, 2),
                (4, 1, 0),
                (5, 1, 1),
                (6, 1, 2)
            ]
        );
        assert!(tiles.iter().all(|t| t.raster.dimensions() == (30, 40)));
        assert_eq!(tiles[4].preview_origin(), (30, 40));
    }

    #[test]
    fn test_slices_are_copied_without_resampling() {
        let layout = Layout::plan(
            GridSpec::new(3).unwrap(),
            TileCanvasSize::new(30, 40),
            MarginConfig::new(5, 4),
            &EdgePadding::Uniform(3),
        )
        .unwrap();
        let (width, height) = layout.visible_size();
        let fitted = gradient(width, height);
        let tiles = compose_tiles(&fitted, &layout).unwrap();

        for (tile, cell) in tiles.iter().zip(layout.cells()) {
            let source = cell.source_rect();
            let content = cell.content_rect();
            let pasted = tile.raster.view(
                content.left() as u32,
                content.top() as u32,
                content.width(),
                content.height(),
            );
            let expected = fitted.view(
                source.left() as u32,
                source.top() as u32,
                source.width(),
                source.height(),
            );
            assert_eq!(pasted.to_image(), expected.to_image());
        }

        // Margins and gutters stay background.
        assert_eq!(*tiles[0].raster.get_pixel(0, 20), BACKGROUND);
        assert_eq!(*tiles[0].raster.get_pixel(29, 20), BACKGROUND);
        assert_eq!(*tiles[1].raster.get_pixel(1, 20), BACKGROUND);
        assert_eq!(*tiles[1].raster.get_pixel(15, 2), BACKGROUND);
        assert_ne!(*tiles[1].raster.get_pixel(15, 20), BACKGROUND);
    }

    #[test]
    fn test_wrongly_sized_raster_is_rejected() {
        let layout = Layout::plan(
            GridSpec::new(3).unwrap(),
            TileCanvasSize::new(30, 40),
            MarginConfig::new(5, 4),
            &EdgePadding::None,
        )
        .unwrap();
        assert_eq!(layout.visible_size(), (82, 30));

        let err = compose_tiles(&gradient(80, 30), &layout).unwrap_err();
        assert!(matches!(
            err,
            TilingError::InvalidDimensions {
                width: 80,
                height: 30
            }
        ));
    }

    #[test]
    fn test_noise_reassembles_from_tile_content() {
        let layout = Layout::plan(
            GridSpec::new(9).unwrap(),
            TileCanvasSize::new(24, 32),
            MarginConfig::new(2, 3),
            &EdgePadding::Uniform(2),
        )
        .unwrap();
        let (width, height) = layout.visible_size();
        let fitted = RgbImage::from_fn(width, height, |_, _| {
            Rgb([rand::random::<u8>(), rand::random::<u8>(), rand::random::<u8>()])
        });
        let tiles = compose_tiles(&fitted, &layout).unwrap();

        let mut rebuilt = RgbImage::new(width, height);
        for (tile, cell) in tiles.iter().zip(layout.cells()) {
            let source = cell.source_rect();
            let content = cell.content_rect();
            let pasted = tile
                .raster
                .view(
                    content.left() as u32,
                    content.top() as u32,
                    content.width(),
                    content.height(),
                )
                .to_image();
            imageops::replace(&mut rebuilt, &pasted, source.left() as i64, source.top() as i64);
        }
        assert_eq!(rebuilt, fitted);
    }
}
