mod config;
mod lines;
mod traits;

pub use config::*;
pub use lines::{Column, Row};
pub use traits::{Extent, GridLike};

use crate::*;
use imageproc::rect::Rect;
use lines::{plan_columns, plan_rows};
use tracing::*;

/// A cell of the plan, referencing its row and column.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    pub row: &'a Row,
    pub column: &'a Column,
    grid: GridSpec,
}

impl Cell<'_> {
    /// 1-based position in reading order, top-left to bottom-right.
    pub fn index(&self) -> u32 {
        self.row.index * self.grid.columns() + self.column.index + 1
    }

    pub fn on_top_edge(&self) -> bool {
        self.row.index == 0
    }

    pub fn on_bottom_edge(&self) -> bool {
        self.row.index + 1 == self.grid.rows()
    }

    pub fn on_left_edge(&self) -> bool {
        self.column.index == 0
    }

    pub fn on_right_edge(&self) -> bool {
        self.column.index + 1 == self.grid.columns()
    }

    /// Region of the fitted raster that belongs to this cell.
    pub fn source_rect(&self) -> Rect {
        Rect::from(self)
    }

    /// Where that region lands inside the tile canvas.
    pub fn content_rect(&self) -> Rect {
        Rect::at(
            self.column.content_left() as i32,
            self.row.content_top() as i32,
        )
        .of_size(self.column.width, self.row.height)
    }
}

impl From<&Cell<'_>> for Rect {
    fn from(cell: &Cell) -> Self {
        Rect::at(cell.column.x as i32, cell.row.y as i32)
            .of_size(cell.column.width, cell.row.height)
    }
}

/// The geometry of one render pass: per-row and per-column content sizes and offsets.
///
/// # Example
/// ```
/// use gridsplit::*;
///
/// let layout = Layout::plan(
///     GridSpec::new(6).unwrap(),
///     TileCanvasSize::default(),
///     MarginConfig::new(40, 40),
///     &EdgePadding::None,
/// )
/// .unwrap();
///
/// assert_eq!(layout.visible_size(), (3160, 2620));
/// assert_eq!(layout.cells().count(), 6);
/// ```
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Layout {
    pub grid: GridSpec,
    pub canvas: TileCanvasSize,
    pub rows: SmallVecLine<Row>,
    pub columns: SmallVecLine<Column>,
}

impl Layout {
    /// Plans content regions for every cell, rejecting margins or padding that leave a
    /// cell without content.
    pub fn plan(
        grid: GridSpec,
        canvas: TileCanvasSize,
        margins: MarginConfig,
        edge_padding: &EdgePadding,
    ) -> Result<Self, ConfigError> {
        trace!(
            "Planning {} tiles on {}x{} with {:?}",
            grid.total_tiles(),
            canvas.width,
            canvas.height,
            margins
        );
        if margins.left_right.saturating_mul(2) >= canvas.width {
            error!("Side margins too large: {}", margins.left_right);
            return Err(ConfigError::SideMarginTooLarge {
                margin: margins.left_right,
                width: canvas.width,
            });
        }
        if grid.rows() == 1 && margins.top_bottom.saturating_mul(2) >= canvas.height {
            error!("Top/bottom margins too large: {}", margins.top_bottom);
            return Err(ConfigError::VerticalMarginTooLarge {
                margin: margins.top_bottom,
                height: canvas.height,
            });
        }

        // Cell rectangles use i32 coordinates, so the whole preview must fit in them.
        let fits = |count: u32, extent: u32| {
            count
                .checked_mul(extent)
                .is_some_and(|total| total <= i32::MAX as u32)
        };
        if !fits(grid.columns(), canvas.width) {
            error!("Preview width overflows: {} columns of {}px", grid.columns(), canvas.width);
            return Err(ConfigError::CoordinateOverflow { axis: "x" });
        }
        if !fits(grid.rows(), canvas.height) {
            error!("Preview height overflows: {} rows of {}px", grid.rows(), canvas.height);
            return Err(ConfigError::CoordinateOverflow { axis: "y" });
        }

        let padding = edge_padding.resolve(grid.columns())?;
        let columns = plan_columns(canvas.width, margins.left_right, &padding)?;
        let rows = plan_rows(grid.rows(), canvas.height, margins.top_bottom)?;

        let layout = Layout {
            grid,
            canvas,
            rows,
            columns,
        };
        debug!("Visible area {:?}", layout.visible_size());
        Ok(layout)
    }

    /// Plans the layout described by a render configuration.
    pub fn from_config(config: &RenderConfig) -> Result<Self, ConfigError> {
        Self::plan(
            config.grid,
            config.canvas,
            config.margins,
            &config.edge_padding,
        )
    }

    /// Size the fitted source raster must have.
    pub fn visible_size(&self) -> (u32, u32) {
        (self.visible_width(), self.visible_height())
    }

    /// Size of the assembled preview.
    pub fn preview_size(&self) -> (u32, u32) {
        (
            self.grid.columns().saturating_mul(self.canvas.width),
            self.grid.rows().saturating_mul(self.canvas.height),
        )
    }

    /// All cells in reading order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> {
        self.rows.iter().flat_map(move |row| {
            self.columns.iter().map(move |column| Cell {
                row,
                column,
                grid: self.grid,
            })
        })
    }

    /// Finds a cell by its 1-based index.
    pub fn cell(&self, index: u32) -> Option<Cell<'_>> {
        let zero_based = index.checked_sub(1)?;
        let row = self.rows.get((zero_based / self.grid.columns()) as usize)?;
        let column = self.columns.get((zero_based % self.grid.columns()) as usize)?;
        Some(Cell {
            row,
            column,
            grid: self.grid,
        })
    }
}

impl GridLike for Layout {
    fn rows_iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    fn columns_iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }
}

impl TryFrom<&RenderConfig> for Layout {
    type Error = ConfigError;

    fn try_from(config: &RenderConfig) -> Result<Self, Self::Error> {
        Layout::from_config(config)
    }
}
