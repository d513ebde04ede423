use super::*;

/// One row of the plan: where its content sits in the visible canvas and how much
/// margin surrounds it inside the tile.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Row {
    pub index: u32,
    /// Offset of this row's content in the fitted raster.
    pub y: u32,
    pub height: u32,
    pub top_margin: u32,
    pub bottom_margin: u32,
}

/// One column of the plan. `pad_leading` / `pad_trailing` are edge-padding gutters.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Column {
    pub index: u32,
    /// Offset of this column's content in the fitted raster.
    pub x: u32,
    pub width: u32,
    pub left_margin: u32,
    pub right_margin: u32,
    pub pad_leading: u32,
    pub pad_trailing: u32,
}

impl Column {
    /// Horizontal position of the content inside the tile canvas.
    pub fn content_left(&self) -> u32 {
        self.left_margin + self.pad_leading
    }
}

impl Row {
    /// Vertical position of the content inside the tile canvas.
    pub fn content_top(&self) -> u32 {
        self.top_margin
    }
}

/// Plans the rows of a grid `rows` high on a canvas `height` pixels tall.
///
/// A single row takes the vertical margin on both edges, otherwise the first row
/// takes it on top and the last row at the bottom.
pub(crate) fn plan_rows(
    rows: u32,
    height: u32,
    margin: u32,
) -> Result<SmallVecLine<Row>, ConfigError> {
    let mut planned = SmallVecLine::new();
    let mut y = 0;
    for index in 0..rows {
        let top_margin = if rows == 1 || index == 0 { margin } else { 0 };
        let bottom_margin = if rows == 1 || index + 1 == rows { margin } else { 0 };
        let row_height = height
            .checked_sub(top_margin.saturating_add(bottom_margin))
            .filter(|h| *h > 0)
            .ok_or(ConfigError::EmptyRow { row: index })?;
        planned.push(Row {
            index,
            y,
            height: row_height,
            top_margin,
            bottom_margin,
        });
        y = y
            .checked_add(row_height)
            .ok_or(ConfigError::CoordinateOverflow { axis: "y" })?;
    }
    Ok(planned)
}

/// Plans the columns of a grid on a canvas `width` pixels wide.
pub(crate) fn plan_columns(
    width: u32,
    margin: u32,
    padding: &[ColumnPadding],
) -> Result<SmallVecLine<Column>, ConfigError> {
    let columns = padding.len() as u32;
    let mut planned = SmallVecLine::new();
    let mut x = 0;
    for (index, pad) in (0..columns).zip(padding) {
        let left_margin = if index == 0 { margin } else { 0 };
        let right_margin = if index + 1 == columns { margin } else { 0 };
        let net_width = width
            .checked_sub(left_margin.saturating_add(right_margin))
            .filter(|w| *w > 0)
            .ok_or(ConfigError::EmptyColumn { column: index })?;
        if pad.total() >= net_width {
            return Err(ConfigError::EdgePaddingTooLarge {
                column: index,
                padding: pad.total(),
                width: net_width,
            });
        }
        let column_width = net_width - pad.total();
        planned.push(Column {
            index,
            x,
            width: column_width,
            left_margin,
            right_margin,
            pad_leading: pad.leading,
            pad_trailing: pad.trailing,
        });
        x = x
            .checked_add(column_width)
            .ok_or(ConfigError::CoordinateOverflow { axis: "x" })?;
    }
    Ok(planned)
}
