use super::*;

/// A trait for types that provide access to rows and columns.
pub trait GridLike {
    /// Returns an iterator over all rows.
    fn rows_iter(&self) -> impl Iterator<Item = &Row>;

    /// Returns an iterator over all columns.
    fn columns_iter(&self) -> impl Iterator<Item = &Column>;

    /// Returns the number of rows.
    fn row_count(&self) -> usize {
        self.rows_iter().count()
    }

    /// Returns the number of columns.
    fn column_count(&self) -> usize {
        self.columns_iter().count()
    }

    /// Width of the fitted raster: the sum of all column content widths.
    fn visible_width(&self) -> u32 {
        total_extent(self.columns_iter())
    }

    /// Height of the fitted raster: the sum of all row content heights.
    fn visible_height(&self) -> u32 {
        total_extent(self.rows_iter())
    }
}

/// Size of a row or column along its own axis.
pub trait Extent {
    fn extent(&self) -> u32;
}

impl Extent for Row {
    fn extent(&self) -> u32 {
        self.height
    }
}

impl Extent for Column {
    fn extent(&self) -> u32 {
        self.width
    }
}

fn total_extent<'a, T: Extent + 'a>(lines: impl Iterator<Item = &'a T>) -> u32 {
    lines.map(Extent::extent).sum()
}
