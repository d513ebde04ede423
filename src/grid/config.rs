use super::*;
use image::imageops::FilterType;
use image::Rgb;

/// Shape of the profile grid: always three columns, one to three rows.
///
/// # Example
/// ```
/// use gridsplit::GridSpec;
///
/// let grid = GridSpec::new(9).unwrap();
/// assert_eq!(grid.columns(), 3);
/// assert_eq!(grid.rows(), 3);
/// assert!(GridSpec::new(4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridSpec {
    total_tiles: u32,
}

impl GridSpec {
    pub fn new(total_tiles: u32) -> Result<Self, ConfigError> {
        if !SUPPORTED_TILE_COUNTS.contains(&total_tiles) {
            return Err(ConfigError::UnsupportedTileCount(total_tiles));
        }
        Ok(Self { total_tiles })
    }

    pub fn total_tiles(&self) -> u32 {
        self.total_tiles
    }

    pub fn columns(&self) -> u32 {
        GRID_COLUMNS
    }

    pub fn rows(&self) -> u32 {
        self.total_tiles / GRID_COLUMNS
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { total_tiles: 6 }
    }
}

impl TryFrom<u32> for GridSpec {
    type Error = ConfigError;

    fn try_from(total_tiles: u32) -> Result<Self, Self::Error> {
        GridSpec::new(total_tiles)
    }
}

/// Output size of every tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TileCanvasSize {
    pub width: u32,
    pub height: u32,
}

impl TileCanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for TileCanvasSize {
    fn default() -> Self {
        Self::new(TILE_WIDTH, TILE_HEIGHT)
    }
}

/// Margins around the outside of the whole grid. Interior seams carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarginConfig {
    pub top_bottom: u32,
    pub left_right: u32,
}

impl MarginConfig {
    pub fn new(top_bottom: u32, left_right: u32) -> Self {
        Self {
            top_bottom,
            left_right,
        }
    }
}

/// Gutter on each side of one column's visible content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnPadding {
    pub leading: u32,
    pub trailing: u32,
}

impl ColumnPadding {
    pub fn new(leading: u32, trailing: u32) -> Self {
        Self { leading, trailing }
    }

    pub fn total(&self) -> u32 {
        self.leading.saturating_add(self.trailing)
    }
}

/// Extra inset that narrows the source-visible width of columns without touching the
/// canvas geometry, leaving a background gutter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EdgePadding {
    #[default]
    None,
    /// The first column pads its trailing edge, the last column its leading edge and
    /// every middle column both edges.
    Uniform(u32),
    /// One entry per column, left to right.
    PerColumn(SmallVecLine<ColumnPadding>),
}

impl EdgePadding {
    /// Maps the flat `enabled` / `margin` pair of a front end onto a padding rule.
    pub fn from_flags(enabled: bool, margin: u32) -> Self {
        if enabled && margin > 0 {
            EdgePadding::Uniform(margin)
        } else {
            EdgePadding::None
        }
    }

    /// Resolves the padding of every column of a grid `columns` wide.
    pub fn resolve(&self, columns: u32) -> Result<SmallVecLine<ColumnPadding>, ConfigError> {
        match self {
            EdgePadding::None => Ok((0..columns).map(|_| ColumnPadding::default()).collect()),
            EdgePadding::Uniform(px) => Ok((0..columns)
                .map(|col| {
                    let leading = if col > 0 { *px } else { 0 };
                    let trailing = if col + 1 < columns { *px } else { 0 };
                    ColumnPadding::new(leading, trailing)
                })
                .collect()),
            EdgePadding::PerColumn(table) => {
                if table.len() != columns as usize {
                    return Err(ConfigError::PaddingTableMismatch {
                        expected: columns,
                        actual: table.len() as u32,
                    });
                }
                Ok(table.clone())
            }
        }
    }
}

/// How frame bounds are chosen for each tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameStyle {
    /// One rectangle around the union of all content, drawn segment by segment.
    #[default]
    Outer,
    /// Like `Outer`, but in fit mode the segments hug the detected content of each tile.
    Individual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    pub enabled: bool,
    /// Number of nested one-pixel lines per edge.
    pub thickness: u32,
    pub style: FrameStyle,
    pub color: Rgb<u8>,
    /// A pixel counts as content when any channel is above this value.
    pub background_threshold: u8,
    /// When false, individual frames use the content rectangle instead of the
    /// detected non-background bounds.
    pub detect_content_bounds: bool,
}

impl FrameConfig {
    pub fn new(enabled: bool, thickness: u32, style: FrameStyle) -> Self {
        Self {
            enabled,
            thickness,
            style,
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thickness: 4,
            style: FrameStyle::Outer,
            color: Rgb([255, 255, 255]),
            background_threshold: 0,
            detect_content_bounds: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FittingPolicy {
    /// Fill the visible area completely, center-cropping the overflow.
    #[default]
    Cover,
    /// Fit entirely inside the visible area, letterboxing with the background colour.
    Fit,
}

/// Everything one render pass needs besides the source image.
///
/// # Example
/// ```
/// use gridsplit::{FittingPolicy, GridSpec, MarginConfig, RenderConfig};
///
/// let config = RenderConfig::new(GridSpec::new(3).unwrap())
///     .with_margins(MarginConfig::new(40, 40))
///     .with_fitting(FittingPolicy::Fit);
/// assert_eq!(config.grid.rows(), 1);
/// assert_eq!(config.canvas.width, 1080);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub grid: GridSpec,
    pub canvas: TileCanvasSize,
    pub margins: MarginConfig,
    pub edge_padding: EdgePadding,
    pub frame: FrameConfig,
    pub fitting: FittingPolicy,
    /// Resampling filter used by the source fitter.
    pub filter: FilterType,
}

impl RenderConfig {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn with_canvas(mut self, canvas: TileCanvasSize) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_margins(mut self, margins: MarginConfig) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_edge_padding(mut self, edge_padding: EdgePadding) -> Self {
        self.edge_padding = edge_padding;
        self
    }

    pub fn with_frame(mut self, frame: FrameConfig) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_fitting(mut self, fitting: FittingPolicy) -> Self {
        self.fitting = fitting;
        self
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            canvas: TileCanvasSize::default(),
            margins: MarginConfig::new(80, 80),
            edge_padding: EdgePadding::None,
            frame: FrameConfig::default(),
            fitting: FittingPolicy::Cover,
            filter: FilterType::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;
    use test_case::test_case;

    #[test_case(3, 1; "single row")]
    #[test_case(6, 2; "two rows")]
    #[test_case(9, 3; "three rows")]
    fn test_grid_shape(total: u32, rows: u32) {
        let grid = GridSpec::new(total).unwrap();
        assert_eq!((grid.rows(), grid.columns()), (rows, GRID_COLUMNS));
        assert_eq!(grid.rows() * grid.columns(), total);
    }

    #[test_case(0)]
    #[test_case(4)]
    #[test_case(12)]
    fn test_unsupported_tile_count(total: u32) {
        assert_eq!(
            GridSpec::try_from(total),
            Err(ConfigError::UnsupportedTileCount(total))
        );
    }

    #[test]
    fn test_uniform_padding_positions() {
        let padding = EdgePadding::Uniform(12).resolve(3).unwrap();
        assert_eq!(
            padding.as_slice(),
            &[
                ColumnPadding::new(0, 12),
                ColumnPadding::new(12, 12),
                ColumnPadding::new(12, 0),
            ]
        );
    }

    #[test]
    fn test_padding_table_length_is_checked() {
        let table = EdgePadding::PerColumn(smallvec![ColumnPadding::new(0, 5)]);
        assert_eq!(
            table.resolve(3),
            Err(ConfigError::PaddingTableMismatch {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn test_padding_from_flags() {
        assert_eq!(EdgePadding::from_flags(false, 30), EdgePadding::None);
        assert_eq!(EdgePadding::from_flags(true, 0), EdgePadding::None);
        assert_eq!(EdgePadding::from_flags(true, 30), EdgePadding::Uniform(30));
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.grid.total_tiles(), 6);
        assert_eq!(config.canvas, TileCanvasSize::new(1080, 1350));
        assert_eq!(config.margins, MarginConfig::new(80, 80));
        assert!(config.frame.enabled);
        assert_eq!(config.frame.thickness, 4);
        assert_eq!(config.fitting, FittingPolicy::Cover);
    }
}
