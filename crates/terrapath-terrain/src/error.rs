use terrapath_geom::Point;
use terrapath_search::SearchError;
use thiserror::Error;

/// Errors raised while building terrain or routing across it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    /// The grid has no rows or no columns.
    #[error("elevation grid is empty")]
    Empty,
    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An endpoint lies outside the grid.
    #[error("{0} is outside the terrain")]
    OutOfBounds(Point),
    #[error(transparent)]
    Search(#[from] SearchError),
}
