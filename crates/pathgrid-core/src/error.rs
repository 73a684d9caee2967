//! Errors raised while building, parsing or addressing a [`Grid`](crate::Grid).

use crate::geom::Pos;

/// Errors that can occur when constructing or indexing a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Grid construction was requested with a non-positive size.
    #[error("invalid grid dimension {0}: must be at least 1")]
    InvalidDimension(i32),
    /// A lookup used indices outside `[0, dimension)`.
    #[error("position {pos} is outside a {dimension}x{dimension} grid")]
    OutOfBounds { pos: Pos, dimension: i32 },
    /// An ASCII layout was not `dimension` rows of `dimension` cells.
    #[error("grid layout is not square: {rows} rows, row {row} has {len} cells")]
    NotSquare { rows: i32, row: i32, len: i32 },
    /// An ASCII layout contained an unknown character.
    #[error("grid layout contains invalid character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Pos },
    /// A stored grid does not hold exactly `dimension²` cells.
    #[error("a {dimension}x{dimension} grid cannot hold {len} cells")]
    CellCount { dimension: i32, len: usize },
    /// A stored cell disagrees with the grid rebuilt around it: wrong
    /// position, a marked barrier, or a second start or end.
    #[error("stored cell at {0} is inconsistent with its grid")]
    InconsistentCell(Pos),
    /// A stored grid's start or end does not match its cell marks.
    #[error("stored grid endpoints do not match its cells")]
    EndpointMismatch,
}
