//! Errors reported by the search engine and its frontier.

use pathgrid_core::Pos;

/// Why a pair of endpoints cannot be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EndpointProblem {
    /// Start and end are the same cell.
    #[error("start and end are both {0}")]
    Same(Pos),
    /// An endpoint is a barrier cell.
    #[error("endpoint {0} is a barrier")]
    Barrier(Pos),
    /// An endpoint lies outside the grid.
    #[error("endpoint {0} is outside the grid")]
    OutOfGrid(Pos),
}

/// Errors that stop a search before it runs.
///
/// Running out of frontier or being cancelled are outcomes, not errors;
/// see [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SearchError {
    #[error("invalid endpoints: {0}")]
    InvalidEndpoints(#[from] EndpointProblem),
}

/// Contract violations on [`Frontier`](crate::Frontier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrontierError {
    /// `pop_min` was called with no live entries.
    #[error("pop from an empty frontier")]
    Empty,
}
