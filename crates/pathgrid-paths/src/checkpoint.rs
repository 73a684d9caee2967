//! Cooperative hand-off between the engine and whoever is drawing it.

use pathgrid_core::{Grid, Pos, Role};

/// Answer returned by a [`Checkpoint`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Cancel,
}

/// What the engine exposes at each checkpoint.
#[derive(Debug)]
pub struct Progress<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) current: Pos,
    pub(crate) expanded: usize,
    pub(crate) frontier_len: usize,
    pub(crate) changes: &'a [(Pos, Role)],
}

impl<'a> Progress<'a> {
    /// The grid, with this iteration's marks applied.
    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// The cell just expanded.
    #[inline]
    pub fn current(&self) -> Pos {
        self.current
    }

    /// Number of cells expanded so far, including `current`.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Live frontier entries after this iteration.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier_len
    }

    /// Cells whose role changed during this iteration, in the order the
    /// changes were made.
    #[inline]
    pub fn changes(&self) -> &'a [(Pos, Role)] {
        self.changes
    }

    /// Row-major roles of the whole grid.
    pub fn snapshot(&self) -> Vec<Role> {
        self.grid.snapshot()
    }
}

/// Called once per outer iteration, after the expanded cell's neighbours
/// have been relaxed. Returning [`Control::Cancel`] stops the search with
/// [`Outcome::Cancelled`](crate::Outcome::Cancelled).
pub trait Checkpoint {
    fn checkpoint(&mut self, progress: &Progress<'_>) -> Control;
}

impl<F> Checkpoint for F
where
    F: FnMut(&Progress<'_>) -> Control,
{
    #[inline]
    fn checkpoint(&mut self, progress: &Progress<'_>) -> Control {
        self(progress)
    }
}

/// A checkpoint that never looks and never cancels.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unobserved;

impl Checkpoint for Unobserved {
    #[inline]
    fn checkpoint(&mut self, _progress: &Progress<'_>) -> Control {
        Control::Continue
    }
}
