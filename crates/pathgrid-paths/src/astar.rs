use pathgrid_core::{Grid, Mark, Pos, Role};

use crate::checkpoint::{Checkpoint, Control, Progress};
use crate::error::{EndpointProblem, SearchError};
use crate::frontier::Frontier;
use crate::heuristic::manhattan;

/// Score of a cell no path has reached yet.
pub const UNREACHABLE: i32 = i32::MAX;

/// Shortest path found by a successful search.
///
/// `cells` runs from the first step after `start` up to and including the
/// end, so its length is the hop count.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    start: Pos,
    cells: Vec<Pos>,
}

impl Path {
    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    /// The goal cell.
    #[inline]
    pub fn end(&self) -> Pos {
        self.cells.last().copied().unwrap_or(self.start)
    }

    /// Cells after the start, in walking order.
    #[inline]
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// Number of hops.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every cell of the walk, start included.
    pub fn iter_with_start(&self) -> impl Iterator<Item = Pos> + '_ {
        std::iter::once(self.start).chain(self.cells.iter().copied())
    }
}

/// How a well-formed search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The end was reached.
    Succeeded(Path),
    /// The frontier ran dry: the end is unreachable.
    Exhausted,
    /// A checkpoint asked to stop.
    Cancelled,
}

/// Lifecycle of a [`Search`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Running,
    Succeeded,
    Exhausted,
    Cancelled,
}

/// Result of one [`Search::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A cell was popped and its neighbours relaxed.
    Expanded(Pos),
    /// The search is over.
    Done(Outcome),
}

/// One A* run over a borrowed grid.
///
/// The grid's search marks are updated as the run proceeds: relaxed
/// neighbours become `Frontier`, expanded cells `Visited`, and on success
/// the cells between start and end become `Path`. Start and end keep their
/// own marks, barriers are never touched.
pub struct Search<'g> {
    grid: &'g mut Grid,
    start: Pos,
    end: Pos,
    start_idx: usize,
    end_idx: usize,
    g_score: Vec<i32>,
    f_score: Vec<i32>,
    came_from: Vec<Option<usize>>,
    frontier: Frontier,
    phase: Phase,
    expanded: usize,
    changes: Vec<(Pos, Role)>,
    nbuf: Vec<Pos>,
    outcome: Option<Outcome>,
}

impl<'g> Search<'g> {
    /// Validate the endpoints and seed the frontier with `start`.
    ///
    /// Nothing in `grid` is modified when validation fails.
    pub fn new(grid: &'g mut Grid, start: Pos, end: Pos) -> Result<Self, SearchError> {
        let start_idx = grid.index(start).ok_or(EndpointProblem::OutOfGrid(start))?;
        let end_idx = grid.index(end).ok_or(EndpointProblem::OutOfGrid(end))?;
        if start == end {
            return Err(EndpointProblem::Same(start).into());
        }
        for p in [start, end] {
            if !grid.is_passable(p) {
                return Err(EndpointProblem::Barrier(p).into());
            }
        }

        let len = grid.len();
        let mut g_score = vec![UNREACHABLE; len];
        let mut f_score = vec![UNREACHABLE; len];
        g_score[start_idx] = 0;
        f_score[start_idx] = manhattan(start, end);

        let mut frontier = Frontier::new();
        frontier.push(start, f_score[start_idx]);

        log::debug!(
            "astar: searching {start} -> {end} on a {0}x{0} grid",
            grid.dimension()
        );

        Ok(Self {
            grid,
            start,
            end,
            start_idx,
            end_idx,
            g_score,
            f_score,
            came_from: vec![None; len],
            frontier,
            phase: Phase::Initialized,
            expanded: 0,
            changes: Vec::new(),
            nbuf: Vec::with_capacity(4),
            outcome: None,
        })
    }

    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Pos {
        self.end
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The grid being searched.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Cells expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Cost of the cheapest known path from start to `p`, or
    /// [`UNREACHABLE`].
    pub fn g_score(&self, p: Pos) -> i32 {
        self.grid.index(p).map_or(UNREACHABLE, |i| self.g_score[i])
    }

    /// `g_score(p)` plus the heuristic to the end, or [`UNREACHABLE`].
    pub fn f_score(&self, p: Pos) -> i32 {
        self.grid.index(p).map_or(UNREACHABLE, |i| self.f_score[i])
    }

    /// Predecessor of `p` on the cheapest known path.
    pub fn came_from(&self, p: Pos) -> Option<Pos> {
        let i = self.grid.index(p)?;
        self.came_from[i].map(|ci| self.grid.pos_of(ci))
    }

    /// Whether `p` is currently queued.
    pub fn is_open(&self, p: Pos) -> bool {
        self.frontier.contains(p)
    }

    /// Cells whose role changed during the last step.
    pub fn changes(&self) -> &[(Pos, Role)] {
        &self.changes
    }

    fn mark(&mut self, p: Pos, mark: Mark) {
        if matches!(self.grid.set_search_mark(p, mark), Ok(true)) {
            let role = self.grid.role(p).unwrap_or(Role::Empty);
            self.changes.push((p, role));
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        self.phase = match outcome {
            Outcome::Succeeded(_) => Phase::Succeeded,
            Outcome::Exhausted => Phase::Exhausted,
            Outcome::Cancelled => Phase::Cancelled,
        };
        log::debug!(
            "astar: {:?} after {} expansions",
            self.phase,
            self.expanded
        );
        self.outcome = Some(outcome.clone());
        Step::Done(outcome)
    }

    /// Stop the run. Marks already written stay as they are.
    ///
    /// Has no effect once the search has finished.
    pub fn cancel(&mut self) -> Outcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        self.changes.clear();
        self.finish(Outcome::Cancelled);
        Outcome::Cancelled
    }

    /// Pop one cell and relax its neighbours.
    ///
    /// Once a terminal phase is reached every further call returns the
    /// same [`Step::Done`].
    pub fn step(&mut self) -> Step {
        if let Some(outcome) = &self.outcome {
            return Step::Done(outcome.clone());
        }
        self.phase = Phase::Running;
        self.changes.clear();

        if self.frontier.is_empty() {
            return self.finish(Outcome::Exhausted);
        }
        let Ok(entry) = self.frontier.pop_min() else {
            return self.finish(Outcome::Exhausted);
        };
        let current = entry.pos;
        let Some(ci) = self.grid.index(current) else {
            return self.finish(Outcome::Exhausted);
        };

        if ci == self.end_idx {
            let path = self.reconstruct();
            return self.finish(Outcome::Succeeded(path));
        }

        let tentative_g = self.g_score[ci] + 1;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.grid.neighbors_of(current, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.grid.index(np) else {
                continue;
            };
            if tentative_g >= self.g_score[ni] {
                continue;
            }
            self.came_from[ni] = Some(ci);
            self.g_score[ni] = tentative_g;
            self.f_score[ni] = tentative_g + manhattan(np, self.end);

            // A queued cell keeps its entry and its place in line.
            if self.frontier.contains(np) {
                continue;
            }
            self.frontier.push(np, self.f_score[ni]);
            if ni != self.end_idx && ni != self.start_idx {
                self.mark(np, Mark::Frontier);
            }
        }
        self.nbuf = nbuf;

        if ci != self.start_idx {
            self.mark(current, Mark::Visited);
        }
        self.expanded += 1;
        log::trace!(
            "astar: expanded {current} g={} frontier={}",
            self.g_score[ci],
            self.frontier.len()
        );
        Step::Expanded(current)
    }

    /// Follow `came_from` back from the end and mark the cells in between.
    fn reconstruct(&mut self) -> Path {
        let mut cells = Vec::new();
        let mut ci = self.end_idx;
        while ci != self.start_idx {
            cells.push(self.grid.pos_of(ci));
            match self.came_from[ci] {
                Some(prev) => ci = prev,
                None => break,
            }
        }
        cells.reverse();

        if let Some((_, between)) = cells.split_last() {
            for &p in between {
                self.mark(p, Mark::Path);
            }
        }
        Path {
            start: self.start,
            cells,
        }
    }

    /// Run to completion, handing control to `checkpoint` after every
    /// expansion.
    pub fn run<C: Checkpoint>(mut self, mut checkpoint: C) -> Outcome {
        loop {
            match self.step() {
                Step::Done(outcome) => return outcome,
                Step::Expanded(current) => {
                    let progress = Progress {
                        grid: &*self.grid,
                        current,
                        expanded: self.expanded,
                        frontier_len: self.frontier.len(),
                        changes: &self.changes,
                    };
                    if checkpoint.checkpoint(&progress) == Control::Cancel {
                        return self.cancel();
                    }
                }
            }
        }
    }
}

/// Search `grid` for a shortest path from `start` to `end`.
///
/// Shorthand for [`Search::new`] followed by [`Search::run`].
pub fn astar<C: Checkpoint>(
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    checkpoint: C,
) -> Result<Outcome, SearchError> {
    Ok(Search::new(grid, start, end)?.run(checkpoint))
}
