//! The [`Grid`] type: an N×N square of [`Cell`]s.
//!
//! Cells are stored row-major. Adjacency is never cached: every call to
//! [`neighbors_of`](Grid::neighbors_of) reads the current barriers, so edits
//! made between runs are always respected.

use std::fmt;

use crate::cell::{Cell, Mark, Role};
use crate::error::GridError;
use crate::geom::Pos;

/// A square grid of cells with at most one start and at most one end.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct Grid {
    dimension: i32,
    cells: Vec<Cell>,
    start: Option<Pos>,
    end: Option<Pos>,
}

/// Stored form of a [`Grid`]; rebuilt through the editing operations on
/// load so that a malformed document cannot produce a broken grid.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    dimension: i32,
    cells: Vec<Cell>,
    start: Option<Pos>,
    end: Option<Pos>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        if repr.dimension <= 0 {
            return Err(GridError::InvalidDimension(repr.dimension));
        }
        let d = repr.dimension as u64;
        if repr.cells.len() as u64 != d * d {
            return Err(GridError::CellCount {
                dimension: repr.dimension,
                len: repr.cells.len(),
            });
        }
        let mut grid = Self::build(repr.dimension)?;
        for (i, cell) in repr.cells.iter().enumerate() {
            let pos = grid.pos_of(i);
            if cell.pos() != pos {
                return Err(GridError::InconsistentCell(cell.pos()));
            }
            if cell.is_barrier() {
                grid.place_barrier(pos)?;
                continue;
            }
            match cell.mark() {
                Mark::None => {}
                Mark::Start => grid.place_start(pos)?,
                Mark::End => grid.place_end(pos)?,
                mark => {
                    grid.set_search_mark(pos, mark)?;
                }
            }
        }
        if let Some((rebuilt, _)) = grid
            .cells
            .iter()
            .zip(&repr.cells)
            .find(|(rebuilt, stored)| rebuilt != stored)
        {
            return Err(GridError::InconsistentCell(rebuilt.pos()));
        }
        if (grid.start, grid.end) != (repr.start, repr.end) {
            return Err(GridError::EndpointMismatch);
        }
        Ok(grid)
    }
}

impl Grid {
    /// Allocate a `dimension × dimension` grid of empty cells.
    pub fn build(dimension: i32) -> Result<Self, GridError> {
        if dimension <= 0 {
            return Err(GridError::InvalidDimension(dimension));
        }
        let cells = (0..dimension)
            .flat_map(|row| (0..dimension).map(move |col| Cell::new(Pos::new(row, col))))
            .collect();
        Ok(Self {
            dimension,
            cells,
            start: None,
            end: None,
        })
    }

    /// Parse an ASCII layout, one row per line, using [`Role::glyph`]
    /// characters. Blank lines and surrounding whitespace are ignored.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let dimension = rows.len() as i32;
        let mut grid = Self::build(dimension)?;
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count() as i32;
            if len != dimension {
                return Err(GridError::NotSquare {
                    rows: dimension,
                    row: row as i32,
                    len,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row as i32, col as i32);
                let role = Role::from_glyph(ch).ok_or(GridError::InvalidChar { ch, pos })?;
                match role {
                    Role::Empty => {}
                    Role::Barrier => grid.place_barrier(pos)?,
                    Role::Start => grid.place_start(pos)?,
                    Role::End => grid.place_end(pos)?,
                    Role::Frontier => grid.set_search_mark(pos, Mark::Frontier).map(drop)?,
                    Role::Visited => grid.set_search_mark(pos, Mark::Visited).map(drop)?,
                    Role::Path => grid.set_search_mark(pos, Mark::Path).map(drop)?,
                }
            }
        }
        Ok(grid)
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn dimension(&self) -> i32 {
        self.dimension
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid holds at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `pos` lies inside `[0, dimension)²`.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < self.dimension && pos.col < self.dimension
    }

    /// Row-major index of `pos`, or `None` if outside the grid.
    #[inline]
    pub fn index(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.row * self.dimension + pos.col) as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn pos_of(&self, idx: usize) -> Pos {
        let d = self.dimension as usize;
        Pos::new((idx / d) as i32, (idx % d) as i32)
    }

    fn checked_index(&self, pos: Pos) -> Result<usize, GridError> {
        self.index(pos).ok_or(GridError::OutOfBounds {
            pos,
            dimension: self.dimension,
        })
    }

    /// The cell at `(row, col)`.
    pub fn cell_at(&self, row: i32, col: i32) -> Result<&Cell, GridError> {
        self.cell(Pos::new(row, col))
    }

    /// The cell at `pos`.
    pub fn cell(&self, pos: Pos) -> Result<&Cell, GridError> {
        let i = self.checked_index(pos)?;
        Ok(&self.cells[i])
    }

    /// Role of the cell at `pos`.
    pub fn role(&self, pos: Pos) -> Result<Role, GridError> {
        self.cell(pos).map(Cell::role)
    }

    /// Append the in-bounds, non-barrier cardinal neighbours of `pos` to
    /// `buf`, in down, up, right, left order.
    pub fn neighbors_of(&self, pos: Pos, buf: &mut Vec<Pos>) {
        for n in pos.neighbors_4() {
            if let Some(i) = self.index(n) {
                if !self.cells[i].is_barrier() {
                    buf.push(n);
                }
            }
        }
    }

    /// Whether `pos` is inside the grid and not a barrier.
    pub fn is_passable(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|i| !self.cells[i].is_barrier())
    }

    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Release whatever endpoint role `pos` currently holds.
    fn release(&mut self, pos: Pos) {
        if self.start == Some(pos) {
            self.start = None;
        }
        if self.end == Some(pos) {
            self.end = None;
        }
    }

    /// Make `pos` the single start cell. The previous start becomes empty.
    pub fn place_start(&mut self, pos: Pos) -> Result<(), GridError> {
        let i = self.checked_index(pos)?;
        if let Some(old) = self.start.and_then(|p| self.index(p)) {
            self.cells[old].clear();
        }
        self.release(pos);
        self.cells[i].set_mark(Mark::Start);
        self.start = Some(pos);
        Ok(())
    }

    /// Make `pos` the single end cell. The previous end becomes empty.
    pub fn place_end(&mut self, pos: Pos) -> Result<(), GridError> {
        let i = self.checked_index(pos)?;
        if let Some(old) = self.end.and_then(|p| self.index(p)) {
            self.cells[old].clear();
        }
        self.release(pos);
        self.cells[i].set_mark(Mark::End);
        self.end = Some(pos);
        Ok(())
    }

    /// Make `pos` impassable, dropping any endpoint role it held.
    pub fn place_barrier(&mut self, pos: Pos) -> Result<(), GridError> {
        let i = self.checked_index(pos)?;
        self.release(pos);
        self.cells[i].set_barrier();
        Ok(())
    }

    /// Return `pos` to an empty, passable cell.
    pub fn erase(&mut self, pos: Pos) -> Result<(), GridError> {
        let i = self.checked_index(pos)?;
        self.release(pos);
        self.cells[i].clear();
        Ok(())
    }

    /// Record a search mark (`Frontier`, `Visited` or `Path`) on `pos`.
    ///
    /// Barriers and endpoints are left untouched; the return value tells
    /// whether the cell changed.
    pub fn set_search_mark(&mut self, pos: Pos, mark: Mark) -> Result<bool, GridError> {
        debug_assert!(mark.is_search(), "{mark:?} is not a search mark");
        let i = self.checked_index(pos)?;
        let cell = &mut self.cells[i];
        if cell.is_barrier() || matches!(cell.mark(), Mark::Start | Mark::End) {
            return Ok(false);
        }
        if cell.mark() == mark {
            return Ok(false);
        }
        cell.set_mark(mark);
        Ok(true)
    }

    /// Remove every `Frontier`/`Visited`/`Path` mark, keeping barriers and
    /// endpoints, so the grid can be searched again.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.mark().is_search()) {
            cell.clear();
        }
    }

    /// Rebuild every cell as empty, keeping the dimension.
    pub fn reset(&mut self) {
        log::debug!("resetting {0}x{0} grid", self.dimension);
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
        self.start = None;
        self.end = None;
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Row-major iterator over `(Pos, Role)` pairs.
    pub fn roles(&self) -> impl Iterator<Item = (Pos, Role)> + '_ {
        self.cells.iter().map(|c| (c.pos(), c.role()))
    }

    /// Row-major copy of every cell's role.
    pub fn snapshot(&self) -> Vec<Role> {
        self.cells.iter().map(Cell::role).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.dimension as usize) {
            for cell in row {
                write!(f, "{}", cell.role().glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_sets_identity() {
        let g = Grid::build(4).unwrap();
        assert_eq!(g.dimension(), 4);
        assert_eq!(g.len(), 16);
        for row in 0..4 {
            for col in 0..4 {
                let c = g.cell_at(row, col).unwrap();
                assert_eq!(c.pos(), Pos::new(row, col));
                assert_eq!(c.role(), Role::Empty);
            }
        }
    }

    #[test]
    fn build_rejects_non_positive() {
        assert_eq!(Grid::build(0), Err(GridError::InvalidDimension(0)));
        assert_eq!(Grid::build(-3), Err(GridError::InvalidDimension(-3)));
    }

    #[test]
    fn cell_at_out_of_bounds() {
        let g = Grid::build(3).unwrap();
        assert_eq!(
            g.cell_at(3, 0).unwrap_err(),
            GridError::OutOfBounds {
                pos: Pos::new(3, 0),
                dimension: 3
            }
        );
        assert!(g.cell_at(0, -1).is_err());
        assert!(g.cell_at(2, 2).is_ok());
    }

    #[test]
    fn index_round_trip() {
        let g = Grid::build(5).unwrap();
        for i in 0..g.len() {
            assert_eq!(g.index(g.pos_of(i)), Some(i));
        }
        assert_eq!(g.index(Pos::new(5, 0)), None);
    }

    #[test]
    fn neighbors_order_and_bounds() {
        let g = Grid::build(3).unwrap();
        let mut buf = Vec::new();
        g.neighbors_of(Pos::new(1, 1), &mut buf);
        assert_eq!(
            buf,
            vec![
                Pos::new(2, 1),
                Pos::new(0, 1),
                Pos::new(1, 2),
                Pos::new(1, 0)
            ]
        );

        buf.clear();
        g.neighbors_of(Pos::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Pos::new(1, 0), Pos::new(0, 1)]);
    }

    #[test]
    fn neighbors_skip_barriers() {
        let mut g = Grid::build(3).unwrap();
        g.place_barrier(Pos::new(2, 1)).unwrap();
        g.place_barrier(Pos::new(1, 0)).unwrap();
        let mut buf = Vec::new();
        g.neighbors_of(Pos::new(1, 1), &mut buf);
        assert_eq!(buf, vec![Pos::new(0, 1), Pos::new(1, 2)]);

        // Barrier removal is seen on the next query.
        g.erase(Pos::new(2, 1)).unwrap();
        buf.clear();
        g.neighbors_of(Pos::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn single_start_and_end() {
        let mut g = Grid::build(3).unwrap();
        g.place_start(Pos::new(0, 0)).unwrap();
        g.place_start(Pos::new(1, 1)).unwrap();
        assert_eq!(g.start(), Some(Pos::new(1, 1)));
        assert_eq!(g.role(Pos::new(0, 0)).unwrap(), Role::Empty);
        let starts = g.roles().filter(|(_, r)| *r == Role::Start).count();
        assert_eq!(starts, 1);

        // Placing the end on the start steals the role.
        g.place_end(Pos::new(1, 1)).unwrap();
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), Some(Pos::new(1, 1)));
    }

    #[test]
    fn barrier_releases_endpoint() {
        let mut g = Grid::build(3).unwrap();
        g.place_end(Pos::new(2, 2)).unwrap();
        g.place_barrier(Pos::new(2, 2)).unwrap();
        assert_eq!(g.end(), None);
        assert_eq!(g.role(Pos::new(2, 2)).unwrap(), Role::Barrier);
    }

    #[test]
    fn search_marks_skip_barriers_and_endpoints() {
        let mut g = Grid::build(3).unwrap();
        g.place_start(Pos::new(0, 0)).unwrap();
        g.place_barrier(Pos::new(0, 1)).unwrap();
        assert!(!g.set_search_mark(Pos::new(0, 0), Mark::Visited).unwrap());
        assert!(!g.set_search_mark(Pos::new(0, 1), Mark::Frontier).unwrap());
        assert!(g.set_search_mark(Pos::new(1, 1), Mark::Frontier).unwrap());
        assert!(!g.set_search_mark(Pos::new(1, 1), Mark::Frontier).unwrap());
        assert_eq!(g.role(Pos::new(0, 1)).unwrap(), Role::Barrier);
        assert!(g.set_search_mark(Pos::new(9, 9), Mark::Path).is_err());
    }

    #[test]
    fn clear_search_marks_keeps_layout() {
        let mut g = Grid::parse(
            "
            Sox
            #*.
            ..E
            ",
        )
        .unwrap();
        g.clear_search_marks();
        assert_eq!(g.to_string(), "S..\n#..\n..E\n");
    }

    #[test]
    fn reset_clears_everything() {
        let mut g = Grid::parse("S#\n.E").unwrap();
        g.reset();
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
        assert!(g.snapshot().iter().all(|r| *r == Role::Empty));
    }

    #[test]
    fn parse_and_display() {
        let layout = "S.#\n.#.\n..E\n";
        let g = Grid::parse(layout).unwrap();
        assert_eq!(g.start(), Some(Pos::new(0, 0)));
        assert_eq!(g.end(), Some(Pos::new(2, 2)));
        assert!(g.cell_at(1, 1).unwrap().is_barrier());
        assert_eq!(g.to_string(), layout);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Grid::parse("...\n..\n...").unwrap_err(),
            GridError::NotSquare {
                rows: 3,
                row: 1,
                len: 2
            }
        );
        assert_eq!(
            Grid::parse("..\n.?").unwrap_err(),
            GridError::InvalidChar {
                ch: '?',
                pos: Pos::new(1, 1)
            }
        );
        assert_eq!(Grid::parse("\n  \n").unwrap_err(), GridError::InvalidDimension(0));
    }
}
