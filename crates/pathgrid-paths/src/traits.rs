use pathgrid_core::{Grid, Pos};

/// Neighbour enumeration for graph searches over cells.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>);
}

impl Pather for Grid {
    #[inline]
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        self.neighbors_of(p, buf);
    }
}
