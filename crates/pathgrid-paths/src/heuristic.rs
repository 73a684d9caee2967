use pathgrid_core::Pos;

/// Manhattan (L1) distance between two cells.
///
/// Admissible for 4-directional unit-cost movement: it never exceeds the
/// true hop count, which is what keeps A* optimal.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
