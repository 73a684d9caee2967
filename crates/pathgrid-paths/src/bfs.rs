use std::collections::{HashMap, VecDeque};

use pathgrid_core::Pos;

use crate::traits::Pather;

/// Breadth-first distance map from `source`.
///
/// Each step has cost 1. Expansion stops when the distance exceeds
/// `max_dist`. The map holds every reached cell, `source` included at 0.
pub fn hop_distances<P: Pather>(pather: &P, source: Pos, max_dist: i32) -> HashMap<Pos, i32> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(source, 0);
    queue.push_back(source);

    let mut nbuf = Vec::with_capacity(4);
    while let Some(cp) = queue.pop_front() {
        let current_dist = dist[&cp];
        let nd = current_dist + 1;
        if nd > max_dist {
            continue;
        }
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);
        for &np in nbuf.iter() {
            if dist.contains_key(&np) {
                continue;
            }
            dist.insert(np, nd);
            queue.push_back(np);
        }
    }
    dist
}

/// True shortest hop count from `from` to `to`, or `None` when `to` cannot
/// be reached.
pub fn hop_distance<P: Pather>(pather: &P, from: Pos, to: Pos) -> Option<i32> {
    let mut dist = HashMap::from([(from, 0)]);
    let mut queue = VecDeque::from([from]);
    let mut nbuf = Vec::with_capacity(4);

    while let Some(cp) = queue.pop_front() {
        let current_dist = dist[&cp];
        if cp == to {
            return Some(current_dist);
        }
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);
        for &np in nbuf.iter() {
            if dist.contains_key(&np) {
                continue;
            }
            dist.insert(np, current_dist + 1);
            queue.push_back(np);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_core::Grid;

    #[test]
    fn distances_on_open_grid() {
        let grid = Grid::build(4).unwrap();
        let map = hop_distances(&grid, Pos::new(0, 0), i32::MAX);
        assert_eq!(map.len(), 16);
        assert_eq!(map[&Pos::new(3, 3)], 6);
        assert_eq!(map[&Pos::new(0, 0)], 0);
    }

    #[test]
    fn max_dist_limits_expansion() {
        let grid = Grid::build(5).unwrap();
        let map = hop_distances(&grid, Pos::new(2, 2), 1);
        assert_eq!(map.len(), 5);
        assert!(map.values().all(|&d| d <= 1));
    }

    #[test]
    fn distance_around_wall() {
        let grid = Grid::parse(
            ".#.
             .#.
             ...",
        )
        .unwrap();
        assert_eq!(hop_distance(&grid, Pos::new(0, 0), Pos::new(0, 2)), Some(6));
        assert_eq!(hop_distance(&grid, Pos::new(0, 0), Pos::new(0, 0)), Some(0));
    }

    #[test]
    fn unreachable_is_none() {
        let grid = Grid::parse(
            ".#.
             ##.
             ...",
        )
        .unwrap();
        assert_eq!(hop_distance(&grid, Pos::new(0, 0), Pos::new(2, 2)), None);
        assert_eq!(hop_distances(&grid, Pos::new(0, 0), i32::MAX).len(), 1);
    }
}
