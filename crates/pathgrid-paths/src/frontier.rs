//! The open set: a min-priority queue with FIFO tie-breaking.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use pathgrid_core::Pos;

use crate::error::FrontierError;

/// One queued cell. Ordered so that `BinaryHeap` (a max-heap) pops the
/// smallest `priority` first and, among equal priorities, the smallest
/// `order`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub priority: i32,
    pub order: u64,
    pub pos: Pos,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.order.cmp(&self.order))
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of cells keyed by `(priority, insertion order)`.
///
/// Each cell has at most one *live* entry. Pushing a cell that is already
/// queued replaces its entry; the superseded one stays in the heap and is
/// skipped when it surfaces.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    live: HashMap<Pos, u64>,
    counter: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `pos` with `priority`, stamping it with the next insertion
    /// order. Returns that order.
    pub fn push(&mut self, pos: Pos, priority: i32) -> u64 {
        let order = self.counter;
        self.counter += 1;
        self.live.insert(pos, order);
        self.heap.push(Entry {
            priority,
            order,
            pos,
        });
        order
    }

    /// Remove and return the live entry with the smallest priority, oldest
    /// first on ties.
    pub fn pop_min(&mut self) -> Result<Entry, FrontierError> {
        while let Some(entry) = self.heap.pop() {
            if self.live.get(&entry.pos) == Some(&entry.order) {
                self.live.remove(&entry.pos);
                return Ok(entry);
            }
        }
        Err(FrontierError::Empty)
    }

    /// Whether `pos` has a live entry.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.live.contains_key(&pos)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }
}
