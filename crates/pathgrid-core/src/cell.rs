//! The [`Cell`] type: one grid position with passability and a search mark.

use crate::geom::Pos;

/// Transient role layered on top of a passable cell.
///
/// Endpoints are placed by the editing layer; `Frontier`, `Visited` and
/// `Path` are written by the search engine during a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    #[default]
    None,
    Start,
    End,
    Frontier,
    Visited,
    Path,
}

impl Mark {
    /// Whether the mark was produced by a search run.
    #[inline]
    pub const fn is_search(self) -> bool {
        matches!(self, Mark::Frontier | Mark::Visited | Mark::Path)
    }
}

/// The observable role of a cell, as seen by renderers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    Frontier,
    Visited,
    Path,
}

impl Role {
    /// ASCII glyph used by [`Grid`](crate::Grid)'s text layout.
    pub const fn glyph(self) -> char {
        match self {
            Role::Empty => '.',
            Role::Barrier => '#',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Frontier => 'o',
            Role::Visited => 'x',
            Role::Path => '*',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Role> {
        Some(match ch {
            '.' => Role::Empty,
            '#' => Role::Barrier,
            'S' => Role::Start,
            'E' => Role::End,
            'o' => Role::Frontier,
            'x' => Role::Visited,
            '*' => Role::Path,
            _ => return None,
        })
    }
}

/// A single grid cell.
///
/// Passability and the visual mark are kept apart so that the search never
/// reads display state: a barrier never carries a mark, and a marked cell
/// is always passable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Pos,
    barrier: bool,
    mark: Mark,
}

impl Cell {
    /// An empty, passable cell at `pos`.
    #[inline]
    pub const fn new(pos: Pos) -> Self {
        Self {
            pos,
            barrier: false,
            mark: Mark::None,
        }
    }

    /// The cell's identity.
    #[inline]
    pub const fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub const fn is_barrier(&self) -> bool {
        self.barrier
    }

    #[inline]
    pub const fn mark(&self) -> Mark {
        self.mark
    }

    /// Combined view of passability and mark.
    pub const fn role(&self) -> Role {
        if self.barrier {
            return Role::Barrier;
        }
        match self.mark {
            Mark::None => Role::Empty,
            Mark::Start => Role::Start,
            Mark::End => Role::End,
            Mark::Frontier => Role::Frontier,
            Mark::Visited => Role::Visited,
            Mark::Path => Role::Path,
        }
    }

    pub(crate) fn set_barrier(&mut self) {
        self.barrier = true;
        self.mark = Mark::None;
    }

    pub(crate) fn set_mark(&mut self, mark: Mark) {
        self.barrier = false;
        self.mark = mark;
    }

    pub(crate) fn clear(&mut self) {
        self.barrier = false;
        self.mark = Mark::None;
    }
}
