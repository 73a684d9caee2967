//! A* shortest-path search over [`pathgrid_core::Grid`].
//!
//! The engine finds a minimum-hop path between two cells of a square grid
//! (4-directional movement, unit cost) and writes its progress into the
//! grid's search marks so a front-end can draw it:
//!
//! - **A\*** with a Manhattan heuristic ([`Search`], [`astar`])
//! - a FIFO-on-ties priority queue ([`Frontier`])
//! - cooperative checkpoints after every expansion ([`Checkpoint`])
//! - a **BFS** hop-distance oracle ([`hop_distance`], [`hop_distances`])
//!
//! # Example
//!
//! ```
//! use pathgrid_core::{Grid, Pos};
//! use pathgrid_paths::{astar, Outcome, Unobserved};
//!
//! let mut grid = Grid::parse(
//!     "S.#.E
//!      ..#..
//!      ..#..
//!      ..#..
//!      .....",
//! )
//! .unwrap();
//! let outcome = astar(&mut grid, Pos::new(0, 0), Pos::new(0, 4), Unobserved).unwrap();
//! match outcome {
//!     Outcome::Succeeded(path) => assert_eq!(path.len(), 12),
//!     other => panic!("unexpected outcome {other:?}"),
//! }
//! ```

mod astar;
mod bfs;
mod checkpoint;
mod error;
mod frontier;
mod heuristic;
mod traits;

pub use astar::{Outcome, Path, Phase, Search, Step, UNREACHABLE, astar};
pub use bfs::{hop_distance, hop_distances};
pub use checkpoint::{Checkpoint, Control, Progress, Unobserved};
pub use error::{EndpointProblem, FrontierError, SearchError};
pub use frontier::{Entry, Frontier};
pub use heuristic::manhattan;
pub use traits::Pather;
