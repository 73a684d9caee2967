//! **pathgrid-core**: the square cell grid searched by `pathgrid-paths`.
//!
//! This crate provides the types shared by the search engine and its
//! front-ends: cell positions, cells with separate passability and search
//! marks, the grid itself with its editing operations, and configuration.

pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, Mark, Role};
pub use config::GridConfig;
pub use error::GridError;
pub use geom::Pos;
pub use grid::Grid;
