//! **pathviz-core**: the grid model shared by the *pathviz* crates.
//!
//! This crate provides geometry primitives, the [`Cell`] arena element with
//! its layout, search and replay annotations, the [`Grid`] that owns every
//! cell, and the error types reported when a grid edit or a search request
//! is invalid.

pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellClass, Marks, SearchState, UNREACHABLE};
pub use config::{END, GRID_COLS, GRID_ROWS, START};
pub use error::{ConfigError, GridError};
pub use geom::{Point, Range};
pub use grid::Grid;
