//! Canonical grid dimensions and endpoint placement.

use crate::geom::Point;

/// Default number of rows.
pub const GRID_ROWS: i32 = 20;

/// Default number of columns.
pub const GRID_COLS: i32 = 50;

/// Default start cell: row 10, column 5.
pub const START: Point = Point::new(5, 10);

/// Default end cell: row 10, column 45.
pub const END: Point = Point::new(45, 10);
