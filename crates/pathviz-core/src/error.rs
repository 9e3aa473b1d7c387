//! Errors raised by grid edits, grid parsing and search requests.

use std::fmt;

use crate::geom::Point;

/// A search was requested on a grid that cannot support it.
///
/// Reported before any cell is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    MissingStart,
    MissingEnd,
    /// An endpoint lies outside the grid.
    OutOfBounds(Point),
    /// An endpoint lies on a wall.
    Blocked(Point),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => f.write_str("grid has no start cell"),
            Self::MissingEnd => f.write_str("grid has no end cell"),
            Self::OutOfBounds(p) => write!(f, "endpoint {p} is outside the grid"),
            Self::Blocked(p) => write!(f, "endpoint {p} is a wall"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// An edit or parse of a [`Grid`](crate::Grid) was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds(Point),
    /// Walls and weights cannot be placed on the start or end cell.
    Endpoint(Point),
    /// The target is already the other endpoint.
    Occupied(Point),
    InvalidWeight {
        pos: Point,
        weight: i32,
    },
    /// Layout lines have different lengths.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    InvalidChar {
        ch: char,
        pos: Point,
    },
    /// More than one `S` or `E` in a layout.
    DuplicateEndpoint {
        ch: char,
        pos: Point,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "{p} is outside the grid"),
            Self::Endpoint(p) => write!(f, "{p} is the start or end cell"),
            Self::Occupied(p) => write!(f, "{p} is already taken by the other endpoint"),
            Self::InvalidWeight { pos, weight } => {
                write!(f, "invalid weight {weight} at {pos}: must be at least 1 on a floor cell")
            }
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "grid layout: line {line} has {found} cells, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateEndpoint { ch, pos } => {
                write!(f, "grid layout has a second \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
