use std::fmt;
use std::str::FromStr;

use pathviz_core::{ConfigError, Grid, Point};

use crate::{astar, bfs, dfs, dijkstra};

/// Output of one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Cells in the order they were finalized. No repeats, no walls.
    pub visited_order: Vec<Point>,
    /// Start to end inclusive, or empty when the end is unreachable.
    pub path: Vec<Point>,
}

impl SearchResult {
    /// Whether a path to the end was found.
    #[inline]
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Total cost of the path on `grid`: the sum of entered cells' weights.
    pub fn cost(&self, grid: &Grid) -> Option<i32> {
        if self.path.is_empty() {
            return None;
        }
        self.path[1..]
            .iter()
            .map(|&p| grid.cell(p).map(|c| c.weight))
            .sum()
    }
}

/// The available search algorithms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [Self::Bfs, Self::Dfs, Self::Dijkstra, Self::AStar];

    /// Short lowercase key, as accepted by [`FromStr`].
    pub const fn key(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
        }
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
        }
    }

    /// Whether the returned path is always a cheapest one.
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Self::Dfs)
    }

    /// Run in place on `grid` between explicit endpoints.
    pub fn run(self, grid: &mut Grid, start: Point, end: Point) -> Result<SearchResult, ConfigError> {
        let result = match self {
            Self::Bfs => bfs(grid, start, end),
            Self::Dfs => dfs(grid, start, end),
            Self::Dijkstra => dijkstra(grid, start, end),
            Self::AStar => astar(grid, start, end),
        }?;
        log::debug!(
            "{}: {} -> {}: visited {} cells, path {} cells",
            self.label(),
            start,
            end,
            result.visited_order.len(),
            result.path.len()
        );
        Ok(result)
    }

    /// Run in place on `grid` between its own start and end cells.
    pub fn run_grid(self, grid: &mut Grid) -> Result<SearchResult, ConfigError> {
        let (start, end) = grid.endpoints()?;
        self.run(grid, start, end)
    }

    /// Run on a snapshot of `grid`, leaving the original untouched.
    ///
    /// Returns the annotated snapshot alongside the result.
    pub fn search(self, grid: &Grid) -> Result<(Grid, SearchResult), ConfigError> {
        let (start, end) = grid.endpoints()?;
        let mut snap = grid.snapshot();
        let result = self.run(&mut snap, start, end)?;
        Ok((snap, result))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An algorithm name that [`Algorithm::from_str`] does not recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected bfs, dfs, dijkstra or astar)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Validate endpoints and reset per-run annotations.
///
/// Nothing is written to `grid` unless both endpoints are usable.
pub(crate) fn prepare(grid: &mut Grid, start: Point, end: Point) -> Result<(), ConfigError> {
    for p in [start, end] {
        match grid.cell(p) {
            None => return Err(ConfigError::OutOfBounds(p)),
            Some(c) if c.wall => return Err(ConfigError::Blocked(p)),
            Some(_) => {}
        }
    }
    grid.reset_annotations();
    Ok(())
}

/// Follow `previous` links back from `end`.
///
/// Returns the start-to-end path, or an empty vector when the walk does not
/// arrive at `start`.
pub(crate) fn trace_path(grid: &Grid, start: Point, end: Point) -> Vec<Point> {
    let mut path = vec![end];
    let mut cur = end;
    // A walk longer than the grid means the links form a cycle.
    let limit = grid.bounds().len();
    while let Some(prev) = grid.cell(cur).and_then(|c| c.search.previous) {
        if path.len() > limit {
            return Vec::new();
        }
        path.push(prev);
        cur = prev;
    }
    if cur != start {
        return Vec::new();
    }
    path.reverse();
    path
}
