//! The [`Grid`] type: a rectangular arena of [`Cell`]s plus its endpoints.
//!
//! Unlike a shared-buffer view, a `Grid` owns its storage outright: cloning
//! (or calling [`Grid::snapshot`]) yields an independent copy. Searches and
//! replays mutate the grid they are handed in place, so callers that want
//! to keep a pristine layout take a snapshot first.
//!
//! The start and end cells are stored as positions on the grid rather than
//! as per-cell flags, which makes a duplicated endpoint unrepresentable.

use std::fmt;
use std::str::FromStr;

use crate::cell::{Cell, CellClass};
use crate::config::{END, GRID_COLS, GRID_ROWS, START};
use crate::error::{ConfigError, GridError};
use crate::geom::{Point, Range};

/// A rectangular grid of [`Cell`]s with optional start and end positions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
    start: Option<Point>,
    end: Option<Point>,
}

impl Default for Grid {
    /// The canonical 20×50 blank grid with the default endpoints.
    fn default() -> Self {
        let mut g = Self::new(GRID_COLS, GRID_ROWS);
        g.start = Some(START);
        g.end = Some(END);
        g
    }
}

impl Grid {
    /// Create a blank grid of the given dimensions with no endpoints.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
            width,
            height,
            start: None,
            end: None,
        }
    }

    /// Create a blank grid with the given start and end cells.
    pub fn with_endpoints(
        width: i32,
        height: i32,
        start: Point,
        end: Point,
    ) -> Result<Self, GridError> {
        let mut g = Self::new(width, height);
        g.move_start(start)?;
        g.move_end(end)?;
        Ok(g)
    }

    /// Independent copy of this grid, annotations included.
    #[inline]
    pub fn snapshot(&self) -> Grid {
        self.clone()
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Arena index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y as usize) * (self.width as usize) + (p.x as usize))
        } else {
            None
        }
    }

    /// Position of arena index `i`.
    #[inline]
    pub fn point(&self, i: usize) -> Point {
        let w = self.width.max(1) as usize;
        Point::new((i % w) as i32, (i / w) as i32)
    }

    /// Borrow the cell at `p`.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Mutably borrow the cell at `p`.
    #[inline]
    pub fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.idx(p).map(|i| &mut self.cells[i])
    }

    /// Copy of the cell at `p`, or `None` when out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.cell(p).copied()
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| !c.wall)
    }

    /// The start position, if placed.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The end position, if placed.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    #[inline]
    pub fn is_start(&self, p: Point) -> bool {
        self.start == Some(p)
    }

    #[inline]
    pub fn is_end(&self, p: Point) -> bool {
        self.end == Some(p)
    }

    /// Both endpoints, or the reason a search cannot run.
    pub fn endpoints(&self) -> Result<(Point, Point), ConfigError> {
        let start = self.start.ok_or(ConfigError::MissingStart)?;
        let end = self.end.ok_or(ConfigError::MissingEnd)?;
        Ok((start, end))
    }

    /// Flip the wall flag at `p` and return the new state.
    pub fn toggle_wall(&mut self, p: Point) -> Result<bool, GridError> {
        let wall = !self.at(p).ok_or(GridError::OutOfBounds(p))?.wall;
        self.set_wall(p, wall)?;
        Ok(wall)
    }

    /// Set the wall flag at `p`. Rejected on the start and end cells.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> Result<(), GridError> {
        if self.is_start(p) || self.is_end(p) {
            return Err(GridError::Endpoint(p));
        }
        let cell = self.cell_mut(p).ok_or(GridError::OutOfBounds(p))?;
        cell.wall = wall;
        Ok(())
    }

    /// Set the traversal cost of the floor cell at `p`.
    pub fn set_weight(&mut self, p: Point, weight: i32) -> Result<(), GridError> {
        let cell = self.cell_mut(p).ok_or(GridError::OutOfBounds(p))?;
        if weight < 1 || cell.wall {
            return Err(GridError::InvalidWeight { pos: p, weight });
        }
        cell.weight = weight;
        Ok(())
    }

    /// Relocate the start cell to `p`, clearing any wall there.
    pub fn move_start(&mut self, p: Point) -> Result<(), GridError> {
        if self.is_end(p) {
            return Err(GridError::Occupied(p));
        }
        let cell = self.cell_mut(p).ok_or(GridError::OutOfBounds(p))?;
        cell.wall = false;
        self.start = Some(p);
        Ok(())
    }

    /// Relocate the end cell to `p`, clearing any wall there.
    pub fn move_end(&mut self, p: Point) -> Result<(), GridError> {
        if self.is_start(p) {
            return Err(GridError::Occupied(p));
        }
        let cell = self.cell_mut(p).ok_or(GridError::OutOfBounds(p))?;
        cell.wall = false;
        self.end = Some(p);
        Ok(())
    }

    /// Clear search annotations and replay marks on every cell.
    ///
    /// Walls, weights and endpoints are left untouched.
    pub fn reset_annotations(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset_annotations();
        }
    }

    /// Clear only the replay marks (visited / path) on every cell.
    pub fn clear_marks(&mut self) {
        for c in self.cells.iter_mut() {
            c.marks = Default::default();
        }
    }

    /// Rendering class of the cell at `p`.
    pub fn class_at(&self, p: Point) -> CellClass {
        if self.is_start(p) {
            return CellClass::Start;
        }
        if self.is_end(p) {
            return CellClass::End;
        }
        match self.cell(p) {
            Some(c) if c.wall => CellClass::Wall,
            Some(c) if c.marks.path => CellClass::Path,
            Some(c) if c.marks.visited => CellClass::Visited,
            _ => CellClass::Empty,
        }
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, &Cell) -> bool) -> usize {
        self.iter().filter(|(p, c)| f(*p, *c)).count()
    }

    /// Row-major iterator over `(Point, &Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter())
    }

    /// Row-major iterator over `(Point, &mut Cell)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Point, &mut Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter_mut())
    }

    /// Parse an ASCII layout. See the [`FromStr`] impl for the alphabet.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        s.parse()
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse an ASCII layout, one line per row.
    ///
    /// `.` floor, `#` wall, `S` start, `E` end, `1`-`9` weighted floor,
    /// `o` visited, `*` path. Leading and trailing whitespace on each line
    /// is ignored, as are blank lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::InconsistentWidth {
                    line: y,
                    expected: width,
                    found,
                });
            }
        }

        let mut grid = Grid::new(width as i32, lines.len() as i32);
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => grid.set_wall(pos, true)?,
                    'S' | 'E' => {
                        let taken = if ch == 'S' { grid.start } else { grid.end };
                        if taken.is_some() {
                            return Err(GridError::DuplicateEndpoint { ch, pos });
                        }
                        if ch == 'S' {
                            grid.move_start(pos)?;
                        } else {
                            grid.move_end(pos)?;
                        }
                    }
                    'o' | '*' => {
                        if let Some(c) = grid.cell_mut(pos) {
                            c.marks.visited = true;
                            c.marks.path = ch == '*';
                        }
                    }
                    '1'..='9' => {
                        let weight = ch.to_digit(10).map_or(1, |d| d as i32);
                        grid.set_weight(pos, weight)?;
                    }
                    _ => return Err(GridError::InvalidChar { ch, pos }),
                }
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                let class = self.class_at(p);
                let ch = match (class, self.cell(p)) {
                    (CellClass::Empty, Some(c)) if c.weight > 9 => '+',
                    (CellClass::Empty, Some(c)) if c.weight > 1 => {
                        char::from_digit(c.weight as u32, 10).unwrap_or('+')
                    }
                    _ => class.glyph(),
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::parse("S.#\n.3E").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
