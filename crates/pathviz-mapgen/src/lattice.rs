use pathviz_core::{Grid, Point, Range};

/// The odd-coordinate cells of a grid, addressed in lattice units.
///
/// Lattice cell `(cx, cy)` sits at grid position `(2cx + 1, 2cy + 1)`. The
/// grid cell between two adjacent lattice cells is the passage joining them.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Lattice {
    pub(crate) cols: i32,
    pub(crate) rows: i32,
}

impl Lattice {
    pub(crate) fn of(grid: &Grid) -> Self {
        Self {
            cols: ((grid.width() - 1) / 2).max(0),
            rows: ((grid.height() - 1) / 2).max(0),
        }
    }

    pub(crate) fn bounds(self) -> Range {
        Range::new(0, 0, self.cols, self.rows)
    }

    pub(crate) fn is_empty(self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    pub(crate) fn contains(self, c: Point) -> bool {
        self.bounds().contains(c)
    }

    pub(crate) fn idx(self, c: Point) -> usize {
        (c.y * self.cols + c.x) as usize
    }

    pub(crate) fn to_grid(c: Point) -> Point {
        Point::new(2 * c.x + 1, 2 * c.y + 1)
    }

    /// The grid passage between adjacent lattice cells `a` and `b`.
    pub(crate) fn between(a: Point, b: Point) -> Point {
        Point::new(a.x + b.x + 1, a.y + b.y + 1)
    }

    /// Grid position of the lattice cell closest to grid position `p`.
    pub(crate) fn nearest(self, p: Point) -> Point {
        let snap = |v: i32, n: i32| {
            let v = if v % 2 == 0 { v - 1 } else { v };
            v.clamp(1, 2 * n - 1)
        };
        Point::new(snap(p.x, self.cols), snap(p.y, self.rows))
    }
}

/// Set the wall flag of every cell. Only for grids without endpoints.
pub(crate) fn fill(grid: &mut Grid, wall: bool) {
    for (_, c) in grid.iter_mut() {
        c.wall = wall;
    }
}

pub(crate) fn open(grid: &mut Grid, p: Point) {
    if let Some(c) = grid.cell_mut(p) {
        c.wall = false;
    }
}

pub(crate) fn close(grid: &mut Grid, p: Point) {
    if let Some(c) = grid.cell_mut(p) {
        c.wall = true;
    }
}

/// Open an L-shaped corridor: along `from`'s row, then along `to`'s column.
pub(crate) fn carve_corridor(grid: &mut Grid, from: Point, to: Point) {
    let step_x = (to.x - from.x).signum();
    let mut p = from;
    open(grid, p);
    while p.x != to.x {
        p = p.shift(step_x, 0);
        open(grid, p);
    }
    let step_y = (to.y - from.y).signum();
    while p.y != to.y {
        p = p.shift(0, step_y);
        open(grid, p);
    }
}
