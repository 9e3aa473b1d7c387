//! Preset layout generation.
//!
//! The maze generators work on the odd-coordinate lattice: lattice cells
//! are always floor, even-even cells are always wall, and the remaining
//! cells are the passages a maze algorithm opens or closes. The endpoints
//! are then tunnelled to their nearest lattice cell.

use pathviz_core::{END, GRID_COLS, GRID_ROWS, Grid, GridError, Point, Range, START};
use pathviz_paths::Algorithm;
use rand::Rng;

use crate::lattice::{Lattice, carve_corridor, close, fill, open};
use crate::preset::Preset;

/// Wall probability used by [`Preset::Random`].
pub const DEFAULT_DENSITY: f64 = 0.3;

/// Re-rolls allowed for a random layout before falling back to a corridor.
pub const MAX_ATTEMPTS: usize = 32;

/// Layout generator.
pub struct MapGen<R: Rng> {
    pub rng: R,
    /// Grid dimensions as `(cols, rows)`.
    pub size: Point,
    pub start: Point,
    pub end: Point,
}

impl<R: Rng> MapGen<R> {
    /// Generator for the canonical 20×50 grid and endpoints.
    pub fn new(rng: R) -> Self {
        Self::with_layout(Point::new(GRID_COLS, GRID_ROWS), START, END, rng)
    }

    pub fn with_layout(size: Point, start: Point, end: Point, rng: R) -> Self {
        Self {
            rng,
            size,
            start,
            end,
        }
    }

    /// Build a grid for `preset`.
    ///
    /// Fails only when the configured endpoints do not fit the size or
    /// coincide.
    pub fn generate(&mut self, preset: Preset) -> Result<Grid, GridError> {
        let grid = match preset {
            Preset::Empty => self.empty(),
            Preset::SmallMaze => self.small_maze(),
            Preset::RecursiveDivision => self.recursive_division(),
            Preset::Prims => self.prims(),
            Preset::Ellers => self.ellers(),
            Preset::Random => self.random(DEFAULT_DENSITY),
        }?;
        log::debug!(
            "generated {} layout {}: {} walls",
            preset,
            grid.bounds(),
            grid.count_fn(|_, c| c.wall)
        );
        Ok(grid)
    }

    pub fn empty(&mut self) -> Result<Grid, GridError> {
        Grid::with_endpoints(self.size.x, self.size.y, self.start, self.end)
    }

    /// Walls on every cell whose row and column are both even.
    pub fn small_maze(&mut self) -> Result<Grid, GridError> {
        let mut grid = self.blank();
        for p in grid.bounds() {
            if p.x % 2 == 0 && p.y % 2 == 0 {
                close(&mut grid, p);
            }
        }
        self.place(grid, false)
    }

    /// Perfect maze by recursive division of the lattice.
    ///
    /// Starts with every passage open and repeatedly splits a chamber with
    /// a wall that has a single gap, cutting across the longer side.
    pub fn recursive_division(&mut self) -> Result<Grid, GridError> {
        let mut grid = self.blank();
        let lat = Lattice::of(&grid);
        fill(&mut grid, true);
        if lat.is_empty() {
            return self.place(grid, false);
        }
        for c in lat.bounds() {
            open(&mut grid, Lattice::to_grid(c));
            for n in [c.shift(1, 0), c.shift(0, 1)] {
                if lat.contains(n) {
                    open(&mut grid, Lattice::between(c, n));
                }
            }
        }

        let mut chambers = vec![lat.bounds()];
        while let Some(ch) = chambers.pop() {
            let (w, h) = (ch.width(), ch.height());
            if w < 2 && h < 2 {
                continue;
            }
            let horizontal = match h.cmp(&w) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Less => false,
                std::cmp::Ordering::Equal => self.rng.random_bool(0.5),
            };
            if horizontal {
                // Wall below lattice row `cut`, open at column `gap`.
                let cut = self.rng.random_range(ch.min.y..ch.max.y - 1);
                let gap = self.rng.random_range(ch.min.x..ch.max.x);
                for cx in ch.min.x..ch.max.x {
                    if cx != gap {
                        close(&mut grid, Point::new(2 * cx + 1, 2 * cut + 2));
                    }
                }
                chambers.push(Range::new(ch.min.x, ch.min.y, ch.max.x, cut + 1));
                chambers.push(Range::new(ch.min.x, cut + 1, ch.max.x, ch.max.y));
            } else {
                let cut = self.rng.random_range(ch.min.x..ch.max.x - 1);
                let gap = self.rng.random_range(ch.min.y..ch.max.y);
                for cy in ch.min.y..ch.max.y {
                    if cy != gap {
                        close(&mut grid, Point::new(2 * cut + 2, 2 * cy + 1));
                    }
                }
                chambers.push(Range::new(ch.min.x, ch.min.y, cut + 1, ch.max.y));
                chambers.push(Range::new(cut + 1, ch.min.y, ch.max.x, ch.max.y));
            }
        }
        self.place(grid, true)
    }

    /// Perfect maze by randomized Prim's algorithm on the lattice.
    pub fn prims(&mut self) -> Result<Grid, GridError> {
        let mut grid = self.blank();
        let lat = Lattice::of(&grid);
        fill(&mut grid, true);
        if lat.is_empty() {
            return self.place(grid, false);
        }

        let mut in_maze = vec![false; lat.bounds().len()];
        let first = Point::new(
            self.rng.random_range(0..lat.cols),
            self.rng.random_range(0..lat.rows),
        );
        in_maze[lat.idx(first)] = true;
        open(&mut grid, Lattice::to_grid(first));
        let mut walls: Vec<(Point, Point)> = first
            .neighbors_4()
            .into_iter()
            .filter(|&n| lat.contains(n))
            .map(|n| (first, n))
            .collect();

        while !walls.is_empty() {
            let i = self.rng.random_range(0..walls.len());
            let (from, to) = walls.swap_remove(i);
            if in_maze[lat.idx(to)] {
                continue;
            }
            in_maze[lat.idx(to)] = true;
            open(&mut grid, Lattice::between(from, to));
            open(&mut grid, Lattice::to_grid(to));
            for n in to.neighbors_4() {
                if lat.contains(n) && !in_maze[lat.idx(n)] {
                    walls.push((to, n));
                }
            }
        }
        self.place(grid, true)
    }

    /// Perfect maze by Eller's algorithm, one lattice row at a time.
    pub fn ellers(&mut self) -> Result<Grid, GridError> {
        let mut grid = self.blank();
        let lat = Lattice::of(&grid);
        fill(&mut grid, true);
        if lat.is_empty() {
            return self.place(grid, false);
        }

        let cols = lat.cols as usize;
        // 0 means "no set yet".
        let mut sets = vec![0usize; cols];
        let mut next_set = 1;
        for cy in 0..lat.rows {
            let last = cy == lat.rows - 1;
            let cell = |cx: usize| Point::new(cx as i32, cy);

            for (cx, set) in sets.iter_mut().enumerate() {
                if *set == 0 {
                    *set = next_set;
                    next_set += 1;
                }
                open(&mut grid, Lattice::to_grid(cell(cx)));
            }

            // Join neighbors in different sets. The last row joins them all.
            for cx in 0..cols - 1 {
                if sets[cx] != sets[cx + 1] && (last || self.rng.random_bool(0.5)) {
                    open(&mut grid, Lattice::between(cell(cx), cell(cx + 1)));
                    let (keep, gone) = (sets[cx], sets[cx + 1]);
                    for s in sets.iter_mut().filter(|s| **s == gone) {
                        *s = keep;
                    }
                }
            }
            if last {
                break;
            }

            // Every set extends down at least once.
            let mut below = vec![0usize; cols];
            let mut ids = sets.clone();
            ids.sort_unstable();
            ids.dedup();
            for id in ids {
                let members: Vec<usize> = (0..cols).filter(|&cx| sets[cx] == id).collect();
                let forced = members[self.rng.random_range(0..members.len())];
                for cx in members {
                    if cx == forced || self.rng.random_bool(0.3) {
                        let down = Point::new(cx as i32, cy + 1);
                        open(&mut grid, Lattice::between(cell(cx), down));
                        below[cx] = id;
                    }
                }
            }
            sets = below;
        }
        self.place(grid, true)
    }

    /// Scatter walls with probability `density`, re-rolling until the
    /// endpoints connect.
    ///
    /// After [`MAX_ATTEMPTS`] failures a corridor is carved between the
    /// endpoints of the last roll.
    pub fn random(&mut self, density: f64) -> Result<Grid, GridError> {
        let density = if density.is_nan() {
            DEFAULT_DENSITY
        } else {
            density.clamp(0.0, 1.0)
        };
        let mut grid = self.empty()?;
        for attempt in 1..=MAX_ATTEMPTS {
            for p in grid.bounds() {
                if grid.is_start(p) || grid.is_end(p) {
                    continue;
                }
                let wall = self.rng.random_bool(density);
                grid.set_wall(p, wall)?;
            }
            if is_solvable(&grid) {
                log::trace!("random layout solvable after {attempt} attempt(s)");
                return Ok(grid);
            }
        }
        log::debug!("random layout unsolvable after {MAX_ATTEMPTS} attempts, carving corridor");
        carve_corridor(&mut grid, self.start, self.end);
        Ok(grid)
    }

    fn blank(&self) -> Grid {
        Grid::new(self.size.x, self.size.y)
    }

    /// Place the endpoints, optionally tunnel them into the lattice, and
    /// fall back to a direct corridor if the result is still unsolvable.
    fn place(&self, mut grid: Grid, tunnel: bool) -> Result<Grid, GridError> {
        grid.move_start(self.start)?;
        grid.move_end(self.end)?;
        let lat = Lattice::of(&grid);
        if tunnel && !lat.is_empty() {
            for p in [self.start, self.end] {
                carve_corridor(&mut grid, p, lat.nearest(p));
            }
        }
        if !is_solvable(&grid) {
            log::debug!(
                "layout unsolvable, carving corridor {} -> {}",
                self.start,
                self.end
            );
            carve_corridor(&mut grid, self.start, self.end);
        }
        Ok(grid)
    }
}

fn is_solvable(grid: &Grid) -> bool {
    Algorithm::Bfs.search(grid).is_ok_and(|(_, r)| r.found())
}
