use std::collections::VecDeque;

use pathviz_core::{ConfigError, Grid, Point};

use crate::neighbors::Neighbors;
use crate::search::{SearchResult, prepare, trace_path};

/// Breadth-first search from `start` to `end`.
///
/// Cells are marked visited when enqueued and recorded in
/// `visited_order` when dequeued. Weights are ignored, so the path is
/// shortest by step count. The search stops as soon as `end` is dequeued.
pub fn bfs(grid: &mut Grid, start: Point, end: Point) -> Result<SearchResult, ConfigError> {
    prepare(grid, start, end)?;

    let mut visited_order = Vec::new();
    let mut queue = VecDeque::new();
    let mut nb = Neighbors::new();

    if let Some(c) = grid.cell_mut(start) {
        c.search.visited = true;
        c.search.g = 0;
    }
    queue.push_back(start);

    while let Some(cur) = queue.pop_front() {
        visited_order.push(cur);
        if cur == end {
            break;
        }
        let g = grid.cell(cur).map_or(0, |c| c.search.g);
        for &n in nb.cardinal(cur, |p| grid.is_passable(p)) {
            let Some(cell) = grid.cell_mut(n) else {
                continue;
            };
            if cell.search.visited {
                continue;
            }
            cell.search.visited = true;
            cell.search.g = g + 1;
            cell.search.previous = Some(cur);
            queue.push_back(n);
        }
    }

    Ok(SearchResult {
        path: trace_path(grid, start, end),
        visited_order,
    })
}
