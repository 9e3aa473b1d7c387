use pathviz_core::{ConfigError, Grid, Point};

use crate::neighbors::Neighbors;
use crate::search::{SearchResult, prepare, trace_path};

/// Depth-first search from `start` to `end`.
///
/// Like [`bfs`](crate::bfs) but with a stack: cells are marked visited
/// when pushed and recorded when popped. Neighbors are pushed in reverse
/// scan order so the first one (up) is explored first. The path is not
/// necessarily shortest.
pub fn dfs(grid: &mut Grid, start: Point, end: Point) -> Result<SearchResult, ConfigError> {
    prepare(grid, start, end)?;

    let mut visited_order = Vec::new();
    let mut stack = vec![start];
    let mut nb = Neighbors::new();

    if let Some(c) = grid.cell_mut(start) {
        c.search.visited = true;
        c.search.g = 0;
    }

    while let Some(cur) = stack.pop() {
        visited_order.push(cur);
        if cur == end {
            break;
        }
        let g = grid.cell(cur).map_or(0, |c| c.search.g);
        for &n in nb.cardinal(cur, |p| grid.is_passable(p)).iter().rev() {
            let Some(cell) = grid.cell_mut(n) else {
                continue;
            };
            if cell.search.visited {
                continue;
            }
            cell.search.visited = true;
            cell.search.g = g + 1;
            cell.search.previous = Some(cur);
            stack.push(n);
        }
    }

    Ok(SearchResult {
        path: trace_path(grid, start, end),
        visited_order,
    })
}
