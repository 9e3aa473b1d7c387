use pathviz_core::{ConfigError, Grid, Point};

use crate::frontier::Frontier;
use crate::neighbors::Neighbors;
use crate::search::{SearchResult, prepare, trace_path};

/// Dijkstra's algorithm from `start` to `end`.
///
/// Entering a cell costs that cell's weight. A cell is finalized (marked
/// visited and recorded in `visited_order`) when it is popped with its
/// current best cost; ties pop in insertion order.
pub fn dijkstra(grid: &mut Grid, start: Point, end: Point) -> Result<SearchResult, ConfigError> {
    prepare(grid, start, end)?;

    let mut visited_order = Vec::new();
    let mut open = Frontier::default();
    let mut nb = Neighbors::new();

    if let Some(c) = grid.cell_mut(start) {
        c.search.g = 0;
        c.search.f = 0;
    }
    open.push(start, 0);

    while let Some(entry) = open.pop() {
        let cur = entry.pos;
        let Some(cell) = grid.cell_mut(cur) else {
            continue;
        };
        if cell.search.visited || entry.key > cell.search.g {
            continue;
        }
        cell.search.visited = true;
        let g = cell.search.g;
        visited_order.push(cur);
        if cur == end {
            break;
        }

        for &n in nb.cardinal(cur, |p| grid.is_passable(p)) {
            let Some(next) = grid.cell_mut(n) else {
                continue;
            };
            if next.search.visited {
                continue;
            }
            let alt = g.saturating_add(next.weight);
            if alt < next.search.g {
                next.search.g = alt;
                next.search.f = alt;
                next.search.previous = Some(cur);
                open.push(n, alt);
            }
        }
    }

    Ok(SearchResult {
        path: trace_path(grid, start, end),
        visited_order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_cheap_detour() {
        let mut grid = Grid::parse(
            "
            S9E
            ...
            ",
        )
        .unwrap();
        let (s, e) = grid.endpoints().unwrap();
        let r = dijkstra(&mut grid, s, e).unwrap();
        assert_eq!(
            r.path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(2, 0)
            ]
        );
        assert_eq!(grid.at(e).unwrap().search.g, 4);
        assert_eq!(r.cost(&grid), Some(4));
    }

    #[test]
    fn takes_heavy_cell_when_cheaper() {
        let mut grid = Grid::parse(
            "
            S3E
            #.#
            #.#
            ...
            ",
        )
        .unwrap();
        let (s, e) = grid.endpoints().unwrap();
        let r = dijkstra(&mut grid, s, e).unwrap();
        assert_eq!(r.path.len(), 3);
        assert_eq!(grid.at(e).unwrap().search.g, 4);
    }

    #[test]
    fn unit_weights_match_bfs_length() {
        let grid = Grid::default();
        let (s, e) = grid.endpoints().unwrap();
        let r = dijkstra(&mut grid.snapshot(), s, e).unwrap();
        assert_eq!(r.path.len(), 41);
    }

    #[test]
    fn finalizes_in_cost_order() {
        let mut grid = Grid::parse("..S.2..E").unwrap();
        let (s, e) = grid.endpoints().unwrap();
        let r = dijkstra(&mut grid, s, e).unwrap();
        let costs: Vec<_> = r
            .visited_order
            .iter()
            .map(|&p| grid.at(p).unwrap().search.g)
            .collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]), "{costs:?}");
        // Up/right/down/left: right neighbor first among equal costs.
        assert_eq!(r.visited_order[1], Point::new(3, 0));
    }
}
