use pathviz_core::{ConfigError, Grid, Point};

use crate::distance::manhattan;
use crate::frontier::Frontier;
use crate::neighbors::Neighbors;
use crate::search::{SearchResult, prepare, trace_path};

/// A* search from `start` to `end` with a Manhattan heuristic.
///
/// Same cost model and finalization rule as [`dijkstra`](crate::dijkstra),
/// but the frontier is ordered by `f = g + h`. Manhattan distance never
/// overestimates with weights ≥ 1, so the path is cheapest.
pub fn astar(grid: &mut Grid, start: Point, end: Point) -> Result<SearchResult, ConfigError> {
    prepare(grid, start, end)?;

    let mut visited_order = Vec::new();
    let mut open = Frontier::default();
    let mut nb = Neighbors::new();

    let h0 = manhattan(start, end);
    if let Some(c) = grid.cell_mut(start) {
        c.search.g = 0;
        c.search.h = h0;
        c.search.f = h0;
    }
    open.push(start, h0);

    while let Some(entry) = open.pop() {
        let cur = entry.pos;
        let Some(cell) = grid.cell_mut(cur) else {
            continue;
        };
        if cell.search.visited || entry.key > cell.search.f {
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
                let h = manhattan(n, end);
                next.search.g = alt;
                next.search.h = h;
                next.search.f = alt.saturating_add(h);
                next.search.previous = Some(cur);
                open.push(n, next.search.f);
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
    use crate::dijkstra;

    #[test]
    fn straight_line_visits_only_the_line() {
        let mut grid = Grid::default();
        let (s, e) = grid.endpoints().unwrap();
        let r = astar(&mut grid, s, e).unwrap();
        assert_eq!(r.path.len(), 41);
        // f stays 40 along the row; right is scanned before down and left.
        assert_eq!(r.visited_order, r.path);
    }

    #[test]
    fn explores_no_more_than_dijkstra() {
        let grid = Grid::parse(
            "
            ..........
            ..####....
            S....#...E
            ..####....
            ..........
            ",
        )
        .unwrap();
        let (s, e) = grid.endpoints().unwrap();
        let a = astar(&mut grid.snapshot(), s, e).unwrap();
        let mut dg = grid.snapshot();
        let d = dijkstra(&mut dg, s, e).unwrap();
        assert!(a.visited_order.len() <= d.visited_order.len());
        assert_eq!(a.path.len(), d.path.len());
        assert_eq!(a.cost(&grid), d.cost(&grid));
    }

    #[test]
    fn weighted_cost_matches_dijkstra() {
        let grid = Grid::parse(
            "
            S.9..
            .#9#.
            .155E
            ",
        )
        .unwrap();
        let (s, e) = grid.endpoints().unwrap();
        let a = astar(&mut grid.snapshot(), s, e).unwrap();
        let d = dijkstra(&mut grid.snapshot(), s, e).unwrap();
        assert_eq!(a.cost(&grid), d.cost(&grid));
    }

    #[test]
    fn records_heuristic() {
        let mut grid = Grid::parse("S..E").unwrap();
        let (s, e) = grid.endpoints().unwrap();
        astar(&mut grid, s, e).unwrap();
        let c = grid.at(Point::new(1, 0)).unwrap().search;
        assert_eq!((c.g, c.h, c.f), (1, 2, 3));
    }
}
