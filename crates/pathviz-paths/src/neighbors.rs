use pathviz_core::Point;

/// Cached neighbor computation helper.
///
/// Enumerates the cardinal (4-way) neighbors of a grid point in the fixed
/// scan order up, right, down, left, filtered by a predicate. The order is
/// what makes every search's visit order deterministic.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return 4-directional (cardinal) neighbors of `p`, keeping only those
    /// for which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for n in p.neighbors_4() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_keeps_scan_order() {
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Point::new(1, 1), |_| true).to_vec();
        assert_eq!(
            got,
            vec![
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn cardinal_filters() {
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Point::new(0, 0), |p| p.x >= 0 && p.y >= 0);
        assert_eq!(got, &[Point::new(1, 0), Point::new(0, 1)]);
    }
}
