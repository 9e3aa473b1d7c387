use pathviz_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(5, 10);
        let b = Point::new(45, 7);
        assert_eq!(manhattan(a, b), 43);
        assert_eq!(manhattan(a, a), 0);
    }
}
