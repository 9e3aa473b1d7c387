use std::collections::BinaryHeap;

use pathviz_core::Point;

/// Heap entry ordered by `key`, then by insertion order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Entry {
    pub(crate) key: i32,
    pub(crate) seq: u64,
    pub(crate) pos: Point,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first, and
        // among equal keys the entry pushed earliest.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier with FIFO tie-breaking.
///
/// Entries are never updated in place: a cheaper route pushes a second
/// entry and the stale one is skipped when popped.
#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn push(&mut self, pos: Point, key: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { key, seq, pos });
    }

    pub(crate) fn pop(&mut self) -> Option<Entry> {
        self.heap.pop()
    }
}
