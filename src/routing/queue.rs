use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    dist: f32,
    seq: u64,
    node: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest distance, then the oldest entry.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of graph node indices keyed by tentative distance.
/// Stale entries are not removed; callers skip them on pop.
#[derive(Debug, Default)]
pub(crate) struct MinQueue {
    heap: BinaryHeap<QueueEntry>,
    counter: u64,
}

impl MinQueue {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            counter: 0,
        }
    }

    pub(crate) fn push(&mut self, node: usize, dist: f32) {
        self.heap.push(QueueEntry {
            dist,
            seq: self.counter,
            node,
        });
        self.counter += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<(usize, f32)> {
        self.heap.pop().map(|entry| (entry.node, entry.dist))
    }
}
