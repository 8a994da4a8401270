//! Binary min-heap keyed by a totally ordered priority
//!
//! Built on `std::collections::BinaryHeap` with the ordering reversed.
//! Elements with equal priority come out in insertion order, which keeps
//! searches deterministic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct Entry<T, P> {
    priority: P,
    seq: u64,
    item: T,
}

impl<T, P: Ord> PartialEq for Entry<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, P: Ord> Eq for Entry<T, P> {}

impl<T, P: Ord> Ord for Entry<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T, P: Ord> PartialOrd for Entry<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue
///
/// There is no decrease-key: pushing an item again with a better priority
/// leaves the stale entry in the heap, and callers skip it when popped.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, P> {
    heap: BinaryHeap<Entry<T, P>>,
    next_seq: u64,
}

impl<T, P: Ord> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> PriorityQueue<T, P> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn push(&mut self, item: T, priority: P) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            item,
        });
    }

    /// Remove the item with the lowest priority
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|e| e.item)
    }

    /// Lowest priority currently queued
    pub fn peek_priority(&self) -> Option<&P> {
        self.heap.peek().map(|e| &e.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_ascending_priority() {
        let mut pq = PriorityQueue::new();
        for (item, p) in [("d", 7), ("a", 1), ("c", 5), ("b", 3), ("e", 9)] {
            pq.push(item, p);
        }
        assert_eq!(pq.len(), 5);
        assert_eq!(pq.peek_priority(), Some(&1));

        let order: Vec<_> = std::iter::from_fn(|| pq.pop()).collect();
        assert_eq!(order, vec!["a", "b", "c", "d", "e"]);
        assert!(pq.is_empty());
        assert_eq!(pq.pop(), None);
    }

    #[test]
    fn test_equal_priorities_are_fifo() {
        let mut pq = PriorityQueue::new();
        pq.push(10, 2);
        pq.push(11, 2);
        pq.push(12, 1);
        pq.push(13, 2);
        assert_eq!(pq.pop(), Some(12));
        assert_eq!(pq.pop(), Some(10));
        assert_eq!(pq.pop(), Some(11));
        assert_eq!(pq.pop(), Some(13));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut pq = PriorityQueue::new();
        pq.push(4usize, 8);
        pq.push(4usize, 3);
        assert_eq!(pq.len(), 2);
        assert_eq!(pq.pop(), Some(4));
        assert_eq!(pq.pop(), Some(4));
    }
}
