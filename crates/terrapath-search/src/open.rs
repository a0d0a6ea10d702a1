use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Heap entry: a node together with the f-score it had when pushed.
///
/// The score is a snapshot. If the node is later pushed again with a better
/// score, this entry stays in the heap and becomes stale.
struct Entry<N> {
    node: N,
    f: f64,
    seq: u64,
}

impl<N> PartialEq for Entry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for Entry<N> {}

impl<N> Ord for Entry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first; equal f
        // pops in insertion order.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N> PartialOrd for Entry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Frontier of a search: an f-ordered heap plus the set of nodes currently
/// open.
///
/// Membership is tracked separately from heap contents. The heap may hold
/// several entries for one node; callers validate each popped entry against
/// their authoritative score table and [`OpenSet::contains`].
pub(crate) struct OpenSet<N> {
    heap: BinaryHeap<Entry<N>>,
    members: FxHashSet<N>,
    seq: u64,
}

impl<N: Clone + Eq + Hash> OpenSet<N> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            members: FxHashSet::default(),
            seq: 0,
        }
    }

    /// Push `node` with score `f` and mark it open.
    pub(crate) fn push(&mut self, node: N, f: f64) {
        self.members.insert(node.clone());
        self.heap.push(Entry {
            node,
            f,
            seq: self.seq,
        });
        self.seq += 1;
    }

    /// Pop the entry with the smallest f, stale or not.
    pub(crate) fn pop(&mut self) -> Option<(N, f64)> {
        self.heap.pop().map(|e| (e.node, e.f))
    }

    #[inline]
    pub(crate) fn contains(&self, node: &N) -> bool {
        self.members.contains(node)
    }

    /// Clear the open mark of `node`. Its heap entries stay and will read as
    /// stale when popped.
    #[inline]
    pub(crate) fn close(&mut self, node: &N) -> bool {
        self.members.remove(node)
    }

    /// Number of heap entries, stale duplicates included.
    #[inline]
    pub(crate) fn heap_len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_smallest_f_first() {
        let mut open = OpenSet::new();
        open.push('a', 3.0);
        open.push('b', 1.0);
        open.push('c', 2.0);
        assert_eq!(open.pop(), Some(('b', 1.0)));
        assert_eq!(open.pop(), Some(('c', 2.0)));
        assert_eq!(open.pop(), Some(('a', 3.0)));
        assert_eq!(open.pop(), None);
    }

    #[test]
    fn equal_scores_pop_in_insertion_order() {
        let mut open = OpenSet::new();
        for c in ['x', 'y', 'z'] {
            open.push(c, 5.0);
        }
        let order: Vec<char> = std::iter::from_fn(|| open.pop().map(|(n, _)| n)).collect();
        assert_eq!(order, vec!['x', 'y', 'z']);
    }

    #[test]
    fn infinity_sorts_last() {
        let mut open = OpenSet::new();
        open.push(1, f64::INFINITY);
        open.push(2, 1e300);
        assert_eq!(open.pop(), Some((2, 1e300)));
        assert_eq!(open.pop(), Some((1, f64::INFINITY)));
    }

    #[test]
    fn membership_is_independent_of_heap() {
        let mut open = OpenSet::new();
        open.push('a', 4.0);
        open.push('a', 2.0);
        assert!(open.contains(&'a'));
        assert_eq!(open.heap_len(), 2);

        assert_eq!(open.pop(), Some(('a', 2.0)));
        // Popping does not touch membership.
        assert!(open.contains(&'a'));
        assert!(open.close(&'a'));
        assert!(!open.contains(&'a'));
        assert!(!open.close(&'a'));

        // The older duplicate is still in the heap.
        assert_eq!(open.heap_len(), 1);
        assert_eq!(open.pop(), Some(('a', 4.0)));
    }
}
