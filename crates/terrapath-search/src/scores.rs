use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Per-search bookkeeping: best known cost from start (g), estimated total
/// cost (f) and the predecessor each node was best reached from.
pub(crate) struct ScoreTable<N> {
    g: FxHashMap<N, f64>,
    f: FxHashMap<N, f64>,
    came_from: FxHashMap<N, N>,
}

impl<N: Clone + Eq + Hash> ScoreTable<N> {
    /// A table holding only the start node, with g = 0.
    pub(crate) fn new(start: N, start_f: f64) -> Self {
        let mut g = FxHashMap::default();
        let mut f = FxHashMap::default();
        g.insert(start.clone(), 0.0);
        f.insert(start, start_f);
        Self {
            g,
            f,
            came_from: FxHashMap::default(),
        }
    }

    /// Best known cost from start. Unreached nodes read as infinity.
    #[inline]
    pub(crate) fn g(&self, node: &N) -> f64 {
        self.g.get(node).copied().unwrap_or(f64::INFINITY)
    }

    /// Last recorded f-score, `None` while unscored.
    #[inline]
    pub(crate) fn f(&self, node: &N) -> Option<f64> {
        self.f.get(node).copied()
    }

    /// Record that `node` is best reached from `from` at cost `g`.
    pub(crate) fn record(&mut self, node: N, from: N, g: f64, f: f64) {
        self.g.insert(node.clone(), g);
        self.f.insert(node.clone(), f);
        self.came_from.insert(node, from);
    }

    #[inline]
    pub(crate) fn predecessor(&self, node: &N) -> Option<&N> {
        self.came_from.get(node)
    }

    /// Number of nodes with a recorded predecessor.
    #[inline]
    pub(crate) fn linked(&self) -> usize {
        self.came_from.len()
    }

    /// Number of nodes ever scored, start included.
    #[inline]
    pub(crate) fn scored(&self) -> usize {
        self.g.len()
    }
}
