use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::traits::{Graph, IMPASSABLE};

type Heuristic<N> = Box<dyn Fn(&N, &N) -> f64 + Send + Sync>;

/// An explicit weighted digraph stored as adjacency lists.
///
/// Useful when the graph is data rather than a rule (road networks, test
/// fixtures). The heuristic defaults to zero, which turns the search into
/// Dijkstra; install an admissible one with
/// [`AdjacencyGraph::with_heuristic`].
pub struct AdjacencyGraph<N> {
    edges: FxHashMap<N, Vec<(N, f64)>>,
    heuristic: Option<Heuristic<N>>,
}

impl<N: Clone + Eq + Hash> Default for AdjacencyGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Eq + Hash> AdjacencyGraph<N> {
    pub fn new() -> Self {
        Self {
            edges: FxHashMap::default(),
            heuristic: None,
        }
    }

    /// Use `h(node, goal)` as the search heuristic.
    pub fn with_heuristic(mut self, h: impl Fn(&N, &N) -> f64 + Send + Sync + 'static) -> Self {
        self.heuristic = Some(Box::new(h));
        self
    }

    /// Add the directed edge `from -> to`, replacing its cost if it exists.
    pub fn add_edge(&mut self, from: N, to: N, cost: f64) {
        let out = self.edges.entry(from).or_default();
        match out.iter_mut().find(|(n, _)| *n == to) {
            Some(edge) => edge.1 = cost,
            None => out.push((to, cost)),
        }
    }

    /// Add `a -> b` and `b -> a` with the same cost.
    pub fn add_undirected(&mut self, a: N, b: N, cost: f64) {
        self.add_edge(a.clone(), b.clone(), cost);
        self.add_edge(b, a, cost);
    }

    /// Outgoing edges of `node` in insertion order.
    pub fn edges_from(&self, node: &N) -> &[(N, f64)] {
        self.edges.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

impl<N: Clone + Eq + Hash> Graph for AdjacencyGraph<N> {
    type Node = N;

    fn neighbors(&self, node: &N, buf: &mut Vec<N>) {
        buf.extend(self.edges_from(node).iter().map(|(n, _)| n.clone()));
    }

    fn cost(&self, from: &N, to: &N) -> f64 {
        self.edges_from(from)
            .iter()
            .find(|(n, _)| n == to)
            .map_or(IMPASSABLE, |&(_, c)| c)
    }

    fn estimate(&self, from: &N, goal: &N) -> f64 {
        self.heuristic.as_ref().map_or(0.0, |h| h(from, goal))
    }
}

impl<N: fmt::Debug> fmt::Debug for AdjacencyGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdjacencyGraph")
            .field("edges", &self.edges)
            .field("heuristic", &self.heuristic.is_some())
            .finish()
    }
}
