use std::hash::Hash;

use crate::scores::ScoreTable;
use crate::traits::Graph;

/// Counters collected while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Heap entries taken and expanded.
    pub expanded: usize,
    /// Heap entries discarded because a newer score superseded them.
    pub stale: usize,
    /// Heap entries pushed, the start included.
    pub pushed: usize,
    /// Distinct nodes that received a score.
    pub scored: usize,
}

/// A least-cost route found by a search.
///
/// Nodes are stored **goal-first**: `nodes()[0]` is the goal (or the
/// goal-satisfying node that was reached) and the last node is the start.
/// Use [`Route::forward`] or [`Route::into_forward`] for start-first order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route<N> {
    nodes: Vec<N>,
    cost: f64,
    stats: SearchStats,
}

impl<N> Route<N> {
    pub(crate) fn new(nodes: Vec<N>, cost: f64, stats: SearchStats) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes, cost, stats }
    }

    /// Nodes from goal to start.
    #[inline]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Total edge cost of the route.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Number of nodes, both endpoints included. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a route holds at least its start node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The reached goal node (first in storage order).
    #[inline]
    pub fn goal(&self) -> &N {
        &self.nodes[0]
    }

    /// The start node (last in storage order).
    #[inline]
    pub fn start(&self) -> &N {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Iterate from start to goal.
    pub fn forward(&self) -> impl DoubleEndedIterator<Item = &N> + ExactSizeIterator {
        self.nodes.iter().rev()
    }

    /// Consume the route, returning the goal-first node list.
    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }

    /// Consume the route, returning a start-first node list.
    pub fn into_forward(mut self) -> Vec<N> {
        self.nodes.reverse();
        self.nodes
    }
}

/// Walk predecessors back from `arrival` until a node without one (the
/// start). Returns `[arrival, pred(arrival), …, start]`.
///
/// The walk is bounded by the number of recorded links so that a cyclic
/// predecessor chain, which only a graph with negative costs can produce,
/// cannot loop forever.
pub(crate) fn reconstruct<N: Clone + Eq + Hash>(scores: &ScoreTable<N>, arrival: N) -> Vec<N> {
    let limit = scores.linked();
    let mut path = vec![arrival];
    for _ in 0..limit {
        let Some(prev) = scores.predecessor(&path[path.len() - 1]) else {
            return path;
        };
        path.push(prev.clone());
    }
    if scores.predecessor(&path[path.len() - 1]).is_some() {
        log::warn!(
            "predecessor chain longer than {limit} links; graph violates the cost contract"
        );
    }
    path
}

/// Sum of edge costs along a goal-first node list, accumulated from the
/// start end in the same order the search adds up g scores.
///
/// Predecessor links can be rewritten after the best arrival was scored
/// (an improved node that is not re-opened keeps its new link), so the
/// cost is read off the nodes actually returned.
pub(crate) fn path_cost<G: Graph>(graph: &G, nodes: &[G::Node]) -> f64 {
    nodes
        .windows(2)
        .rev()
        .fold(0.0, |acc, w| acc + graph.cost(&w[1], &w[0]))
}
