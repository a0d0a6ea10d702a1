use std::hash::Hash;

/// Edge cost meaning "this transition cannot be taken".
///
/// A genuine infinity: it absorbs any finite sum, so a path through an
/// impassable edge can never compare below a finite one.
pub const IMPASSABLE: f64 = f64::INFINITY;

/// The capability a graph must offer to be searched.
///
/// `Node` is opaque to the search: it is only cloned, compared and hashed.
pub trait Graph {
    type Node: Clone + Eq + Hash;

    /// Append the nodes reachable from `node` in one step into `buf`.
    /// The caller clears `buf` before calling. Must be finite.
    fn neighbors(&self, node: &Self::Node, buf: &mut Vec<Self::Node>);

    /// Cost of moving from `from` to the adjacent `to`.
    ///
    /// Must be non-negative; return [`IMPASSABLE`] for blocked transitions.
    fn cost(&self, from: &Self::Node, to: &Self::Node) -> f64;

    /// Heuristic estimate of the cost from `from` to `goal`.
    /// Should never overestimate the true cost (admissible) for the returned
    /// route to be optimal.
    fn estimate(&self, from: &Self::Node, goal: &Self::Node) -> f64;
}

impl<G: Graph + ?Sized> Graph for &G {
    type Node = G::Node;

    #[inline]
    fn neighbors(&self, node: &Self::Node, buf: &mut Vec<Self::Node>) {
        (**self).neighbors(node, buf)
    }

    #[inline]
    fn cost(&self, from: &Self::Node, to: &Self::Node) -> f64 {
        (**self).cost(from, to)
    }

    #[inline]
    fn estimate(&self, from: &Self::Node, goal: &Self::Node) -> f64 {
        (**self).estimate(from, goal)
    }
}
