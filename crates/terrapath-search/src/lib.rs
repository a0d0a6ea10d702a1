//! Generic best-first (A\*) route search.
//!
//! The caller describes a graph through the [`Graph`] trait (neighbour
//! enumeration, edge cost, heuristic) and asks for a least-cost [`Route`]
//! between two nodes:
//!
//! - [`find_route`] stops at the node equal to `goal`
//! - [`find_route_with`] accepts any goal predicate, e.g. "inside region R"
//! - [`Search`] exposes the same search with an optional expansion cap
//!
//! The search keeps exploring after its first goal arrival, pruned by the
//! best goal cost found so far, so predicate goals resolve to the cheapest
//! arrival rather than the first one. Routes are returned goal-first.
//!
//! All search state lives inside one call; graphs are only borrowed.
//!
//! ```
//! use terrapath_search::{AdjacencyGraph, find_route};
//!
//! let mut g = AdjacencyGraph::new();
//! g.add_edge('a', 'b', 1.0);
//! g.add_edge('b', 'c', 1.0);
//! g.add_edge('a', 'c', 5.0);
//!
//! let route = find_route(&g, 'a', 'c').unwrap();
//! assert_eq!(route.nodes(), &['c', 'b', 'a']);
//! assert_eq!(route.cost(), 2.0);
//! ```

mod adjacency;
mod astar;
mod error;
mod open;
mod route;
mod scores;
mod traits;

pub use adjacency::AdjacencyGraph;
pub use astar::{Search, find_route, find_route_with};
pub use error::SearchError;
pub use route::{Route, SearchStats};
pub use traits::{Graph, IMPASSABLE};
