use thiserror::Error;

/// Reasons a route search can fail. A failed search never yields a partial
/// route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The frontier ran out (or only impassable candidates remained) before
    /// any goal was reached at finite cost.
    #[error("no path found")]
    NoPathFound,
    /// The configured node-expansion cap was reached.
    #[error("search exceeded {limit} node expansions")]
    ExpansionLimit { limit: usize },
}
