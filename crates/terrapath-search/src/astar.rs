use crate::error::SearchError;
use crate::open::OpenSet;
use crate::route::{Route, SearchStats, path_cost, reconstruct};
use crate::scores::ScoreTable;
use crate::traits::Graph;

/// Find a least-cost route from `start` to `goal`.
///
/// The returned route lists nodes goal-first and start-last.
pub fn find_route<G: Graph>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
) -> Result<Route<G::Node>, SearchError> {
    Search::new(graph).run(start, goal, |n, g| n == g)
}

/// Find a least-cost route from `start` to any node for which
/// `is_goal(node, &goal)` holds.
///
/// `goal` still feeds the heuristic, so it should lie in (or point towards)
/// the accepted region. The first node of the returned route is the
/// goal-satisfying node that was reached.
pub fn find_route_with<G, F>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    is_goal: F,
) -> Result<Route<G::Node>, SearchError>
where
    G: Graph,
    F: Fn(&G::Node, &G::Node) -> bool,
{
    Search::new(graph).run(start, goal, is_goal)
}

/// A* search over a borrowed graph.
///
/// Holds only configuration; every [`Search::run`] starts from fresh state,
/// so one `Search` can serve any number of queries.
pub struct Search<'g, G> {
    graph: &'g G,
    max_expansions: Option<usize>,
}

impl<'g, G: Graph> Search<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            max_expansions: None,
        }
    }

    /// Fail with [`SearchError::ExpansionLimit`] once more than `limit`
    /// nodes have been expanded.
    pub fn max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Run the search.
    ///
    /// Nodes may be expanded more than once: there is no closed set, and a
    /// node whose cost improves after expansion is opened again. The search
    /// does not stop at the first goal arrival either. It keeps going while
    /// the frontier holds entries scoring below the best arrival found, and
    /// returns the cheapest arrival.
    pub fn run<F>(
        &self,
        start: G::Node,
        goal: G::Node,
        is_goal: F,
    ) -> Result<Route<G::Node>, SearchError>
    where
        F: Fn(&G::Node, &G::Node) -> bool,
    {
        let graph = self.graph;
        let mut stats = SearchStats::default();

        if is_goal(&start, &goal) {
            stats.scored = 1;
            return Ok(Route::new(vec![start], 0.0, stats));
        }

        let start_f = graph.estimate(&start, &goal);
        let mut scores = ScoreTable::new(start.clone(), start_f);
        let mut open = OpenSet::new();
        open.push(start, start_f);
        stats.pushed = 1;

        // Cost of the best goal arrival so far; prunes every admission.
        let mut goal_score = f64::INFINITY;
        let mut arrival: Option<G::Node> = None;

        let mut nbuf = Vec::new();

        while let Some((current, popped_f)) = open.pop() {
            // Infinity sorts last, so nothing left can be reached either.
            if popped_f == f64::INFINITY {
                break;
            }

            // Entries are never updated in place. One whose score no longer
            // matches the table, or whose node was closed since, is stale and
            // must not be expanded.
            if !open.contains(&current) || scores.f(&current) != Some(popped_f) {
                stats.stale += 1;
                continue;
            }
            open.close(&current);

            if let Some(limit) = self.max_expansions {
                if stats.expanded >= limit {
                    log::debug!("search aborted after {limit} expansions");
                    return Err(SearchError::ExpansionLimit { limit });
                }
            }
            stats.expanded += 1;

            let current_g = scores.g(&current);
            nbuf.clear();
            graph.neighbors(&current, &mut nbuf);

            for n in nbuf.drain(..) {
                let tentative_g = current_g + graph.cost(&current, &n);
                let f = tentative_g + graph.estimate(&n, &goal);

                let admitted = !open.contains(&n)
                    && scores.f(&n).is_none_or(|prev| f < prev)
                    && f < goal_score;
                let improved = tentative_g < scores.g(&n);
                if !admitted && !improved {
                    continue;
                }
                // An improved node that is still open gets a second heap
                // entry; its older one turns stale.
                let push = admitted || (improved && f < goal_score && open.contains(&n));

                if is_goal(&n, &goal) && tentative_g < goal_score {
                    goal_score = tentative_g;
                    arrival = Some(n.clone());
                }

                scores.record(n.clone(), current.clone(), tentative_g, f);
                if push {
                    open.push(n, f);
                    stats.pushed += 1;
                }
            }
        }

        stats.scored = scores.scored();

        let Some(arrival) = arrival else {
            log::debug!(
                "no path found: {} expanded, {} stale, {} scored",
                stats.expanded,
                stats.stale,
                stats.scored
            );
            return Err(SearchError::NoPathFound);
        };

        let nodes = reconstruct(&scores, arrival);
        let cost = path_cost(graph, &nodes);
        if cost != goal_score {
            log::debug!("route relinked after arrival: scored {goal_score:.3}, walks {cost:.3}");
        }
        log::debug!(
            "route found: {} nodes, cost {:.3}, {} expanded, {} stale, {} left in heap",
            nodes.len(),
            cost,
            stats.expanded,
            stats.stale,
            open.heap_len()
        );
        Ok(Route::new(nodes, cost, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::AdjacencyGraph;
    use crate::traits::IMPASSABLE;

    /// Total cost of a goal-first route, recomputed edge by edge.
    fn route_cost<G: Graph>(g: &G, nodes: &[G::Node]) -> f64 {
        nodes.windows(2).map(|w| g.cost(&w[1], &w[0])).sum()
    }

    fn diamond() -> AdjacencyGraph<&'static str> {
        // s -> a -> t costs 2, s -> b -> t costs 3, s -> t costs 10.
        let mut g = AdjacencyGraph::new();
        g.add_edge("s", "a", 1.0);
        g.add_edge("a", "t", 1.0);
        g.add_edge("s", "b", 1.0);
        g.add_edge("b", "t", 2.0);
        g.add_edge("s", "t", 10.0);
        g
    }

    #[test]
    fn finds_cheapest_route_goal_first() {
        let g = diamond();
        let route = find_route(&g, "s", "t").unwrap();
        assert_eq!(route.nodes(), &["t", "a", "s"]);
        assert_eq!(route.cost(), 2.0);
        assert_eq!(*route.goal(), "t");
        assert_eq!(*route.start(), "s");
    }

    #[test]
    fn cheaper_route_with_more_hops_wins() {
        let mut g = AdjacencyGraph::new();
        g.add_edge(0, 9, 5.0);
        for i in 0..4 {
            g.add_edge(i, i + 1, 1.0);
        }
        g.add_edge(4, 9, 0.5);
        let route = find_route(&g, 0, 9).unwrap();
        assert_eq!(route.nodes(), &[9, 4, 3, 2, 1, 0]);
        assert_eq!(route.cost(), 4.5);
    }

    #[test]
    fn single_step_route_holds_both_endpoints() {
        let mut g = AdjacencyGraph::new();
        g.add_edge('a', 'b', 3.0);
        let route = find_route(&g, 'a', 'b').unwrap();
        assert_eq!(route.nodes(), &['b', 'a']);
        assert_eq!(route.cost(), 3.0);
    }

    #[test]
    fn start_equal_to_goal_is_trivial() {
        let g = diamond();
        let route = find_route(&g, "s", "s").unwrap();
        assert_eq!(route.nodes(), &["s"]);
        assert_eq!(route.cost(), 0.0);
        assert_eq!(route.stats().expanded, 0);
    }

    #[test]
    fn start_satisfying_predicate_is_trivial() {
        let g = diamond();
        let route = find_route_with(&g, "a", "t", |n, _| *n != "s").unwrap();
        assert_eq!(route.nodes(), &["a"]);
    }

    #[test]
    fn unreachable_goal_fails() {
        let mut g = diamond();
        g.add_edge("x", "y", 1.0);
        assert_eq!(find_route(&g, "s", "y"), Err(SearchError::NoPathFound));
    }

    #[test]
    fn node_without_neighbors_fails_cleanly() {
        let g: AdjacencyGraph<u8> = AdjacencyGraph::new();
        assert_eq!(find_route(&g, 1, 2), Err(SearchError::NoPathFound));
    }

    #[test]
    fn impassable_edges_block() {
        let mut g = AdjacencyGraph::new();
        g.add_edge('s', 'a', 1.0);
        g.add_edge('a', 't', IMPASSABLE);
        g.add_edge('s', 'b', 4.0);
        g.add_edge('b', 't', 4.0);
        let route = find_route(&g, 's', 't').unwrap();
        assert_eq!(route.nodes(), &['t', 'b', 's']);
        assert_eq!(route.cost(), 8.0);

        g.add_edge('b', 't', IMPASSABLE);
        assert_eq!(find_route(&g, 's', 't'), Err(SearchError::NoPathFound));
    }

    #[test]
    fn infinite_start_estimate_short_circuits() {
        let mut g = AdjacencyGraph::<i32>::new().with_heuristic(|_, _| f64::INFINITY);
        g.add_edge(1, 2, 1.0);
        let err = find_route(&g, 1, 2).unwrap_err();
        assert_eq!(err, SearchError::NoPathFound);
    }

    #[test]
    fn zero_cost_edges_are_allowed() {
        let mut g = AdjacencyGraph::new();
        g.add_edge(0, 1, 0.0);
        g.add_edge(1, 2, 0.0);
        g.add_edge(0, 2, 1.0);
        let route = find_route(&g, 0, 2).unwrap();
        assert_eq!(route.nodes(), &[2, 1, 0]);
        assert_eq!(route.cost(), 0.0);
    }

    #[test]
    fn predicate_goal_picks_cheapest_arrival() {
        // Two exits; "far" is reached first in hops but costs more.
        let mut g = AdjacencyGraph::new();
        g.add_edge("s", "exit-far", 6.0);
        g.add_edge("s", "m1", 1.0);
        g.add_edge("m1", "m2", 1.0);
        g.add_edge("m2", "exit-near", 1.0);
        let route =
            find_route_with(&g, "s", "exit-near", |n, _| n.starts_with("exit")).unwrap();
        assert_eq!(route.nodes(), &["exit-near", "m2", "m1", "s"]);
        assert_eq!(route.cost(), 3.0);
    }

    #[test]
    fn goal_revisited_through_cheaper_neighbor() {
        // The goal is discovered first via the expensive edge from `a`, then
        // improved through `b` before it would have been popped.
        let mut g = AdjacencyGraph::new();
        g.add_edge('s', 'a', 1.0);
        g.add_edge('s', 'b', 2.0);
        g.add_edge('a', 't', 10.0);
        g.add_edge('b', 't', 1.0);
        let route = find_route(&g, 's', 't').unwrap();
        assert_eq!(route.nodes(), &['t', 'b', 's']);
        assert_eq!(route.cost(), 3.0);
        assert_eq!(route_cost(&g, route.nodes()), 3.0);
    }

    #[test]
    fn improved_open_node_leaves_stale_entry() {
        // `c` is opened via `a` at g=5, then improved via `b` to g=2 while
        // still open. The first heap entry for `c` must be skipped.
        let mut g = AdjacencyGraph::new();
        g.add_edge('s', 'a', 1.0);
        g.add_edge('s', 'b', 1.5);
        g.add_edge('a', 'c', 4.0);
        g.add_edge('b', 'c', 0.5);
        g.add_edge('c', 't', 10.0);
        let route = find_route(&g, 's', 't').unwrap();
        assert_eq!(route.nodes(), &['t', 'c', 'b', 's']);
        assert_eq!(route.cost(), 12.0);
        assert!(route.stats().stale >= 1, "stats: {:?}", route.stats());
    }

    #[test]
    fn closed_node_is_reopened_when_improved() {
        // The estimate at `a` overshoots, so `m` and `t` are expanded via the
        // expensive branch first and must be opened again once `a` is.
        let mut g = AdjacencyGraph::<char>::new().with_heuristic(|n, _| match n {
            'a' => 10.0,
            _ => 0.0,
        });
        g.add_edge('s', 'a', 1.0);
        g.add_edge('s', 'b', 3.0);
        g.add_edge('a', 'm', 1.0);
        g.add_edge('b', 'm', 3.0);
        g.add_edge('m', 't', 1.0);
        let route = find_route(&g, 's', 't').unwrap();
        assert_eq!(route.nodes(), &['t', 'm', 'a', 's']);
        assert_eq!(route.cost(), 3.0);
    }

    #[test]
    fn cost_follows_links_rewritten_after_arrival() {
        // `4` overshoots less than `1`, so the goal is scored at 7 through
        // 5 -> 4. Expanding `1` later improves `4` to g=3 without reopening
        // it, which relinks the returned route.
        let mut g = AdjacencyGraph::<u32>::new().with_heuristic(|n, _| match n {
            1 => 13.0,
            4 => 4.0,
            _ => 0.0,
        });
        g.add_edge(0, 5, 0.0);
        g.add_edge(5, 4, 7.0);
        g.add_edge(5, 1, 3.0);
        g.add_edge(1, 4, 0.0);
        g.add_edge(4, 7, 0.0);
        let route = find_route(&g, 0, 7).unwrap();
        assert_eq!(route.nodes(), &[7, 4, 1, 5, 0]);
        assert_eq!(route.cost(), 3.0);
        assert_eq!(route_cost(&g, route.nodes()), route.cost());
    }

    #[test]
    fn repeated_runs_agree() {
        let g = diamond();
        let search = Search::new(&g);
        let first = search.run("s", "t", |n, g| n == g).unwrap();
        for _ in 0..5 {
            let again = search.run("s", "t", |n, g| n == g).unwrap();
            assert_eq!(again.cost(), first.cost());
            assert_eq!(again.nodes(), first.nodes());
        }
    }

    #[test]
    fn expansion_limit_aborts() {
        let mut g = AdjacencyGraph::new();
        for i in 0..100 {
            g.add_edge(i, i + 1, 1.0);
        }
        let err = Search::new(&g)
            .max_expansions(10)
            .run(0, 100, |n, g| n == g)
            .unwrap_err();
        assert_eq!(err, SearchError::ExpansionLimit { limit: 10 });

        let ok = Search::new(&g).max_expansions(1_000).run(0, 100, |n, g| n == g);
        assert_eq!(ok.map(|r| r.len()), Ok(101));
    }

    #[test]
    fn stats_count_work() {
        let g = diamond();
        let route = find_route(&g, "s", "t").unwrap();
        let stats = route.stats();
        assert!(stats.expanded >= 2);
        assert!(stats.pushed >= stats.expanded);
        assert_eq!(stats.scored, 4);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const NODES: usize = 7;

        /// Reference single-source shortest distances (Bellman-Ford).
        fn reference_distances(edges: &[(usize, usize, f64)]) -> [f64; NODES] {
            let mut dist = [f64::INFINITY; NODES];
            dist[0] = 0.0;
            for _ in 0..NODES {
                for &(a, b, c) in edges {
                    if dist[a] + c < dist[b] {
                        dist[b] = dist[a] + c;
                    }
                }
            }
            dist
        }

        fn build(edges: &[(usize, usize, f64)]) -> (AdjacencyGraph<usize>, Vec<(usize, usize, f64)>) {
            let mut g = AdjacencyGraph::new();
            let mut effective = std::collections::HashMap::new();
            for &(a, b, c) in edges {
                if a == b {
                    continue;
                }
                g.add_edge(a, b, c);
                effective.insert((a, b), c);
            }
            let flat = effective.into_iter().map(|((a, b), c)| (a, b, c)).collect();
            (g, flat)
        }

        fn edge() -> impl Strategy<Value = (usize, usize, f64)> {
            let cost = prop_oneof![
                8 => (0u8..10).prop_map(f64::from),
                1 => Just(IMPASSABLE),
            ];
            (0..NODES, 0..NODES, cost)
        }

        proptest! {
            #[test]
            fn route_cost_is_optimal(edges in prop::collection::vec(edge(), 0..30), goal in 1..NODES) {
                let (g, flat) = build(&edges);
                let dist = reference_distances(&flat);
                match find_route(&g, 0, goal) {
                    Ok(route) => {
                        prop_assert_eq!(route.cost(), dist[goal]);
                        prop_assert_eq!(*route.goal(), goal);
                        prop_assert_eq!(*route.start(), 0);
                        prop_assert_eq!(route_cost(&g, route.nodes()), route.cost());
                    }
                    Err(e) => {
                        prop_assert_eq!(e, SearchError::NoPathFound);
                        prop_assert!(dist[goal].is_infinite());
                    }
                }
            }

            #[test]
            fn reported_cost_matches_route_edges(
                edges in prop::collection::vec(edge(), 0..30),
                estimates in prop::collection::vec(0u8..20, NODES),
                goal in 1..NODES,
            ) {
                let (mut g, _) = build(&edges);
                let estimates: Vec<f64> = estimates.into_iter().map(f64::from).collect();
                g = g.with_heuristic(move |n: &usize, _: &usize| estimates[*n]);
                if let Ok(route) = find_route(&g, 0, goal) {
                    prop_assert_eq!(*route.goal(), goal);
                    prop_assert_eq!(*route.start(), 0);
                    prop_assert_eq!(route_cost(&g, route.nodes()), route.cost());
                }
            }

            #[test]
            fn predicate_route_reaches_cheapest_target(
                edges in prop::collection::vec(edge(), 0..30),
                targets in prop::collection::hash_set(1..NODES, 1..3),
            ) {
                let (g, flat) = build(&edges);
                let dist = reference_distances(&flat);
                let best = targets.iter().map(|&t| dist[t]).fold(f64::INFINITY, f64::min);
                let any = *targets.iter().next().unwrap();
                match find_route_with(&g, 0, any, |n, _| targets.contains(n)) {
                    Ok(route) => {
                        prop_assert_eq!(route.cost(), best);
                        prop_assert!(targets.contains(route.goal()));
                    }
                    Err(_) => prop_assert!(best.is_infinite()),
                }
            }
        }
    }
}
