//! Property-based checks of the route algorithms against brute-force
//! references on small random networks.

use std::collections::BTreeSet;

use proptest::prelude::*;

use airroute::model::{path_cost, Coordinates, DenseGraph, GraphView, SparseGraph};
use airroute::route_compute::{
    astar, bfs, constrained_shortest_path, dfs, dijkstra, k_shortest_paths, reconstruct_path,
};

type Edge = (usize, usize, f64);

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Up to 8 nodes, integer weights so path sums are exact.
fn arb_network() -> impl Strategy<Value = (usize, Vec<Edge>)> {
    (1usize..=8).prop_flat_map(|n| {
        let edge = (0..n, 0..n, 0u32..20).prop_map(|(u, v, w)| (u, v, f64::from(w)));
        (Just(n), prop::collection::vec(edge, 0..24))
    })
}

/// Planar network where every leg is at least as long as the straight line.
fn arb_planar_network() -> impl Strategy<Value = (Coordinates, Vec<Edge>)> {
    (2usize..=8).prop_flat_map(|n| {
        let points = prop::collection::vec((0u32..10, 0u32..10), n);
        let legs = prop::collection::vec((0..n, 0..n, 0u32..4), 0..24);
        (points, legs).prop_map(|(points, legs)| {
            let coords = Coordinates::new(
                points
                    .into_iter()
                    .map(|(x, y)| (f64::from(x), f64::from(y)))
                    .collect(),
            );
            let edges = legs
                .into_iter()
                .map(|(u, v, stretch)| {
                    let w = coords.straight_line(u, v) * (1.0 + f64::from(stretch) * 0.5);
                    (u, v, w)
                })
                .collect();
            (coords, edges)
        })
    })
}

fn sparse(n: usize, edges: &[Edge]) -> SparseGraph {
    let mut graph = SparseGraph::new(n);
    for &(u, v, w) in edges {
        graph.add_edge(u, v, w);
    }
    graph
}

/// The matrix keeps one weight per pair, so it is fed the cheapest.
fn dense(n: usize, edges: &[Edge]) -> DenseGraph {
    let mut graph = DenseGraph::new(n);
    for &(u, v, w) in edges {
        if u != v && graph.weight(u, v).map_or(true, |old| w < old) {
            graph.set_weight(u, v, w);
        }
    }
    graph
}

fn brute_force_distances(n: usize, edges: &[Edge], src: usize) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; n];
    dist[src] = 0.0;
    for _ in 0..n {
        for &(u, v, w) in edges {
            if dist[u] + w < dist[v] {
                dist[v] = dist[u] + w;
            }
        }
    }
    dist
}

fn brute_force_hops(n: usize, edges: &[Edge], src: usize) -> Vec<Option<usize>> {
    let mut level = vec![None; n];
    level[src] = Some(0);
    let mut layer = vec![src];
    let mut depth = 0;
    while !layer.is_empty() {
        depth += 1;
        let mut next = Vec::new();
        for &u in &layer {
            for &(a, b, _) in edges {
                if a == u && level[b].is_none() {
                    level[b] = Some(depth);
                    next.push(b);
                }
            }
        }
        layer = next;
    }
    level
}

/// Cheapest walk from `src` to `dst` using exactly `legs` edges.
fn brute_force_exact_legs(n: usize, edges: &[Edge], src: usize, dst: usize, legs: usize) -> f64 {
    let mut cost = vec![f64::INFINITY; n];
    cost[src] = 0.0;
    for _ in 0..legs {
        let mut next = vec![f64::INFINITY; n];
        for &(u, v, w) in edges {
            if cost[u] + w < next[v] {
                next[v] = cost[u] + w;
            }
        }
        cost = next;
    }
    cost[dst]
}

/// Costs of every loopless route from `src`, grouped by endpoint.
fn enumerate_simple_path_costs<G: GraphView>(graph: &G, src: usize) -> Vec<Vec<f64>> {
    fn walk<G: GraphView>(
        graph: &G,
        u: usize,
        cost: f64,
        on_path: &mut [bool],
        costs: &mut [Vec<f64>],
    ) {
        costs[u].push(cost);
        for v in 0..graph.node_count() {
            if on_path[v] {
                continue;
            }
            if let Some(w) = graph.weight(u, v) {
                on_path[v] = true;
                walk(graph, v, cost + w, on_path, costs);
                on_path[v] = false;
            }
        }
    }

    let n = graph.node_count();
    let mut on_path = vec![false; n];
    let mut costs = vec![Vec::new(); n];
    on_path[src] = true;
    walk(graph, src, 0.0, &mut on_path, &mut costs);
    costs
}

fn cheapest_k(mut costs: Vec<f64>, k: usize) -> Vec<f64> {
    costs.sort_by(f64::total_cmp);
    costs.truncate(k);
    costs
}

fn is_loopless(path: &[usize]) -> bool {
    path.iter().collect::<BTreeSet<_>>().len() == path.len()
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn bfs_matches_level_expansion((n, edges) in arb_network()) {
        let graph = sparse(n, &edges);
        for src in 0..n {
            prop_assert_eq!(bfs(&graph, src), brute_force_hops(n, &edges, src));
        }
    }

    #[test]
    fn dfs_reaches_exactly_the_bfs_set((n, edges) in arb_network()) {
        let graph = sparse(n, &edges);
        for src in 0..n {
            let out = dfs(&graph, src);
            let hops = bfs(&graph, src);
            prop_assert_eq!(out.order[0], src);
            prop_assert!(is_loopless(&out.order));
            for node in 0..n {
                prop_assert_eq!(out.visited[node], hops[node].is_some());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Shortest paths
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn dijkstra_matches_brute_force((n, edges) in arb_network()) {
        let graph = sparse(n, &edges);
        for src in 0..n {
            prop_assert_eq!(dijkstra(&graph, src).dist, brute_force_distances(n, &edges, src));
        }
    }

    #[test]
    fn dijkstra_ignores_edge_order((n, edges) in arb_network()) {
        let forward = sparse(n, &edges);
        let reversed: Vec<Edge> = edges.iter().rev().copied().collect();
        let backward = sparse(n, &reversed);
        for src in 0..n {
            prop_assert_eq!(dijkstra(&forward, src).dist, dijkstra(&backward, src).dist);
        }
    }

    #[test]
    fn dense_matches_sparse((n, edges) in arb_network()) {
        let matrix = dense(n, &edges);
        let graph = sparse(n, &edges);
        for src in 0..n {
            prop_assert_eq!(dijkstra(&matrix, src).dist, dijkstra(&graph, src).dist);
            prop_assert_eq!(bfs(&matrix, src), bfs(&graph, src));
            prop_assert_eq!(dfs(&matrix, src), dfs(&graph, src));
        }
    }

    #[test]
    fn reconstructed_paths_cost_their_distance((n, edges) in arb_network()) {
        let graph = sparse(n, &edges);
        for src in 0..n {
            let tree = dijkstra(&graph, src);
            for dst in 0..n {
                let path = reconstruct_path(src, dst, &tree.prev);
                if tree.dist[dst].is_finite() {
                    let path = path.expect("reachable node has a path");
                    prop_assert_eq!(path[0], src);
                    prop_assert_eq!(*path.last().unwrap(), dst);
                    prop_assert_eq!(path_cost(&graph, &path), Some(tree.dist[dst]));
                } else {
                    prop_assert!(path.is_none());
                }
            }
        }
    }

    #[test]
    fn astar_agrees_with_dijkstra((coords, edges) in arb_planar_network()) {
        let n = coords.len();
        let graph = sparse(n, &edges);
        for src in 0..n {
            let exact = dijkstra(&graph, src);
            for dst in 0..n {
                let guided = astar(&graph, src, dst, &coords);
                let (a, b) = (guided.dist[dst], exact.dist[dst]);
                if b.is_infinite() {
                    prop_assert!(a.is_infinite());
                } else {
                    prop_assert!((a - b).abs() <= 1e-6 * b.max(1.0), "astar {} vs dijkstra {}", a, b);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Hop-bounded and K-shortest routes
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    #[test]
    fn constrained_respects_leg_budget((n, edges) in arb_network(), max_stops in 0usize..6) {
        let graph = sparse(n, &edges);
        for src in 0..n {
            let hops = bfs(&graph, src);
            for dst in 0..n {
                let route = constrained_shortest_path(&graph, src, dst, max_stops);
                match hops[dst] {
                    Some(h) if h <= max_stops + 1 => {
                        let route = route.expect("feasible within budget");
                        prop_assert_eq!(route.steps, h);
                        prop_assert_eq!(
                            route.cost,
                            brute_force_exact_legs(n, &edges, src, dst, h)
                        );
                        let path = route.path.expect("path reconstructs");
                        prop_assert_eq!(path.len(), route.steps + 1);
                        prop_assert!(is_loopless(&path));
                        prop_assert_eq!(path_cost(&graph, &path), Some(route.cost));
                    }
                    _ => prop_assert!(route.is_none()),
                }
            }
        }
    }

    #[test]
    fn dense_constrained_matches_sparse((n, edges) in arb_network(), max_stops in 0usize..6) {
        let matrix = dense(n, &edges);
        let graph = sparse(n, &edges);
        for src in 0..n {
            for dst in 0..n {
                let from_matrix = constrained_shortest_path(&matrix, src, dst, max_stops);
                let from_lists = constrained_shortest_path(&graph, src, dst, max_stops);
                match (from_matrix, from_lists) {
                    (Some(a), Some(b)) => {
                        prop_assert_eq!(a.steps, b.steps);
                        prop_assert_eq!(a.cost, b.cost);
                        let path = a.path.expect("path reconstructs");
                        prop_assert_eq!(path.len(), a.steps + 1);
                        prop_assert!(is_loopless(&path));
                        prop_assert_eq!(path_cost(&matrix, &path), Some(a.cost));
                    }
                    (None, None) => {}
                    (a, b) => prop_assert!(false, "dense {:?} sparse {:?}", a, b),
                }
            }
        }
    }

    #[test]
    fn tighter_budget_never_improves((n, edges) in arb_network(), max_stops in 0usize..6) {
        let graph = sparse(n, &edges);
        for src in 0..n {
            for dst in 0..n {
                let loose = constrained_shortest_path(&graph, src, dst, max_stops + 1);
                let tight = constrained_shortest_path(&graph, src, dst, max_stops);
                if let Some(tight) = tight {
                    let loose = loose.expect("looser budget stays feasible");
                    prop_assert!(
                        (loose.steps, loose.cost) <= (tight.steps, tight.cost),
                        "loose {:?} tight {:?}", loose, tight
                    );
                }
            }
        }
    }

    #[test]
    fn k_shortest_paths_are_ranked_and_simple((n, edges) in arb_network(), k in 1usize..6) {
        let graph = sparse(n, &edges);
        for src in 0..n {
            for dst in 0..n {
                let paths = k_shortest_paths(&graph, src, dst, k);
                prop_assert!(paths.len() <= k);

                let distinct: BTreeSet<_> = paths.iter().map(|p| p.nodes.clone()).collect();
                prop_assert_eq!(distinct.len(), paths.len());

                for pair in paths.windows(2) {
                    prop_assert!(pair[0].cost <= pair[1].cost);
                }
                for path in &paths {
                    prop_assert!(is_loopless(&path.nodes));
                    prop_assert_eq!(path.nodes[0], src);
                    prop_assert_eq!(*path.nodes.last().unwrap(), dst);
                    prop_assert_eq!(path_cost(&graph, &path.nodes), Some(path.cost));
                }
            }
        }
    }

    #[test]
    fn k_shortest_paths_are_the_cheapest_simple_routes(
        (n, edges) in arb_network(),
        k in 1usize..6,
    ) {
        let graph = sparse(n, &edges);
        let matrix = dense(n, &edges);
        for src in 0..n {
            let all_costs = enumerate_simple_path_costs(&graph, src);
            for dst in 0..n {
                let expected = cheapest_k(all_costs[dst].clone(), k);
                let from_lists: Vec<f64> =
                    k_shortest_paths(&graph, src, dst, k).iter().map(|p| p.cost).collect();
                let from_matrix: Vec<f64> =
                    k_shortest_paths(&matrix, src, dst, k).iter().map(|p| p.cost).collect();
                prop_assert_eq!(&from_lists, &expected);
                prop_assert_eq!(&from_matrix, &expected);
            }
        }
    }

    #[test]
    fn first_k_shortest_path_is_dijkstra((n, edges) in arb_network()) {
        let graph = sparse(n, &edges);
        for src in 0..n {
            let tree = dijkstra(&graph, src);
            for dst in 0..n {
                let paths = k_shortest_paths(&graph, src, dst, 1);
                match tree.path_to(dst) {
                    Some(path) => {
                        prop_assert_eq!(paths.len(), 1);
                        prop_assert_eq!(&paths[0].nodes, &path);
                        prop_assert_eq!(paths[0].cost, tree.dist[dst]);
                    }
                    None => prop_assert!(paths.is_empty()),
                }
            }
        }
    }
}
