use std::collections::VecDeque;

use crate::model::{GraphView, NodeId};

use super::{DfsResult, HopArray};

/// Minimum hop counts from `src`. Nodes are marked when enqueued so each one
/// enters the queue at most once.
pub fn bfs<G: GraphView>(graph: &G, src: NodeId) -> HopArray {
    let n = graph.node_count();
    let mut hops: HopArray = vec![None; n];
    let mut queue = VecDeque::new();

    hops[src] = Some(0);
    queue.push_back(src);

    while let Some(u) = queue.pop_front() {
        let next = hops[u].map_or(0, |h| h + 1);
        for (v, _) in graph.out_edges(u) {
            if hops[v].is_none() {
                hops[v] = Some(next);
                queue.push_back(v);
            }
        }
    }

    hops
}

struct DfsFrame {
    neighbors: Vec<NodeId>,
    cursor: usize,
}

impl DfsFrame {
    fn open<G: GraphView>(graph: &G, node: NodeId) -> Self {
        let mut neighbors: Vec<NodeId> = graph.out_edges(node).map(|(v, _)| v).collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        Self {
            neighbors,
            cursor: 0,
        }
    }
}

/// Depth-first visitation order from `src`, in the same order a recursive
/// walk would produce. Neighbours are visited in ascending index order
/// whatever order the graph stores them in, so both representations agree.
pub fn dfs<G: GraphView>(graph: &G, src: NodeId) -> DfsResult {
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::new();
    let mut stack = vec![DfsFrame::open(graph, src)];

    visited[src] = true;
    order.push(src);

    while let Some(frame) = stack.last_mut() {
        let Some(&v) = frame.neighbors.get(frame.cursor) else {
            stack.pop();
            continue;
        };
        frame.cursor += 1;
        if visited[v] {
            continue;
        }
        visited[v] = true;
        order.push(v);
        stack.push(DfsFrame::open(graph, v));
    }

    DfsResult { visited, order }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{build_dense_graph, build_sparse_graph, RouteSpec, SparseGraph};

    fn chain_with_branch() -> Vec<RouteSpec> {
        vec![
            RouteSpec::new("A", "B", 3.0),
            RouteSpec::new("A", "D", 1.0),
            RouteSpec::new("B", "C", 1.0),
            RouteSpec::new("D", "C", 1.0),
            RouteSpec::new("C", "E", 1.0),
        ]
    }

    #[test]
    fn bfs_counts_hops_not_weights() {
        let (graph, _) =
            build_sparse_graph(&["A", "B", "C", "D", "E", "F"], &chain_with_branch()).unwrap();
        let hops = bfs(&graph, 0);
        assert_eq!(hops, vec![Some(0), Some(1), Some(2), Some(1), Some(3), None]);
    }

    #[test]
    fn bfs_matches_between_representations() {
        let airports = ["A", "B", "C", "D", "E", "F"];
        let (dense, _) = build_dense_graph(&airports, &chain_with_branch()).unwrap();
        let (sparse, _) = build_sparse_graph(&airports, &chain_with_branch()).unwrap();
        for src in 0..airports.len() {
            assert_eq!(bfs(&dense, src), bfs(&sparse, src));
        }
    }

    #[test]
    fn dfs_goes_deep_before_wide() {
        let (graph, _) =
            build_sparse_graph(&["A", "B", "C", "D", "E", "F"], &chain_with_branch()).unwrap();
        let out = dfs(&graph, 0);
        assert_eq!(out.order, vec![0, 1, 2, 4, 3]);
        assert_eq!(out.visited, vec![true, true, true, true, true, false]);
    }

    #[test]
    fn dfs_visits_dense_neighbors_in_index_order() {
        let (graph, _) =
            build_dense_graph(&["A", "B", "C", "D", "E", "F"], &chain_with_branch()).unwrap();
        assert_eq!(dfs(&graph, 0).order, vec![0, 1, 2, 4, 3]);
    }

    #[test]
    fn dfs_order_ignores_route_insertion_order() {
        let airports = ["A", "B", "C", "D"];
        let routes = [
            RouteSpec::new("A", "D", 1.0),
            RouteSpec::new("A", "C", 1.0),
            RouteSpec::new("A", "B", 1.0),
            RouteSpec::new("B", "D", 1.0),
            RouteSpec::new("A", "B", 2.0),
        ];
        let (dense, _) = build_dense_graph(&airports, &routes).unwrap();
        let (sparse, _) = build_sparse_graph(&airports, &routes).unwrap();
        assert_eq!(dfs(&sparse, 0).order, vec![0, 1, 3, 2]);
        assert_eq!(dfs(&dense, 0), dfs(&sparse, 0));
    }

    #[test]
    fn isolated_source_is_still_visited() {
        let mut graph = SparseGraph::new(2);
        graph.add_edge(0, 0, 0.0);
        assert_eq!(bfs(&graph, 0), vec![Some(0), None]);
        let out = dfs(&graph, 0);
        assert_eq!(out.order, vec![0]);
        assert_eq!(out.visited, vec![true, false]);
    }

    #[test]
    fn dfs_handles_long_chains_without_recursion() {
        let n = 100_000;
        let mut graph = SparseGraph::new(n);
        for u in 0..n - 1 {
            graph.add_edge(u, u + 1, 1.0);
        }
        let out = dfs(&graph, 0);
        assert_eq!(out.order.len(), n);
        assert_eq!(out.order.last().copied(), Some(n - 1));
    }
}
