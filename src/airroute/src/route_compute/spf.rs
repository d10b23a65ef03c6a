use tracing::{debug, warn};

use crate::model::{Coordinates, GraphView, NodeId};

use super::frontier::DistanceFrontier;
use super::ShortestPathTree;

/// Single-source shortest paths over non-negative weights.
///
/// Superseded frontier entries are skipped on pop rather than removed when a
/// node's distance improves.
pub fn dijkstra<G: GraphView>(graph: &G, src: NodeId) -> ShortestPathTree {
    let mut tree = ShortestPathTree::rooted_at(src, graph.node_count());
    let mut frontier = DistanceFrontier::new();
    let mut settled = 0usize;

    frontier.push(src, 0.0);

    loop {
        let Some((u, cost_u)) = frontier.pop_min(|node, cost| cost > tree.dist[node]) else {
            break;
        };
        settled += 1;

        for (v, edge_cost) in graph.out_edges(u) {
            let candidate = cost_u + edge_cost;
            if candidate < tree.dist[v] {
                tree.dist[v] = candidate;
                tree.prev[v] = Some(u);
                frontier.push(v, candidate);
            }
        }
    }

    debug!(source = src, settled, "dijkstra finished");
    tree
}

/// Goal-directed search with the straight-line distance to `dst` as heuristic.
pub fn astar<G: GraphView>(
    graph: &G,
    src: NodeId,
    dst: NodeId,
    coords: &Coordinates,
) -> ShortestPathTree {
    astar_with_heuristic(graph, src, dst, |node| coords.straight_line(node, dst))
}

/// A* with an arbitrary heuristic. The heuristic must never overestimate the
/// remaining cost to `dst`, otherwise the reported distance may not be minimal.
pub fn astar_with_heuristic<G, H>(
    graph: &G,
    src: NodeId,
    dst: NodeId,
    heuristic: H,
) -> ShortestPathTree
where
    G: GraphView,
    H: Fn(NodeId) -> f64,
{
    let mut tree = ShortestPathTree::rooted_at(src, graph.node_count());
    let mut frontier = DistanceFrontier::new();
    let mut settled = 0usize;

    frontier.push_keyed(src, heuristic(src), 0.0);

    loop {
        let Some((u, g_u)) = frontier.pop_min(|node, cost| cost > tree.dist[node]) else {
            break;
        };
        if u == dst {
            break;
        }
        settled += 1;

        for (v, edge_cost) in graph.out_edges(u) {
            let candidate = g_u + edge_cost;
            if candidate < tree.dist[v] {
                tree.dist[v] = candidate;
                tree.prev[v] = Some(u);
                frontier.push_keyed(v, candidate + heuristic(v), candidate);
            }
        }
    }

    debug!(source = src, destination = dst, settled, "astar finished");
    tree
}

/// Walks `prev` back from `target`. Returns `None` unless the chain reaches
/// `src`; a partial path is never returned.
pub fn reconstruct_path(src: NodeId, target: NodeId, prev: &[Option<NodeId>]) -> Option<Vec<NodeId>> {
    let mut path = vec![target];
    let mut current = target;

    // a predecessor chain longer than the node count must contain a cycle
    for _ in 0..prev.len() {
        if current == src {
            path.reverse();
            return Some(path);
        }
        current = prev[current]?;
        path.push(current);
    }

    if current == src {
        path.reverse();
        return Some(path);
    }
    warn!(source = src, target, "predecessor chain does not terminate");
    None
}
