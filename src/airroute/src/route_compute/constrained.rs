use tracing::debug;

use crate::model::{GraphView, NodeId};

use super::frontier::StepFrontier;
use super::ConstrainedRoute;

/// Route from `src` to `dst` using at most `max_stops` intermediate airports,
/// minimising the number of legs first and total distance second.
///
/// Returns `None` when no route fits within `max_stops + 1` legs.
pub fn constrained_shortest_path<G: GraphView>(
    graph: &G,
    src: NodeId,
    dst: NodeId,
    max_stops: usize,
) -> Option<ConstrainedRoute> {
    let n = graph.node_count();
    // a fewest-legs route is simple, so it never needs more than n - 1 legs
    let max_edges = max_stops.saturating_add(1).min(n.saturating_sub(1));

    // layer `s` holds the best cost of reaching each node in exactly `s` legs
    let mut dist = vec![vec![f64::INFINITY; n]; max_edges + 1];
    let mut parent: Vec<Vec<Option<NodeId>>> = vec![vec![None; n]; max_edges + 1];
    let mut frontier = StepFrontier::new();

    dist[0][src] = 0.0;
    frontier.push(0, 0.0, src);

    loop {
        let Some((steps, cost_u, u)) =
            frontier.pop_min(|steps, cost, node| cost > dist[steps][node])
        else {
            break;
        };

        if u == dst {
            let path = reconstruct_layered_path(&parent, src, dst, steps);
            return Some(ConstrainedRoute {
                steps,
                cost: cost_u,
                path,
            });
        }
        if steps == max_edges {
            continue;
        }

        let next = steps + 1;
        for (v, edge_cost) in graph.out_edges(u) {
            let candidate = cost_u + edge_cost;
            if candidate < dist[next][v] {
                dist[next][v] = candidate;
                parent[next][v] = Some(u);
                frontier.push(next, candidate, v);
            }
        }
    }

    debug!(
        source = src,
        destination = dst,
        max_stops,
        "no route within stop limit"
    );
    None
}

fn reconstruct_layered_path(
    parent: &[Vec<Option<NodeId>>],
    src: NodeId,
    dst: NodeId,
    steps: usize,
) -> Option<Vec<NodeId>> {
    let mut path = vec![dst];
    let mut current = dst;
    let mut layer = steps;

    while !(current == src && layer == 0) {
        if layer == 0 {
            return None;
        }
        current = parent[layer][current]?;
        layer -= 1;
        path.push(current);
    }

    path.reverse();
    Some(path)
}
