use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use tracing::debug;

use crate::model::{path_cost, GraphView, NodeId, PrunedView};

use super::spf::dijkstra;
use super::PathCandidate;

pub fn compare_path_candidate(a: &PathCandidate, b: &PathCandidate) -> Ordering {
    a.cost
        .total_cmp(&b.cost)
        .then_with(|| a.nodes.cmp(&b.nodes))
}

#[derive(Debug)]
struct RankedCandidate(PathCandidate);

impl PartialEq for RankedCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedCandidate {}

impl Ord for RankedCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_path_candidate(&other.0, &self.0)
    }
}

impl PartialOrd for RankedCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Yen's algorithm: up to `k_paths` loopless routes from `src` to `dst`,
/// cheapest first, ties broken by node sequence.
///
/// Each spur search runs Dijkstra over a [`PrunedView`] that hides the edges
/// already taken by accepted routes sharing the same root, and the root's own
/// nodes. Candidate costs are always measured on the unpruned `graph`.
pub fn k_shortest_paths<G: GraphView>(
    graph: &G,
    src: NodeId,
    dst: NodeId,
    k_paths: usize,
) -> Vec<PathCandidate> {
    if k_paths == 0 {
        return Vec::new();
    }

    let tree = dijkstra(graph, src);
    let Some(first) = tree.path_to(dst) else {
        return Vec::new();
    };

    let mut accepted = vec![PathCandidate {
        nodes: first,
        cost: tree.dist[dst],
    }];
    let mut candidates: BinaryHeap<RankedCandidate> = BinaryHeap::new();
    let mut seen: BTreeSet<Vec<NodeId>> = BTreeSet::new();
    seen.insert(accepted[0].nodes.clone());

    while accepted.len() < k_paths {
        let previous = &accepted[accepted.len() - 1];
        let mut generated = 0usize;

        for spur_idx in 0..previous.nodes.len().saturating_sub(1) {
            let spur_node = previous.nodes[spur_idx];
            let root_path = &previous.nodes[..=spur_idx];

            let mut view = PrunedView::new(graph);
            for path in &accepted {
                if path.nodes.len() > spur_idx + 1 && path.nodes[..=spur_idx] == *root_path {
                    view.block_edge(path.nodes[spur_idx], path.nodes[spur_idx + 1]);
                }
            }
            for node in &root_path[..spur_idx] {
                view.block_node(*node);
            }

            let Some(spur_path) = dijkstra(&view, spur_node).path_to(dst) else {
                continue;
            };

            let mut total_nodes = root_path[..spur_idx].to_vec();
            total_nodes.extend(spur_path);

            let Some(cost) = path_cost(graph, &total_nodes) else {
                continue;
            };
            if !seen.insert(total_nodes.clone()) {
                continue;
            }

            candidates.push(RankedCandidate(PathCandidate {
                nodes: total_nodes,
                cost,
            }));
            generated += 1;
        }

        debug!(
            rank = accepted.len() + 1,
            generated,
            pool = candidates.len(),
            "yen spur pass finished"
        );

        let Some(RankedCandidate(best)) = candidates.pop() else {
            break;
        };
        accepted.push(best);
    }

    accepted
}
