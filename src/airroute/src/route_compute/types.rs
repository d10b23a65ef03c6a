use serde::Serialize;

use crate::model::NodeId;

use super::spf::reconstruct_path;

/// Hop counts from a BFS source; `None` marks unreachable nodes.
pub type HopArray = Vec<Option<usize>>;

#[derive(Debug, Clone, PartialEq)]
pub struct DfsResult {
    pub visited: Vec<bool>,
    pub order: Vec<NodeId>,
}

/// Distance and predecessor arrays produced by Dijkstra or A*.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    pub source: NodeId,
    pub dist: Vec<f64>,
    pub prev: Vec<Option<NodeId>>,
}

impl ShortestPathTree {
    pub(crate) fn rooted_at(source: NodeId, n: usize) -> Self {
        let mut dist = vec![f64::INFINITY; n];
        dist[source] = 0.0;
        Self {
            source,
            dist,
            prev: vec![None; n],
        }
    }

    pub fn distance(&self, node: NodeId) -> Option<f64> {
        let d = self.dist[node];
        d.is_finite().then_some(d)
    }

    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if self.distance(target).is_none() {
            return None;
        }
        reconstruct_path(self.source, target, &self.prev)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathCandidate {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

/// Outcome of a hop-bounded search that reached its destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstrainedRoute {
    pub steps: usize,
    pub cost: f64,
    pub path: Option<Vec<NodeId>>,
}
