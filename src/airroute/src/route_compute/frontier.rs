use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::model::NodeId;

#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    node: NodeId,
    key: f64,
    cost: f64,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.cost.total_cmp(&self.cost))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-frontier with lazy deletion. Entries are ordered by `key`, which is the
/// accumulated cost for Dijkstra and cost plus heuristic for A*.
#[derive(Debug, Default, Clone)]
pub struct DistanceFrontier {
    heap: BinaryHeap<QueueEntry>,
}

impl DistanceFrontier {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, node: NodeId, cost: f64) {
        self.push_keyed(node, cost, cost);
    }

    pub fn push_keyed(&mut self, node: NodeId, key: f64, cost: f64) {
        self.heap.push(QueueEntry { node, key, cost });
    }

    /// Pops the smallest entry that `is_stale(node, cost)` does not reject.
    pub fn pop_min<F>(&mut self, mut is_stale: F) -> Option<(NodeId, f64)>
    where
        F: FnMut(NodeId, f64) -> bool,
    {
        while let Some(entry) = self.heap.pop() {
            if is_stale(entry.node, entry.cost) {
                continue;
            }
            return Some((entry.node, entry.cost));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct StepEntry {
    steps: usize,
    cost: f64,
    node: NodeId,
}

impl Eq for StepEntry {}

impl Ord for StepEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .steps
            .cmp(&self.steps)
            .then_with(|| other.cost.total_cmp(&self.cost))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for StepEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-frontier over `(steps, cost, node)`, lexicographic on steps then cost.
#[derive(Debug, Default, Clone)]
pub struct StepFrontier {
    heap: BinaryHeap<StepEntry>,
}

impl StepFrontier {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, steps: usize, cost: f64, node: NodeId) {
        self.heap.push(StepEntry { steps, cost, node });
    }

    pub fn pop_min<F>(&mut self, mut is_stale: F) -> Option<(usize, f64, NodeId)>
    where
        F: FnMut(usize, f64, NodeId) -> bool,
    {
        while let Some(entry) = self.heap.pop() {
            if is_stale(entry.steps, entry.cost, entry.node) {
                continue;
            }
            return Some((entry.steps, entry.cost, entry.node));
        }
        None
    }
}
