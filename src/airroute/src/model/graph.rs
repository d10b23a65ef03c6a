use std::collections::HashSet;
use std::fmt;

use anyhow::Result;
use serde::Serialize;

use super::network::{AirportIndex, NodeId, RouteSpec};

/// Read-only access to a weighted directed graph over nodes `0..node_count()`.
///
/// Weights are non-negative and finite; a missing edge is `None` from
/// [`GraphView::weight`] and simply absent from [`GraphView::out_edges`].
pub trait GraphView {
    fn node_count(&self) -> usize;

    fn weight(&self, u: NodeId, v: NodeId) -> Option<f64>;

    fn out_edges(&self, u: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_;
}

/// Adjacency matrix, row-major. Absent edges are stored as infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseGraph {
    n: usize,
    weights: Vec<f64>,
}

impl DenseGraph {
    /// Matrix with no edges and a zero diagonal.
    pub fn new(n: usize) -> Self {
        let mut weights = vec![f64::INFINITY; n * n];
        for i in 0..n {
            weights[i * n + i] = 0.0;
        }
        Self { n, weights }
    }

    pub fn set_weight(&mut self, u: NodeId, v: NodeId, weight: f64) {
        self.weights[u * self.n + v] = weight;
    }

    fn row(&self, u: NodeId) -> &[f64] {
        &self.weights[u * self.n..(u + 1) * self.n]
    }
}

impl GraphView for DenseGraph {
    fn node_count(&self) -> usize {
        self.n
    }

    fn weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        let w = self.weights[u * self.n + v];
        w.is_finite().then_some(w)
    }

    fn out_edges(&self, u: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.row(u)
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_finite())
            .map(|(v, w)| (v, *w))
    }
}

/// Adjacency lists kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseGraph {
    adj: Vec<Vec<(NodeId, f64)>>,
}

impl SparseGraph {
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
        }
    }

    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: f64) {
        self.adj[u].push((v, weight));
    }
}

impl GraphView for SparseGraph {
    fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Cheapest of any parallel edges from `u` to `v`.
    fn weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.adj[u]
            .iter()
            .filter(|(x, _)| *x == v)
            .map(|(_, w)| *w)
            .reduce(f64::min)
    }

    fn out_edges(&self, u: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adj[u].iter().copied()
    }
}

/// A view of `graph` with some edges and nodes hidden.
///
/// Suppressed nodes lose both their incoming and outgoing edges. The
/// underlying graph is never copied.
#[derive(Debug)]
pub struct PrunedView<'g, G: GraphView> {
    graph: &'g G,
    blocked_edges: HashSet<(NodeId, NodeId)>,
    blocked_nodes: HashSet<NodeId>,
}

impl<'g, G: GraphView> PrunedView<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            blocked_edges: HashSet::new(),
            blocked_nodes: HashSet::new(),
        }
    }

    pub fn block_edge(&mut self, u: NodeId, v: NodeId) {
        self.blocked_edges.insert((u, v));
    }

    pub fn block_node(&mut self, node: NodeId) {
        self.blocked_nodes.insert(node);
    }

    fn edge_visible(&self, u: NodeId, v: NodeId) -> bool {
        !self.blocked_nodes.contains(&u)
            && !self.blocked_nodes.contains(&v)
            && !self.blocked_edges.contains(&(u, v))
    }
}

impl<G: GraphView> GraphView for PrunedView<'_, G> {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        if !self.edge_visible(u, v) {
            return None;
        }
        self.graph.weight(u, v)
    }

    fn out_edges(&self, u: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let source_blocked = self.blocked_nodes.contains(&u);
        self.graph
            .out_edges(u)
            .filter(move |(v, _)| !source_blocked && self.edge_visible(u, *v))
    }
}

/// Builds the matrix form. Later routes overwrite earlier ones for the same pair.
pub fn build_dense_graph<S: AsRef<str>>(
    airports: &[S],
    routes: &[RouteSpec],
) -> Result<(DenseGraph, AirportIndex)> {
    let index = AirportIndex::new(airports.iter().map(|code| code.as_ref().to_string()))?;
    let mut graph = DenseGraph::new(index.len());
    for route in routes {
        let (u, v, w) = index.resolve(route)?;
        graph.set_weight(u, v, w);
    }
    Ok((graph, index))
}

/// Builds the adjacency-list form. Parallel routes are all kept.
pub fn build_sparse_graph<S: AsRef<str>>(
    airports: &[S],
    routes: &[RouteSpec],
) -> Result<(SparseGraph, AirportIndex)> {
    let index = AirportIndex::new(airports.iter().map(|code| code.as_ref().to_string()))?;
    let mut graph = SparseGraph::new(index.len());
    for route in routes {
        let (u, v, w) = index.resolve(route)?;
        graph.add_edge(u, v, w);
    }
    Ok((graph, index))
}

/// Sum of edge weights along `path`; `None` if a hop has no edge.
pub fn path_cost<G: GraphView>(graph: &G, path: &[NodeId]) -> Option<f64> {
    let mut cost = 0.0;
    for hop in path.windows(2) {
        cost += graph.weight(hop[0], hop[1])?;
    }
    Some(cost)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub possible_edges: usize,
    pub density: f64,
}

impl GraphStats {
    /// Self-loops, including the dense zero diagonal, are not counted.
    pub fn of<G: GraphView>(graph: &G) -> Self {
        let nodes = graph.node_count();
        let edges = (0..nodes)
            .map(|u| graph.out_edges(u).filter(|(v, _)| *v != u).count())
            .sum();
        let possible_edges = nodes * nodes.saturating_sub(1);
        let density = if possible_edges == 0 {
            0.0
        } else {
            edges as f64 / possible_edges as f64
        };
        Self {
            nodes,
            edges,
            possible_edges,
            density,
        }
    }
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "airports: {}", self.nodes)?;
        writeln!(f, "routes: {} of {} possible", self.edges, self.possible_edges)?;
        writeln!(f, "density: {:.1}%", self.density * 100.0)
    }
}
