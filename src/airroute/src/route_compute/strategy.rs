use std::fmt;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::model::{AirportIndex, Coordinates, DenseGraph, GraphView, NodeId, SparseGraph};

use super::{astar, bfs, constrained_shortest_path, dfs, dijkstra, k_shortest_paths};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
    Constrained { max_stops: usize },
    KShortest { k_paths: usize },
}

impl RouteAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
            Self::Constrained { .. } => "constrained",
            Self::KShortest { .. } => "yen_ksp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteQuery {
    pub source: NodeId,
    pub destination: NodeId,
    pub algorithm: RouteAlgorithm,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRoute {
    pub airports: Vec<String>,
    pub legs: usize,
    pub distance: f64,
}

impl NamedRoute {
    fn new(index: &AirportIndex, nodes: &[NodeId], distance: f64) -> Self {
        Self {
            airports: index.path_codes(nodes),
            legs: nodes.len().saturating_sub(1),
            distance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub algorithm: String,
    pub source: String,
    pub destination: String,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hops: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_order: Option<Vec<String>>,
    pub routes: Vec<NamedRoute>,
}

impl RouteReport {
    fn empty(index: &AirportIndex, query: &RouteQuery) -> Self {
        Self {
            algorithm: query.algorithm.name().to_string(),
            source: code(index, query.source),
            destination: code(index, query.destination),
            reachable: false,
            hops: None,
            visit_order: None,
            routes: Vec::new(),
        }
    }
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} -> {}",
            self.algorithm, self.source, self.destination
        )?;
        if !self.reachable {
            return writeln!(f, "  not reachable");
        }
        if let Some(hops) = self.hops {
            writeln!(f, "  reachable in {hops} hops")?;
        }
        if let Some(order) = &self.visit_order {
            writeln!(f, "  traversal order: {}", order.join(" "))?;
        }
        for (rank, route) in self.routes.iter().enumerate() {
            writeln!(
                f,
                "  {}: {} ({:.2}, {} legs)",
                rank + 1,
                route.airports.join(" → "),
                route.distance,
                route.legs
            )?;
        }
        Ok(())
    }
}

fn code(index: &AirportIndex, node: NodeId) -> String {
    index.code_of(node).unwrap_or("?").to_string()
}

/// Runs `query` on `graph` and names the result with `index`.
///
/// A* requires `coords`; every other algorithm ignores them.
pub fn compute_route_report<G: GraphView>(
    graph: &G,
    index: &AirportIndex,
    coords: Option<&Coordinates>,
    query: &RouteQuery,
) -> Result<RouteReport> {
    let n = graph.node_count();
    if query.source >= n || query.destination >= n {
        bail!(
            "query endpoints {} -> {} outside graph of {n} airports",
            query.source,
            query.destination
        );
    }

    let (src, dst) = (query.source, query.destination);
    let mut report = RouteReport::empty(index, query);

    match query.algorithm {
        RouteAlgorithm::Bfs => {
            report.hops = bfs(graph, src)[dst];
            report.reachable = report.hops.is_some();
        }
        RouteAlgorithm::Dfs => {
            let out = dfs(graph, src);
            report.reachable = out.visited[dst];
            report.visit_order = Some(index.path_codes(&out.order));
        }
        RouteAlgorithm::Dijkstra => {
            let tree = dijkstra(graph, src);
            if let Some(path) = tree.path_to(dst) {
                report.routes.push(NamedRoute::new(index, &path, tree.dist[dst]));
            }
            report.reachable = !report.routes.is_empty();
        }
        RouteAlgorithm::AStar => {
            let Some(coords) = coords else {
                bail!("astar needs coordinates for every airport");
            };
            if coords.len() != n {
                bail!(
                    "astar needs {n} coordinates, network provides {}",
                    coords.len()
                );
            }
            let tree = astar(graph, src, dst, coords);
            if let Some(path) = tree.path_to(dst) {
                report.routes.push(NamedRoute::new(index, &path, tree.dist[dst]));
            }
            report.reachable = !report.routes.is_empty();
        }
        RouteAlgorithm::Constrained { max_stops } => {
            if let Some(route) = constrained_shortest_path(graph, src, dst, max_stops) {
                report.reachable = true;
                report.hops = Some(route.steps);
                if let Some(path) = route.path {
                    report.routes.push(NamedRoute::new(index, &path, route.cost));
                }
            }
        }
        RouteAlgorithm::KShortest { k_paths } => {
            report.routes = k_shortest_paths(graph, src, dst, k_paths)
                .iter()
                .map(|candidate| NamedRoute::new(index, &candidate.nodes, candidate.cost))
                .collect();
            report.reachable = !report.routes.is_empty();
        }
    }

    Ok(report)
}

/// Dijkstra on both representations of the same network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepresentationComparison {
    pub source: String,
    pub destination: String,
    pub dense: Option<NamedRoute>,
    pub sparse: Option<NamedRoute>,
    pub agree: bool,
}

impl fmt::Display for RepresentationComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "compare: {} -> {}", self.source, self.destination)?;
        for (label, route) in [("dense", &self.dense), ("sparse", &self.sparse)] {
            match route {
                Some(route) => writeln!(
                    f,
                    "  {label}: {} ({:.2})",
                    route.airports.join(" → "),
                    route.distance
                )?,
                None => writeln!(f, "  {label}: not reachable")?,
            }
        }
        writeln!(
            f,
            "  distances {}",
            if self.agree { "agree" } else { "DIFFER" }
        )
    }
}

pub fn compare_representations(
    dense: &DenseGraph,
    sparse: &SparseGraph,
    index: &AirportIndex,
    src: NodeId,
    dst: NodeId,
) -> RepresentationComparison {
    let shortest = |tree: super::ShortestPathTree| {
        tree.path_to(dst)
            .map(|path| NamedRoute::new(index, &path, tree.dist[dst]))
    };
    let dense_route = shortest(dijkstra(dense, src));
    let sparse_route = shortest(dijkstra(sparse, src));

    let agree = match (&dense_route, &sparse_route) {
        (Some(a), Some(b)) => (a.distance - b.distance).abs() <= 1e-9,
        (None, None) => true,
        _ => false,
    };

    RepresentationComparison {
        source: code(index, src),
        destination: code(index, dst),
        dense: dense_route,
        sparse: sparse_route,
        agree,
    }
}
