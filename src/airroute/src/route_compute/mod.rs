mod constrained;
mod frontier;
mod ksp;
mod spf;
mod strategy;
mod traversal;
mod types;

pub use constrained::constrained_shortest_path;
pub use ksp::{compare_path_candidate, k_shortest_paths};
pub use spf::{astar, astar_with_heuristic, dijkstra, reconstruct_path};
pub use strategy::{
    compare_representations, compute_route_report, NamedRoute, RepresentationComparison,
    RouteAlgorithm, RouteQuery, RouteReport,
};
pub use traversal::{bfs, dfs};
pub use types::{ConstrainedRoute, DfsResult, HopArray, PathCandidate, ShortestPathTree};
