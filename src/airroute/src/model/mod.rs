pub mod graph;
pub mod network;

pub use graph::{
    build_dense_graph, build_sparse_graph, path_cost, DenseGraph, GraphStats, GraphView,
    PrunedView, SparseGraph,
};
pub use network::{AirportIndex, Coordinates, NodeId, RouteSpec};
