use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::model::{
    build_dense_graph, build_sparse_graph, AirportIndex, Coordinates, DenseGraph, RouteSpec,
    SparseGraph,
};

/// An airport network as read from disk, before graph construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub airports: Vec<String>,
    pub coordinates: BTreeMap<String, (f64, f64)>,
    pub routes: Vec<RouteSpec>,
}

impl NetworkConfig {
    pub fn build_sparse(&self) -> Result<(SparseGraph, AirportIndex)> {
        build_sparse_graph(&self.airports, &self.routes).context("failed to build adjacency list")
    }

    pub fn build_dense(&self) -> Result<(DenseGraph, AirportIndex)> {
        build_dense_graph(&self.airports, &self.routes).context("failed to build adjacency matrix")
    }

    /// `None` when the network carries no coordinates at all.
    pub fn coordinates(&self, index: &AirportIndex) -> Result<Option<Coordinates>> {
        if self.coordinates.is_empty() {
            return Ok(None);
        }
        Coordinates::from_named(index, &self.coordinates).map(Some)
    }
}

#[derive(Debug, Deserialize)]
struct RawAirport {
    code: String,
    coords: Option<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    from: String,
    to: String,
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct RawNetworkConfig {
    #[serde(default)]
    bidirectional: bool,
    airports: Vec<RawAirport>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

pub fn load_network_config(path: &Path) -> Result<NetworkConfig> {
    let raw_text = fs::read_to_string(path)
        .with_context(|| format!("failed to read network file {}", path.display()))?;
    parse_network_config(&raw_text)
        .with_context(|| format!("invalid network file {}", path.display()))
}

pub fn parse_network_config(raw_text: &str) -> Result<NetworkConfig> {
    let raw_cfg: RawNetworkConfig =
        serde_yaml::from_str(raw_text).context("failed to parse network yaml")?;

    let mut airports = Vec::with_capacity(raw_cfg.airports.len());
    let mut coordinates = BTreeMap::new();
    for item in raw_cfg.airports {
        let code = normalize_code(&item.code)?;
        if let Some([x, y]) = item.coords {
            coordinates.insert(code.clone(), (x, y));
        }
        airports.push(code);
    }

    let mut routes = Vec::with_capacity(raw_cfg.routes.len() * 2);
    for item in raw_cfg.routes {
        let route = RouteSpec::new(
            normalize_code(&item.from)?,
            normalize_code(&item.to)?,
            item.distance,
        );
        let mirror = raw_cfg.bidirectional.then(|| route.reversed());
        routes.push(route);
        routes.extend(mirror);
    }

    Ok(NetworkConfig {
        airports,
        coordinates,
        routes,
    })
}

fn normalize_code(raw: &str) -> Result<String> {
    let code = raw.trim().to_uppercase();
    if code.is_empty() {
        bail!("empty airport code");
    }
    Ok(code)
}
