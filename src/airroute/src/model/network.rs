use std::collections::{BTreeMap, HashMap};

use anyhow::{bail, Result};

pub type NodeId = usize;

/// A directed route between two airports, identified by code.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSpec {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

impl RouteSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            distance: self.distance,
        }
    }
}

/// Bidirectional mapping between airport codes and dense node indices.
#[derive(Debug, Clone, Default)]
pub struct AirportIndex {
    codes: Vec<String>,
    by_code: HashMap<String, NodeId>,
}

impl AirportIndex {
    pub fn new<I, S>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for code in codes {
            let code = code.into();
            if index.by_code.contains_key(&code) {
                bail!("duplicate airport code {code}");
            }
            index.by_code.insert(code.clone(), index.codes.len());
            index.codes.push(code);
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn index_of(&self, code: &str) -> Option<NodeId> {
        self.by_code.get(code).copied()
    }

    pub fn code_of(&self, node: NodeId) -> Option<&str> {
        self.codes.get(node).map(String::as_str)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Translates a node path into airport codes, `"?"` for unknown indices.
    pub fn path_codes(&self, path: &[NodeId]) -> Vec<String> {
        path.iter()
            .map(|node| self.code_of(*node).unwrap_or("?").to_string())
            .collect()
    }

    pub(crate) fn resolve(&self, route: &RouteSpec) -> Result<(NodeId, NodeId, f64)> {
        let Some(u) = self.index_of(&route.from) else {
            bail!("route references unknown airport {}", route.from);
        };
        let Some(v) = self.index_of(&route.to) else {
            bail!("route references unknown airport {}", route.to);
        };
        if !route.distance.is_finite() || route.distance < 0.0 {
            bail!(
                "route {} -> {} has unsupported distance {}",
                route.from,
                route.to,
                route.distance
            );
        }
        Ok((u, v, route.distance))
    }
}

/// Planar positions used by the A* straight-line heuristic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinates {
    points: Vec<(f64, f64)>,
}

impl Coordinates {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn from_named(index: &AirportIndex, named: &BTreeMap<String, (f64, f64)>) -> Result<Self> {
        let mut points = Vec::with_capacity(index.len());
        for code in index.codes() {
            let Some(point) = named.get(code) else {
                bail!("missing coordinates for airport {code}");
            };
            points.push(*point);
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, node: NodeId) -> (f64, f64) {
        self.points[node]
    }

    pub fn straight_line(&self, u: NodeId, v: NodeId) -> f64 {
        let (x1, y1) = self.points[u];
        let (x2, y2) = self.points[v];
        (x1 - x2).hypot(y1 - y2)
    }
}
