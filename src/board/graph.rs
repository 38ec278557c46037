//! Territory graph: the static map every game is played on.
//!
//! Regions are stored in an arena indexed by `RegionId`; edges are kept as a
//! flat list of id pairs plus a per-region adjacency index built from it.
//! Edges are undirected: registering A-B makes B reachable from A and A
//! reachable from B.
//!
//! The graph is built once (by hand, or from a `MapDefinition`) and then
//! validated. Nothing mutates it once a game has started.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::region::{Edge, EdgeKind, Region, RegionId};

/// Structural problems with a map. Any of these disqualifies the map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("duplicate region key '{0}'")]
    DuplicateRegion(String),

    #[error("unknown region key '{0}'")]
    UnknownRegion(String),

    #[error("edge from region '{0}' to itself")]
    SelfLoop(String),

    #[error("duplicate edge between '{0}' and '{1}'")]
    DuplicateEdge(String, String),

    #[error("map has more than {} regions", u16::MAX)]
    TooManyRegions,

    #[error("map is not connected")]
    Disconnected,

    #[error("continent '{0}' is split into disconnected land components")]
    ContinentSplit(String),

    #[error("map contains duplicate edges or self-loops")]
    InvalidEdges,

    #[error("start region '{0}' is not on the map")]
    UnknownStartRegion(String),

    #[error("map has no start region")]
    MissingStartRegion,
}

/// A region entry in a map definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDef {
    pub key: String,
    pub name: String,
    pub continent: String,
}

/// An edge entry in a map definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDef {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub water: bool,
}

/// Already-parsed map content handed over by the map loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDefinition {
    pub regions: Vec<RegionDef>,
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
    #[serde(default)]
    pub start: Option<String>,
}

impl MapDefinition {
    /// Decodes a map definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Undirected graph of regions with land/water edges and continent tags.
#[derive(Debug, Clone, Default)]
pub struct TerritoryGraph {
    regions: Vec<Region>,
    by_key: HashMap<String, RegionId>,
    edges: Vec<Edge>,
    /// Neighbours of each region, indexed by `RegionId`.
    adjacency: Vec<Vec<(RegionId, EdgeKind)>>,
    /// Unordered endpoint pairs of every accepted edge.
    pairs: HashSet<(RegionId, RegionId)>,
    start: Option<RegionId>,
}

impl TerritoryGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a definition, rejecting bad edges as they are added.
    pub fn from_definition(def: &MapDefinition) -> Result<Self, MapError> {
        let mut graph = Self::new();
        for r in &def.regions {
            graph.add_region(&r.key, &r.name, &r.continent)?;
        }
        for e in &def.edges {
            graph.add_edge(&e.from, &e.to, e.water)?;
        }
        if let Some(start) = &def.start {
            graph.set_start_region(start)?;
        }
        Ok(graph)
    }

    /// Builds a graph from a definition without the duplicate and self-loop
    /// checks, so that `validate_edges` can judge the result afterwards.
    ///
    /// Unknown endpoints and duplicate region keys still fail, since they
    /// cannot be represented at all.
    pub fn from_untrusted(def: &MapDefinition) -> Result<Self, MapError> {
        let mut graph = Self::new();
        for r in &def.regions {
            graph.add_region(&r.key, &r.name, &r.continent)?;
        }
        for e in &def.edges {
            let a = graph.lookup(&e.from)?;
            let b = graph.lookup(&e.to)?;
            graph.record_edge(a, b, EdgeKind::from_water(e.water));
        }
        if let Some(start) = &def.start {
            graph.set_start_region(start)?;
        }
        Ok(graph)
    }

    /// Adds a region. Keys are unique within a map.
    pub fn add_region(&mut self, key: &str, name: &str, continent: &str) -> Result<RegionId, MapError> {
        if self.by_key.contains_key(key) {
            return Err(MapError::DuplicateRegion(key.to_string()));
        }
        let idx = u16::try_from(self.regions.len()).map_err(|_| MapError::TooManyRegions)?;
        let id = RegionId(idx);
        self.regions.push(Region {
            id,
            key: key.to_string(),
            name: name.to_string(),
            continent: continent.to_string(),
        });
        self.by_key.insert(key.to_string(), id);
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Adds an undirected edge between two existing regions.
    ///
    /// At most one edge may exist per unordered pair, whatever its kind.
    pub fn add_edge(&mut self, a: &str, b: &str, water: bool) -> Result<(), MapError> {
        let ia = self.lookup(a)?;
        let ib = self.lookup(b)?;
        if ia == ib {
            return Err(MapError::SelfLoop(a.to_string()));
        }
        let pair = if ia < ib { (ia, ib) } else { (ib, ia) };
        if self.pairs.contains(&pair) {
            return Err(MapError::DuplicateEdge(a.to_string(), b.to_string()));
        }
        self.record_edge(ia, ib, EdgeKind::from_water(water));
        Ok(())
    }

    fn record_edge(&mut self, a: RegionId, b: RegionId, kind: EdgeKind) {
        let edge = Edge { a, b, kind };
        self.pairs.insert(edge.unordered());
        self.edges.push(edge);
        self.adjacency[a.index()].push((b, kind));
        if a != b {
            self.adjacency[b.index()].push((a, kind));
        }
    }

    fn lookup(&self, key: &str) -> Result<RegionId, MapError> {
        self.region_id(key)
            .ok_or_else(|| MapError::UnknownRegion(key.to_string()))
    }

    /// Designates the region where new armies enter the board.
    pub fn set_start_region(&mut self, key: &str) -> Result<RegionId, MapError> {
        let id = self
            .region_id(key)
            .ok_or_else(|| MapError::UnknownStartRegion(key.to_string()))?;
        self.start = Some(id);
        Ok(id)
    }

    pub fn start_region(&self) -> Option<RegionId> {
        self.start
    }

    /// Returns true if every region is reachable from every other one,
    /// following edges of either kind. An empty graph is connected.
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.regions.first() else {
            return true;
        };
        let reached = self.reachable_from(first.id, |_, _, _| true);
        reached.len() == self.regions.len()
    }

    /// Returns true if each continent's land-only induced subgraph is connected.
    ///
    /// Water edges and edges leaving the continent do not count. A land edge
    /// between two continents is allowed; it just does not help either one.
    pub fn validate_continents(&self) -> bool {
        self.split_continent().is_none()
    }

    /// Returns the name of the first continent (by name) whose land
    /// component is split, if any.
    pub fn split_continent(&self) -> Option<String> {
        for (name, members) in self.continents() {
            let Some(&first) = members.first() else {
                continue;
            };
            let reached = self.reachable_from(first, |graph, to, kind| {
                kind == EdgeKind::Land && graph.regions[to.index()].continent == name
            });
            if reached.len() != members.len() {
                return Some(name.to_string());
            }
        }
        None
    }

    /// Returns true if no self-loops and no repeated unordered pairs exist.
    pub fn validate_edges(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.edges.len());
        self.edges()
            .iter()
            .all(|e| !e.is_self_loop() && seen.insert(e.unordered()))
    }

    /// Runs every structural check a map must pass before a game uses it.
    pub fn validate(&self) -> Result<(), MapError> {
        if !self.validate_edges() {
            return Err(MapError::InvalidEdges);
        }
        if !self.is_connected() {
            return Err(MapError::Disconnected);
        }
        if let Some(name) = self.split_continent() {
            return Err(MapError::ContinentSplit(name));
        }
        if self.start.is_none() {
            return Err(MapError::MissingStartRegion);
        }
        Ok(())
    }

    /// Returns true if an edge joins `a` and `b`. Water edges only count
    /// when `allow_water` is set.
    pub fn is_adjacent(&self, a: RegionId, b: RegionId, allow_water: bool) -> bool {
        self.adjacency
            .get(a.index())
            .is_some_and(|n| n.iter().any(|&(to, kind)| to == b && (allow_water || !kind.is_water())))
    }

    /// Breadth-first search from `from`, following edges accepted by `follow`.
    fn reachable_from<F>(&self, from: RegionId, follow: F) -> HashSet<RegionId>
    where
        F: Fn(&Self, RegionId, EdgeKind) -> bool,
    {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(from);
        queue.push_back(from);
        while let Some(cur) = queue.pop_front() {
            for &(next, kind) in &self.adjacency[cur.index()] {
                if !seen.contains(&next) && follow(self, next, kind) {
                    seen.insert(next);
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    pub fn region_id(&self, key: &str) -> Option<RegionId> {
        self.by_key.get(key).copied()
    }

    pub fn contains(&self, id: RegionId) -> bool {
        id.index() < self.regions.len()
    }

    /// All regions in arena order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// All recorded edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbours of a region together with the kind of the connecting edge.
    pub fn neighbours(&self, id: RegionId) -> &[(RegionId, EdgeKind)] {
        self.adjacency
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Continent name to member regions, ordered by name then id.
    pub fn continents(&self) -> BTreeMap<&str, Vec<RegionId>> {
        let mut out: BTreeMap<&str, Vec<RegionId>> = BTreeMap::new();
        for r in &self.regions {
            out.entry(r.continent.as_str()).or_default().push(r.id);
        }
        out
    }

    pub fn continent_of(&self, id: RegionId) -> Option<&str> {
        self.region(id).map(|r| r.continent.as_str())
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
