use crate::state::{ProvinceId, WorldState};
use game_pathfinding::Graph;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Graph of province adjacencies.
///
/// Neighbor sets are ordered so searches over the graph are reproducible.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdjacencyGraph {
    /// Map of province ID to adjacent province IDs
    adjacencies: BTreeMap<ProvinceId, BTreeSet<ProvinceId>>,
}

impl AdjacencyGraph {
    /// Create a new empty adjacency graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw edge list. Edges are undirected; self-loops are ignored.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (ProvinceId, ProvinceId)>,
    {
        let mut graph = Self::new();
        for (p1, p2) in edges {
            graph.add_adjacency(p1, p2);
        }
        graph
    }

    /// Add a bidirectional adjacency between two provinces.
    pub fn add_adjacency(&mut self, p1: ProvinceId, p2: ProvinceId) {
        if p1 == p2 {
            return;
        }
        self.adjacencies.entry(p1).or_default().insert(p2);
        self.adjacencies.entry(p2).or_default().insert(p1);
    }

    /// Get all neighbors of a province, in ascending id order.
    pub fn neighbors(&self, province: ProvinceId) -> Vec<ProvinceId> {
        self.adjacencies
            .get(&province)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Get total number of provinces in the graph.
    pub fn province_count(&self) -> usize {
        self.adjacencies.len()
    }
}

impl Graph<ProvinceId, WorldState> for AdjacencyGraph {
    fn neighbors(&self, node: ProvinceId, _context: &WorldState) -> Vec<ProvinceId> {
        AdjacencyGraph::neighbors(self, node)
    }
}
