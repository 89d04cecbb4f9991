//! FamilyGraph - relationship index over a family tree.
//!
//! Stores the topology of a `FamilyTreeData` in petgraph's StableGraph so the
//! rendering layer can ask "who are this person's parents / children /
//! spouses / siblings" without rescanning the edge list.

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};

use super::edge::RelationType;
use super::tree::FamilyTreeData;

/// Relationship index keyed by node id.
///
/// Parent-child edges are stored parent → child. Spouse and sibling edges are
/// stored as given and queried in both directions.
pub struct FamilyGraph {
    /// Nodes store their node id, edges their relation type.
    graph: StableGraph<String, RelationType, Directed>,

    /// Map from node id to petgraph NodeIndex
    index: HashMap<String, NodeIndex>,
}

impl FamilyGraph {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            index: HashMap::new(),
        }
    }

    fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            graph: StableGraph::with_capacity(node_capacity, edge_capacity),
            index: HashMap::with_capacity(node_capacity),
        }
    }

    /// Index every node and edge of a tree.
    ///
    /// Edges whose endpoints are not nodes of the tree are skipped; run the
    /// validator first to have them reported instead.
    pub fn from_tree(tree: &FamilyTreeData) -> Self {
        let mut graph = Self::with_capacity(tree.nodes.len(), tree.edges.len());
        for node in &tree.nodes {
            graph.add_person(&node.id);
        }
        for edge in &tree.edges {
            if !graph.add_relation(&edge.source, &edge.target, edge.relation_type()) {
                tracing::warn!(
                    edge = %edge.id,
                    source = %edge.source,
                    target = %edge.target,
                    "skipping edge with unknown endpoint"
                );
            }
        }
        graph
    }

    /// Returns false if the id was already present.
    fn add_person(&mut self, id: &str) -> bool {
        if self.index.contains_key(id) {
            return false;
        }
        let index = self.graph.add_node(id.to_string());
        self.index.insert(id.to_string(), index);
        true
    }

    /// Returns false if either endpoint is unknown.
    fn add_relation(&mut self, source: &str, target: &str, relation: RelationType) -> bool {
        let (Some(&source), Some(&target)) = (self.index.get(source), self.index.get(target))
        else {
            return false;
        };
        self.graph.add_edge(source, target, relation);
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of indexed people.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of indexed relations.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether a person is indexed.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Parents: sources of incoming parent-child edges.
    pub fn parents(&self, id: &str) -> Vec<&str> {
        self.directed(id, RelationType::ParentChild, Direction::Incoming)
    }

    /// Children: targets of outgoing parent-child edges.
    pub fn children(&self, id: &str) -> Vec<&str> {
        self.directed(id, RelationType::ParentChild, Direction::Outgoing)
    }

    /// Spouses, regardless of which side recorded the edge.
    pub fn spouses(&self, id: &str) -> Vec<&str> {
        self.relatives(id, RelationType::Spouse)
    }

    /// Siblings, regardless of which side recorded the edge.
    pub fn siblings(&self, id: &str) -> Vec<&str> {
        self.relatives(id, RelationType::Sibling)
    }

    /// Everyone linked to `id` by `relation`, in either direction.
    pub fn relatives(&self, id: &str, relation: RelationType) -> Vec<&str> {
        self.collect(id, Some(relation))
    }

    /// Everyone linked to `id` by any relation.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.collect(id, None)
    }

    fn directed(&self, id: &str, relation: RelationType, direction: Direction) -> Vec<&str> {
        let Some(&index) = self.index.get(id) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        self.graph
            .edges_directed(index, direction)
            .filter(|edge| *edge.weight() == relation)
            .map(|edge| match direction {
                Direction::Incoming => edge.source(),
                Direction::Outgoing => edge.target(),
            })
            .filter(|&other| seen.insert(other))
            .filter_map(|other| self.graph.node_weight(other).map(String::as_str))
            .collect()
    }

    fn collect(&self, id: &str, relation: Option<RelationType>) -> Vec<&str> {
        let Some(&index) = self.index.get(id) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        self.graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| (edge.target(), *edge.weight()))
            .chain(
                self.graph
                    .edges_directed(index, Direction::Incoming)
                    .map(|edge| (edge.source(), *edge.weight())),
            )
            .filter(|&(other, weight)| other != index && relation.is_none_or(|r| r == weight))
            .filter(|&(other, _)| seen.insert(other))
            .filter_map(|(other, _)| self.graph.node_weight(other).map(String::as_str))
            .collect()
    }
}

impl Default for FamilyGraph {
    fn default() -> Self {
        Self::new()
    }
}
