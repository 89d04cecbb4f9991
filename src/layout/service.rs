//! LayoutService - memoized entry point for tree building and layout.
//!
//! The service owns three bounded FIFO caches:
//! - layout cache: `generate_layout` results, keyed by node fingerprint + options
//! - position cache: `calculate_positions` results, same key
//! - tree cache: `build_from_persons` results, keyed by person ids + root id
//!
//! Construct one per process and share it. Each cache sits behind its own
//! mutex, so concurrent callers may race on insert/evict safely.
//!
//! Keys fingerprint only node ids and generations. Two trees with the same
//! shape but different person details share a cache entry, and the first one
//! laid out is what later callers get back.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use super::builder;
use super::cache::FifoCache;
use super::options::LayoutOptions;
use super::positions;
use crate::graph::{FamilyTreeData, LayoutNode, Person};

/// Cache sizing for a `LayoutService`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutServiceConfig {
    /// Entries kept by the layout cache (default: 50).
    pub layout_cache_capacity: usize,
    /// Entries kept by the position cache (default: 50).
    pub position_cache_capacity: usize,
    /// Entries kept by the tree cache (default: 50).
    pub tree_cache_capacity: usize,
}

impl Default for LayoutServiceConfig {
    fn default() -> Self {
        Self {
            layout_cache_capacity: 50,
            position_cache_capacity: 50,
            tree_cache_capacity: 50,
        }
    }
}

/// Current number of entries in each cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub layouts: usize,
    pub positions: usize,
    pub trees: usize,
}

/// Memoizing front end for the layout pipeline.
pub struct LayoutService {
    layouts: Mutex<FifoCache<String, Arc<FamilyTreeData>>>,
    positions: Mutex<FifoCache<String, Arc<Vec<LayoutNode>>>>,
    trees: Mutex<FifoCache<String, Arc<FamilyTreeData>>>,
}

impl LayoutService {
    /// Create a service with default cache sizes.
    pub fn new() -> Self {
        Self::with_config(LayoutServiceConfig::default())
    }

    /// Create a service with explicit cache sizes.
    pub fn with_config(config: LayoutServiceConfig) -> Self {
        Self {
            layouts: Mutex::new(FifoCache::new(config.layout_cache_capacity)),
            positions: Mutex::new(FifoCache::new(config.position_cache_capacity)),
            trees: Mutex::new(FifoCache::new(config.tree_cache_capacity)),
        }
    }

    /// Lay out a tree.
    ///
    /// A tree without nodes comes back with no nodes and its edges untouched.
    /// Otherwise the result is cached; a repeat call with the same node ids,
    /// generations and options returns the same `Arc`.
    ///
    /// No validation is done here. Call [`crate::graph::validate`] first when
    /// the input is untrusted.
    pub fn generate_layout(
        &self,
        tree: &FamilyTreeData,
        options: &LayoutOptions,
    ) -> Arc<FamilyTreeData> {
        if tree.nodes.is_empty() {
            return Arc::new(FamilyTreeData::new(Vec::new(), tree.edges.clone()));
        }

        let key = layout_key(&tree.nodes, options);
        if let Some(hit) = lock(&self.layouts).get(&key) {
            tracing::debug!(%key, "layout cache hit");
            return Arc::clone(hit);
        }

        tracing::debug!(nodes = tree.nodes.len(), edges = tree.edges.len(), "layout cache miss");
        let nodes = positions::calculate_positions(&tree.nodes, options);
        let result = Arc::new(FamilyTreeData::new(nodes, tree.edges.clone()));

        if let Some(evicted) = lock(&self.layouts).insert(key, Arc::clone(&result)) {
            tracing::debug!(key = %evicted, "layout cache evicted");
        }
        result
    }

    /// Position nodes, memoized by node fingerprint and options.
    pub fn calculate_positions(
        &self,
        nodes: &[LayoutNode],
        options: &LayoutOptions,
    ) -> Arc<Vec<LayoutNode>> {
        if nodes.is_empty() {
            return Arc::new(Vec::new());
        }

        let key = layout_key(nodes, options);
        if let Some(hit) = lock(&self.positions).get(&key) {
            tracing::debug!(%key, "position cache hit");
            return Arc::clone(hit);
        }

        let result = Arc::new(positions::calculate_positions(nodes, options));
        if let Some(evicted) = lock(&self.positions).insert(key, Arc::clone(&result)) {
            tracing::debug!(key = %evicted, "position cache evicted");
        }
        result
    }

    /// Build the initial tree for a person list, memoized by ids and root.
    ///
    /// See [`builder::build_from_persons`] for the generation assignment.
    pub fn build_from_persons(
        &self,
        persons: &[Person],
        root_person_id: &str,
    ) -> Arc<FamilyTreeData> {
        if persons.is_empty() {
            return Arc::new(FamilyTreeData::default());
        }

        let key = tree_key(persons, root_person_id);
        if let Some(hit) = lock(&self.trees).get(&key) {
            tracing::debug!(%key, "tree cache hit");
            return Arc::clone(hit);
        }

        let result = Arc::new(builder::build_from_persons(persons, root_person_id));
        if let Some(evicted) = lock(&self.trees).insert(key, Arc::clone(&result)) {
            tracing::debug!(key = %evicted, "tree cache evicted");
        }
        result
    }

    /// Empty all three caches.
    pub fn clear_caches(&self) {
        lock(&self.layouts).clear();
        lock(&self.positions).clear();
        lock(&self.trees).clear();
    }

    /// Number of entries currently held by each cache.
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            layouts: lock(&self.layouts).len(),
            positions: lock(&self.positions).len(),
            trees: lock(&self.trees).len(),
        }
    }
}

impl Default for LayoutService {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural fingerprint of a node set under some options.
///
/// Sorted `id:generation` pairs joined by `,`, then `|`, then the options.
/// Ids containing `,` or `:` can collide; ids are expected to be UUID-like.
pub fn layout_key(nodes: &[LayoutNode], options: &LayoutOptions) -> String {
    let mut parts: Vec<String> = nodes
        .iter()
        .map(|node| format!("{}:{}", node.id, node.generation()))
        .collect();
    parts.sort_unstable();
    format!("{}|{}", parts.join(","), options.fingerprint())
}

/// Fingerprint of a person list and root: sorted ids joined by `,`, then `|root`.
pub fn tree_key(persons: &[Person], root_person_id: &str) -> String {
    let mut ids: Vec<&str> = persons.iter().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    format!("{}|{}", ids.join(","), root_person_id)
}

/// A panic while holding a cache lock leaves the cache usable, so poisoning
/// is ignored.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
