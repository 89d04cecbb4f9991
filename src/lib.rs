//! Family Tree Layout - WASM Module
//!
//! This module turns family graphs (people plus parent-child, spouse and
//! sibling relations) into positioned, generation-banded diagrams. It is
//! compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen; structured values cross the boundary through
//! serde-wasm-bindgen.
//!
//! # Architecture
//!
//! - `graph`: Person/node/edge/tree types, validation, relationship index
//! - `layout`: Tree builder, position calculator, memoizing `LayoutService`
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `error`: `LayoutError`

use std::sync::Arc;

use js_sys::Float64Array;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod graph;
pub mod layout;
pub mod spatial;

pub use error::LayoutError;

use graph::{FamilyGraph, FamilyTreeData, LayoutNode, Person, Position, RelationType, Relationship};
use layout::{LayoutOptions, LayoutService, LayoutServiceConfig};
use spatial::SpatialIndex;

/// Initialize the WASM module: panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

/// Main entry point for the layout engine.
///
/// Wraps a `LayoutService` and keeps the most recent layout indexed for hit
/// testing and relationship lookups.
#[wasm_bindgen]
pub struct FamilyTreeLayoutWasm {
    service: LayoutService,
    spatial: SpatialIndex,
    relations: FamilyGraph,
    current: Option<Arc<FamilyTreeData>>,
}

#[wasm_bindgen]
impl FamilyTreeLayoutWasm {
    /// Create an engine with default cache sizes.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_service(LayoutService::new())
    }

    /// Create an engine with explicit cache sizes.
    ///
    /// Accepts `{ layoutCacheCapacity, positionCacheCapacity, treeCacheCapacity }`;
    /// missing fields take their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<FamilyTreeLayoutWasm, JsError> {
        let config: LayoutServiceConfig = decode_or_default(config)?;
        Ok(Self::from_service(LayoutService::with_config(config)))
    }

    // =========================================================================
    // Tree Construction
    // =========================================================================

    /// Build the initial tree for a person list.
    ///
    /// The root person is generation 0, everyone else generation 1; the tree
    /// has no edges.
    #[wasm_bindgen(js_name = buildFromPersons)]
    pub fn build_from_persons(
        &self,
        persons: JsValue,
        root_person_id: &str,
    ) -> Result<JsValue, JsError> {
        let persons: Vec<Person> = decode(persons)?;
        encode(&*self.service.build_from_persons(&persons, root_person_id))
    }

    /// Convert relationship records into family-relation edges.
    #[wasm_bindgen(js_name = relationshipEdges)]
    pub fn relationship_edges(&self, relationships: JsValue) -> Result<JsValue, JsError> {
        let relationships: Vec<Relationship> = decode(relationships)?;
        encode(&layout::relationship_edges(&relationships))
    }

    // =========================================================================
    // Validation & Layout
    // =========================================================================

    /// Validate a tree. Throws with a descriptive message on the first
    /// structural problem.
    pub fn validate(&self, tree: JsValue) -> Result<(), JsError> {
        let tree: FamilyTreeData = decode(tree)?;
        graph::validate(&tree)?;
        Ok(())
    }

    /// Lay out a tree.
    ///
    /// `options` may be undefined for the defaults (TB, 200/150, 200). The
    /// result also becomes the target of hit testing and relative lookups.
    #[wasm_bindgen(js_name = generateLayout)]
    pub fn generate_layout(
        &mut self,
        tree: JsValue,
        options: JsValue,
    ) -> Result<JsValue, JsError> {
        let tree: FamilyTreeData = decode(tree)?;
        let options: LayoutOptions = decode_or_default(options)?;
        let result = self.apply_layout(&tree, &options);
        encode(&*result)
    }

    /// Position a bare node list without touching the current layout.
    #[wasm_bindgen(js_name = calculatePositions)]
    pub fn calculate_positions(
        &self,
        nodes: JsValue,
        options: JsValue,
    ) -> Result<JsValue, JsError> {
        let nodes: Vec<LayoutNode> = decode(nodes)?;
        let options: LayoutOptions = decode_or_default(options)?;
        encode(&*self.service.calculate_positions(&nodes, &options))
    }

    // =========================================================================
    // Current Layout Queries
    // =========================================================================

    /// Id of the node nearest to a point, within `max_distance`.
    #[wasm_bindgen(js_name = findNodeAt)]
    pub fn find_node_at(&self, x: f64, y: f64, max_distance: f64) -> Option<String> {
        self.spatial
            .node_at(Position::new(x, y), max_distance)
            .map(str::to_string)
    }

    /// Ids of all nodes inside a rectangle.
    #[wasm_bindgen(js_name = findNodesInRect)]
    pub fn find_nodes_in_rect(
        &self,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Vec<String> {
        self.spatial
            .nodes_in(Position::new(min_x, min_y), Position::new(max_x, max_y))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Bounding box of the current layout as [min_x, min_y, max_x, max_y].
    ///
    /// Returns None when nothing has been laid out or the layout is empty.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f64>> {
        self.current
            .as_ref()
            .and_then(|tree| tree.bounds())
            .map(|(min_x, min_y, max_x, max_y)| vec![min_x, min_y, max_x, max_y])
    }

    /// Positions of the current layout as [x0, y0, x1, y1, ...], in node order.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float64Array {
        Float64Array::from(&self.interleaved_positions()[..])
    }

    /// Ids related to `node_id` by `relation_type` in the current layout.
    ///
    /// `relation_type` is "parent-child", "spouse" or "sibling".
    #[wasm_bindgen(js_name = getRelatives)]
    pub fn get_relatives(
        &self,
        node_id: &str,
        relation_type: &str,
    ) -> Result<Vec<String>, JsError> {
        let relation: RelationType = relation_type.parse()?;
        Ok(self.relatives(node_id, relation))
    }

    /// Ids of the parents of `node_id` in the current layout.
    #[wasm_bindgen(js_name = getParents)]
    pub fn get_parents(&self, node_id: &str) -> Vec<String> {
        owned(self.relations.parents(node_id))
    }

    /// Ids of the children of `node_id` in the current layout.
    #[wasm_bindgen(js_name = getChildren)]
    pub fn get_children(&self, node_id: &str) -> Vec<String> {
        owned(self.relations.children(node_id))
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Empty the layout, position and tree caches.
    #[wasm_bindgen(js_name = clearCaches)]
    pub fn clear_caches(&self) {
        self.service.clear_caches();
    }

    /// `{ layouts, positions, trees }` entry counts.
    #[wasm_bindgen(js_name = cacheStats)]
    pub fn cache_stats(&self) -> Result<JsValue, JsError> {
        encode(&self.service.cache_stats())
    }
}

impl FamilyTreeLayoutWasm {
    fn from_service(service: LayoutService) -> Self {
        Self {
            service,
            spatial: SpatialIndex::new(),
            relations: FamilyGraph::new(),
            current: None,
        }
    }

    /// Lay out `tree` and make the result the current layout.
    ///
    /// Cached layouts are keyed on nodes only, so the positioned nodes are
    /// always paired with the edges of `tree` itself.
    pub fn apply_layout(
        &mut self,
        tree: &FamilyTreeData,
        options: &LayoutOptions,
    ) -> Arc<FamilyTreeData> {
        let laid_out = self.service.generate_layout(tree, options);
        let result = Arc::new(FamilyTreeData::new(laid_out.nodes.clone(), tree.edges.clone()));
        self.spatial.rebuild(&result.nodes);
        self.relations = FamilyGraph::from_tree(&result);
        self.current = Some(Arc::clone(&result));
        result
    }

    /// Relatives of a node in the current layout.
    pub fn relatives(&self, node_id: &str, relation: RelationType) -> Vec<String> {
        owned(self.relations.relatives(node_id, relation))
    }

    fn interleaved_positions(&self) -> Vec<f64> {
        let Some(tree) = &self.current else {
            return Vec::new();
        };
        let mut positions = Vec::with_capacity(tree.nodes.len() * 2);
        for node in &tree.nodes {
            positions.push(node.position.x);
            positions.push(node.position.y);
        }
        positions
    }
}

impl Default for FamilyTreeLayoutWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn owned(ids: Vec<&str>) -> Vec<String> {
    ids.into_iter().map(str::to_string).collect()
}

fn decode<T: DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn decode_or_default<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsError> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        decode(value)
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use graph::LayoutEdge;
    use layout::LayoutDirection;

    fn persons() -> Vec<Person> {
        vec![
            Person::new("gran", "Edith", "Moss"),
            Person::new("mum", "Jane", "Moss"),
            Person::new("uncle", "Tom", "Moss"),
        ]
    }

    fn relationships() -> Vec<Relationship> {
        vec![
            Relationship {
                id: "r1".into(),
                person1_id: "gran".into(),
                person2_id: "mum".into(),
                relation_type: RelationType::ParentChild,
            },
            Relationship {
                id: "r2".into(),
                person1_id: "gran".into(),
                person2_id: "uncle".into(),
                relation_type: RelationType::ParentChild,
            },
            Relationship {
                id: "r3".into(),
                person1_id: "mum".into(),
                person2_id: "uncle".into(),
                relation_type: RelationType::Sibling,
            },
        ]
    }

    /// Person records → builder → relationship edges → validate → layout →
    /// hit testing and relative lookups, without wasm_bindgen JS types.
    #[test]
    fn test_full_pipeline() {
        let mut engine = FamilyTreeLayoutWasm::new();

        let built = engine.service.build_from_persons(&persons(), "gran");
        let mut tree = (*built).clone();
        tree.edges = layout::relationship_edges(&relationships());
        graph::validate(&tree).unwrap();

        let result = engine.apply_layout(&tree, &LayoutOptions::default());
        graph::validate(&result).unwrap();

        assert_eq!(result.node("gran").unwrap().position, Position::new(0.0, 0.0));
        assert_eq!(result.node("mum").unwrap().position, Position::new(-100.0, 200.0));
        assert_eq!(result.node("uncle").unwrap().position, Position::new(100.0, 200.0));

        assert_eq!(engine.find_node_at(-95.0, 195.0, 20.0).as_deref(), Some("mum"));
        assert_eq!(engine.find_node_at(50.0, 100.0, 20.0), None);

        let mut in_band = engine.find_nodes_in_rect(-150.0, 150.0, 150.0, 250.0);
        in_band.sort();
        assert_eq!(in_band, vec!["mum".to_string(), "uncle".to_string()]);

        assert_eq!(engine.get_bounds(), Some(vec![-100.0, 0.0, 100.0, 200.0]));
        assert_eq!(engine.get_parents("mum"), vec!["gran".to_string()]);
        assert_eq!(engine.get_children("gran").len(), 2);
        assert_eq!(engine.relatives("uncle", RelationType::Sibling), vec!["mum".to_string()]);
    }

    #[test]
    fn test_direction_toggle_reuses_cache() {
        let mut engine = FamilyTreeLayoutWasm::new();
        let tree = engine.service.build_from_persons(&persons(), "gran");

        let tb_options = LayoutOptions::with_direction(LayoutDirection::TB);
        let lr_options = LayoutOptions::with_direction(LayoutDirection::LR);

        let tb = engine.apply_layout(&tree, &tb_options);
        let lr = engine.apply_layout(&tree, &lr_options);
        let tb_again = engine.apply_layout(&tree, &tb_options);

        assert_eq!(tb, tb_again);
        assert_ne!(tb, lr);
        assert_eq!(engine.service.cache_stats().layouts, 2);

        // Hit testing follows the most recent layout.
        assert_eq!(engine.find_node_at(0.0, 0.0, 1.0).as_deref(), Some("gran"));
        assert_eq!(engine.interleaved_positions().len(), 6);
    }

    #[test]
    fn test_empty_layout_clears_queries() {
        let mut engine = FamilyTreeLayoutWasm::new();
        let tree = engine.service.build_from_persons(&persons(), "gran");
        engine.apply_layout(&tree, &LayoutOptions::default());

        let result = engine.apply_layout(&FamilyTreeData::default(), &LayoutOptions::default());
        assert!(result.nodes.is_empty());
        assert_eq!(engine.find_node_at(0.0, 0.0, 1000.0), None);
        assert_eq!(engine.get_bounds(), None);
        assert!(engine.interleaved_positions().is_empty());
    }

    #[test]
    fn test_dangling_edge_layout_still_indexes_known_nodes() {
        let mut engine = FamilyTreeLayoutWasm::new();
        let mut tree = (*engine.service.build_from_persons(&persons(), "gran")).clone();
        tree.edges.push(LayoutEdge::new("bad", "gran", "ghost", RelationType::ParentChild));

        assert!(graph::validate(&tree).is_err());

        // Layout does not validate; the relationship index just skips the edge.
        let result = engine.apply_layout(&tree, &LayoutOptions::default());
        assert_eq!(result.nodes.len(), 3);
        assert!(engine.get_children("gran").is_empty());
    }

    #[test]
    fn test_cached_layout_takes_edges_from_caller() {
        let mut engine = FamilyTreeLayoutWasm::new();
        let bare = (*engine.service.build_from_persons(&persons(), "gran")).clone();
        let mut linked = bare.clone();
        linked.edges.push(LayoutEdge::new("r1", "gran", "mum", RelationType::ParentChild));

        let first = engine.apply_layout(&bare, &LayoutOptions::default());
        assert!(first.edges.is_empty());
        assert!(engine.get_children("gran").is_empty());

        // Same nodes and generations: served from the layout cache.
        let second = engine.apply_layout(&linked, &LayoutOptions::default());
        assert_eq!(engine.service.cache_stats().layouts, 1);
        assert_eq!(second.nodes, first.nodes);
        assert_eq!(second.edges, linked.edges);
        assert_eq!(engine.get_children("gran"), vec!["mum".to_string()]);
        assert_eq!(engine.get_parents("mum"), vec!["gran".to_string()]);

        // And back again: the stale edge must not survive.
        let third = engine.apply_layout(&bare, &LayoutOptions::default());
        assert!(third.edges.is_empty());
        assert!(engine.get_children("gran").is_empty());
    }
}
