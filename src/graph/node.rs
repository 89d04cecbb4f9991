//! Node type and related structures.
//!
//! Nodes are the positionable units of the diagram. Each node has:
//! - A unique identifier (the wrapped person's id)
//! - Position (x, y) in diagram space
//! - The wrapped person, a root flag and a generation band

use serde::{Deserialize, Serialize};

use super::person::Person;

/// A point in diagram space (pixels, arbitrary origin).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Type discriminator for nodes. Only one kind exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[default]
    #[serde(rename = "person")]
    Person,
}

/// Payload of a person node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Wrapped person. `None` only for malformed input, which the validator rejects.
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub is_root: bool,
    /// Generation band. 0 is the reference generation; negative and sparse
    /// values are valid. Missing means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<i32>,
}

/// A person placed in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
}

impl LayoutNode {
    /// Wrap a person at the origin in the given generation.
    pub fn new(person: Person, generation: i32) -> Self {
        Self {
            id: person.id.clone(),
            kind: NodeKind::Person,
            position: Position::default(),
            data: NodeData {
                person: Some(person),
                is_root: false,
                generation: Some(generation),
            },
        }
    }

    /// Mark the node as the tree root.
    pub fn as_root(mut self) -> Self {
        self.data.is_root = true;
        self
    }

    /// Set the position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Generation band, defaulting to 0 when absent.
    #[inline]
    pub fn generation(&self) -> i32 {
        self.data.generation.unwrap_or(0)
    }

    /// Copy of this node at a new position; everything else is carried over.
    pub fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}
