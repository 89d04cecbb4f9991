//! Edge type and related structures.
//!
//! Edges are the typed family relations between nodes. Each edge has:
//! - A unique identifier
//! - Source and target node ids
//! - A relation type from a closed set, plus an optional display label

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Kind of family relation an edge represents.
///
/// Parent-child edges point from parent (source) to child (target). Spouse
/// and sibling edges are symmetric; their direction carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum RelationType {
    ParentChild,
    Spouse,
    Sibling,
}

impl RelationType {
    /// All permitted relation types.
    pub const ALL: [RelationType; 3] = [Self::ParentChild, Self::Spouse, Self::Sibling];

    /// Wire name ("parent-child", "spouse", "sibling").
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParentChild => "parent-child",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
        }
    }

    /// Whether the relation reads the same in both directions.
    #[inline]
    pub fn is_symmetric(self) -> bool {
        !matches!(self, Self::ParentChild)
    }

    /// Default edge label shown by the renderer.
    pub fn label(self) -> &'static str {
        match self {
            Self::ParentChild => "Parent",
            Self::Spouse => "Spouse",
            Self::Sibling => "Sibling",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|relation| relation.as_str() == s)
            .ok_or_else(|| LayoutError::InvalidRelationType(s.to_string()))
    }
}

impl TryFrom<String> for RelationType {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Type discriminator for edges. Only one kind exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    #[default]
    #[serde(rename = "family-relation")]
    FamilyRelation,
}

/// Payload of a family-relation edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub relation_type: RelationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A directed relation between two layout nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub data: EdgeData,
}

impl LayoutEdge {
    /// Create an unlabelled edge.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        relation_type: RelationType,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::FamilyRelation,
            data: EdgeData {
                relation_type,
                label: None,
            },
        }
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = Some(label.into());
        self
    }

    /// Shorthand for `self.data.relation_type`.
    #[inline]
    pub fn relation_type(&self) -> RelationType {
        self.data.relation_type
    }
}
