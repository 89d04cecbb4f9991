//! Person and relationship records supplied by the person-management side.
//!
//! The layout engine never owns these. Nodes carry a copy of the person for
//! the renderer, and relationships are only ever turned into edges.

use serde::{Deserialize, Serialize};

use super::edge::RelationType;

/// Gender tag on a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A family member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique person id; also the id of the node wrapping this person.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// ISO date string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    /// ISO date string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Reference to a profile image (URL or storage key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl Person {
    /// Create a person with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            death_date: None,
            gender: None,
            profile_image: None,
            bio: None,
        }
    }

    /// "First Last", trimmed when either part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A typed link between two people, as stored upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    /// For parent-child, the parent.
    pub person1_id: String,
    /// For parent-child, the child.
    pub person2_id: String,
    pub relation_type: RelationType,
}
