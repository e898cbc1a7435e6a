//! Directed relationships between diagram elements.
//!
//! # Invariants
//! - A relationship id is derived purely from its ordered endpoint ids.
//! - At most one relationship exists per ordered `(source, target)` pair.

use crate::model::element::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Composite natural key of a relationship.
///
/// Displays as `"<sourceId>:<targetId>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelationshipId {
    pub source: ElementId,
    pub target: ElementId,
}

impl RelationshipId {
    pub fn new(source: ElementId, target: ElementId) -> Self {
        Self { source, target }
    }

    /// Returns whether `element` is either endpoint.
    pub fn touches(&self, element: ElementId) -> bool {
        self.source == element || self.target == element
    }
}

impl Display for RelationshipId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.source, self.target)
    }
}

/// Directed, identified link between two admitted elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    id: RelationshipId,
    description: String,
}

impl Relationship {
    pub fn new(source: ElementId, target: ElementId) -> Self {
        Self {
            id: RelationshipId::new(source, target),
            description: String::new(),
        }
    }

    pub fn id(&self) -> RelationshipId {
        self.id
    }

    pub fn source(&self) -> ElementId {
        self.id.source
    }

    pub fn target(&self) -> ElementId {
        self.id.target
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}
