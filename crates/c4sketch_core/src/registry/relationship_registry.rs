//! Authoritative relationship store.

use crate::model::relationship::{Relationship, RelationshipId};
use std::collections::BTreeMap;

/// Relationships keyed by their `(source, target)` id.
#[derive(Debug, Default)]
pub struct RelationshipRegistry {
    entries: BTreeMap<RelationshipId, Relationship>,
}

impl RelationshipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the relationship stored under the same id.
    ///
    /// Returns the replaced relationship, if any.
    pub fn upsert(&mut self, relationship: Relationship) -> Option<Relationship> {
        self.entries.insert(relationship.id(), relationship)
    }

    pub fn get(&self, id: RelationshipId) -> Option<&Relationship> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: RelationshipId) -> Option<&mut Relationship> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: RelationshipId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Relationships in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.values()
    }
}
