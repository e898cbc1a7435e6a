//! Diagram element model.
//!
//! # Responsibility
//! - Hold one node's identity and editable content.
//! - Own the nested view rooted at the node: child index, child coordinates
//!   and the ids of relationships recorded against it.
//!
//! # Invariants
//! - `id` is stable and never reused for another element.
//! - `kind` never changes after construction.
//! - `children` keys mirror the children's current display names; keeping
//!   them unique is the caller's job (see `DiagramModel`).

use crate::model::kind::ElementKind;
use crate::model::point::Point;
use crate::model::relationship::{Relationship, RelationshipId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a diagram element.
pub type ElementId = Uuid;

/// Construction-time validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementValidationError {
    /// Nil UUID cannot identify an element.
    NilId,
}

impl Display for ElementValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "element id must not be nil"),
        }
    }
}

impl Error for ElementValidationError {}

/// A node placeable on a diagram, which is also the root of its own view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramElement {
    id: ElementId,
    kind: ElementKind,
    display_name: String,
    description: String,
    /// `None` for the root view and for elements not yet admitted.
    parent: Option<ElementId>,
    children: BTreeMap<String, ElementId>,
    child_coordinates: BTreeMap<String, Point>,
    local_relationships: BTreeSet<RelationshipId>,
}

impl DiagramElement {
    /// Creates an element with a generated stable id and empty description.
    pub fn new(kind: ElementKind, display_name: impl Into<String>) -> Self {
        Self::build(Uuid::new_v4(), kind, display_name.into())
    }

    /// Creates an element whose display name is the kind's default label.
    ///
    /// This is the template the editor hands to `DiagramModel::add_element`
    /// for its "place a Software System" style actions.
    pub fn template(kind: ElementKind) -> Self {
        Self::new(kind, kind.label())
    }

    /// Creates an element with a caller-provided stable id.
    ///
    /// # Errors
    /// - Returns `ElementValidationError::NilId` for `Uuid::nil()`.
    pub fn with_id(
        id: ElementId,
        kind: ElementKind,
        display_name: impl Into<String>,
    ) -> Result<Self, ElementValidationError> {
        if id.is_nil() {
            return Err(ElementValidationError::NilId);
        }
        Ok(Self::build(id, kind, display_name.into()))
    }

    fn build(id: ElementId, kind: ElementKind, display_name: String) -> Self {
        Self {
            id,
            kind,
            display_name,
            description: String::new(),
            parent: None,
            children: BTreeMap::new(),
            child_coordinates: BTreeMap::new(),
            local_relationships: BTreeSet::new(),
        }
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub(crate) fn set_display_name(&mut self, display_name: String) {
        self.display_name = display_name;
    }

    pub(crate) fn set_parent(&mut self, parent: ElementId) {
        self.parent = Some(parent);
    }

    /// Inserts `child` under its current display name, replacing any entry
    /// with the same name.
    pub fn add_child(&mut self, child: &DiagramElement) {
        self.link_child(child.display_name.clone(), child.id);
    }

    pub(crate) fn link_child(&mut self, display_name: String, child_id: ElementId) {
        self.children.insert(display_name, child_id);
    }

    /// Moves the child entry and its coordinates from `old_name` to
    /// `new_name`. No-op for names that are not present.
    pub(crate) fn rename_child(&mut self, old_name: &str, new_name: &str) {
        if let Some(child_id) = self.children.remove(old_name) {
            self.children.insert(new_name.to_string(), child_id);
        }
        if let Some(coords) = self.child_coordinates.remove(old_name) {
            self.child_coordinates.insert(new_name.to_string(), coords);
        }
    }

    /// Children keyed by display name.
    pub fn children(&self) -> &BTreeMap<String, ElementId> {
        &self.children
    }

    pub fn child(&self, display_name: &str) -> Option<ElementId> {
        self.children.get(display_name).copied()
    }

    /// Saves or updates coordinates for one child identifier.
    ///
    /// The identifier is not checked against `children`; positions may be
    /// recorded before the child itself is admitted.
    pub fn set_child_coordinates(&mut self, child_id: impl Into<String>, coords: Point) {
        self.child_coordinates.insert(child_id.into(), coords);
    }

    pub fn child_coordinates(&self) -> &BTreeMap<String, Point> {
        &self.child_coordinates
    }

    pub fn coordinates_of(&self, child_id: &str) -> Option<Point> {
        self.child_coordinates.get(child_id).copied()
    }

    /// Records a relationship touching or drawn in this element.
    ///
    /// Re-recording an id already present is accepted silently.
    pub fn record_relationship(&mut self, relationship: &Relationship) {
        self.local_relationships.insert(relationship.id());
    }

    pub fn local_relationships(&self) -> &BTreeSet<RelationshipId> {
        &self.local_relationships
    }

    pub fn has_relationship(&self, id: RelationshipId) -> bool {
        self.local_relationships.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagramElement, ElementValidationError};
    use crate::model::kind::ElementKind;
    use crate::model::point::Point;
    use crate::model::relationship::Relationship;
    use uuid::Uuid;

    #[test]
    fn new_sets_defaults() {
        let element = DiagramElement::new(ElementKind::Person, "Customer");

        assert!(!element.id().is_nil());
        assert_eq!(element.kind(), ElementKind::Person);
        assert_eq!(element.display_name(), "Customer");
        assert_eq!(element.description(), "");
        assert_eq!(element.parent(), None);
        assert!(element.children().is_empty());
        assert!(element.child_coordinates().is_empty());
        assert!(element.local_relationships().is_empty());
    }

    #[test]
    fn template_uses_kind_label() {
        let element = DiagramElement::template(ElementKind::SoftwareSystem);
        assert_eq!(element.display_name(), "Software System");
    }

    #[test]
    fn with_id_rejects_nil_uuid() {
        let err = DiagramElement::with_id(Uuid::nil(), ElementKind::Container, "Api")
            .unwrap_err();
        assert_eq!(err, ElementValidationError::NilId);
    }

    #[test]
    fn add_child_overwrites_same_name() {
        let mut parent = DiagramElement::new(ElementKind::SoftwareSystem, "Shop");
        let first = DiagramElement::new(ElementKind::Container, "Api");
        let second = DiagramElement::new(ElementKind::Container, "Api");

        parent.add_child(&first);
        parent.add_child(&second);

        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.child("Api"), Some(second.id()));
    }

    #[test]
    fn coordinates_do_not_require_known_child() {
        let mut parent = DiagramElement::new(ElementKind::SoftwareSystem, "Shop");
        parent.set_child_coordinates("Ghost", Point::new(1.0, 2.0));
        parent.set_child_coordinates("Ghost", Point::new(3.0, 4.0));

        assert_eq!(parent.coordinates_of("Ghost"), Some(Point::new(3.0, 4.0)));
        assert_eq!(parent.child_coordinates().len(), 1);
    }

    #[test]
    fn rename_child_moves_entry_and_coordinates() {
        let mut parent = DiagramElement::new(ElementKind::SoftwareSystem, "Shop");
        let child = DiagramElement::new(ElementKind::Container, "Api");
        parent.add_child(&child);
        parent.set_child_coordinates("Api", Point::new(10.0, 20.0));

        parent.rename_child("Api", "Gateway");

        assert_eq!(parent.child("Api"), None);
        assert_eq!(parent.child("Gateway"), Some(child.id()));
        assert_eq!(parent.coordinates_of("Api"), None);
        assert_eq!(
            parent.coordinates_of("Gateway"),
            Some(Point::new(10.0, 20.0))
        );
    }

    #[test]
    fn record_relationship_is_last_write_wins() {
        let a = DiagramElement::new(ElementKind::Person, "User");
        let mut b = DiagramElement::new(ElementKind::SoftwareSystem, "Shop");
        let relationship = Relationship::new(a.id(), b.id());

        b.record_relationship(&relationship);
        b.record_relationship(&relationship);

        assert_eq!(b.local_relationships().len(), 1);
        assert!(b.has_relationship(relationship.id()));
    }
}
