//! Diagram model orchestration.
//!
//! # Responsibility
//! - Admit elements into the active view with auto-numbered unique names.
//! - Connect, rename, describe and position elements.
//! - Track drill-down navigation and expose the active view for redraws.
//!
//! # Invariants
//! - No two admitted elements share a display name (global scope).
//! - After `n` successful admissions of one kind its counter equals `n`.
//! - The active view is the navigation stack top, or the root when empty.
//! - Failed operations leave every registry, counter and view untouched.
//! - Relationships only connect admitted elements.

use crate::config::{ConfigError, ModelConfig};
use crate::model::element::{DiagramElement, ElementId};
use crate::model::kind::{ElementKind, SequenceCounters};
use crate::model::point::Point;
use crate::model::relationship::{Relationship, RelationshipId};
use crate::registry::element_registry::{ElementRegistry, RegistryError};
use crate::registry::relationship_registry::RelationshipRegistry;
use crate::service::navigation::NavigationStack;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from diagram model operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramModelError {
    /// Display name is blank after trim.
    InvalidDisplayName,
    /// Add/rename collides with an existing global name.
    DuplicateName(String),
    /// Kind is reserved for the root view.
    ReservedKind(ElementKind),
    /// Element instance was already admitted.
    AlreadyAdmitted(ElementId),
    /// No admitted element has this display name.
    UnknownElement(String),
    /// Relationship endpoint name does not resolve.
    UnknownEndpoint(String),
    /// Navigation target is not an admitted element.
    NotNavigable(ElementId),
    /// Relationship id is not registered.
    UnknownRelationship(RelationshipId),
    /// Internal consistency mismatch between registries and views.
    InconsistentState(&'static str),
}

impl Display for DiagramModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDisplayName => write!(f, "display name must not be blank"),
            Self::DuplicateName(name) => write!(f, "display name already in use: `{name}`"),
            Self::ReservedKind(kind) => {
                write!(f, "element kind is reserved: {}", kind.css_class())
            }
            Self::AlreadyAdmitted(id) => write!(f, "element already admitted: {id}"),
            Self::UnknownElement(name) => write!(f, "element not found: `{name}`"),
            Self::UnknownEndpoint(name) => {
                write!(f, "relationship endpoint not found: `{name}`")
            }
            Self::NotNavigable(id) => write!(f, "element cannot be navigated to: {id}"),
            Self::UnknownRelationship(id) => write!(f, "relationship not found: {id}"),
            Self::InconsistentState(details) => write!(f, "inconsistent model state: {details}"),
        }
    }
}

impl Error for DiagramModelError {}

impl From<RegistryError> for DiagramModelError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::DuplicateName(name) => Self::DuplicateName(name),
            RegistryError::DuplicateId(id) => Self::AlreadyAdmitted(id),
            RegistryError::UnknownName(name) => Self::UnknownElement(name),
        }
    }
}

/// In-memory diagram model driven by the editor's presentation layer.
///
/// Single-owner and synchronous: every call runs to completion. Hosts with
/// multi-threaded callbacks must wrap the whole model in one lock.
#[derive(Debug)]
pub struct DiagramModel {
    root: DiagramElement,
    elements: ElementRegistry,
    relationships: RelationshipRegistry,
    counters: SequenceCounters,
    navigation: NavigationStack,
}

impl Default for DiagramModel {
    fn default() -> Self {
        Self::with_root(DiagramElement::template(ElementKind::SystemContext))
    }
}

impl DiagramModel {
    /// Creates a model whose root view is headed "System Context".
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model from validated configuration.
    pub fn with_config(config: &ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let root = DiagramElement::new(
            ElementKind::SystemContext,
            config.root_display_name.trim(),
        );
        Ok(Self::with_root(root))
    }

    fn with_root(root: DiagramElement) -> Self {
        debug!(
            "event=model_init module=model status=ok root={}",
            root.id()
        );
        Self {
            root,
            elements: ElementRegistry::new(),
            relationships: RelationshipRegistry::new(),
            counters: SequenceCounters::new(),
            navigation: NavigationStack::new(),
        }
    }

    /// Admits `element` into the active view under an auto-numbered name.
    ///
    /// The supplied display name is the template: the element is stored as
    /// `"<template> <n>"` where `n` is the next counter value for its kind.
    /// Use the returned element, not the value passed in.
    ///
    /// # Errors
    /// - `InvalidDisplayName` when the template is blank.
    /// - `ReservedKind` for `ElementKind::SystemContext`.
    /// - `AlreadyAdmitted` when an element with the same id exists.
    /// - `DuplicateName` when the template itself, or the numbered candidate,
    ///   is already a registered name.
    pub fn add_element(
        &mut self,
        mut element: DiagramElement,
    ) -> Result<&DiagramElement, DiagramModelError> {
        let kind = element.kind();
        let template = normalize_display_name(element.display_name())?;
        let next = self
            .counters
            .peek_next(kind)
            .ok_or(DiagramModelError::ReservedKind(kind))?;
        if element.id() == self.root.id() || self.elements.contains_id(element.id()) {
            return Err(DiagramModelError::AlreadyAdmitted(element.id()));
        }
        if self.elements.contains_name(template.as_str()) {
            warn!(
                "event=element_add module=model status=error reason=duplicate_template kind={}",
                kind.css_class()
            );
            return Err(DiagramModelError::DuplicateName(template));
        }
        let candidate = format!("{template} {next}");
        if self.elements.contains_name(candidate.as_str()) {
            warn!(
                "event=element_add module=model status=error reason=duplicate_candidate kind={}",
                kind.css_class()
            );
            return Err(DiagramModelError::DuplicateName(candidate));
        }

        let view_id = self.current_id();
        element.set_display_name(candidate.clone());
        element.set_parent(view_id);
        let id = self.elements.insert(element)?;
        self.counters.commit(kind, next);
        self.current_mut().link_child(candidate, id);

        info!(
            "event=element_added module=model status=ok kind={} element={} view={} seq={}",
            kind.css_class(),
            id,
            view_id,
            next
        );
        self.elements
            .get(id)
            .ok_or(DiagramModelError::InconsistentState(
                "admitted element missing from registry",
            ))
    }

    /// Connects two admitted elements, addressed by display name.
    ///
    /// A second call for the same ordered pair replaces the stored
    /// relationship, so the registry never holds duplicates. The relationship
    /// is recorded on the active view and on both endpoints.
    ///
    /// # Errors
    /// - `UnknownEndpoint` when either name does not resolve.
    pub fn add_relationship_between(
        &mut self,
        source: &str,
        target: &str,
    ) -> Result<RelationshipId, DiagramModelError> {
        let source_id = self
            .elements
            .resolve_name(source)
            .ok_or_else(|| DiagramModelError::UnknownEndpoint(source.to_string()))?;
        let target_id = self
            .elements
            .resolve_name(target)
            .ok_or_else(|| DiagramModelError::UnknownEndpoint(target.to_string()))?;

        let relationship = Relationship::new(source_id, target_id);
        let id = relationship.id();
        self.current_mut().record_relationship(&relationship);
        for endpoint in [source_id, target_id] {
            if let Some(element) = self.elements.get_mut(endpoint) {
                element.record_relationship(&relationship);
            }
        }
        let replaced = self.relationships.upsert(relationship).is_some();

        info!(
            "event=relationship_added module=model status=ok relationship={} replaced={}",
            id, replaced
        );
        Ok(id)
    }

    /// Renames one element and re-keys its entry in the parent view.
    ///
    /// Relationship ids are built from stable element ids and stay valid.
    ///
    /// # Errors
    /// - `InvalidDisplayName` when `new_name` is blank.
    /// - `DuplicateName` when `new_name` is already registered, including
    ///   when it equals the element's current name.
    /// - `UnknownElement` when `old_name` does not resolve.
    pub fn rename_element(
        &mut self,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), DiagramModelError> {
        let new_name = normalize_display_name(new_name)?;
        let id = self
            .elements
            .rename(old_name, new_name.as_str())
            .inspect_err(|err| {
                warn!(
                    "event=element_rename module=model status=error reason={}",
                    err.reason_code()
                );
            })?;

        let parent = self.elements.get(id).and_then(DiagramElement::parent);
        if let Some(view) = parent.and_then(|parent_id| self.view_mut(parent_id)) {
            view.rename_child(old_name, new_name.as_str());
        }

        info!("event=element_renamed module=model status=ok element={id}");
        Ok(())
    }

    /// Replaces the description of one admitted element.
    pub fn set_element_description(
        &mut self,
        display_name: &str,
        description: impl Into<String>,
    ) -> Result<(), DiagramModelError> {
        let id = self
            .elements
            .resolve_name(display_name)
            .ok_or_else(|| DiagramModelError::UnknownElement(display_name.to_string()))?;
        let element = self
            .elements
            .get_mut(id)
            .ok_or(DiagramModelError::InconsistentState(
                "indexed element missing from registry",
            ))?;
        element.set_description(description);
        debug!("event=element_described module=model status=ok element={id}");
        Ok(())
    }

    /// Replaces the description of one relationship.
    pub fn set_relationship_description(
        &mut self,
        id: RelationshipId,
        description: impl Into<String>,
    ) -> Result<(), DiagramModelError> {
        let relationship = self
            .relationships
            .get_mut(id)
            .ok_or(DiagramModelError::UnknownRelationship(id))?;
        relationship.set_description(description);
        debug!("event=relationship_described module=model status=ok relationship={id}");
        Ok(())
    }

    /// Saves or updates a child position on the active view's canvas.
    pub fn set_element_coordinates(&mut self, child_id: impl Into<String>, coords: Point) {
        self.current_mut().set_child_coordinates(child_id, coords);
    }

    /// Enters the view of `id`, moving it to the top if already visited.
    ///
    /// Re-entering a visited view does not grow the stack, so a later pop
    /// returns to the view below it rather than to the view active before
    /// this call. Pushing the active view again is a no-op.
    ///
    /// # Errors
    /// - `NotNavigable` when `id` is not an admitted element (the root
    ///   included; it is reached by popping).
    pub fn push_to_navigation_stack(&mut self, id: ElementId) -> Result<(), DiagramModelError> {
        if !self.elements.contains_id(id) {
            return Err(DiagramModelError::NotNavigable(id));
        }
        self.navigation.push(id);
        debug!(
            "event=navigation_push module=model status=ok element={id} depth={}",
            self.navigation.len()
        );
        Ok(())
    }

    /// Leaves the active view.
    ///
    /// Returns `None` and stays at the root when the stack is empty.
    pub fn pop_from_navigation_stack(&mut self) -> Option<ElementId> {
        let popped = self.navigation.pop();
        if let Some(id) = popped {
            debug!(
                "event=navigation_pop module=model status=ok element={id} depth={}",
                self.navigation.len()
            );
        }
        popped
    }

    /// Returns `true` while the root view is active.
    pub fn is_navigation_stack_empty(&self) -> bool {
        self.navigation.is_empty()
    }

    pub fn navigation_stack(&self) -> &[ElementId] {
        self.navigation.as_slice()
    }

    pub fn root(&self) -> &DiagramElement {
        &self.root
    }

    /// Id of the active view.
    pub fn current_id(&self) -> ElementId {
        self.navigation.top().unwrap_or(self.root.id())
    }

    /// Element whose children are being edited.
    pub fn current(&self) -> &DiagramElement {
        self.navigation
            .top()
            .and_then(|id| self.elements.get(id))
            .unwrap_or(&self.root)
    }

    fn current_mut(&mut self) -> &mut DiagramElement {
        let view_id = self.current_id();
        match self.elements.get_mut(view_id) {
            Some(element) => element,
            None => &mut self.root,
        }
    }

    fn view_mut(&mut self, id: ElementId) -> Option<&mut DiagramElement> {
        if id == self.root.id() {
            return Some(&mut self.root);
        }
        self.elements.get_mut(id)
    }

    /// View heading text.
    pub fn current_heading(&self) -> &str {
        self.current().display_name()
    }

    /// Children of the active view, ordered by display name.
    pub fn elements_in_current_view(&self) -> impl Iterator<Item = &DiagramElement> + '_ {
        self.current()
            .children()
            .values()
            .filter_map(move |id| self.elements.get(*id))
    }

    /// Child positions on the active view's canvas.
    pub fn current_coordinates(&self) -> &BTreeMap<String, Point> {
        self.current().child_coordinates()
    }

    /// Relationships recorded on the active view.
    pub fn current_relationships(&self) -> impl Iterator<Item = &Relationship> + '_ {
        self.current()
            .local_relationships()
            .iter()
            .filter_map(move |id| self.relationships.get(*id))
    }

    /// Relationships where `element` is source or target.
    pub fn relationships_touching(
        &self,
        element: ElementId,
    ) -> impl Iterator<Item = &Relationship> + '_ {
        self.elements
            .get(element)
            .into_iter()
            .flat_map(|stored| stored.local_relationships().iter())
            .filter(move |id| id.touches(element))
            .filter_map(move |id| self.relationships.get(*id))
    }

    /// Relationship for the ordered pair of display names, if any.
    pub fn relationship_between(&self, source: &str, target: &str) -> Option<&Relationship> {
        let source_id = self.elements.resolve_name(source)?;
        let target_id = self.elements.resolve_name(target)?;
        self.relationships
            .get(RelationshipId::new(source_id, target_id))
    }

    pub fn element(&self, id: ElementId) -> Option<&DiagramElement> {
        self.elements.get(id)
    }

    pub fn element_by_name(&self, display_name: &str) -> Option<&DiagramElement> {
        self.elements.get_by_name(display_name)
    }

    /// Global element registry.
    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    /// Authoritative relationship registry.
    pub fn relationships(&self) -> &RelationshipRegistry {
        &self.relationships
    }

    pub fn sequence_count(&self, kind: ElementKind) -> u32 {
        self.counters.get(kind)
    }

    pub fn counters(&self) -> &SequenceCounters {
        &self.counters
    }
}

fn normalize_display_name(value: &str) -> Result<String, DiagramModelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DiagramModelError::InvalidDisplayName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_display_name, DiagramModel, DiagramModelError};
    use crate::model::element::DiagramElement;
    use crate::model::kind::ElementKind;

    #[test]
    fn normalize_display_name_trims_and_rejects_blank() {
        assert_eq!(normalize_display_name("  Api  ").unwrap(), "Api");
        assert_eq!(
            normalize_display_name(" \t"),
            Err(DiagramModelError::InvalidDisplayName)
        );
    }

    #[test]
    fn current_falls_back_to_root() {
        let model = DiagramModel::new();
        assert_eq!(model.current_id(), model.root().id());
        assert_eq!(model.current_heading(), "System Context");
    }

    #[test]
    fn add_element_rejects_reserved_kind_without_side_effects() {
        let mut model = DiagramModel::new();
        let err = model
            .add_element(DiagramElement::template(ElementKind::SystemContext))
            .unwrap_err();

        assert_eq!(err, DiagramModelError::ReservedKind(ElementKind::SystemContext));
        assert!(model.elements().is_empty());
        assert!(model.root().children().is_empty());
    }

    #[test]
    fn add_element_sets_parent_to_active_view() {
        let mut model = DiagramModel::new();
        let root_id = model.root().id();
        let system = model
            .add_element(DiagramElement::template(ElementKind::SoftwareSystem))
            .unwrap()
            .id();
        assert_eq!(model.element(system).unwrap().parent(), Some(root_id));

        model.push_to_navigation_stack(system).unwrap();
        let container = model
            .add_element(DiagramElement::template(ElementKind::Container))
            .unwrap()
            .id();
        assert_eq!(model.element(container).unwrap().parent(), Some(system));
    }
}
