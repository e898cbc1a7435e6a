//! Element arena and global name index.

use crate::model::element::{DiagramElement, ElementId};
use log::debug;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Element registration/rename errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Display name is already indexed.
    DuplicateName(String),
    /// Element id is already stored.
    DuplicateId(ElementId),
    /// Display name is not indexed.
    UnknownName(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "display name already registered: {name}"),
            Self::DuplicateId(id) => write!(f, "element already registered: {id}"),
            Self::UnknownName(name) => write!(f, "display name not registered: {name}"),
        }
    }
}

impl Error for RegistryError {}

impl RegistryError {
    /// Stable log reason without the user-entered name.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "duplicate_name",
            Self::DuplicateId(_) => "duplicate_id",
            Self::UnknownName(_) => "unknown_name",
        }
    }
}

/// Owns admitted elements by stable id and indexes them by display name.
///
/// The synthetic root view is not stored here, so users can neither collide
/// with nor rename it.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: BTreeMap<ElementId, DiagramElement>,
    names: BTreeMap<String, ElementId>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an element and indexes it under its current display name.
    pub fn insert(&mut self, element: DiagramElement) -> Result<ElementId, RegistryError> {
        let id = element.id();
        if self.elements.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }
        if self.names.contains_key(element.display_name()) {
            return Err(RegistryError::DuplicateName(
                element.display_name().to_string(),
            ));
        }

        self.names.insert(element.display_name().to_string(), id);
        self.elements.insert(id, element);
        Ok(id)
    }

    /// Re-keys one element from `old_name` to `new_name` and updates its
    /// display name.
    ///
    /// `new_name` must not be indexed yet, including by the element itself.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<ElementId, RegistryError> {
        let id = self.resolve_name(old_name).ok_or_else(|| {
            RegistryError::UnknownName(old_name.to_string())
        })?;
        if self.names.contains_key(new_name) {
            return Err(RegistryError::DuplicateName(new_name.to_string()));
        }
        let Some(element) = self.elements.get_mut(&id) else {
            return Err(RegistryError::UnknownName(old_name.to_string()));
        };

        element.set_display_name(new_name.to_string());
        self.names.remove(old_name);
        self.names.insert(new_name.to_string(), id);
        debug!("event=registry_rename module=registry status=ok element={id}");
        Ok(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&DiagramElement> {
        self.elements.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut DiagramElement> {
        self.elements.get_mut(&id)
    }

    pub fn resolve_name(&self, display_name: &str) -> Option<ElementId> {
        self.names.get(display_name).copied()
    }

    pub fn get_by_name(&self, display_name: &str) -> Option<&DiagramElement> {
        self.resolve_name(display_name)
            .and_then(|id| self.elements.get(&id))
    }

    pub fn contains_name(&self, display_name: &str) -> bool {
        self.names.contains_key(display_name)
    }

    pub fn contains_id(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Number of admitted elements.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Sorted indexed display names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementRegistry, RegistryError};
    use crate::model::element::DiagramElement;
    use crate::model::kind::ElementKind;

    #[test]
    fn insert_indexes_by_display_name() {
        let mut registry = ElementRegistry::new();
        let element = DiagramElement::new(ElementKind::Person, "User");
        let id = registry.insert(element).expect("first insert");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve_name("User"), Some(id));
        assert!(registry.contains_id(id));
    }

    #[test]
    fn insert_rejects_duplicate_name_and_id() {
        let mut registry = ElementRegistry::new();
        let element = DiagramElement::new(ElementKind::Person, "User");
        let clone = element.clone();
        registry.insert(element).expect("first insert");

        let dup_name = registry.insert(DiagramElement::new(ElementKind::Container, "User"));
        assert_eq!(dup_name, Err(RegistryError::DuplicateName("User".to_string())));

        let dup_id = registry.insert(clone.clone());
        assert_eq!(dup_id, Err(RegistryError::DuplicateId(clone.id())));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rename_is_atomic_on_conflict() {
        let mut registry = ElementRegistry::new();
        let user = registry
            .insert(DiagramElement::new(ElementKind::Person, "User"))
            .unwrap();
        registry
            .insert(DiagramElement::new(ElementKind::Person, "Admin"))
            .unwrap();

        let err = registry.rename("User", "Admin").unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("Admin".to_string()));
        assert_eq!(registry.resolve_name("User"), Some(user));
        assert_eq!(registry.get(user).unwrap().display_name(), "User");

        registry.rename("User", "Customer").expect("free name");
        assert_eq!(registry.resolve_name("User"), None);
        assert_eq!(registry.resolve_name("Customer"), Some(user));
        assert_eq!(registry.get(user).unwrap().display_name(), "Customer");
    }

    #[test]
    fn rename_to_own_name_is_rejected() {
        let mut registry = ElementRegistry::new();
        let user = registry
            .insert(DiagramElement::new(ElementKind::Person, "User"))
            .unwrap();

        let err = registry.rename("User", "User").unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("User".to_string()));
        assert_eq!(registry.resolve_name("User"), Some(user));
    }

    #[test]
    fn reason_codes_omit_display_names() {
        let err = RegistryError::DuplicateName("Secret Project".to_string());
        assert_eq!(err.reason_code(), "duplicate_name");
        assert!(!err.reason_code().contains("Secret"));
        assert_eq!(
            RegistryError::UnknownName("Secret Project".to_string()).reason_code(),
            "unknown_name"
        );
    }

    #[test]
    fn rename_unknown_name_fails() {
        let mut registry = ElementRegistry::new();
        let err = registry.rename("Nobody", "Somebody").unwrap_err();
        assert_eq!(err, RegistryError::UnknownName("Nobody".to_string()));
    }
}
