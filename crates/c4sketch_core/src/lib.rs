//! Core diagram model for the c4sketch architecture editor.
//! This crate is the single source of truth for diagram invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod registry;
pub mod service;

pub use config::{ConfigError, ModelConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::element::{DiagramElement, ElementId, ElementValidationError};
pub use model::kind::{ElementKind, SequenceCounters};
pub use model::point::Point;
pub use model::relationship::{Relationship, RelationshipId};
pub use registry::element_registry::{ElementRegistry, RegistryError};
pub use registry::relationship_registry::RelationshipRegistry;
pub use service::diagram_model::{DiagramModel, DiagramModelError};
pub use service::navigation::NavigationStack;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
