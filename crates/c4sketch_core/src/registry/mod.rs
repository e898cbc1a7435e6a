//! In-memory registries backing the diagram model.
//!
//! # Responsibility
//! - Own every admitted element and every relationship.
//! - Maintain the global display-name index used for uniqueness checks.
//!
//! # Invariants
//! - A display name maps to at most one element at any time.
//! - Registry writes are all-or-nothing; a rejected call leaves every map
//!   untouched.

pub mod element_registry;
pub mod relationship_registry;
