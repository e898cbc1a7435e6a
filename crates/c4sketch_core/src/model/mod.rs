//! Diagram domain model for C4-style architecture views.
//!
//! # Responsibility
//! - Define the records the editor places on a canvas: elements, the
//!   relationships between them, and canvas coordinates.
//! - Keep identity separate from the user-editable display label.
//!
//! # Invariants
//! - Every element is identified by a stable `ElementId`.
//! - Relationship identity is derived from endpoint ids, never from names.

pub mod element;
pub mod kind;
pub mod point;
pub mod relationship;
