//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate registry writes into editor-level operations.
//! - Keep the presentation layer away from direct registry mutation.

pub mod diagram_model;
pub mod navigation;
