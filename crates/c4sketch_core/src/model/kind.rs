//! Element kinds and per-kind sequence counters.
//!
//! # Responsibility
//! - Enumerate the closed set of placeable element categories.
//! - Provide default labels and css-friendly class names per kind.
//! - Track the counters used to mint default display names.
//!
//! # Invariants
//! - `SystemContext` is reserved for the synthetic root view.
//! - Counters exist for every placeable kind from construction onward and
//!   only ever increase.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Visual category of a diagram element.
///
/// Serialized in camelCase, which doubles as the css class used by the
/// presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    /// Synthetic outermost view. Never placed by users.
    SystemContext,
    SoftwareSystem,
    Person,
    Container,
}

impl ElementKind {
    /// Kinds users can place on a canvas.
    pub const PLACEABLE: [ElementKind; 3] = [
        ElementKind::SoftwareSystem,
        ElementKind::Person,
        ElementKind::Container,
    ];

    /// Default display template, e.g. `Software System`.
    pub fn label(self) -> &'static str {
        match self {
            Self::SystemContext => "System Context",
            Self::SoftwareSystem => "Software System",
            Self::Person => "Person",
            Self::Container => "Container",
        }
    }

    /// Css-friendly class name, e.g. `softwareSystem`.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::SystemContext => "systemContext",
            Self::SoftwareSystem => "softwareSystem",
            Self::Person => "person",
            Self::Container => "container",
        }
    }

    /// Resolves a kind from a human label or class name.
    ///
    /// Whitespace is stripped and the first letter lower-cased, so
    /// `"Software System"`, `"SoftwareSystem"` and `"softwareSystem"` all map
    /// to [`ElementKind::SoftwareSystem`].
    pub fn from_label(label: &str) -> Option<Self> {
        let class_name = derive_class_name(label);
        [Self::SystemContext]
            .into_iter()
            .chain(Self::PLACEABLE)
            .find(|kind| kind.css_class() == class_name)
    }
}

fn derive_class_name(label: &str) -> String {
    let compact = WHITESPACE_RE.replace_all(label.trim(), "");
    let mut chars = compact.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Per-kind counters used to mint `"<label> <n>"` default names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceCounters {
    counts: BTreeMap<ElementKind, u32>,
}

impl Default for SequenceCounters {
    fn default() -> Self {
        Self {
            counts: ElementKind::PLACEABLE
                .into_iter()
                .map(|kind| (kind, 0))
                .collect(),
        }
    }
}

impl SequenceCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for `kind`; `0` for kinds without a counter.
    pub fn get(&self, kind: ElementKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Value the counter would take on the next successful admission.
    ///
    /// Returns `None` for kinds without a counter.
    pub fn peek_next(&self, kind: ElementKind) -> Option<u32> {
        self.counts.get(&kind).map(|count| count.saturating_add(1))
    }

    /// Commits a value previously obtained from [`Self::peek_next`].
    pub(crate) fn commit(&mut self, kind: ElementKind, value: u32) {
        if let Some(count) = self.counts.get_mut(&kind) {
            *count = (*count).max(value);
        }
    }
}
