//! XLIFF version strategies.
//!
//! Each supported XLIFF version implements [`VersionStrategy`] against the raw
//! [`XmlTree`]. [`XliffVersion`] is the closed set of strategies; it is selected
//! once per parse and dispatched with `enum_dispatch`.
//!
//! ## Module Structure
//!
//! - `v12`: XLIFF 1.2 (`trans-unit`, inline `x` placeholders)
//! - `v20`: XLIFF 2.0 (`unit` / `segment`)

mod v12;
mod v20;

use enum_dispatch::enum_dispatch;

use crate::model::{State, TranslationUnit};
use crate::xml::{NodeId, XmlTree};

pub use v12::XliffVersion12;
pub use v20::XliffVersion20;

/// Read/write adapter for one XLIFF schema version.
///
/// Readers never fail: absent values come back as empty strings or are
/// skipped. Writers ignore handles that do not point at the expected element.
#[enum_dispatch]
pub trait VersionStrategy {
    /// Version identifier as found in the root `version` attribute.
    fn identifier(&self) -> &'static str;

    /// True if the tree has exactly one `xliff` element carrying this version.
    fn can_handle(&self, tree: &XmlTree) -> bool {
        single_xliff_element(tree)
            .and_then(|xliff| tree.attribute(xliff, "version"))
            .is_some_and(|version| version == self.identifier())
    }

    fn source_language(&self, tree: &XmlTree) -> String;

    fn target_language(&self, tree: &XmlTree) -> String;

    fn set_target_language(&self, tree: &mut XmlTree, language: &str);

    /// Synthesize missing targets by copying the source content.
    fn complete_targets(&self, tree: &mut XmlTree);

    /// All translation units in document order.
    fn translation_units(&self, tree: &XmlTree) -> Vec<TranslationUnit>;

    /// Handle of the unit element with the given id.
    fn find_unit(&self, tree: &XmlTree, id: &str) -> Option<NodeId>;

    /// Write `state` into every target (or segment) of the unit.
    fn set_state(&self, tree: &mut XmlTree, unit: NodeId, state: &State);

    /// Write `translation` into the target of fragment `fragment_index`, then
    /// mark the unit as translated.
    fn set_translation(
        &self,
        tree: &mut XmlTree,
        unit: NodeId,
        fragment_index: usize,
        translation: &str,
    );
}

/// The supported XLIFF versions.
#[enum_dispatch(VersionStrategy)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XliffVersion {
    V12(XliffVersion12),
    V20(XliffVersion20),
}

impl XliffVersion {
    /// Candidates in priority order.
    const CANDIDATES: [XliffVersion; 2] = [
        XliffVersion::V12(XliffVersion12),
        XliffVersion::V20(XliffVersion20),
    ];

    /// Select the strategy able to handle `tree`, if any.
    pub fn detect(tree: &XmlTree) -> Option<Self> {
        Self::CANDIDATES
            .into_iter()
            .find(|version| version.can_handle(tree))
    }
}

impl std::fmt::Display for XliffVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "XLIFF {}", self.identifier())
    }
}

// ============================================================
// Helpers shared by both versions
// ============================================================

/// The `xliff` element, provided there is exactly one in the document.
pub(crate) fn single_xliff_element(tree: &XmlTree) -> Option<NodeId> {
    match tree.elements_by_name("xliff").as_slice() {
        [xliff] => Some(*xliff),
        _ => None,
    }
}

/// Text of the first `note` child of `parent` whose `attribute` equals `value`.
pub(crate) fn first_note(
    tree: &XmlTree,
    parent: NodeId,
    attribute: &str,
    value: &str,
) -> Option<String> {
    tree.child_elements(parent, "note")
        .find(|&note| tree.attribute(note, attribute).as_deref() == Some(value))
        .map(|note| tree.text_content(note))
}

/// Collect `unit_name` elements below `container`, descending into `group`s.
pub(crate) fn collect_units(
    tree: &XmlTree,
    container: NodeId,
    unit_name: &str,
    units: &mut Vec<NodeId>,
) {
    for &child in tree.children(container) {
        if tree.is_element_named(child, unit_name) {
            units.push(child);
        } else if tree.is_element_named(child, "group") {
            collect_units(tree, child, unit_name, units);
        }
    }
}
