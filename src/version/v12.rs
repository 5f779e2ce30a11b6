//! XLIFF 1.2 strategy.
//!
//! A unit is a `trans-unit` with one `source` and one `target`. Fragments come
//! from splitting the source at inline `x` placeholders: every text node and
//! every `x` element (through its `equiv-text`) is one fragment. The target is
//! matched against the source by position between placeholders, so a text run
//! left empty in the target still lines up after a save.

use log::debug;

use super::{VersionStrategy, collect_units, first_note, single_xliff_element};
use crate::model::{State, TranslationUnit, TranslationUnitFragment};
use crate::xml::{NodeId, NodeKind, XmlTree};

const PLACEHOLDER_TAG: &str = "x";
const PLACEHOLDER_TEXT_ATTR: &str = "equiv-text";

const STATE_NEW: &str = "new";
const STATE_TRANSLATED: &str = "translated";
const STATE_SIGNED_OFF: &str = "signed-off";
const STATE_FINAL: &str = "final";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XliffVersion12;

/// Position of a fragment inside a `source` or `target` element.
///
/// Placeholders split the content into text runs. A run may hold several
/// text nodes (split by comments or CDATA) or none at all, since an empty run
/// leaves no trace in the serialized markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Text { run: usize, position: usize },
    Placeholder(usize),
}

/// Text runs and placeholders of a `source` or `target` element.
#[derive(Debug)]
struct Layout {
    /// One more run than placeholders.
    runs: Vec<Vec<NodeId>>,
    placeholders: Vec<NodeId>,
    unsupported: bool,
}

impl Layout {
    fn read(tree: &XmlTree, container: Option<NodeId>) -> Self {
        let mut layout = Self {
            runs: vec![Vec::new()],
            placeholders: Vec::new(),
            unsupported: false,
        };
        let Some(container) = container else {
            return layout;
        };
        for &child in tree.children(container) {
            match tree.kind(child) {
                NodeKind::Text(_) | NodeKind::CData(_) => {
                    if let Some(run) = layout.runs.last_mut() {
                        run.push(child);
                    }
                }
                NodeKind::Element(element) if element.local_name() == PLACEHOLDER_TAG => {
                    layout.placeholders.push(child);
                    layout.runs.push(Vec::new());
                }
                NodeKind::Element(_) => layout.unsupported = true,
                _ => {}
            }
        }
        layout
    }

    /// Every text node and placeholder, in document order.
    fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::new();
        for (run, nodes) in self.runs.iter().enumerate() {
            if run > 0 {
                slots.push(Slot::Placeholder(run - 1));
            }
            slots.extend((0..nodes.len()).map(|position| Slot::Text { run, position }));
        }
        slots
    }

    fn node(&self, slot: Slot) -> Option<NodeId> {
        match slot {
            Slot::Text { run, position } => self.runs.get(run)?.get(position).copied(),
            Slot::Placeholder(index) => self.placeholders.get(index).copied(),
        }
    }

    /// Text at `slot`; empty when this element has nothing there.
    fn text(&self, tree: &XmlTree, slot: Slot) -> String {
        let Some(node) = self.node(slot) else {
            return String::new();
        };
        match slot {
            Slot::Text { .. } => tree.node_text(node),
            Slot::Placeholder(_) => tree.attribute(node, PLACEHOLDER_TEXT_ATTR),
        }
        .unwrap_or_default()
    }

    fn is_empty(&self) -> bool {
        self.placeholders.is_empty() && self.runs.iter().all(Vec::is_empty)
    }
}

fn encode_state(state: &State) -> &str {
    match state {
        State::Initial => STATE_NEW,
        State::Translated => STATE_TRANSLATED,
        State::Reviewed => STATE_SIGNED_OFF,
        State::Final => STATE_FINAL,
        State::Other(value) => value,
    }
}

fn decode_state(value: &str) -> State {
    match value {
        STATE_NEW => State::Initial,
        STATE_TRANSLATED => State::Translated,
        STATE_SIGNED_OFF => State::Reviewed,
        STATE_FINAL => State::Final,
        other => State::Other(other.to_string()),
    }
}

impl XliffVersion12 {
    fn first_file(tree: &XmlTree) -> Option<NodeId> {
        tree.elements_by_name("file").first().copied()
    }

    /// `xliff > file > body > trans-unit`, including units inside groups.
    fn trans_units(tree: &XmlTree) -> Vec<NodeId> {
        let mut units = Vec::new();
        let Some(xliff) = single_xliff_element(tree) else {
            return units;
        };
        for file in tree.child_elements(xliff, "file") {
            for body in tree.child_elements(file, "body") {
                collect_units(tree, body, "trans-unit", &mut units);
            }
        }
        units
    }

    fn source(tree: &XmlTree, unit: NodeId) -> Option<NodeId> {
        tree.first_child_element(unit, "source")
    }

    fn target(tree: &XmlTree, unit: NodeId) -> Option<NodeId> {
        tree.first_child_element(unit, "target")
    }

    /// A target without any fragment or markup to preserve.
    fn is_blank(tree: &XmlTree, target: NodeId) -> bool {
        let layout = Layout::read(tree, Some(target));
        layout.is_empty() && !layout.unsupported
    }

    fn source_text(tree: &XmlTree, source: &Layout) -> String {
        source
            .slots()
            .into_iter()
            .map(|slot| source.text(tree, slot))
            .collect()
    }

    /// True if the `trans-unit` yields a translation unit: it has an id and
    /// a non-empty source.
    fn is_translatable(tree: &XmlTree, unit: NodeId) -> bool {
        tree.attribute(unit, "id").is_some_and(|id| !id.is_empty())
            && !Self::source_text(tree, &Layout::read(tree, Self::source(tree, unit))).is_empty()
    }

    /// Write `translation` at `slot` of `target`.
    ///
    /// A text run missing from the target gets a new text node between the
    /// placeholders that delimit it.
    fn write_slot(tree: &mut XmlTree, target: NodeId, slot: Slot, translation: &str) {
        let layout = Layout::read(tree, Some(target));
        match (slot, layout.node(slot)) {
            (Slot::Placeholder(_), Some(node)) => {
                tree.set_attribute(node, PLACEHOLDER_TEXT_ATTR, translation);
            }
            (Slot::Text { .. }, Some(node)) => tree.set_node_text(node, translation),
            (Slot::Placeholder(index), None) => {
                debug!("target has no placeholder #{}", index);
            }
            (Slot::Text { .. }, None) if translation.is_empty() => {}
            (Slot::Text { run, .. }, None) => {
                let anchor = layout
                    .runs
                    .get(run)
                    .and_then(|nodes| nodes.last())
                    .or_else(|| {
                        run.checked_sub(1)
                            .and_then(|index| layout.placeholders.get(index))
                    })
                    .copied();
                match anchor {
                    Some(anchor) => {
                        tree.insert_text_after(anchor, translation);
                    }
                    None if run == 0 => {
                        tree.prepend_text(target, translation);
                    }
                    None => {
                        tree.append_text(target, translation);
                    }
                }
            }
        }
    }

    /// Make sure the unit has a target, copying the source content if needed.
    fn complete_unit(tree: &mut XmlTree, unit: NodeId) -> Option<NodeId> {
        let source = Self::source(tree, unit)?;
        match Self::target(tree, unit) {
            Some(target) if Self::is_blank(tree, target) => {
                tree.clear_children(target);
                tree.copy_children(source, target);
                if tree.attribute(target, "state").is_none() {
                    tree.set_attribute(target, "state", STATE_NEW);
                }
                Some(target)
            }
            Some(target) => Some(target),
            None => {
                let target = tree.insert_element_after(source, "target");
                tree.set_attribute(target, "state", STATE_NEW);
                tree.copy_children(source, target);
                Some(target)
            }
        }
    }

    fn read_unit(tree: &XmlTree, unit: NodeId) -> Option<TranslationUnit> {
        let Some(id) = tree.attribute(unit, "id").filter(|id| !id.is_empty()) else {
            debug!("skipping trans-unit without id");
            return None;
        };

        let source = Layout::read(tree, Self::source(tree, unit));
        if Self::source_text(tree, &source).is_empty() {
            debug!("skipping trans-unit '{}' without source text", id);
            return None;
        }
        let target_node = Self::target(tree, unit);
        let target = Layout::read(tree, target_node);

        let state = target_node
            .and_then(|node| tree.attribute(node, "state"))
            .map_or(State::Initial, |value| decode_state(&value));

        let fragments = source
            .slots()
            .into_iter()
            .map(|slot| TranslationUnitFragment {
                source: source.text(tree, slot),
                target: Some(target.text(tree, slot)),
                state: Some(state.clone()),
            })
            .collect();

        let mut translation_unit = TranslationUnit::from_fragments(id, fragments);
        translation_unit.meaning = first_note(tree, unit, "from", "meaning");
        translation_unit.description = first_note(tree, unit, "from", "description");
        translation_unit.unsupported = source.unsupported || target.unsupported;
        Some(translation_unit)
    }
}

impl VersionStrategy for XliffVersion12 {
    fn identifier(&self) -> &'static str {
        "1.2"
    }

    fn source_language(&self, tree: &XmlTree) -> String {
        Self::first_file(tree)
            .and_then(|file| tree.attribute(file, "source-language"))
            .unwrap_or_default()
    }

    fn target_language(&self, tree: &XmlTree) -> String {
        Self::first_file(tree)
            .and_then(|file| tree.attribute(file, "target-language"))
            .unwrap_or_default()
    }

    fn set_target_language(&self, tree: &mut XmlTree, language: &str) {
        if let Some(file) = Self::first_file(tree) {
            tree.set_attribute(file, "target-language", language);
        }
    }

    fn complete_targets(&self, tree: &mut XmlTree) {
        for unit in Self::trans_units(tree) {
            if Self::is_translatable(tree, unit) {
                Self::complete_unit(tree, unit);
            }
        }
    }

    fn translation_units(&self, tree: &XmlTree) -> Vec<TranslationUnit> {
        Self::trans_units(tree)
            .into_iter()
            .filter_map(|unit| Self::read_unit(tree, unit))
            .collect()
    }

    fn find_unit(&self, tree: &XmlTree, id: &str) -> Option<NodeId> {
        Self::trans_units(tree).into_iter().find(|&unit| {
            tree.attribute(unit, "id").as_deref() == Some(id) && Self::is_translatable(tree, unit)
        })
    }

    fn set_state(&self, tree: &mut XmlTree, unit: NodeId, state: &State) {
        let targets: Vec<NodeId> = tree.child_elements(unit, "target").collect();
        for target in targets {
            tree.set_attribute(target, "state", encode_state(state));
        }
    }

    fn set_translation(
        &self,
        tree: &mut XmlTree,
        unit: NodeId,
        fragment_index: usize,
        translation: &str,
    ) {
        if let Some(target) = Self::complete_unit(tree, unit) {
            let source = Layout::read(tree, Self::source(tree, unit));
            match source.slots().get(fragment_index) {
                Some(&slot) => Self::write_slot(tree, target, slot, translation),
                None => debug!("fragment {} out of range", fragment_index),
            }
        }
        self.set_state(tree, unit, &State::Translated);
    }
}
