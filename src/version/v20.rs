//! XLIFF 2.0 strategy.
//!
//! A unit holds one or more `segment`s; each segment with a `source` is one
//! fragment and carries its own `state`.

use log::debug;

use super::{VersionStrategy, collect_units, single_xliff_element};
use crate::model::{State, TranslationUnit, TranslationUnitFragment};
use crate::xml::{NodeId, NodeKind, XmlTree};

const STATE_INITIAL: &str = "initial";
const STATE_TRANSLATED: &str = "translated";
const STATE_REVIEWED: &str = "reviewed";
const STATE_FINAL: &str = "final";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XliffVersion20;

/// Direct text of a `source` or `target`, plus whether it holds markup.
fn segment_text(tree: &XmlTree, container: Option<NodeId>) -> (Option<String>, bool) {
    let Some(container) = container else {
        return (None, false);
    };
    let mut text = String::new();
    let mut unsupported = false;
    for &child in tree.children(container) {
        match tree.kind(child) {
            NodeKind::Text(_) | NodeKind::CData(_) => {
                text.push_str(&tree.node_text(child).unwrap_or_default());
            }
            NodeKind::Element(_) => unsupported = true,
            _ => {}
        }
    }
    (Some(text), unsupported)
}

fn encode_state(state: &State) -> &str {
    match state {
        State::Initial => STATE_INITIAL,
        State::Translated => STATE_TRANSLATED,
        State::Reviewed => STATE_REVIEWED,
        State::Final => STATE_FINAL,
        State::Other(value) => value,
    }
}

fn decode_state(value: &str) -> State {
    match value {
        STATE_INITIAL => State::Initial,
        STATE_TRANSLATED => State::Translated,
        STATE_REVIEWED => State::Reviewed,
        STATE_FINAL => State::Final,
        other => State::Other(other.to_string()),
    }
}

impl XliffVersion20 {
    /// `xliff > file > unit`, including units inside groups.
    fn units(tree: &XmlTree) -> Vec<NodeId> {
        let mut units = Vec::new();
        if let Some(xliff) = single_xliff_element(tree) {
            for file in tree.child_elements(xliff, "file") {
                collect_units(tree, file, "unit", &mut units);
            }
        }
        units
    }

    /// Segments of `unit` that have a source, in document order.
    fn segments(tree: &XmlTree, unit: NodeId) -> Vec<NodeId> {
        tree.child_elements(unit, "segment")
            .filter(|&segment| tree.first_child_element(segment, "source").is_some())
            .collect()
    }

    fn complete_segment(tree: &mut XmlTree, segment: NodeId) -> Option<NodeId> {
        let source = tree.first_child_element(segment, "source")?;
        if let Some(target) = tree.first_child_element(segment, "target") {
            return Some(target);
        }
        let target = tree.insert_element_after(source, "target");
        tree.copy_children(source, target);
        Some(target)
    }

    /// True if the unit yields a translation unit: it has an id and some
    /// source text.
    fn is_translatable(tree: &XmlTree, unit: NodeId) -> bool {
        tree.attribute(unit, "id").is_some_and(|id| !id.is_empty())
            && Self::segments(tree, unit).into_iter().any(|segment| {
                segment_text(tree, tree.first_child_element(segment, "source"))
                    .0
                    .is_some_and(|text| !text.is_empty())
            })
    }

    fn note(tree: &XmlTree, unit: NodeId, category: &str) -> Option<String> {
        let notes = tree.first_child_element(unit, "notes")?;
        super::first_note(tree, notes, "category", category)
    }

    fn location_count(tree: &XmlTree, unit: NodeId) -> usize {
        tree.child_elements(unit, "notes")
            .flat_map(|notes| tree.child_elements(notes, "note"))
            .filter(|&note| tree.attribute(note, "category").as_deref() == Some("location"))
            .count()
    }

    fn read_unit(tree: &XmlTree, unit: NodeId) -> Option<TranslationUnit> {
        let Some(id) = tree.attribute(unit, "id").filter(|id| !id.is_empty()) else {
            debug!("skipping unit without id");
            return None;
        };

        let mut unsupported = false;
        let mut fragments = Vec::new();
        for segment in Self::segments(tree, unit) {
            let (source, source_markup) =
                segment_text(tree, tree.first_child_element(segment, "source"));
            let (target, target_markup) =
                segment_text(tree, tree.first_child_element(segment, "target"));
            unsupported |= source_markup || target_markup;

            let state = tree
                .attribute(segment, "state")
                .map_or(State::Initial, |value| decode_state(&value));
            fragments.push(TranslationUnitFragment {
                source: source.unwrap_or_default(),
                target,
                state: Some(state),
            });
        }

        let mut translation_unit = TranslationUnit::from_fragments(id, fragments);
        if translation_unit.source.is_empty() {
            debug!("skipping unit '{}' without source text", translation_unit.id);
            return None;
        }
        translation_unit.meaning = Self::note(tree, unit, "meaning");
        translation_unit.description = Self::note(tree, unit, "description");
        translation_unit.unsupported = unsupported;
        translation_unit.occurrences = Some(Self::location_count(tree, unit));
        Some(translation_unit)
    }
}

impl VersionStrategy for XliffVersion20 {
    fn identifier(&self) -> &'static str {
        "2.0"
    }

    fn source_language(&self, tree: &XmlTree) -> String {
        single_xliff_element(tree)
            .and_then(|xliff| tree.attribute(xliff, "srcLang"))
            .unwrap_or_default()
    }

    fn target_language(&self, tree: &XmlTree) -> String {
        single_xliff_element(tree)
            .and_then(|xliff| tree.attribute(xliff, "trgLang"))
            .unwrap_or_default()
    }

    fn set_target_language(&self, tree: &mut XmlTree, language: &str) {
        if let Some(xliff) = single_xliff_element(tree) {
            tree.set_attribute(xliff, "trgLang", language);
        }
    }

    fn complete_targets(&self, tree: &mut XmlTree) {
        for unit in Self::units(tree) {
            if !Self::is_translatable(tree, unit) {
                continue;
            }
            for segment in Self::segments(tree, unit) {
                Self::complete_segment(tree, segment);
            }
        }
    }

    fn translation_units(&self, tree: &XmlTree) -> Vec<TranslationUnit> {
        Self::units(tree)
            .into_iter()
            .filter_map(|unit| Self::read_unit(tree, unit))
            .collect()
    }

    fn find_unit(&self, tree: &XmlTree, id: &str) -> Option<NodeId> {
        Self::units(tree).into_iter().find(|&unit| {
            tree.attribute(unit, "id").as_deref() == Some(id) && Self::is_translatable(tree, unit)
        })
    }

    fn set_state(&self, tree: &mut XmlTree, unit: NodeId, state: &State) {
        for segment in Self::segments(tree, unit) {
            tree.set_attribute(segment, "state", encode_state(state));
        }
    }

    fn set_translation(
        &self,
        tree: &mut XmlTree,
        unit: NodeId,
        fragment_index: usize,
        translation: &str,
    ) {
        match Self::segments(tree, unit).get(fragment_index) {
            Some(&segment) => {
                if let Some(target) = Self::complete_segment(tree, segment) {
                    tree.replace_children_with_text(target, translation);
                }
            }
            None => debug!("segment {} out of range", fragment_index),
        }
        self.set_state(tree, unit, &State::Translated);
    }
}
