//! Alignment of a freshly extracted document with a previously translated one.
//!
//! `latest` keeps its own units and fragment shapes; translations and states
//! are carried over from `align` where the sources still match.

use std::collections::{HashMap, HashSet};

use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::document::XliffDocument;
use crate::model::{State, TranslationUnit};

/// Filename given to the merged document when `align` has none.
pub const DEFAULT_ALIGNED_FILENAME: &str = "updated.xliff";

/// State given to units whose sources are unchanged.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StatePolicy {
    /// Mark matching units `final`.
    #[default]
    Final,
    /// Keep the state the unit had in `align` (its least advanced fragment).
    Carry,
}

impl std::fmt::Display for StatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatePolicy::Final => write!(f, "final"),
            StatePolicy::Carry => write!(f, "carry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignOptions {
    pub policy: StatePolicy,
    pub fallback_filename: String,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            policy: StatePolicy::default(),
            fallback_filename: DEFAULT_ALIGNED_FILENAME.to_string(),
        }
    }
}

/// Unit ids grouped by what alignment did with them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentReport {
    /// Sources unchanged; translation and state carried over.
    pub carried: Vec<String>,
    /// Sources changed; reset to `initial`.
    pub reset: Vec<String>,
    /// Only in `latest`.
    pub added: Vec<String>,
    /// Only in `align`; dropped from the result.
    pub removed: Vec<String>,
}

impl AlignmentReport {
    pub fn is_empty(&self) -> bool {
        self.carried.is_empty()
            && self.reset.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }
}

/// Merge the translations of `align` into `latest`.
///
/// Per unit of `latest`:
/// - no unit with the same id in `align`: the seeded targets stay and the
///   state becomes `initial`;
/// - otherwise every fragment takes the `align` target at the same index if
///   that fragment has the same source, else its own source. The unit state is
///   decided by `options.policy` when all sources match, `initial` otherwise.
pub fn align_documents(
    latest: &mut XliffDocument,
    align: &XliffDocument,
    options: &AlignOptions,
) -> AlignmentReport {
    let target_language = align.target_language();
    if !target_language.is_empty() {
        latest.set_target_language(&target_language);
    }
    latest.filename = Some(
        align
            .filename
            .clone()
            .unwrap_or_else(|| options.fallback_filename.clone()),
    );

    let align_units = align.translation_units();
    let mut by_id: HashMap<&str, &TranslationUnit> = HashMap::new();
    for unit in &align_units {
        by_id.entry(unit.id.as_str()).or_insert(unit);
    }

    let mut report = AlignmentReport::default();
    let latest_units = latest.translation_units();
    let mut handled: HashSet<&str> = HashSet::new();

    for unit in &latest_units {
        // Edits address units by id, so a repeated id would hit the first unit again.
        if !handled.insert(unit.id.as_str()) {
            debug!("skipping duplicate unit '{}'", unit.id);
            continue;
        }
        let Some(existing) = by_id.remove(unit.id.as_str()) else {
            debug!("unit '{}' is new", unit.id);
            latest.set_state(&unit.id, &State::Initial);
            report.added.push(unit.id.clone());
            continue;
        };

        for (index, fragment) in unit.fragments.iter().enumerate() {
            let target = existing
                .fragments
                .get(index)
                .filter(|previous| previous.source == fragment.source)
                .and_then(|previous| previous.target.as_deref())
                .unwrap_or(fragment.source.as_str());
            latest.set_translation(&unit.id, index, target);
        }

        let state = if unit.has_same_sources(existing) {
            report.carried.push(unit.id.clone());
            match options.policy {
                StatePolicy::Final => State::Final,
                StatePolicy::Carry => existing.state().cloned().unwrap_or(State::Initial),
            }
        } else {
            debug!("unit '{}' changed its source", unit.id);
            report.reset.push(unit.id.clone());
            State::Initial
        };
        latest.set_state(&unit.id, &state);
    }

    // Units that only exist in `align`, in its document order.
    let mut listed: HashSet<&str> = HashSet::new();
    report.removed = align_units
        .iter()
        .filter(|unit| by_id.contains_key(unit.id.as_str()) && listed.insert(unit.id.as_str()))
        .map(|unit| unit.id.clone())
        .collect();

    report
}
