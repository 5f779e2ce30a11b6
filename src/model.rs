//! Version-independent read model of an XLIFF document.
//!
//! Nothing here is stored: every value is projected from the XML tree on read.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// Workflow state of a fragment, normalized across XLIFF versions.
///
/// On-disk values a version does not map are kept verbatim in `Other` and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum State {
    Initial,
    Translated,
    Reviewed,
    Final,
    Other(String),
}

impl State {
    pub fn as_str(&self) -> &str {
        match self {
            State::Initial => "initial",
            State::Translated => "translated",
            State::Reviewed => "reviewed",
            State::Final => "final",
            State::Other(value) => value,
        }
    }

    /// Position in the workflow. Unknown states rank with `Initial`, since
    /// nothing is known about their progress.
    pub fn rank(&self) -> u8 {
        match self {
            State::Initial | State::Other(_) => 0,
            State::Translated => 1,
            State::Reviewed => 2,
            State::Final => 3,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = std::convert::Infallible;

    /// Parses the normalized names; anything else becomes `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "initial" => State::Initial,
            "translated" => State::Translated,
            "reviewed" => State::Reviewed,
            "final" => State::Final,
            other => State::Other(other.to_string()),
        })
    }
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One contiguous translatable run, or one inline placeholder flattened to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationUnitFragment {
    pub source: String,
    pub target: Option<String>,
    pub state: Option<State>,
}

impl TranslationUnitFragment {
    pub fn target_or_empty(&self) -> &str {
        self.target.as_deref().unwrap_or_default()
    }
}

/// A translatable unit, keyed by its document-unique id.
///
/// `source` and `target` are the concatenation of the fragments' values in
/// fragment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationUnit {
    pub id: String,
    pub source: String,
    pub target: String,
    pub fragments: Vec<TranslationUnitFragment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contains inline content that cannot be decomposed into fragments.
    /// Consumers must not edit the target of such a unit.
    pub unsupported: bool,
    /// Number of source locations, where the format records them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<usize>,
}

impl TranslationUnit {
    /// Build a unit from its fragments, deriving `source` and `target`.
    pub fn from_fragments(id: String, fragments: Vec<TranslationUnitFragment>) -> Self {
        let source = fragments.iter().map(|f| f.source.as_str()).collect();
        let target = fragments.iter().map(|f| f.target_or_empty()).collect();
        Self {
            id,
            source,
            target,
            fragments,
            meaning: None,
            description: None,
            unsupported: false,
            occurrences: None,
        }
    }

    /// The least advanced state over all fragments.
    pub fn state(&self) -> Option<&State> {
        self.fragments
            .iter()
            .filter_map(|fragment| fragment.state.as_ref())
            .min_by_key(|state| state.rank())
    }

    pub fn has_same_sources(&self, other: &TranslationUnit) -> bool {
        self.fragments
            .iter()
            .map(|f| &f.source)
            .eq(other.fragments.iter().map(|f| &f.source))
    }
}
