//! Owned, mutable XML tree with raw-preserving serialization.
//!
//! The tree is built from `quick-xml` events and keeps the raw source text of
//! every node. Serializing an untouched tree reproduces the input; edits only
//! regenerate the nodes they touch.
//!
//! ## Module Structure
//!
//! - `error`: Error type for malformed input
//! - `tree`: Arena tree, parsing, navigation and mutation

mod error;
mod tree;

pub use error::XmlError;
pub use tree::{Attribute, Element, NodeId, NodeKind, XmlTree};
