//! xliffer - XLIFF 1.2 / 2.0 document engine
//!
//! xliffer is a CLI tool and library for reading, editing and aligning XLIFF
//! translation files. Documents are edited in place: everything the engine
//! does not understand survives a load/save cycle untouched.
//!
//! ## Module Structure
//!
//! - `xml`: Ordered XML tree with in-place mutation and serialization
//! - `model`: Version-independent translation units and states
//! - `version`: XLIFF 1.2 and 2.0 strategies over the XML tree
//! - `document`: The document facade (parse, query, edit, serialize)
//! - `align`: Carry translations from an old document into a fresh extraction
//! - `locale`: Locale tag shape check
//! - `config`: Configuration file loading and parsing
//! - `project`: Finding, loading and saving files on disk
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Checks run by `xliffer check`
//! - `cli`: Command-line interface layer
//! - `mcp`: Model Context Protocol server implementation

pub mod align;
pub mod cli;
pub mod config;
pub mod document;
pub mod issues;
pub mod locale;
pub mod mcp;
pub mod model;
pub mod project;
pub mod rules;
pub mod version;
pub mod xml;

pub use align::{AlignOptions, AlignmentReport, StatePolicy, align_documents};
pub use document::{DocumentError, MEDIA_TYPE, XliffDocument};
pub use model::{State, TranslationUnit, TranslationUnitFragment};
