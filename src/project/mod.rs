//! Files on disk: discovery, loading and saving of XLIFF documents.
//!
//! ## Module Structure
//!
//! - `scanner`: Walk a directory for XLIFF files, honouring `ignores`
//! - `context`: Load config, scan and parse every file in parallel
//! - `files`: Read and write a single document

mod context;
mod files;
mod scanner;

pub use context::{CheckContext, LoadedFile};
pub use files::{editable_unit, read_document, write_document};
pub use scanner::{ScanResult, scan_files};
