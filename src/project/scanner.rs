use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;

/// Directories never worth descending into.
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules", "target"];

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths relative to the root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Matching files, sorted.
    pub files: Vec<String>,
    /// Entries that could not be read.
    pub skipped_count: usize,
}

/// Collect the XLIFF files below `base`.
///
/// A `base` that is itself a file is returned as-is, whatever its extension.
pub fn scan_files(base: &Path, config: &Config) -> ScanResult {
    if base.is_file() {
        return ScanResult {
            files: vec![base.to_string_lossy().into_owned()],
            skipped_count: 0,
        };
    }

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in &config.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!("invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(base.join(p));
        }
    }

    let mut files = Vec::new();
    let mut skipped_count = 0;

    let walker = WalkDir::new(base).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !SKIPPED_DIRS.iter().any(|skipped| entry.file_name() == *skipped)
    });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                debug!("cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }
        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if entry.file_type().is_file() && config.is_xliff_file(path) {
            files.push(path_str.into_owned());
        }
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}
