use std::{
    cell::OnceCell,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use log::{debug, info, warn};
use rayon::prelude::*;

use super::scanner::scan_files;
use crate::{
    config::{Config, load_config},
    document::XliffDocument,
    issues::ParseErrorIssue,
};

/// A file that parsed as XLIFF 1.2 or 2.0.
pub struct LoadedFile {
    pub file_path: String,
    pub document: XliffDocument,
}

/// Everything `check` needs: configuration, the scanned files and, on first
/// access, their parsed documents.
pub struct CheckContext {
    pub config: Config,
    /// True if the config came from a `.xlifferrc.json`.
    pub config_from_file: bool,
    pub root_dir: PathBuf,
    /// Scanned XLIFF files, sorted.
    pub files: Vec<String>,
    loaded: OnceCell<(Vec<LoadedFile>, Vec<ParseErrorIssue>)>,
}

impl CheckContext {
    /// Load configuration and scan `path` (a directory or a single file).
    ///
    /// The configuration is searched upwards from `path` (or from its parent
    /// directory when `path` is a file).
    pub fn new(path: &Path) -> Result<Self> {
        let config_dir = if path.is_file() {
            path.parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
        } else {
            path
        };

        let config_result = load_config(config_dir)?;
        if !config_result.from_file {
            info!("no .xlifferrc.json found, using default configuration");
        }
        let config = config_result.config;

        let scan_result = scan_files(path, &config);
        if scan_result.skipped_count > 0 {
            warn!(
                "{} path(s) skipped due to access errors",
                scan_result.skipped_count
            );
        }
        debug!("found {} XLIFF file(s)", scan_result.files.len());

        Ok(Self {
            config,
            config_from_file: config_result.from_file,
            root_dir: path.to_path_buf(),
            files: scan_result.files,
            loaded: OnceCell::new(),
        })
    }

    /// Parsed documents (lazy initialization).
    ///
    /// Files are read and parsed in parallel, one document per task. Files
    /// that cannot be read or parsed are reported by [`Self::parse_errors`].
    pub fn loaded_files(&self) -> &[LoadedFile] {
        &self.load().0
    }

    pub fn parse_errors(&self) -> &[ParseErrorIssue] {
        &self.load().1
    }

    fn load(&self) -> &(Vec<LoadedFile>, Vec<ParseErrorIssue>) {
        self.loaded.get_or_init(|| {
            let results: Vec<_> = self
                .files
                .par_iter()
                .map(|file_path| {
                    let result = fs::read_to_string(file_path)
                        .map_err(|e| format!("cannot read file: {}", e))
                        .and_then(|content| {
                            XliffDocument::try_from_xliff(&content).map_err(|e| e.to_string())
                        });
                    (file_path.clone(), result)
                })
                .collect();

            let mut loaded = Vec::new();
            let mut errors = Vec::new();
            for (file_path, result) in results {
                match result {
                    Ok(mut document) => {
                        document.filename = Path::new(&file_path)
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned());
                        loaded.push(LoadedFile {
                            file_path,
                            document,
                        });
                    }
                    Err(error) => {
                        debug!("{}: {}", file_path, error);
                        errors.push(ParseErrorIssue { file_path, error });
                    }
                }
            }
            (loaded, errors)
        })
    }
}
