use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::align::{AlignOptions, DEFAULT_ALIGNED_FILENAME, StatePolicy};

pub const CONFIG_FILE_NAME: &str = ".xlifferrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub align_state_policy: StatePolicy,
    #[serde(default = "default_aligned_filename")]
    pub aligned_filename: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_aligned_filename() -> String {
    DEFAULT_ALIGNED_FILENAME.to_string()
}

fn default_extensions() -> Vec<String> {
    ["xlf", "xliff"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            align_state_policy: StatePolicy::default(),
            aligned_filename: default_aligned_filename(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or no
    /// extension is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.extensions.iter().all(|ext| ext.trim().is_empty()) {
            anyhow::bail!("'extensions' must name at least one file extension");
        }

        if self.aligned_filename.trim().is_empty() {
            anyhow::bail!("'alignedFilename' must not be empty");
        }

        Ok(())
    }

    /// Compiled `ignores`; call after [`Config::validate`].
    pub fn ignore_patterns(&self) -> Vec<Pattern> {
        self.ignores
            .iter()
            .filter_map(|pattern| Pattern::new(pattern).ok())
            .collect()
    }

    /// True if `path` has one of the configured extensions (case-insensitive,
    /// leading dot optional).
    pub fn is_xliff_file(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|configured| configured.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    pub fn align_options(&self) -> AlignOptions {
        AlignOptions {
            policy: self.align_state_policy,
            fallback_filename: self.aligned_filename.clone(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
