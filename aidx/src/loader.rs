//! Guide corpus loading
//!
//! Reads guides from a JSON or YAML file, or from every matching file under a
//! directory. A file may hold a single guide object or an array of them.

use crate::error::{Error, Result};
use crate::models::Guide;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files picked up when loading a directory
pub const DEFAULT_PATTERNS: &[&str] = &["**/*.json", "**/*.yaml", "**/*.yml"];

/// Serialization format of a guide file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideFormat {
    Json,
    Yaml,
}

impl GuideFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(GuideFormat::Json),
            "yaml" | "yml" => Some(GuideFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse one guide or an array of guides
pub fn parse_guides(text: &str, format: GuideFormat) -> Result<Vec<Guide>> {
    match format {
        GuideFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(text)?;
            if value.is_array() {
                Ok(serde_json::from_value(value)?)
            } else {
                Ok(vec![serde_json::from_value(value)?])
            }
        }
        GuideFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(text)?;
            if value.is_sequence() {
                Ok(serde_yaml::from_value(value)?)
            } else {
                Ok(vec![serde_yaml::from_value(value)?])
            }
        }
    }
}

/// Load guides from a file or directory using [`DEFAULT_PATTERNS`]
pub fn load_guides<P: AsRef<Path>>(path: P) -> Result<Vec<Guide>> {
    GuideLoader::new(DEFAULT_PATTERNS)?.load(path)
}

/// Loader for guide files
#[derive(Debug, Clone)]
pub struct GuideLoader {
    /// Include patterns (glob), applied to directory contents only
    patterns: Vec<Pattern>,
}

impl GuideLoader {
    /// Create a loader that picks up directory files matching `patterns`
    pub fn new(patterns: &[&str]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(GuideLoader { patterns })
    }

    /// Load a single file, or every matching file under a directory
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Guide>> {
        let path = path.as_ref();

        if path.is_dir() {
            self.load_dir(path)
        } else {
            let format =
                GuideFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat(path.into()))?;
            load_file(path, format)
        }
    }

    fn load_dir(&self, root: &Path) -> Result<Vec<Guide>> {
        let mut files: Vec<PathBuf> = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        {
            let entry = entry?;
            if entry.file_type().is_file() && self.matches(root, entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();

        let mut guides = Vec::new();
        for file in &files {
            match GuideFormat::from_path(file) {
                Some(format) => guides.extend(load_file(file, format)?),
                None => tracing::warn!("Skipping {}: not a JSON or YAML file", file.display()),
            }
        }

        tracing::info!(
            files = files.len(),
            guides = guides.len(),
            "Loaded guides from {}",
            root.display()
        );

        Ok(guides)
    }

    /// Check if a path matches any include pattern
    fn matches(&self, root: &Path, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        let relative = path
            .strip_prefix(root)
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };

        self.patterns.iter().any(|p| {
            // "**/*.json" should also match a top-level "a.json"
            if let Some(suffix) = p.as_str().strip_prefix("**/") {
                if Pattern::new(suffix).is_ok_and(|s| s.matches_with(filename, options)) {
                    return true;
                }
            }
            p.matches_with(&relative, options) || p.matches_with(filename, options)
        })
    }
}

fn load_file(path: &Path, format: GuideFormat) -> Result<Vec<Guide>> {
    let text = std::fs::read_to_string(path)?;

    parse_guides(&text, format).map_err(|e| Error::InvalidGuideFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
