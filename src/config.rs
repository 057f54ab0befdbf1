//! Declarative configuration file describing manifest entries.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::builder::ManifestBuilder;

/// Default configuration file name searched for under the manifest root.
pub const DEFAULT_CONFIG_FILE: &str = "manifest.config.json";

/// Declarative description of the entries that make up a cache manifest.
///
/// Every field defaults to empty so partial configuration files stay valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestConfig {
    /// Glob patterns expanded against the root into cache entries.
    pub cache_patterns: Vec<String>,
    /// Literal cache entries: root-relative paths or URLs.
    pub cache: Vec<String>,
    /// Glob patterns whose matches only influence the version fingerprint.
    pub watch_patterns: Vec<String>,
    /// Literal fingerprint-only entries.
    pub watch: Vec<String>,
    /// NETWORK section entries, stored verbatim (may include `"*"`).
    pub network: Vec<String>,
    /// FALLBACK rules applied in authored order.
    pub fallback: Vec<FallbackRule>,
}

/// Single FALLBACK mapping from a namespace to its offline replacement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackRule {
    /// Namespace prefix matched against failing request URLs.
    pub namespace: String,
    /// Resource served in place of anything under the namespace.
    pub url: String,
}

/// Errors that can occur while loading a manifest configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },
    /// Failed to parse the JSON configuration file.
    Parse {
        /// Path that caused the error.
        path: PathBuf,
        /// Source parse error.
        source: serde_json::Error,
    },
}

impl ManifestConfig {
    /// Load the default configuration file under `dir`, falling back to an
    /// empty configuration when the file does not exist.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_from_path(dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Read configuration from a specific JSON file. A missing file yields
    /// the default configuration; unreadable or malformed files are errors.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            source: err,
        })
    }

    /// Apply every declared entry to `builder`, preserving authored order
    /// within each category.
    pub fn apply(&self, builder: ManifestBuilder) -> ManifestBuilder {
        let mut builder = builder
            .cache_patterns(&self.cache_patterns)
            .cache(&self.cache)
            .watch_patterns(&self.watch_patterns)
            .watch(&self.watch)
            .network(&self.network);
        for rule in &self.fallback {
            builder = builder.fallback(rule.namespace.clone(), rule.url.clone());
        }
        builder
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
