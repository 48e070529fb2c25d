//! Store configuration via `sitedata.toml`
//!
//! On `sitedata init`, a default `sitedata.toml` is created next to the
//! binary's working directory. To change settings, edit the file and
//! restart. Command-line flags override individual fields.

use serde::{Deserialize, Serialize};
use sitedata_core::{CorruptionPolicy, Error, Result, Schema, RESERVED_NAMES};
use std::path::{Path, PathBuf};

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "sitedata.toml";

/// Store and server configuration loaded from `sitedata.toml`.
///
/// # Example
///
/// ```toml
/// data_file = "data/app-data.json"
/// bind = "0.0.0.0:8787"
/// base_path = "/api"
/// on_corrupt = "reset"
/// extra_collections = ["invoices"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDataConfig {
    /// Path of the JSON document.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Socket address the HTTP server listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Path prefix of the resource API.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// What to do with an unreadable document: `"reset"` or `"fail"`.
    #[serde(default)]
    pub on_corrupt: CorruptionPolicy,
    /// Collections accepted in addition to the built-in ones.
    #[serde(default)]
    pub extra_collections: Vec<String>,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/app-data.json")
}

fn default_bind() -> String {
    "0.0.0.0:8787".to_string()
}

fn default_base_path() -> String {
    "/api".to_string()
}

impl Default for SiteDataConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            bind: default_bind(),
            base_path: default_base_path(),
            on_corrupt: CorruptionPolicy::default(),
            extra_collections: Vec::new(),
        }
    }
}

impl SiteDataConfig {
    /// Schema of the document: built-in names plus `extra_collections`.
    pub fn schema(&self) -> Schema {
        Schema::with_collections(self.extra_collections.iter().cloned())
    }

    /// Check field values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_path` does not start with `/`, or if an
    /// extra collection name is empty, contains `/` or is reserved.
    pub fn validate(&self) -> Result<()> {
        if !self.base_path.starts_with('/') {
            return Err(Error::Config(format!(
                "base_path '{}' must start with '/'",
                self.base_path
            )));
        }
        if let Some(bad) = self
            .extra_collections
            .iter()
            .find(|name| {
                name.is_empty() || name.contains('/') || RESERVED_NAMES.contains(&name.as_str())
            })
        {
            return Err(Error::Config(format!("invalid collection name '{bad}'")));
        }
        Ok(())
    }

    /// `base_path` without a trailing slash; `"/"` becomes `""`.
    pub fn normalized_base_path(&self) -> String {
        self.base_path.trim_end_matches('/').to_string()
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# SiteData configuration
#
# Path of the JSON document holding every collection.
data_file = "data/app-data.json"

# Address the HTTP API listens on.
bind = "0.0.0.0:8787"

# Path prefix of the resource API.
base_path = "/api"

# What to do when the document cannot be read or parsed:
#   "reset" = log a warning and serve an empty document (default)
#   "fail"  = answer every request with an internal error until fixed
on_corrupt = "reset"

# Collections accepted in addition to clients, jobApplications,
# serviceRequests, userAccounts and clientRequests.
extra_collections = []
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: SiteDataConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(true)` if the file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml()).map_err(|e| {
            Error::Config(format!(
                "Failed to write default config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(true)
    }
}
