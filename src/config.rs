//! Publish configuration (mockup.yaml plus environment).
//!
//! Non-secret settings may live in a `mockup.yaml` file in the parent
//! folder. The service key is only ever read from the environment.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MockupError, Result};

/// The name of the optional configuration file in the parent folder.
pub const CONFIG_FILENAME: &str = "mockup.yaml";

pub const ENV_URL: &str = "SUPABASE_URL";
pub const ENV_SERVICE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const ENV_BUCKET: &str = "MOCKUP_BUCKET";
pub const ENV_NAMESPACE: &str = "MOCKUP_NAMESPACE";
pub const ENV_TABLE: &str = "MOCKUP_TABLE";
pub const ENV_AUTHOR: &str = "MOCKUP_AUTHOR";

/// Settings for the storage bucket and catalog table mockups publish to.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Base URL of the Supabase project.
    pub url: Option<String>,

    /// Service role key. Never read from or written to YAML.
    #[serde(skip)]
    pub service_key: Option<String>,

    /// Storage bucket receiving the assets.
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Key prefix inside the bucket; each folder goes under `<namespace>/<folder>/`.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Catalog table receiving one record per published folder.
    #[serde(default = "default_table")]
    pub table: String,

    /// Author recorded on catalog entries.
    #[serde(default = "default_author")]
    pub author: String,
}

fn default_bucket() -> String {
    "files".to_string()
}

fn default_namespace() -> String {
    "online-mockups".to_string()
}

fn default_table() -> String {
    "mockups".to_string()
}

fn default_author() -> String {
    "MockupForest".to_string()
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            url: None,
            service_key: None,
            bucket: default_bucket(),
            namespace: default_namespace(),
            table: default_table(),
            author: default_author(),
        }
    }
}

impl fmt::Debug for PublishConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishConfig")
            .field("url", &self.url)
            .field("service_key", &self.service_key.as_ref().map(|_| "<redacted>"))
            .field("bucket", &self.bucket)
            .field("namespace", &self.namespace)
            .field("table", &self.table)
            .field("author", &self.author)
            .finish()
    }
}

/// Connection details checked to be present.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub url: &'a str,
    pub service_key: &'a str,
}

impl PublishConfig {
    /// Load configuration from a mockup.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MockupError::io(path, "Failed to read config", e))?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| MockupError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `mockup.yaml` from `parent` if present, then apply the process
    /// environment.
    pub fn discover(parent: &Path) -> Result<Self> {
        let path = parent.join(CONFIG_FILENAME);
        let config = if path.is_file() {
            tracing::debug!("Loading {}", path.display());
            Self::load(&path)?
        } else {
            Self::default()
        };

        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are treated as unset.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_URL) {
            self.url = Some(url);
        }
        if let Some(key) = get(ENV_SERVICE_KEY) {
            self.service_key = Some(key);
        }
        if let Some(bucket) = get(ENV_BUCKET) {
            self.bucket = bucket;
        }
        if let Some(namespace) = get(ENV_NAMESPACE) {
            self.namespace = namespace;
        }
        if let Some(table) = get(ENV_TABLE) {
            self.table = table;
        }
        if let Some(author) = get(ENV_AUTHOR) {
            self.author = author;
        }

        self
    }

    /// The URL and service key, or a configuration error naming what is missing.
    pub fn credentials(&self) -> Result<Credentials<'_>> {
        let url = self.url.as_deref().ok_or_else(|| MockupError::Config {
            message: "No Supabase URL configured".to_string(),
            help: Some(format!("Set {} or add `url:` to {}", ENV_URL, CONFIG_FILENAME)),
        })?;

        let service_key = self.service_key.as_deref().ok_or_else(|| MockupError::Config {
            message: "No Supabase service key configured".to_string(),
            help: Some(format!("Set {} in the environment", ENV_SERVICE_KEY)),
        })?;

        Ok(Credentials { url, service_key })
    }

    /// Storage key for a file in a mockup folder.
    pub fn storage_key(&self, folder_name: &str, filename: &str) -> String {
        format!("{}/{}/{}", self.namespace, folder_name, filename)
    }
}
