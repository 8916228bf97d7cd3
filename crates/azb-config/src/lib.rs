//! Configuration management for AZ Builder.
//!
//! Parses `azbuilder.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied after load via [`CliSettings`].
//!
//! The persisted settings also drive catalog cache invalidation: every
//! catalog entry is stored under [`BuilderConfig::cache_etag`], so saving
//! different settings makes all cached catalogs stale at once.

mod style;

use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use style::{StyleRule, normalize_font_list, parse_style_set};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "azbuilder.toml";

/// Default CDN pattern for cloud-hosted editor assets. `VERSION` is
/// substituted with the configured asset version.
pub const DEFAULT_CLOUD_URL: &str = "https://cdn.example.com/azbuilder/VERSION/";

/// Error loading or parsing configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has invalid fields.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
}

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the editor asset source.
    pub assets_source: Option<AssetSource>,
    /// Override the cloud asset URL.
    pub cloud_url: Option<String>,
    /// Override the product key.
    pub product_key: Option<String>,
    /// Override the public files directory.
    pub public_files: Option<String>,
    /// Override the private files directory.
    pub private_files: Option<String>,
    /// Override the builder module directory.
    pub module_dir: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Editor asset delivery configuration.
    pub assets: AssetsConfig,
    /// Editor behavior configuration.
    pub editor: EditorConfig,
    /// Deployment path configuration.
    pub paths: PathsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Where the client editor loads its assets from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AssetSource {
    /// Load from the product CDN, authenticated with the product key.
    #[default]
    Cloud,
    /// Serve from the local module directory.
    Local,
}

/// Editor asset delivery configuration.
#[derive(Debug, Deserialize, Serialize, Hash)]
#[serde(default)]
pub struct AssetsConfig {
    /// Asset source selection.
    pub source: AssetSource,
    /// Cloud URL pattern; `VERSION` is substituted with `version`.
    pub cloud_url: String,
    /// Product key (JWT) for cloud asset requests.
    pub product_key: Option<String>,
    /// Asset version to load; `dev` resolves to `latest`.
    pub version: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            source: AssetSource::Cloud,
            cloud_url: DEFAULT_CLOUD_URL.to_owned(),
            product_key: None,
            version: "latest".to_owned(),
        }
    }
}

/// Editor behavior configuration.
#[derive(Debug, Default, Deserialize, Serialize, Hash)]
#[serde(default)]
pub struct EditorConfig {
    /// Text editor style set, one `label=element.class` rule per line.
    /// Parsed with [`parse_style_set`].
    pub style_set: String,
    /// Font list, newline- or `;`-separated.
    pub fonts: String,
}

/// Deployment path configuration.
#[derive(Debug, Deserialize, Serialize, Hash)]
#[serde(default)]
pub struct PathsConfig {
    /// Public files directory, relative to the web root.
    pub public_files: String,
    /// Private files directory, relative to the web root.
    pub private_files: String,
    /// Builder module directory, relative to the web root.
    pub module_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            public_files: "sites/default/files".to_owned(),
            private_files: "sites/default/files-private".to_owned(),
            module_dir: "modules/azbuilder".to_owned(),
        }
    }
}

impl BuilderConfig {
    /// Load configuration by discovering `azbuilder.toml` in `start_dir` or
    /// any of its ancestors.
    ///
    /// Returns defaults when no config file exists.
    pub fn load(start_dir: &Path) -> Result<Self, ConfigError> {
        match discover(start_dir) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&raw)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply CLI overrides on top of the loaded configuration.
    pub fn apply_cli(&mut self, cli: CliSettings) {
        if let Some(source) = cli.assets_source {
            self.assets.source = source;
        }
        if let Some(cloud_url) = cli.cloud_url {
            self.assets.cloud_url = cloud_url;
        }
        if let Some(product_key) = cli.product_key {
            self.assets.product_key = Some(product_key);
        }
        if let Some(public_files) = cli.public_files {
            self.paths.public_files = public_files;
        }
        if let Some(private_files) = cli.private_files {
            self.paths.private_files = private_files;
        }
        if let Some(module_dir) = cli.module_dir {
            self.paths.module_dir = module_dir;
        }
    }

    /// Etag under which catalog cache entries are stored.
    ///
    /// Derived from the settings content (not the file location), so any
    /// settings change invalidates every entry without touching the cache
    /// backend.
    #[must_use]
    pub fn cache_etag(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.assets.hash(&mut hasher);
        self.editor.hash(&mut hasher);
        self.paths.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }

    /// Resolved asset version (`dev` maps to `latest`).
    #[must_use]
    pub fn asset_version(&self) -> &str {
        if self.assets.version == "dev" {
            "latest"
        } else {
            &self.assets.version
        }
    }
}

/// Walk up from `start_dir` looking for the config file.
fn discover(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = Some(start_dir);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}
