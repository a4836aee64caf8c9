pub mod error;

use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use self::error::ConfigLoadError;
use crate::models::{FolioConfig, FolioConfigSource};
use crate::validation::{self, ConfigWarnings};

/// Path to a TOML or JSON configuration file.
pub const CONFIG_PATH_VAR: &str = "FOLIO_CONFIG_PATH";
/// Inline JSON configuration.
pub const CONFIG_JSON_VAR: &str = "FOLIO_CONFIG_JSON";

const CANDIDATES: &[&str] = &[
    "folio.toml",
    "folio.json",
    "config/folio.toml",
    "config/folio.json",
];

/// A validated configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: FolioConfig,
    pub source: FolioConfigSource,
    pub warnings: ConfigWarnings,
}

type Lookup = Box<dyn Fn(&str) -> Option<String>>;

/// Resolves configuration overrides.
///
/// Evaluation order:
/// 1) `$FOLIO_CONFIG_PATH` (TOML or JSON file),
/// 2) `$FOLIO_CONFIG_JSON` (inline JSON),
/// 3) the first of `folio.toml`, `folio.json`, `config/folio.toml`,
///    `config/folio.json` found under the base directory,
/// 4) defaults if none of the above is present.
pub struct ConfigLoader {
    lookup: Lookup,
    base_dir: PathBuf,
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("base_dir", &self.base_dir)
            .finish_non_exhaustive()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ConfigLoader {
    /// Read variables from the process environment, relative to the
    /// working directory.
    pub fn from_env() -> Self {
        Self::with_lookup(|key| env::var(key).ok())
    }

    /// Read variables through `lookup` instead of the process environment.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        Self {
            lookup: Box::new(lookup),
            base_dir: PathBuf::from("."),
        }
    }

    /// Directory that relative paths and default file candidates resolve
    /// against.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    fn var(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.trim().is_empty())
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (config, source) = self.resolve()?;
        let warnings = validation::validate(&config)?;

        info!(source = ?source, "configuration loaded");
        for warning in &warnings {
            warn!("{warning}");
        }

        Ok(ConfigLoad {
            config,
            source,
            warnings,
        })
    }

    fn resolve(
        &self,
    ) -> Result<(FolioConfig, FolioConfigSource), ConfigLoadError> {
        if let Some(path_str) = self.var(CONFIG_PATH_VAR) {
            let path = self.base_dir.join(path_str.trim());
            let config = FolioConfig::load_from_file(&path)?;
            return Ok((config, FolioConfigSource::EnvPath(path)));
        }

        if let Some(raw) = self.var(CONFIG_JSON_VAR) {
            let config = FolioConfig::parse_json(&raw, CONFIG_JSON_VAR)?;
            return Ok((config, FolioConfigSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let config = FolioConfig::load_from_file(&path)?;
            return Ok((config, FolioConfigSource::File(path)));
        }

        Ok((FolioConfig::default(), FolioConfigSource::Default))
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        CANDIDATES
            .iter()
            .map(|candidate| self.base_dir.join(candidate))
            .find(|path| path.exists())
    }
}

impl FolioConfig {
    /// Parse a file by extension; unknown extensions try TOML, then JSON.
    /// Does not run the guard rails.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let origin = path.display().to_string();

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents, &origin),
            Some("toml") | Some("tml") => toml::from_str(&contents)
                .map_err(|source| ConfigLoadError::Toml { origin, source }),
            _ => Self::parse_from_str(&contents, &origin),
        }
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> Result<Self, ConfigLoadError> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                ConfigLoadError::Unrecognized {
                    origin: origin.to_string(),
                    toml: toml_err.to_string(),
                    json: json_err.to_string(),
                }
            })
        })
    }

    pub fn parse_json(raw: &str, origin: &str) -> Result<Self, ConfigLoadError> {
        serde_json::from_str(raw).map_err(|source| ConfigLoadError::Json {
            origin: origin.to_string(),
            source,
        })
    }
}
