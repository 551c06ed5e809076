use crate::buffer::BoundedBuf;
use crate::error::PathError;
use crate::home::{DEFAULT_APP_NAME, DEFAULT_DIR_CAPACITY, resolve_cache_directory};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "ASHPATH_CONFIG";

/// Settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name used for the `.<app_name>/` cache suffix
    pub app_name: Option<String>,
    /// Use this directory instead of resolving one under the home directory
    pub cache_dir: Option<PathBuf>,
    /// Capacity of the fixed buffer the cache directory is resolved into
    pub path_capacity: Option<usize>,
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config file; a missing file is an error
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load from `explicit`, then `$ASHPATH_CONFIG`, then the per-user config
    /// directory. Only the per-user default may be absent.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Self::load(Path::new(&path));
        }
        match default_config_path() {
            Some(path) if path.is_file() => {
                log::debug!("Using config file: {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.app_name {
            if name.is_empty() {
                anyhow::bail!("app_name must not be empty");
            }
            if name.contains('/') || name.contains('\0') {
                anyhow::bail!("app_name must be a single path component, got: {name:?}");
            }
        }
        if self.path_capacity == Some(0) {
            anyhow::bail!("path_capacity must be greater than zero");
        }
        Ok(())
    }

    pub fn app_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    pub fn path_capacity(&self) -> usize {
        self.path_capacity.unwrap_or(DEFAULT_DIR_CAPACITY)
    }

    /// Resolve the cache directory this config points at.
    ///
    /// An explicit `cache_dir` is used as given (still subject to the
    /// capacity); otherwise `<home>/.<app_name>/` is resolved.
    pub fn resolve_cache_dir(&self) -> Result<BoundedBuf, PathError> {
        let mut buf = BoundedBuf::new(self.path_capacity());
        match &self.cache_dir {
            Some(dir) => buf.append(dir.as_os_str().as_bytes())?,
            None => resolve_cache_directory(&mut buf, self.app_name())?,
        }
        Ok(buf)
    }
}

/// `<config_dir>/ashpath/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(DEFAULT_APP_NAME).join("config.toml"))
}
