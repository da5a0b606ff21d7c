use anyhow::{bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::bencode::decode::{DecodeOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_DIGITS};

pub const DEFAULT_CONFIG_PATH: &str = "bencodec.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_depth: usize,
    pub max_digits: usize,
    pub allow_trailing_data: bool,
    pub indent: usize, // spaces per level in `show`
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_digits: DEFAULT_MAX_DIGITS,
            allow_trailing_data: false,
            indent: 2,
        }
    }
}

impl Config {
    /// Reads the config at `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string(self)?;
        fs::write(path, toml).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            bail!("max_depth must be at least 1");
        }
        if self.max_digits == 0 {
            bail!("max_digits must be at least 1");
        }
        Ok(())
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            max_depth: self.max_depth,
            max_digits: self.max_digits,
            allow_trailing_data: self.allow_trailing_data,
        }
    }
}
