use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;
use crate::hasher::{DEFAULT_COST, MAX_COST, MIN_COST};
use crate::model::Algorithm;

pub const ENV_ALGORITHM: &str = "PWHASH_ALGORITHM";
pub const ENV_COST: &str = "PWHASH_COST";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub algorithm: Algorithm,
    /// bcrypt work factor; Argon2 uses its default parameters.
    pub cost: u32,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bcrypt,
            cost: DEFAULT_COST,
        }
    }
}

impl LocalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_COST..=MAX_COST).contains(&self.cost) {
            return Err(ConfigError::InvalidCost(self.cost));
        }
        Ok(())
    }

    /// Applies `PWHASH_ALGORITHM` / `PWHASH_COST` on top of the file values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(ENV_ALGORITHM) {
            self.algorithm =
                Algorithm::from_name(&name).ok_or(ConfigError::UnknownAlgorithm(name))?;
        }
        if let Some(raw) = lookup(ENV_COST) {
            let cost = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::CostNotANumber(raw.clone()))?;
            self.cost = cost;
        }
        self.validate()
    }
}

fn config_path() -> anyhow::Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "PasswordHasher", "PasswordHasher")
        .ok_or_else(|| anyhow::anyhow!("cannot resolve config dir"))?;
    fs::create_dir_all(dirs.config_dir())?;
    Ok(dirs.config_dir().join("config.json"))
}

pub fn load() -> anyhow::Result<LocalConfig> {
    load_from(&config_path()?)
}

pub fn save(cfg: &LocalConfig) -> anyhow::Result<()> {
    save_to(&config_path()?, cfg)
}

pub fn load_from(p: &Path) -> anyhow::Result<LocalConfig> {
    if !p.exists() {
        return Ok(LocalConfig::default());
    }
    let bytes = fs::read(p).with_context(|| format!("reading {}", p.display()))?;
    let cfg: LocalConfig =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", p.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn save_to(p: &Path, cfg: &LocalConfig) -> anyhow::Result<()> {
    let bytes = serde_json::to_vec_pretty(cfg)?;
    fs::write(p, bytes).with_context(|| format!("writing {}", p.display()))?;
    Ok(())
}

/// What was read from `config.json`, and what the app runs with after the
/// environment overrides. Only `file` is ever written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub file: LocalConfig,
    pub effective: LocalConfig,
}

impl ResolvedConfig {
    pub fn from_file<F>(file: LocalConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut effective = file.clone();
        if let Err(e) = effective.apply_env(lookup) {
            tracing::warn!("ignoring environment overrides: {e}");
            effective = file.clone();
        }
        Self { file, effective }
    }

    /// Moves the fields the user changed (`effective` -> `edited`) into the
    /// file config. Fields still set by the environment stay out of the file.
    pub fn apply_edit(&mut self, edited: &LocalConfig) {
        if edited.algorithm != self.effective.algorithm {
            self.file.algorithm = edited.algorithm;
        }
        if edited.cost != self.effective.cost {
            self.file.cost = edited.cost;
        }
        self.effective = edited.clone();
    }
}

/// Config as the app starts with it: file (or defaults on any error), then env.
pub fn resolve() -> ResolvedConfig {
    let file = match load() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("config not loaded, using defaults: {e:#}");
            LocalConfig::default()
        }
    };
    ResolvedConfig::from_file(file, |k| std::env::var(k).ok())
}
