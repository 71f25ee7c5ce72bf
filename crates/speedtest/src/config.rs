// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles speedtest.toml parsing with version validation and unknown key
//! warnings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::filter::FilterKind;

/// Config file name looked up during discovery.
pub const CONFIG_FILE_NAME: &str = "speedtest.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Default number of runs per test.
pub const DEFAULT_REPEAT: usize = 5;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "run", "output"];

/// Known keys in the `[run]` table.
const KNOWN_RUN_KEYS: &[&str] = &["repeat", "filter", "fail_on_error"];

/// Known keys in the `[output]` table.
const KNOWN_OUTPUT_KEYS: &[&str] = &["format"];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Run settings.
    #[serde(default)]
    pub run: RunConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            run: RunConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// `[run]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Runs per test (default: 5, must be at least 1).
    #[serde(default = "RunConfig::default_repeat")]
    pub repeat: usize,

    /// Filter used for summaries (default: "default").
    #[serde(default)]
    pub filter: FilterKind,

    /// Exit non-zero when any run failed.
    #[serde(default)]
    pub fail_on_error: bool,
}

impl RunConfig {
    fn default_repeat() -> usize {
        DEFAULT_REPEAT
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            repeat: DEFAULT_REPEAT,
            filter: FilterKind::default(),
            fail_on_error: false,
        }
    }
}

/// `[output]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OutputConfig {
    /// Output format (default: "text").
    #[serde(default)]
    pub format: OutputFormat,
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content.
///
/// Unknown keys are reported on stderr and otherwise ignored.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    // First check version
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version = version_check
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;

    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})",
            version, SUPPORTED_VERSION
        )));
    }

    let raw: BTreeMap<String, toml::Value> =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;
    for unknown in unknown_keys(&raw) {
        warn_unknown_key(path, &unknown);
    }

    // Parse full config
    let config: Config = toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    if config.run.repeat < 1 {
        return Err(config_error(
            "run.repeat must be at least 1".to_string(),
        ));
    }

    Ok(config)
}

/// Dotted names of keys the config format does not define.
fn unknown_keys(raw: &BTreeMap<String, toml::Value>) -> Vec<String> {
    let mut unknown = Vec::new();
    for (key, value) in raw {
        let known_children = match key.as_str() {
            "run" => KNOWN_RUN_KEYS,
            "output" => KNOWN_OUTPUT_KEYS,
            _ if KNOWN_KEYS.contains(&key.as_str()) => continue,
            _ => {
                unknown.push(key.clone());
                continue;
            }
        };
        if let toml::Value::Table(table) = value {
            unknown.extend(
                table
                    .keys()
                    .filter(|k| !known_children.contains(&k.as_str()))
                    .map(|k| format!("{}.{}", key, k)),
            );
        }
    }
    unknown
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "speedtest: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Find speedtest.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Resolve and load config from an explicit path or by discovery.
///
/// Priority:
/// 1. `-C`/`--config` (or `SPEEDTEST_CONFIG`), which must exist
/// 2. Discovery from `cwd` up to the git root
/// 3. Defaults
pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    match explicit {
        Some(path) if !path.exists() => Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        }),
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            load(path)
        }
        None => match find_config(cwd) {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                load(&path)
            }
            None => {
                tracing::debug!("no config found, using defaults");
                Ok(Config::default())
            }
        },
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
