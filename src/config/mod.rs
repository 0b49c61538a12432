//! Configuration management for `steptree`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`STEPTREE_*`)
//! 3. Project config (`.steptree.yaml` in the working directory, or `--config`)
//! 4. User config (`~/.config/steptree/config.yaml`)
//! 5. Defaults
//!
//! Recognized keys:
//! - `not-failing`: statuses that must not count as failing when resolving
//!   step status (YAML list or comma separated string)
//! - `json`: emit JSON instead of text

use crate::error::{Result, StepTreeError};
use crate::status::NotFailingStatuses;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Project config filename looked up in the working directory.
pub const PROJECT_CONFIG_FILENAME: &str = ".steptree.yaml";
/// Prefix for environment overrides.
const ENV_PREFIX: &str = "STEPTREE_";

const NOT_FAILING_KEYS: &[&str] = &["not-failing", "not_failing", "notfailing"];
const JSON_KEYS: &[&str] = &["json"];

/// A configuration layer of flattened `key -> value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&contents)?;
        Ok(layer_from_yaml_value(&value))
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from `STEPTREE_*` variables.
    ///
    /// `STEPTREE_NOT_FAILING=skipped` becomes `not-failing: skipped`.
    #[must_use]
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                let normalized = stripped.to_lowercase().replace('_', "-");
                layer.values.insert(normalized, value);
            }
        }
        layer
    }

    fn get(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.values.get(*key))
            .map(String::as_str)
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub not_failing: Option<String>,
    pub json: Option<bool>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(not_failing) = &self.not_failing {
            layer
                .values
                .insert("not-failing".to_string(), not_failing.clone());
        }
        if let Some(json) = self.json {
            layer.values.insert("json".to_string(), json.to_string());
        }

        layer
    }
}

/// Load user config (~/.config/steptree/config.yaml).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigLayer> {
    let Ok(home) = env::var("HOME") else {
        return Ok(ConfigLayer::default());
    };
    let path = Path::new(&home)
        .join(".config")
        .join("steptree")
        .join("config.yaml");
    ConfigLayer::from_yaml(&path)
}

/// Load project config from `.steptree.yaml` in `dir`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(dir: &Path) -> Result<ConfigLayer> {
    ConfigLayer::from_yaml(&dir.join(PROJECT_CONFIG_FILENAME))
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    layer
        .values
        .insert("not-failing".to_string(), String::new());
    layer.values.insert("json".to_string(), "false".to_string());
    layer
}

/// Load configuration with the documented precedence order.
///
/// An explicit `cli.config` path replaces the project config lookup and
/// must exist.
///
/// # Errors
///
/// Returns an error if any config file cannot be read or parsed, or the
/// explicit config path does not exist.
pub fn load_config(project_dir: &Path, cli: &CliOverrides) -> Result<ConfigLayer> {
    let defaults = default_config_layer();
    let user = load_user_config()?;
    let project = match &cli.config {
        Some(path) => {
            if !path.is_file() {
                return Err(StepTreeError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            ConfigLayer::from_yaml(path)?
        }
        None => load_project_config(project_dir)?,
    };
    let env_layer = ConfigLayer::from_env();
    let cli_layer = cli.as_layer();

    Ok(ConfigLayer::merge_layers(&[
        defaults, user, project, env_layer, cli_layer,
    ]))
}

/// Typed view of the merged configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportConfig {
    pub not_failing: NotFailingStatuses,
    pub json: bool,
}

impl ReportConfig {
    /// Interpret a merged layer.
    ///
    /// # Errors
    ///
    /// Returns an error if `not-failing` names an unknown status or `json`
    /// is not a boolean.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let not_failing = match layer.get(NOT_FAILING_KEYS) {
            Some(value) => NotFailingStatuses::parse_list(value)?,
            None => NotFailingStatuses::none(),
        };
        let json = match layer.get(JSON_KEYS) {
            Some(value) => parse_bool(value).ok_or_else(|| {
                StepTreeError::Config(format!("json must be true or false, got '{value}'"))
            })?,
            None => false,
        };
        Ok(Self { not_failing, json })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn layer_from_yaml_value(value: &serde_yaml::Value) -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    flatten_yaml(value, "", &mut layer.values);
    layer
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        serde_yaml::Value::Sequence(values) => {
            let joined = values
                .iter()
                .filter_map(yaml_scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.insert(prefix.to_string(), joined);
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}
