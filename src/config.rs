//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgchart/orgchart.toml`
//! 3. Local config: `<project_dir>/.orgchart.toml`
//! 4. Environment variables: `ORGCHART_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::RootPolicy;

/// Unified configuration for orgchart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Employee CSV to read
    pub input: PathBuf,
    /// Where `build` writes the chart JSON
    pub output: PathBuf,
    /// Root selection when several records have no manager
    pub root_policy: RootPolicy,
    /// Pretty-print exported JSON
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("public/job_assesment.csv"),
            output: PathBuf::from("public/treeData.json"),
            root_policy: RootPolicy::Unique,
            pretty: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub root_policy: Option<RootPolicy>,
    pub pretty: Option<bool>,
}

/// Get the XDG config directory for orgchart.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgchart").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgchart.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".orgchart.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a path; unexpandable paths are kept as-is.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            input: overlay.input.clone().unwrap_or_else(|| self.input.clone()),
            output: overlay.output.clone().unwrap_or_else(|| self.output.clone()),
            root_policy: overlay.root_policy.unwrap_or(self.root_policy),
            pretty: overlay.pretty.unwrap_or(self.pretty),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.orgchart.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ORGCHART_* environment variables as explicit overrides.
    ///
    /// `ORGCHART_ROOT_POLICY` maps to `root_policy`: the prefix is split off at
    /// one underscore, nested keys would use two.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORGCHART")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("input") {
            settings.input = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("output") {
            settings.output = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("root_policy") {
            settings.root_policy = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_bool("pretty") {
            settings.pretty = val;
        }

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        self.input = expand_path(&self.input);
        self.output = expand_path(&self.output);
    }

    /// Render as TOML (used by `config show` and `config init`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlay_wins_where_specified() {
        let base = Settings::default();
        let overlay = RawSettings {
            output: Some(PathBuf::from("out/chart.json")),
            root_policy: Some(RootPolicy::First),
            ..Default::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.input, base.input);
        assert_eq!(merged.output, PathBuf::from("out/chart.json"));
        assert_eq!(merged.root_policy, RootPolicy::First);
        assert!(merged.pretty);
    }

    #[test]
    fn test_raw_settings_parse_from_toml() {
        let raw: RawSettings = toml::from_str("root_policy = \"first\"\npretty = false\n").unwrap();
        assert_eq!(raw.root_policy, Some(RootPolicy::First));
        assert_eq!(raw.pretty, Some(false));
        assert!(raw.input.is_none());
    }

    #[test]
    fn test_settings_roundtrip_through_toml() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(rendered.contains("root_policy = \"unique\""));
        let parsed: Settings = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
