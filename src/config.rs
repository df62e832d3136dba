//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/reltree/reltree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `RELTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{TreeBuilder, MAX_ITERATIONS};
use crate::infrastructure::{InfraError, InfraResult};
use crate::render::DotStyle;

/// Unified configuration for reltree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Pass ceiling for relation deserialization
    pub max_iterations: usize,
    /// Default node style for DOT output
    pub style: DotStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            style: DotStyle::default(),
        }
    }
}

/// Raw style for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawStyle {
    pub shape: Option<String>,
    pub color: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_iterations: Option<usize>,
    pub style: RawStyle,
}

/// Get the XDG config directory for reltree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "reltree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("reltree.toml"))
}

fn load_raw_settings(path: &Path) -> InfraResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| InfraError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| InfraError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay values win if specified, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_iterations: overlay.max_iterations.unwrap_or(self.max_iterations),
            style: DotStyle {
                shape: overlay
                    .style
                    .shape
                    .clone()
                    .unwrap_or_else(|| self.style.shape.clone()),
                color: overlay
                    .style
                    .color
                    .clone()
                    .unwrap_or_else(|| self.style.color.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, must exist if given
    pub fn load(config_file: Option<&Path>) -> InfraResult<Self> {
        Self::load_layers(global_config_path().as_deref(), config_file)
    }

    /// Load settings from an explicit global config location.
    ///
    /// A missing global file is skipped, a missing explicit file is an error.
    #[instrument(level = "debug")]
    pub fn load_layers(global: Option<&Path>, config_file: Option<&Path>) -> InfraResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global.filter(|p| p.exists()) {
            debug!("global config: {}", global_path.display());
            current = current.merge_with(&load_raw_settings(global_path)?);
        }

        if let Some(path) = config_file {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply RELTREE_* environment variables as explicit overrides.
    ///
    /// `RELTREE_MAX_ITERATIONS`, `RELTREE_STYLE__SHAPE`, `RELTREE_STYLE__COLOR`
    fn apply_env_overrides(mut settings: Self) -> InfraResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RELTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = present(config.get_int("max_iterations"))? {
            settings.max_iterations = usize::try_from(val).map_err(|_| InfraError::Config {
                message: format!("max_iterations out of range: {val}"),
            })?;
        }
        if let Some(val) = present(config.get_string("style.shape"))? {
            settings.style.shape = val;
        }
        if let Some(val) = present(config.get_string("style.color"))? {
            settings.style.color = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> InfraResult<()> {
        if self.max_iterations == 0 {
            return Err(InfraError::Config {
                message: "max_iterations must be at least 1".into(),
            });
        }
        if self.style.shape.is_empty() || self.style.color.is_empty() {
            return Err(InfraError::Config {
                message: "style.shape and style.color must not be empty".into(),
            });
        }
        Ok(())
    }

    pub fn tree_builder(&self) -> TreeBuilder {
        TreeBuilder::new().with_max_iterations(self.max_iterations)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> InfraResult<String> {
        toml::to_string_pretty(self).map_err(|e| InfraError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# reltree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/reltree/reltree.toml
#   Explicit: --config <file>
#   Env:      RELTREE_MAX_ITERATIONS, RELTREE_STYLE__SHAPE, RELTREE_STYLE__COLOR

# Passes over the relation list before giving up on unresolved parents
# max_iterations = 10000

[style]
# Defaults for nodes without their own "shape"/"color" attribute
# shape = "ellipse"
# color = "lightblue"
"#
        .to_string()
    }
}

// unset keys are fine, unparsable ones are not
fn present<T>(value: Result<T, ConfigError>) -> InfraResult<Option<T>> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> InfraError {
    InfraError::Config {
        message: e.to_string(),
    }
}
