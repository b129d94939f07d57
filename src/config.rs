//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/typetree/typetree.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `TYPETREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::DEFAULT_HANDLER_NAMES;

/// Unified configuration for typetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Node handlers in priority order (first match wins)
    pub handlers: Vec<String>,
    /// Deepest level a node may be appended at; guards self-referential types
    pub max_depth: usize,
    /// Key field used by record lenses
    pub id_field: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            handlers: DEFAULT_HANDLER_NAMES.iter().map(|s| s.to_string()).collect(),
            max_depth: 32,
            id_field: "id".into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub handlers: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub id_field: Option<String>,
}

/// Get the XDG config directory for typetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "typetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("typetree.toml"))
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

impl Settings {
    /// Overlay wins for every field it specifies.
    ///
    /// The handler list is replaced as a whole since its order is its meaning.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            handlers: overlay
                .handlers
                .clone()
                .unwrap_or_else(|| self.handlers.clone()),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            id_field: overlay
                .id_field
                .clone()
                .unwrap_or_else(|| self.id_field.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_path` - Optional config file given on the command line
    ///
    /// A missing global file is skipped; a missing local file is an error.
    pub fn load(local_path: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(local) = local_path {
            debug!("loading local config {}", local.display());
            let raw = load_raw_settings(local)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply TYPETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TYPETREE")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("handlers")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<Vec<String>>("handlers") {
            settings.handlers = val;
        }
        if let Ok(val) = config.get::<usize>("max_depth") {
            settings.max_depth = val;
        }
        if let Ok(val) = config.get_string("id_field") {
            settings.id_field = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.id_field.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "id_field must not be empty".into(),
            });
        }
        if self.max_depth == 0 {
            return Err(ApplicationError::Config {
                message: "max_depth must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# typetree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/typetree/typetree.toml
#   Local:  file passed with --config
#   Env:    TYPETREE_* environment variables (e.g. TYPETREE_HANDLERS=array,object)

# Node handlers in priority order; the first handler that recognizes a field wins.
# Known handlers: array, record, object
# handlers = ["array", "record", "object"]

# Deepest level a field may be decomposed to (guards self-referential types)
# max_depth = 32

# Key field used in generated record lenses
# id_field = "id"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_uses_builtin_handler_order() {
        let settings = Settings::default();
        assert_eq!(settings.handlers, vec!["array", "record", "object"]);
        assert_eq!(settings.id_field, "id");
        assert!(settings.max_depth > 0);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_are_kept() {
        let base = Settings::default();
        let overlay = RawSettings {
            handlers: Some(vec!["object".into()]),
            max_depth: None,
            id_field: Some("key".into()),
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.handlers, vec!["object"]);
        assert_eq!(merged.max_depth, base.max_depth);
        assert_eq!(merged.id_field, "key");
    }

    #[test]
    fn given_zero_depth_when_validating_then_errors() {
        let settings = Settings {
            max_depth: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.handlers.is_none());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&text).unwrap();
        assert_eq!(settings.merge_with(&raw), settings);
    }
}
