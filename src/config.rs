use crate::error::{AirscoreError, Result};
use crate::types::config::{CardConfig, Override};
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/airscore/config.toml";

/// Command-line values that take precedence over every config file.
#[derive(Debug, Clone, Default)]
pub struct CardOverrides {
    pub slug: Option<String>,
    pub pct_entity: Option<String>,
    pub temp_value: Option<Override>,
    pub hum_value: Option<Override>,
    pub use_fahrenheit: bool,
}

impl CardOverrides {
    pub fn apply(self, config: &mut CardConfig) {
        if let Some(slug) = self.slug {
            config.slug = Some(slug);
        }
        if let Some(pct_entity) = self.pct_entity {
            config.pct_entity = Some(pct_entity);
        }
        if let Some(temp_value) = self.temp_value {
            config.temp_value = Some(temp_value);
        }
        if let Some(hum_value) = self.hum_value {
            config.hum_value = Some(hum_value);
        }
        if self.use_fahrenheit {
            config.use_fahrenheit = true;
        }
    }
}

/// Loads the card config: the global file under `$HOME`, then `card_path`.
pub fn load_config(card_path: Option<&Path>) -> Result<CardConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(card_path, global.as_deref())
}

pub(crate) fn load_config_with_global(
    card_path: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<CardConfig> {
    if let Some(path) = card_path {
        if !path.exists() {
            return Err(AirscoreError::PathNotFound(path.display().to_string()));
        }
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    if let Some(path) = card_path {
        merge_file_if_exists(&mut merged, path)?;
    }

    merged
        .try_into()
        .map_err(|e: toml::de::Error| AirscoreError::ConfigParse(e.to_string()))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "merging card config");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AirscoreError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
