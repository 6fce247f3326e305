//! Rule Config Resolution
//!
//! Chọn nguồn config cho một run.
//! Precedence: explicit path > $ENFORCEMENT_CONFIG > explicit preset > $ENFORCEMENT_PRESET > "default".

use std::path::{Path, PathBuf};

use crate::constants;
use super::config::RuleConfig;
use super::error::{ConfigError, ConfigResult};

/// Resolve using the process environment for fallbacks
pub fn resolve_config(path: Option<&Path>, preset: Option<&str>) -> ConfigResult<RuleConfig> {
    let env_path = constants::get_config_path().map(PathBuf::from);
    resolve_config_with(path, env_path.as_deref(), preset, &constants::get_preset())
}

/// Resolve with every source passed in explicitly
pub fn resolve_config_with(
    path: Option<&Path>,
    env_path: Option<&Path>,
    preset: Option<&str>,
    env_preset: &str,
) -> ConfigResult<RuleConfig> {
    if let Some(path) = path.or(env_path) {
        return RuleConfig::from_json_file(path);
    }

    let preset = preset.unwrap_or(env_preset).to_lowercase();
    RuleConfig::preset(&preset).ok_or(ConfigError::UnknownPreset(preset))
}
