//! Central Configuration Constants
//!
//! Single source of truth for harness-level defaults.
//! Rule thresholds live in `logic::rules::defaults`, not here.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Enforcement Engine";

/// Env var pointing at a JSON rule configuration file
pub const CONFIG_PATH_ENV: &str = "ENFORCEMENT_CONFIG";

/// Env var selecting a built-in preset when no config file is given
pub const PRESET_ENV: &str = "ENFORCEMENT_PRESET";

/// Default preset name
pub const DEFAULT_PRESET: &str = "default";

/// Default log filter for the binary (overridden by RUST_LOG)
pub const DEFAULT_LOG_FILTER: &str = "info";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get rule config path from environment, if set and non-empty
pub fn get_config_path() -> Option<String> {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// Get preset name from environment or use default
pub fn get_preset() -> String {
    std::env::var(PRESET_ENV)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|_| DEFAULT_PRESET.to_string())
}
