//! A process-wide default store for application-boundary convenience.
//!
//! Library code should take a [`ConfigManager`] explicitly; these free
//! functions exist so an application binary can skip plumbing one through.
//! The instance is created on first use and captures the environment at that
//! moment.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use crate::error::ConfigError;
use crate::manager::ConfigManager;
use crate::value::Value;

static DEFAULT: LazyLock<ConfigManager> = LazyLock::new(ConfigManager::new);

/// Returns the process-wide default store.
pub fn default_manager() -> &'static ConfigManager {
    &DEFAULT
}

/// See [`ConfigManager::set_config_type`].
pub fn set_config_type(name: &str) -> Result<(), ConfigError> {
    DEFAULT.set_config_type(name)
}

/// See [`ConfigManager::set_config_name`].
pub fn set_config_name(name: &str) {
    DEFAULT.set_config_name(name);
}

/// See [`ConfigManager::set_config_file`].
pub fn set_config_file(path: impl AsRef<Path>) {
    DEFAULT.set_config_file(path);
}

/// See [`ConfigManager::set_env_prefix`].
pub fn set_env_prefix(prefix: &str) {
    DEFAULT.set_env_prefix(prefix);
}

/// See [`ConfigManager::use_explicit_defaults`].
pub fn use_explicit_defaults(enable: bool) {
    DEFAULT.use_explicit_defaults(enable);
}

/// See [`ConfigManager::config_file_used`].
pub fn config_file_used() -> PathBuf {
    DEFAULT.config_file_used()
}

/// See [`ConfigManager::read_in_config`].
pub fn read_in_config() -> Result<(), ConfigError> {
    DEFAULT.read_in_config()
}

/// See [`ConfigManager::write_config`].
pub fn write_config() -> Result<(), ConfigError> {
    DEFAULT.write_config()
}

/// See [`ConfigManager::set`].
pub fn set(key: &str, value: impl Into<Value>) {
    DEFAULT.set(key, value);
}

/// See [`ConfigManager::set_default`].
pub fn set_default(key: &str, value: impl Into<Value>) {
    DEFAULT.set_default(key, value);
}

/// See [`ConfigManager::get_bool`].
pub fn get_bool(key: &str) -> bool {
    DEFAULT.get_bool(key)
}

/// See [`ConfigManager::get_int`].
pub fn get_int(key: &str) -> i64 {
    DEFAULT.get_int(key)
}

/// See [`ConfigManager::get_string`].
pub fn get_string(key: &str) -> String {
    DEFAULT.get_string(key)
}

/// See [`ConfigManager::get_duration`].
pub fn get_duration(key: &str) -> Duration {
    DEFAULT.get_duration(key)
}

/// See [`ConfigManager::get_string_slice`].
pub fn get_string_slice(key: &str) -> Option<Vec<String>> {
    DEFAULT.get_string_slice(key)
}

/// See [`ConfigManager::get_int_slice`].
pub fn get_int_slice(key: &str) -> Option<Vec<i64>> {
    DEFAULT.get_int_slice(key)
}

/// See [`ConfigManager::get_string_map`].
pub fn get_string_map(key: &str) -> Option<BTreeMap<String, Value>> {
    DEFAULT.get_string_map(key)
}
