//! The configuration store façade.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::coerce;
use crate::error::ConfigError;
use crate::format::{self, Format};
use crate::layer::{combine, Layer};
use crate::value::Value;

/// A layered configuration store.
///
/// Values come from four sources: programmatic defaults, a snapshot of the
/// process environment taken at construction, a loaded file, and explicit
/// [`set`](Self::set) calls. File and explicit values share one override
/// tier; the effective precedence, highest first, is
///
/// 1. explicit / file values,
/// 2. environment entries shadowing a registered default,
/// 3. defaults.
///
/// An environment entry whose key has neither a default nor an override is
/// invisible. Typed getters never fail: a missing key or an unconvertible
/// value yields the requested type's zero value.
///
/// All state sits behind one read/write lock, so a manager can be shared
/// across threads directly. Each call is individually consistent; callers
/// needing a stable view across several calls must synchronize externally.
///
/// ## Example
///
/// ```
/// use strata_config::ConfigManager;
///
/// let config = ConfigManager::new();
/// config.set_default("port", 8080);
/// config.set_default("debug", false);
/// config.set("debug", true);
///
/// assert_eq!(config.get_int("port"), 8080);
/// assert!(config.get_bool("Debug"));
/// ```
#[derive(Debug)]
pub struct ConfigManager {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    config_name: String,
    config_file: PathBuf,
    format: Option<Format>,
    env_prefix: String,
    explicit_defaults: bool,
    defaults: Layer,
    environment: Layer,
    overrides: Layer,
    combined: Layer,
}

impl Inner {
    /// Rebuilds the combined view. Runs inside the caller's write critical
    /// section so readers never observe a half-applied mutation.
    fn recombine(&mut self) {
        self.combined = combine(&self.defaults, &self.environment, &self.overrides);
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Creates a store, capturing the process environment once.
    ///
    /// Environment changes after this point are not observed.
    pub fn new() -> Self {
        Self::with_environment(Layer::from_env_snapshot())
    }

    fn with_environment(environment: Layer) -> Self {
        Self {
            inner: RwLock::new(Inner {
                environment,
                ..Inner::default()
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Selects the on-disk format; only `"toml"`, `"yaml"` and `"json"` are
    /// supported.
    pub fn set_config_type(&self, name: &str) -> Result<(), ConfigError> {
        let format = name.parse()?;
        self.write().format = Some(format);
        Ok(())
    }

    /// Records a logical configuration name for the store.
    pub fn set_config_name(&self, name: &str) {
        self.write().config_name = name.to_string();
    }

    /// Records the file that [`read_in_config`](Self::read_in_config) and
    /// [`write_config`](Self::write_config) operate on.
    pub fn set_config_file(&self, path: impl AsRef<Path>) {
        self.write().config_file = path.as_ref().to_path_buf();
    }

    /// Records an environment key prefix. Reserved for key namespacing;
    /// merge behavior does not consult it yet.
    pub fn set_env_prefix(&self, prefix: &str) {
        self.write().env_prefix = prefix.to_string();
    }

    /// Stores the strict-defaults flag. Advisory only: lookups do not yet
    /// require a key to have a registered default.
    pub fn use_explicit_defaults(&self, enable: bool) {
        self.write().explicit_defaults = enable;
    }

    /// Returns the currently configured file path.
    pub fn config_file_used(&self) -> PathBuf {
        self.read().config_file.clone()
    }

    /// Loads the configured file, replacing the override tier wholesale.
    ///
    /// Every key previously in that tier — from an earlier load or from
    /// [`set`](Self::set) — that the new document lacks disappears. On any
    /// error the store is left untouched. A missing file is reported as
    /// [`ConfigError::FileNotFound`].
    pub fn read_in_config(&self) -> Result<(), ConfigError> {
        let mut inner = self.write();
        let format = inner.format.ok_or(ConfigError::FormatNotSet)?;
        let document = format::read_file(&inner.config_file, format)?;
        inner.overrides = document.into_iter().collect();
        inner.recombine();
        Ok(())
    }

    /// Serializes the combined view to the configured file.
    pub fn write_config(&self) -> Result<(), ConfigError> {
        let inner = self.read();
        let format = inner.format.ok_or(ConfigError::FormatNotSet)?;
        format::write_file(&inner.config_file, format, &inner.combined)
    }

    /// Sets one value in the override tier under the case-folded key.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let mut inner = self.write();
        inner.overrides.insert(key, value.into());
        inner.recombine();
    }

    /// Registers a default for a key. Defaults sit at the bottom of the
    /// precedence order and also make a same-named environment entry
    /// eligible to shadow them.
    pub fn set_default(&self, key: &str, value: impl Into<Value>) {
        let mut inner = self.write();
        inner.defaults.insert(key, value.into());
        inner.recombine();
    }

    /// Returns the effective value coerced to a boolean, or `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        self.read()
            .combined
            .get(key)
            .is_some_and(|entry| coerce::to_bool(&entry.value))
    }

    /// Returns the effective value coerced to an integer, or `0`.
    pub fn get_int(&self, key: &str) -> i64 {
        self.read()
            .combined
            .get(key)
            .map_or(0, |entry| coerce::to_int(&entry.value))
    }

    /// Returns the effective value coerced to a string, or `""`.
    pub fn get_string(&self, key: &str) -> String {
        self.read()
            .combined
            .get(key)
            .map_or_else(String::new, |entry| coerce::to_string(&entry.value))
    }

    /// Returns the effective value coerced to a duration, or zero.
    pub fn get_duration(&self, key: &str) -> Duration {
        self.read()
            .combined
            .get(key)
            .map_or(Duration::ZERO, |entry| coerce::to_duration(&entry.value))
    }

    /// Returns the stored string list, or `None` for any other shape.
    pub fn get_string_slice(&self, key: &str) -> Option<Vec<String>> {
        self.read()
            .combined
            .get(key)
            .and_then(|entry| coerce::to_string_slice(&entry.value))
    }

    /// Returns the stored integer list, or `None` for any other shape.
    pub fn get_int_slice(&self, key: &str) -> Option<Vec<i64>> {
        self.read()
            .combined
            .get(key)
            .and_then(|entry| coerce::to_int_slice(&entry.value))
    }

    /// Returns the stored string-keyed map, or `None` for any other shape.
    /// Map values keep their stored types; no element coercion happens.
    pub fn get_string_map(&self, key: &str) -> Option<BTreeMap<String, Value>> {
        self.read()
            .combined
            .get(key)
            .and_then(|entry| coerce::to_string_map(&entry.value))
    }
}
