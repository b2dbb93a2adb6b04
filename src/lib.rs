//! Layered configuration with permissive typed access.
//!
//! A [`ConfigManager`] merges four sources of configuration into one flat,
//! case-insensitive key space: programmatic defaults, a construction-time
//! snapshot of the process environment, a TOML/YAML/JSON file, and explicit
//! runtime overrides. Typed getters read the merged view with best-effort
//! coercion and never fail; a key that is missing or holds the wrong shape
//! yields the requested type's zero value.
//!
//! ## Example
//!
//! ```
//! use strata_config::ConfigManager;
//! use std::time::Duration;
//!
//! let config = ConfigManager::new();
//! config.set_default("port", 8080);
//! config.set_default("timeout", "30s");
//! config.set("debug", "true");
//!
//! assert_eq!(config.get_int("port"), 8080);
//! assert_eq!(config.get_duration("timeout"), Duration::from_secs(30));
//! assert!(config.get_bool("debug"));
//! assert_eq!(config.get_string("unset"), "");
//! ```
//!
//! Loading a file replaces the override tier wholesale:
//!
//! ```no_run
//! use strata_config::ConfigManager;
//!
//! let config = ConfigManager::new();
//! config.set_config_type("yaml")?;
//! config.set_config_file("config.yaml");
//! config.read_in_config()?;
//! # Ok::<(), strata_config::ConfigError>(())
//! ```

pub mod coerce;
mod error;
mod format;
pub mod global;
mod layer;
mod manager;
mod value;

pub use error::ConfigError;
pub use format::Format;
pub use layer::{combine, Layer};
pub use manager::ConfigManager;
pub use value::{Entry, Value};
