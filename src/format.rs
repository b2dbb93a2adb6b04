//! File format selection and the codecs behind load and persist.
//!
//! Each codec parses a whole document into a flat, string-keyed mapping of
//! [`Value`]s, and serializes such a mapping back out. Top-level keys keep
//! their document casing here; the caller folds them when it fills a layer.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::layer::Layer;
use crate::value::Value;

/// A supported on-disk configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Toml => "toml",
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    /// Accepts exactly `"toml"`, `"yaml"` or `"json"`.
    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s {
            "toml" => Ok(Format::Toml),
            "yaml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Parses the file at `path` fully into a key → value mapping.
///
/// A missing file surfaces as [`ConfigError::FileNotFound`] so callers can
/// branch on it; decode failures carry the path and the codec error.
pub fn read_file(path: &Path, format: Format) -> Result<BTreeMap<String, Value>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    match format {
        Format::Toml => {
            let table: toml::Table =
                toml::from_str(&contents).map_err(|e| ConfigError::ParseToml {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            Ok(table
                .into_iter()
                .map(|(key, value)| (key, from_toml(value)))
                .collect())
        }
        Format::Yaml => {
            let mapping: serde_yaml::Mapping =
                serde_yaml::from_str(&contents).map_err(|e| ConfigError::ParseYaml {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            Ok(mapping
                .into_iter()
                .filter_map(|(key, value)| {
                    key.as_str().map(|k| (k.to_string(), from_yaml(value)))
                })
                .collect())
        }
        Format::Json => {
            let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&contents)
                .map_err(|e| ConfigError::ParseJson {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            Ok(map
                .into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect())
        }
    }
}

/// Serializes a layer to `path` as a flat document of original-case key to
/// payload, in the given format.
pub fn write_file(path: &Path, format: Format, layer: &Layer) -> Result<(), ConfigError> {
    let document: BTreeMap<&str, &Value> = layer
        .iter()
        .map(|(_, entry)| (entry.original_key.as_str(), &entry.value))
        .collect();

    let serialized = match format {
        Format::Toml => toml::to_string(&document).map_err(|e| ConfigError::EncodeToml {
            path: path.to_path_buf(),
            source: e,
        })?,
        Format::Yaml => serde_yaml::to_string(&document).map_err(|e| ConfigError::EncodeYaml {
            path: path.to_path_buf(),
            source: e,
        })?,
        Format::Json => {
            serde_json::to_string_pretty(&document).map_err(|e| ConfigError::EncodeJson {
                path: path.to_path_buf(),
                source: e,
            })?
        }
    };

    std::fs::write(path, serialized).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(x) => Value::Float(x),
        toml::Value::String(s) => Value::Str(s),
        // The value union has no datetime arm; keep the literal text.
        toml::Value::Datetime(dt) => Value::Str(dt.to_string()),
        toml::Value::Array(items) => normalize_list(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Map(
            table
                .into_iter()
                .map(|(k, v)| (k, from_toml(v)))
                .collect(),
        ),
    }
}

fn from_yaml(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Nil,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(0.0)),
        },
        serde_yaml::Value::String(s) => Value::Str(s),
        serde_yaml::Value::Sequence(items) => {
            normalize_list(items.into_iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Value::Map(
            mapping
                .into_iter()
                .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), from_yaml(v))))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(0.0)),
        },
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Array(items) => {
            normalize_list(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter().map(|(k, v)| (k, from_json(v))).collect(),
        ),
    }
}

/// Fits a document array into the value union's homogeneous list shapes.
///
/// An all-integer array becomes an integer list and an all-string array a
/// string list. Anything else is kept as a string list of each element's
/// textual rendering, since the union has no heterogeneous list shape.
fn normalize_list(items: Vec<Value>) -> Value {
    let mut ints = Vec::with_capacity(items.len());
    for item in &items {
        if let Value::Int(i) = item {
            ints.push(*i);
        }
    }
    if ints.len() == items.len() {
        return Value::IntList(ints);
    }

    let mut strings = Vec::with_capacity(items.len());
    for item in &items {
        if let Value::Str(s) = item {
            strings.push(s.clone());
        }
    }
    if strings.len() == items.len() {
        return Value::StrList(strings);
    }

    Value::StrList(items.iter().map(crate::coerce::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_from_str() {
        assert_eq!("toml".parse::<Format>().unwrap(), Format::Toml);
        assert_eq!("yaml".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!(matches!(
            "ini".parse::<Format>(),
            Err(ConfigError::UnsupportedFormat(s)) if s == "ini"
        ));
    }

    #[test]
    fn test_read_missing_file_is_distinguished() {
        let result = read_file(Path::new("/nonexistent/config.toml"), Format::Toml);
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_read_toml_document() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = 8080").unwrap();
        writeln!(file, "debug = true").unwrap();
        writeln!(file, "rate = 0.5").unwrap();
        writeln!(file, "name = \"app\"").unwrap();

        let doc = read_file(file.path(), Format::Toml).unwrap();
        assert_eq!(doc["port"], Value::Int(8080));
        assert_eq!(doc["debug"], Value::Bool(true));
        assert_eq!(doc["rate"], Value::Float(0.5));
        assert_eq!(doc["name"], Value::Str("app".into()));
    }

    #[test]
    fn test_read_yaml_lists_and_maps() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "ints: [1, 2, 3]\nstrings: [a, b]\nmixed: [1, \"4\"]\nnested:\n  a: 1\n  b: other\n"
        )
        .unwrap();

        let doc = read_file(file.path(), Format::Yaml).unwrap();
        assert_eq!(doc["ints"], Value::IntList(vec![1, 2, 3]));
        assert_eq!(
            doc["strings"],
            Value::StrList(vec!["a".into(), "b".into()])
        );
        // Mixed arrays degrade to their textual renderings.
        assert_eq!(doc["mixed"], Value::StrList(vec!["1".into(), "4".into()]));
        match &doc["nested"] {
            Value::Map(map) => {
                assert_eq!(map["a"], Value::Int(1));
                assert_eq!(map["b"], Value::Str("other".into()));
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn test_read_json_integers_stay_integers() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"port\": 8080, \"rate\": 0.5, \"off\": null}}").unwrap();

        let doc = read_file(file.path(), Format::Json).unwrap();
        assert_eq!(doc["port"], Value::Int(8080));
        assert_eq!(doc["rate"], Value::Float(0.5));
        assert_eq!(doc["off"], Value::Nil);
    }

    #[test]
    fn test_read_malformed_document() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not: [valid").unwrap();
        assert!(matches!(
            read_file(file.path(), Format::Yaml),
            Err(ConfigError::ParseYaml { .. })
        ));
    }

    #[test]
    fn test_write_preserves_original_casing() {
        let mut layer = Layer::new();
        layer.insert("ServerPort", Value::Int(8080));
        layer.insert("debug", Value::Bool(true));

        let file = NamedTempFile::new().unwrap();
        write_file(file.path(), Format::Json, &layer).unwrap();

        let doc = read_file(file.path(), Format::Json).unwrap();
        assert_eq!(doc["ServerPort"], Value::Int(8080));
        assert_eq!(doc["debug"], Value::Bool(true));
    }
}
