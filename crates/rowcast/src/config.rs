//! Caster configuration
//!
//! Describes where the host keeps its type classes and how canonical
//! timestamps are spelled. The defaults match ActiveRecord with the
//! PostgreSQL adapter.

use rowcast_types::{SemanticType, TypeGroup};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported number of fractional-second digits
pub const MAX_TIME_PRECISION: u8 = 9;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A namespace path has no segments
    #[error("Namespace path '{field}' must not be empty")]
    EmptyPath { field: &'static str },

    /// Fractional precision out of range
    #[error("Time precision {0} exceeds maximum of 9 digits")]
    InvalidPrecision(u8),

    /// Configuration text could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Where to find host type classes and how to format timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CasterConfig {
    /// Top-level namespace of the ORM
    pub root: Vec<String>,
    /// Built-in types, relative to the root
    pub type_namespace: Vec<String>,
    /// Database adapter types, relative to the root
    pub native_namespace: Vec<String>,
    /// Time-zone conversion module, relative to the root
    pub time_zone_namespace: Vec<String>,
    /// Fractional-second digits in normalized timestamps
    pub time_precision: u8,
}

impl Default for CasterConfig {
    fn default() -> Self {
        Self {
            root: segments(&["ActiveRecord"]),
            type_namespace: segments(&["Type"]),
            native_namespace: segments(&["ConnectionAdapters", "PostgreSQL", "OID"]),
            time_zone_namespace: segments(&["AttributeMethods", "TimeZoneConversion"]),
            time_precision: 3,
        }
    }
}

fn segments(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

impl CasterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_root(mut self, root: &[&str]) -> Self {
        self.root = segments(root);
        self
    }

    pub fn with_type_namespace(mut self, path: &[&str]) -> Self {
        self.type_namespace = segments(path);
        self
    }

    pub fn with_native_namespace(mut self, path: &[&str]) -> Self {
        self.native_namespace = segments(path);
        self
    }

    pub fn with_time_zone_namespace(mut self, path: &[&str]) -> Self {
        self.time_zone_namespace = segments(path);
        self
    }

    pub fn with_time_precision(mut self, digits: u8) -> Self {
        self.time_precision = digits;
        self
    }

    /// Check paths are non-empty and precision is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("root", &self.root),
            ("type_namespace", &self.type_namespace),
            ("native_namespace", &self.native_namespace),
            ("time_zone_namespace", &self.time_zone_namespace),
        ];
        for (field, path) in paths {
            if path.is_empty() || path.iter().any(String::is_empty) {
                return Err(ConfigError::EmptyPath { field });
            }
        }
        if self.time_precision > MAX_TIME_PRECISION {
            return Err(ConfigError::InvalidPrecision(self.time_precision));
        }
        Ok(())
    }

    /// Full constant path of a semantic type's host class
    pub fn class_path(&self, ty: SemanticType) -> Vec<String> {
        let namespace = match ty.group() {
            TypeGroup::Required => &self.type_namespace,
            TypeGroup::Native => &self.native_namespace,
            TypeGroup::TimeZone => &self.time_zone_namespace,
        };
        let mut path = self.root.clone();
        path.extend(namespace.iter().cloned());
        path.push(class_name(ty).to_string());
        path
    }
}

/// Host class name of a semantic type within its namespace
pub const fn class_name(ty: SemanticType) -> &'static str {
    match ty {
        SemanticType::String => "String",
        SemanticType::Text => "Text",
        SemanticType::Float | SemanticType::NativeFloat => "Float",
        SemanticType::Integer | SemanticType::NativeInteger => "Integer",
        SemanticType::Boolean => "Boolean",
        SemanticType::DateTime | SemanticType::NativeDateTime => "DateTime",
        SemanticType::Uuid => "Uuid",
        SemanticType::Json => "Json",
        SemanticType::TimeZoneAwareDateTime => "TimeZoneConverter",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = CasterConfig::default();
        assert_eq!(
            config.class_path(SemanticType::Text),
            vec!["ActiveRecord", "Type", "Text"]
        );
        assert_eq!(
            config.class_path(SemanticType::NativeInteger),
            vec!["ActiveRecord", "ConnectionAdapters", "PostgreSQL", "OID", "Integer"]
        );
        assert_eq!(
            config.class_path(SemanticType::TimeZoneAwareDateTime),
            vec![
                "ActiveRecord",
                "AttributeMethods",
                "TimeZoneConversion",
                "TimeZoneConverter"
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            CasterConfig::from_json(r#"{"root": ["Sequel"], "time_precision": 6}"#).unwrap();
        assert_eq!(config.root, vec!["Sequel"]);
        assert_eq!(config.time_precision, 6);
        assert_eq!(config.type_namespace, vec!["Type"]);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = CasterConfig::from_json(r#"{"rooot": ["X"]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validate() {
        let config = CasterConfig::new().with_time_precision(12);
        assert_eq!(config.validate(), Err(ConfigError::InvalidPrecision(12)));

        let config = CasterConfig::new().with_native_namespace(&[]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPath {
                field: "native_namespace"
            })
        );
    }
}
