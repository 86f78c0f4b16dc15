//! Shared test host
//!
//! A `TypeTable` populated like an ActiveRecord install, and a column type
//! whose host fallback records what it was asked to cast.

#![allow(dead_code)]

use parking_lot::Mutex;
use rowcast::{
    CasterConfig, ClassId, HostError, RawValue, SemanticType, TypeMetadata, TypeNamespace,
    TypeTable,
};
use serde_json::json;

/// Which optional type groups the simulated host has loaded
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFeatures {
    pub native: bool,
    pub time_zone: bool,
}

impl HostFeatures {
    pub fn all() -> Self {
        Self {
            native: true,
            time_zone: true,
        }
    }

    pub fn bare() -> Self {
        Self::default()
    }
}

/// Build a type table holding the requested groups
pub fn host_table(features: HostFeatures) -> TypeTable {
    let config = CasterConfig::default();
    let table = TypeTable::new();
    for ty in SemanticType::ALL {
        let loaded = match ty.group() {
            rowcast::TypeGroup::Required => true,
            rowcast::TypeGroup::Native => features.native,
            rowcast::TypeGroup::TimeZone => features.time_zone,
        };
        if loaded {
            register_path(&table, &config.class_path(ty));
        }
    }
    table
}

pub fn register_path(table: &TypeTable, path: &[String]) -> ClassId {
    let segments: Vec<&str> = path.iter().map(String::as_str).collect();
    table.register(&segments)
}

/// Class of a semantic type under the default configuration
///
/// Registers the class when the host does not have it, the way a type the
/// host never exposed through its namespace still exists at runtime.
pub fn class_of(table: &TypeTable, ty: SemanticType) -> ClassId {
    let path = CasterConfig::default().class_path(ty);
    let segments: Vec<&str> = path.iter().map(String::as_str).collect();
    table
        .lookup(&segments)
        .unwrap_or_else(|_| table.register(&segments))
}

/// What the host fallback does
#[derive(Debug, Clone, Copy)]
pub enum Fallback {
    /// Wrap the value as `{"host": value}`
    Tag,
    /// Fail with a host error
    Fail,
}

/// Column type object with a recording fallback
pub struct TestColumn {
    class: ClassId,
    fallback: Fallback,
    calls: Mutex<Vec<RawValue>>,
}

impl TestColumn {
    pub fn new(class: ClassId) -> Self {
        Self {
            class,
            fallback: Fallback::Tag,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(class: ClassId) -> Self {
        Self {
            fallback: Fallback::Fail,
            ..Self::new(class)
        }
    }

    /// Values the host fallback was invoked with
    pub fn fallback_calls(&self) -> Vec<RawValue> {
        self.calls.lock().clone()
    }
}

impl TypeMetadata for TestColumn {
    fn class_id(&self) -> ClassId {
        self.class
    }

    fn cast_from_database(&self, value: &RawValue) -> Result<RawValue, HostError> {
        self.calls.lock().push(value.clone());
        match self.fallback {
            Fallback::Tag => Ok(tagged(value)),
            Fallback::Fail => Err("host coercion failed".into()),
        }
    }
}

/// The value the tagging fallback produces for `value`
pub fn tagged(value: &RawValue) -> RawValue {
    RawValue::Other(json!({ "host": value }))
}
