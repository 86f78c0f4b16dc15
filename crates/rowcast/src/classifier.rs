//! Type classifier cache
//!
//! Resolves the host classes of every known semantic type once and turns
//! later classification into a map lookup. Required types must resolve.
//! The database-native group and the time-zone converter are resolved
//! independently; if any lookup in a group fails the whole group stays
//! unresolved and its types simply never match.

use crate::config::CasterConfig;
use crate::error::LookupError;
use crate::host::TypeNamespace;
use rowcast_types::{ClassId, SemanticType, TypeGroup};
use std::collections::HashMap;

/// Classes of the database adapter's native types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NativeTypes {
    integer: ClassId,
    float: ClassId,
    uuid: ClassId,
    json: ClassId,
    date_time: ClassId,
}

/// Resolved class identities for all known semantic types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierCache {
    string: ClassId,
    text: ClassId,
    float: ClassId,
    integer: ClassId,
    boolean: ClassId,
    date_time: ClassId,
    native: Option<NativeTypes>,
    time_zone_converter: Option<ClassId>,
    by_class: HashMap<ClassId, SemanticType>,
}

fn resolve(
    namespace: &dyn TypeNamespace,
    config: &CasterConfig,
    ty: SemanticType,
) -> Result<ClassId, LookupError> {
    let path = config.class_path(ty);
    let segments: Vec<&str> = path.iter().map(String::as_str).collect();
    namespace.lookup(&segments)
}

fn resolve_native(
    namespace: &dyn TypeNamespace,
    config: &CasterConfig,
) -> Result<NativeTypes, LookupError> {
    Ok(NativeTypes {
        integer: resolve(namespace, config, SemanticType::NativeInteger)?,
        float: resolve(namespace, config, SemanticType::NativeFloat)?,
        uuid: resolve(namespace, config, SemanticType::Uuid)?,
        json: resolve(namespace, config, SemanticType::Json)?,
        date_time: resolve(namespace, config, SemanticType::NativeDateTime)?,
    })
}

/// Keep an optional group's result, logging why it is missing
fn optional<T>(group: TypeGroup, result: Result<T, LookupError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("{} types unavailable, leaving unresolved: {}", group, e);
            None
        }
    }
}

impl ClassifierCache {
    /// Resolve every known type from the host namespace
    ///
    /// Fails only when a required type is missing.
    pub fn populate(
        namespace: &dyn TypeNamespace,
        config: &CasterConfig,
    ) -> Result<Self, LookupError> {
        let mut cache = Self {
            string: resolve(namespace, config, SemanticType::String)?,
            text: resolve(namespace, config, SemanticType::Text)?,
            float: resolve(namespace, config, SemanticType::Float)?,
            integer: resolve(namespace, config, SemanticType::Integer)?,
            boolean: resolve(namespace, config, SemanticType::Boolean)?,
            date_time: resolve(namespace, config, SemanticType::DateTime)?,
            native: optional(TypeGroup::Native, resolve_native(namespace, config)),
            time_zone_converter: optional(
                TypeGroup::TimeZone,
                resolve(namespace, config, SemanticType::TimeZoneAwareDateTime),
            ),
            by_class: HashMap::new(),
        };

        // first registration wins if the host aliases two types to one class
        for ty in SemanticType::ALL {
            if let Some(class) = cache.handle(ty) {
                cache.by_class.entry(class).or_insert(ty);
            }
        }

        log::debug!(
            "type classifier populated: native={} time_zone={}",
            cache.has_native_types(),
            cache.has_time_zone_converter()
        );
        Ok(cache)
    }

    /// Semantic type of a host class, if it is one we know
    pub fn classify(&self, class: ClassId) -> Option<SemanticType> {
        self.by_class.get(&class).copied()
    }

    /// Resolved class of a semantic type; `None` for unresolved optional types
    pub fn handle(&self, ty: SemanticType) -> Option<ClassId> {
        match ty {
            SemanticType::String => Some(self.string),
            SemanticType::Text => Some(self.text),
            SemanticType::Float => Some(self.float),
            SemanticType::Integer => Some(self.integer),
            SemanticType::Boolean => Some(self.boolean),
            SemanticType::DateTime => Some(self.date_time),
            SemanticType::NativeInteger => self.native.map(|n| n.integer),
            SemanticType::NativeFloat => self.native.map(|n| n.float),
            SemanticType::Uuid => self.native.map(|n| n.uuid),
            SemanticType::Json => self.native.map(|n| n.json),
            SemanticType::NativeDateTime => self.native.map(|n| n.date_time),
            SemanticType::TimeZoneAwareDateTime => self.time_zone_converter,
        }
    }

    pub fn has_native_types(&self) -> bool {
        self.native.is_some()
    }

    pub fn has_time_zone_converter(&self) -> bool {
        self.time_zone_converter.is_some()
    }
}
