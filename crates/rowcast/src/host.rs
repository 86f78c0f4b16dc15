//! Host collaborators
//!
//! The cast engine never owns the ORM's type classes. It reaches them through
//! two seams:
//! - [`TypeNamespace`] resolves class identities by nested name
//! - [`TypeMetadata`] is a column's type object, exposing its class and the
//!   ORM's own database-value coercion

use crate::error::{HostError, LookupError};
use indexmap::IndexMap;
use parking_lot::RwLock;
use rowcast_types::{ClassId, RawValue};
use std::sync::Arc;

/// Resolves host classes by their nested constant path
pub trait TypeNamespace: Send + Sync {
    /// Look up a class, e.g. `["ActiveRecord", "Type", "String"]`
    fn lookup(&self, path: &[&str]) -> Result<ClassId, LookupError>;
}

impl<T: TypeNamespace + ?Sized> TypeNamespace for Arc<T> {
    fn lookup(&self, path: &[&str]) -> Result<ClassId, LookupError> {
        (**self).lookup(path)
    }
}

impl<T: TypeNamespace + ?Sized> TypeNamespace for &T {
    fn lookup(&self, path: &[&str]) -> Result<ClassId, LookupError> {
        (**self).lookup(path)
    }
}

/// A column's type object as handed over by the host ORM
pub trait TypeMetadata {
    /// Class identity of this type object
    fn class_id(&self) -> ClassId;

    /// The ORM's standard coercion of a database value for this type
    fn cast_from_database(&self, value: &RawValue) -> Result<RawValue, HostError>;
}

/// In-memory type namespace
///
/// Classes are registered by path and receive sequential identities.
#[derive(Clone, Default)]
pub struct TypeTable {
    inner: Arc<RwLock<TableInner>>,
}

#[derive(Default)]
struct TableInner {
    classes: IndexMap<String, ClassId>,
    next_id: u64,
}

impl TypeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class path, returning its identity
    ///
    /// Registering the same path twice returns the original identity.
    pub fn register(&self, path: &[&str]) -> ClassId {
        let mut inner = self.inner.write();
        if let Some(id) = inner.classes.get(&path.join("::")) {
            return *id;
        }
        inner.next_id += 1;
        let id = ClassId::new(inner.next_id);
        inner.classes.insert(path.join("::"), id);
        id
    }

    /// Remove a class path
    pub fn remove(&self, path: &[&str]) -> Option<ClassId> {
        self.inner.write().classes.shift_remove(&path.join("::"))
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.inner.read().classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().classes.is_empty()
    }
}

impl TypeNamespace for TypeTable {
    /// Missing classes under a namespace nothing was registered in are
    /// reported as an unavailable subsystem rather than a missing constant.
    fn lookup(&self, path: &[&str]) -> Result<ClassId, LookupError> {
        let inner = self.inner.read();
        if let Some(id) = inner.classes.get(&path.join("::")) {
            return Ok(*id);
        }

        let Some((_, parent)) = path.split_last() else {
            return Err(LookupError::missing(path));
        };
        if parent.is_empty() {
            return Err(LookupError::missing(path));
        }
        let prefix = format!("{}::", parent.join("::"));
        if inner.classes.keys().any(|key| key.starts_with(&prefix)) {
            Err(LookupError::missing(path))
        } else {
            Err(LookupError::unavailable(parent.join("::")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let table = TypeTable::new();
        let string = table.register(&["AR", "Type", "String"]);
        let text = table.register(&["AR", "Type", "Text"]);

        assert_ne!(string, text);
        assert_eq!(table.lookup(&["AR", "Type", "String"]), Ok(string));
        assert_eq!(table.register(&["AR", "Type", "String"]), string);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_missing_lookup() {
        let table = TypeTable::new();
        table.register(&["AR", "Type", "String"]);
        assert_eq!(
            table.lookup(&["AR", "Type", "Nope"]),
            Err(LookupError::MissingConstant {
                path: "AR::Type::Nope".to_string()
            })
        );
        assert_eq!(
            table.lookup(&["Nope"]),
            Err(LookupError::MissingConstant {
                path: "Nope".to_string()
            })
        );
    }

    #[test]
    fn test_unloaded_namespace_is_unavailable() {
        let table = TypeTable::new();
        table.register(&["AR", "Type", "String"]);
        assert_eq!(
            table.lookup(&["AR", "ConnectionAdapters", "PostgreSQL", "OID", "Json"]),
            Err(LookupError::SubsystemUnavailable {
                name: "AR::ConnectionAdapters::PostgreSQL::OID".to_string()
            })
        );
    }

    #[test]
    fn test_remove_keeps_identities_distinct() {
        let table = TypeTable::new();
        let a = table.register(&["A"]);
        table.remove(&["A"]);
        let b = table.register(&["B"]);
        assert_ne!(a, b);
        assert_eq!(table.lookup(&["B"]), Ok(b));
        assert!(table.lookup(&["A"]).is_err());
    }

    #[test]
    fn test_shared_clone_sees_registrations() {
        let table = TypeTable::new();
        let shared = table.clone();
        let id = table.register(&["X"]);
        assert_eq!(shared.lookup(&["X"]), Ok(id));
    }
}
