//! Process-wide default caster
//!
//! Embedders with a single ORM install one caster at startup and call
//! [`type_cast`] from anywhere afterwards.

use crate::config::{CasterConfig, ConfigError};
use crate::engine::Caster;
use crate::error::{CastError, CastResult};
use crate::host::{TypeMetadata, TypeNamespace};
use once_cell::sync::OnceCell;
use rowcast_types::RawValue;
use std::sync::Arc;

/// Namespace type held by the process-wide caster
pub type SharedNamespace = Arc<dyn TypeNamespace>;

static GLOBAL: OnceCell<Caster<SharedNamespace>> = OnceCell::new();

/// Install the process-wide caster
///
/// Returns `Ok(false)` when one was already installed; the first install wins.
pub fn install(namespace: SharedNamespace, config: CasterConfig) -> Result<bool, ConfigError> {
    let caster = Caster::with_config(namespace, config)?;
    Ok(GLOBAL.set(caster).is_ok())
}

pub fn installed() -> bool {
    GLOBAL.get().is_some()
}

/// The installed caster, if any
pub fn global() -> Option<&'static Caster<SharedNamespace>> {
    GLOBAL.get()
}

/// Cast a value with the process-wide caster
pub fn type_cast<M: TypeMetadata + ?Sized>(meta: &M, value: &RawValue) -> CastResult<RawValue> {
    GLOBAL.get().ok_or(CastError::NotInstalled)?.cast(meta, value)
}
