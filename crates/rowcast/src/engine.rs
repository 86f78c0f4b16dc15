//! Cast engine
//!
//! Classifies a column's type object against the cached host classes, runs
//! the matching coercion rule, and falls back to the host's own coercion
//! when nothing matches or the rule declines.

use crate::classifier::ClassifierCache;
use crate::config::{CasterConfig, ConfigError};
use crate::datetime::DateTimeNormalizer;
use crate::error::{CastError, CastResult};
use crate::host::{TypeMetadata, TypeNamespace};
use crate::rules::{self, RuleContext};
use once_cell::sync::OnceCell;
use rowcast_types::{CastOutcome, RawValue, SemanticType};

/// Casts raw database values into the form their declared type requires
///
/// The classifier cache is populated on first use and never refreshed.
/// Concurrent first calls block on a single resolution pass.
pub struct Caster<N> {
    namespace: N,
    config: CasterConfig,
    context: RuleContext,
    cache: OnceCell<ClassifierCache>,
}

impl<N: TypeNamespace> Caster<N> {
    /// Create a caster with the default configuration
    pub fn new(namespace: N) -> Self {
        let config = CasterConfig::default();
        Self {
            context: RuleContext {
                normalizer: DateTimeNormalizer::new(config.time_precision),
            },
            namespace,
            config,
            cache: OnceCell::new(),
        }
    }

    /// Create a caster with a validated configuration
    pub fn with_config(namespace: N, config: CasterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            context: RuleContext {
                normalizer: DateTimeNormalizer::new(config.time_precision),
            },
            namespace,
            config,
            cache: OnceCell::new(),
        })
    }

    pub fn config(&self) -> &CasterConfig {
        &self.config
    }

    pub fn namespace(&self) -> &N {
        &self.namespace
    }

    /// Populate the classifier cache unless already done
    ///
    /// A missing required type is returned as an error and leaves the cache
    /// empty, so a later call tries again.
    pub fn ensure_populated(&self) -> CastResult<&ClassifierCache> {
        self.cache
            .get_or_try_init(|| ClassifierCache::populate(&self.namespace, &self.config))
            .map_err(CastError::from)
    }

    pub fn is_populated(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Semantic type of a column's type object, if it is a known one
    pub fn classify<M: TypeMetadata + ?Sized>(
        &self,
        meta: &M,
    ) -> CastResult<Option<SemanticType>> {
        Ok(self.ensure_populated()?.classify(meta.class_id()))
    }

    /// Run the coercion rules without host fallback
    ///
    /// Writers that serialize JSON columns themselves use this to see the
    /// `Deferred` outcome the JSON rule gives for string values.
    pub fn try_cast<M: TypeMetadata + ?Sized>(
        &self,
        meta: &M,
        value: &RawValue,
    ) -> CastResult<CastOutcome> {
        match self.classify(meta)? {
            Some(ty) => rules::dispatch(ty, value, &self.context),
            None => {
                log::trace!("no cast rule for class {}", meta.class_id());
                Ok(CastOutcome::Deferred)
            }
        }
    }

    /// Cast a value, deferring to the host when no rule handles it
    pub fn cast<M: TypeMetadata + ?Sized>(
        &self,
        meta: &M,
        value: &RawValue,
    ) -> CastResult<RawValue> {
        match self.try_cast(meta, value)? {
            CastOutcome::Handled(casted) => Ok(casted),
            CastOutcome::Null => Ok(RawValue::Null),
            CastOutcome::Deferred => {
                log::trace!(
                    "deferring {} value for class {} to host coercion",
                    value.type_name(),
                    meta.class_id()
                );
                meta.cast_from_database(value).map_err(CastError::Host)
            }
        }
    }
}

impl<N: TypeNamespace> std::fmt::Debug for Caster<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Caster")
            .field("config", &self.config)
            .field("cache", &self.cache.get())
            .finish()
    }
}
