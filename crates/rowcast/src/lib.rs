//! Fast database value coercion
//!
//! Given a column's declared type and a raw value read from a database row,
//! rowcast produces the value the ORM's own type layer would produce, without
//! going through the ORM for the common types:
//!
//! - **String / Text / UUID**: strings pass through, booleans become `t`/`f`
//! - **Float**: numeric prefix of strings is parsed, trailing garbage ignored
//! - **Integer**: strings parsed in base 10, floats truncated, booleans 1/0
//! - **JSON**: structured values pass through, strings go to the host
//! - **Boolean**: `0`, `f...`, `off` are false, empty is NULL, the rest true
//! - **DateTime**: canonical UTC ISO-8601 strings pass through, others are
//!   reparsed and reformatted
//!
//! Everything else falls back to the host's own coercion.
//!
//! # Example
//!
//! ```ignore
//! use rowcast::{Caster, RawValue, TypeTable};
//!
//! let caster = Caster::new(table);
//! let value = caster.cast(&column_type, &RawValue::from("042"))?;
//! assert_eq!(value, RawValue::Integer(42));
//! ```
//!
//! # Architecture
//!
//! - `ClassifierCache`: host classes resolved once and mapped to `SemanticType`
//! - `rules`: the ordered dispatch table of coercions
//! - `datetime`: ISO-8601 fast path and reparsing
//! - `Caster`: ties the above together and performs host fallback

pub mod classifier;
pub mod config;
pub mod datetime;
pub mod engine;
pub mod error;
pub mod global;
pub mod host;
pub mod rules;

pub use classifier::ClassifierCache;
pub use config::{CasterConfig, ConfigError};
pub use datetime::DateTimeNormalizer;
pub use engine::Caster;
pub use error::{CastError, CastResult, HostError, LookupError};
pub use global::{install, installed, type_cast};
pub use host::{TypeMetadata, TypeNamespace, TypeTable};
pub use rules::{Rule, RuleContext, RULES};

pub use rowcast_types::*;
