//! Rowcast data model
//!
//! This crate defines the values the cast engine works on:
//! - Semantic column types (String, Integer, DateTime, database-native variants, ...)
//! - Host class identities used to recognise those types
//! - Dynamic row values as produced by a database driver
//! - Three-way rule outcomes (handled, null, deferred to the host)

pub mod outcome;
pub mod semantic_type;
pub mod value;

pub use outcome::*;
pub use semantic_type::*;
pub use value::*;
