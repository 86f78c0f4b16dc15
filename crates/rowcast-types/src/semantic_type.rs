//! Semantic column types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a class in the host's type table
///
/// Two handles are equal only when they name the same host class; the
/// wrapped number carries no structure of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(u64);

impl ClassId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Resolution group a semantic type belongs to
///
/// Required types must always be present in the host. The other groups are
/// resolved independently and may be missing entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeGroup {
    /// Built-in ORM types
    Required,
    /// Database adapter specific types
    Native,
    /// Time-zone conversion wrapper
    TimeZone,
}

impl fmt::Display for TypeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeGroup::Required => write!(f, "required"),
            TypeGroup::Native => write!(f, "native"),
            TypeGroup::TimeZone => write!(f, "time-zone"),
        }
    }
}

/// Declared column types the cast engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    /// Short string column
    String,
    /// Long text column
    Text,
    /// Floating point column
    Float,
    /// Integer column
    Integer,
    /// Boolean column
    Boolean,
    /// Timestamp column
    DateTime,
    /// Database-native integer
    NativeInteger,
    /// Database-native float
    NativeFloat,
    /// Database-native UUID
    Uuid,
    /// Database-native JSON
    Json,
    /// Database-native timestamp
    NativeDateTime,
    /// Time-zone aware wrapper around a timestamp column
    TimeZoneAwareDateTime,
}

impl SemanticType {
    /// Every semantic type, required ones first
    pub const ALL: [SemanticType; 12] = [
        Self::String,
        Self::Text,
        Self::Float,
        Self::Integer,
        Self::Boolean,
        Self::DateTime,
        Self::NativeInteger,
        Self::NativeFloat,
        Self::Uuid,
        Self::Json,
        Self::NativeDateTime,
        Self::TimeZoneAwareDateTime,
    ];

    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Text => "Text",
            Self::Float => "Float",
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::NativeInteger => "NativeInteger",
            Self::NativeFloat => "NativeFloat",
            Self::Uuid => "Uuid",
            Self::Json => "Json",
            Self::NativeDateTime => "NativeDateTime",
            Self::TimeZoneAwareDateTime => "TimeZoneAwareDateTime",
        }
    }

    /// Get the resolution group
    pub const fn group(&self) -> TypeGroup {
        match self {
            Self::String
            | Self::Text
            | Self::Float
            | Self::Integer
            | Self::Boolean
            | Self::DateTime => TypeGroup::Required,
            Self::NativeInteger
            | Self::NativeFloat
            | Self::Uuid
            | Self::Json
            | Self::NativeDateTime => TypeGroup::Native,
            Self::TimeZoneAwareDateTime => TypeGroup::TimeZone,
        }
    }

    /// Check if the host may legitimately lack this type
    pub const fn is_optional(&self) -> bool {
        !matches!(self.group(), TypeGroup::Required)
    }

    /// Check if this type is temporal
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::DateTime | Self::NativeDateTime | Self::TimeZoneAwareDateTime
        )
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
